//! RGB colors and hex parsing.

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parse "#RRGGBB" (or "#RGB") into a `Color`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#')?;
    // `from_str_radix` alone would accept a leading '+'.
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match s.len() {
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        },
        3 => {
            // Short form: each digit is doubled ("#F80" == "#FF8800").
            let digit = |i: usize| u8::from_str_radix(&s[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#282a36"), Some(Color::rgb(0x28, 0x2a, 0x36)));
        assert_eq!(parse_hex_color("#F80"), Some(Color::rgb(255, 136, 0)));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("FF0000"), None);
        assert_eq!(parse_hex_color("#ÿÿÿ"), None);
        assert_eq!(parse_hex_color("#+F0000"), None);
    }

    #[test]
    fn display_round_trips_through_parser() {
        let c = Color::rgb(0x50, 0xfa, 0x7b);
        assert_eq!(c.to_string(), "#50FA7B");
        assert_eq!(parse_hex_color(&c.to_string()), Some(c));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_input_never_panics(s in "\\PC{0,10}") {
                let _ = parse_hex_color(&s);
            }

            #[test]
            fn six_digit_hex_always_parses(r: u8, g: u8, b: u8) {
                let text = format!("#{r:02x}{g:02x}{b:02x}");
                prop_assert_eq!(parse_hex_color(&text), Some(Color::rgb(r, g, b)));
            }
        }
    }
}
