//! Theme system -- data-driven color schemes for the terminal.
//!
//! Themes are described in a TOML manifest (`[[theme]]` entries) and parsed
//! into a [`ThemeTable`]. The terminal core only tracks the active theme's
//! key; hosts resolve it here to get the colors.

pub mod table;
pub mod theme;

pub use table::ThemeTable;
pub use theme::{Theme, ThemeDef};
