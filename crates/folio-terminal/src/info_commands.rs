//! Profile commands: about, contact, skills, projects, github.
//!
//! All output is rendered from the [`Profile`] in the environment, so a
//! `[profile]` table in the config file changes every one of them.

use folio_types::config::{Profile, Skill};
use folio_types::error::{FolioError, Result};
use folio_types::line::TerminalLine;

use crate::commands::boxed_header;
use crate::interpreter::{Command, CommandOutput, Environment};

/// Cells in a skill level bar.
const BAR_CELLS: usize = 12;

/// `████████░░░░` for a 0-100 level. Partial cells round up.
fn level_bar(level: u8) -> String {
    let level = usize::from(level.min(100));
    let filled = (level * BAR_CELLS).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

fn skill_line(skill: &Skill, branch: &str, width: usize) -> TerminalLine {
    match skill.level {
        Some(level) => TerminalLine::output(format!(
            "  {branch} {:<width$} {} {level}%",
            skill.name,
            level_bar(level),
        )),
        None => TerminalLine::output(format!("  {branch} {}", skill.name)),
    }
}

/// `├─` for every entry but the last, which gets `└─`.
fn branch(idx: usize, len: usize) -> &'static str {
    if idx + 1 == len { "└─" } else { "├─" }
}

fn github_url(profile: &Profile) -> Option<&str> {
    profile.link("github").map(|l| l.url.as_str())
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd;
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "Who I am"
    }
    fn usage(&self) -> &str {
        "about"
    }
    fn aliases(&self) -> &[&str] {
        &["whoami", "eu"]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile;
        let mut lines = boxed_header("ABOUT ME");
        lines.push(TerminalLine::blank());
        lines.push(TerminalLine::success(format!("> Name: {}", p.name)));
        lines.push(TerminalLine::output(format!("> Role: {}", p.role)));
        if !p.company.is_empty() {
            lines.push(TerminalLine::output(format!("> Company: {}", p.company)));
        }
        if !p.experience.is_empty() {
            lines.push(TerminalLine::output(format!("> Experience: {}", p.experience)));
        }

        if !p.specialties.is_empty() {
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::info("[Specialties]"));
            for s in &p.specialties {
                lines.push(TerminalLine::output(format!("  • {s}")));
            }
        }

        if !p.stack.is_empty() {
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::info("[Full Stack]"));
            for area in &p.stack {
                lines.push(TerminalLine::output(format!("  {}: {}", area.area, area.items)));
            }
        }

        if !p.motto.is_empty() {
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::success(format!("\"{}\"", p.motto)));
        }
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Contact details and social links"
    }
    fn usage(&self) -> &str {
        "contact"
    }
    fn aliases(&self) -> &[&str] {
        &[
            "email", "phone", "contato", "zap", "whatsapp", "telefone", "social", "redes",
        ]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let p = env.profile;
        let mut lines = boxed_header("CONTACT");
        lines.push(TerminalLine::blank());
        for link in &p.links {
            lines.push(TerminalLine::success(format!("> {}: {}", link.label, link.url)));
        }
        if !p.handle.is_empty() {
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::info(format!("Everywhere: {}", p.handle)));
        }
        lines.push(TerminalLine::blank());
        lines.push(TerminalLine::info("Always open to new opportunities and projects!"));
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

struct SkillsCmd;
impl Command for SkillsCmd {
    fn name(&self) -> &str {
        "skills"
    }
    fn description(&self) -> &str {
        "Skills and technologies"
    }
    fn usage(&self) -> &str {
        "skills"
    }
    fn aliases(&self) -> &[&str] {
        &["tech", "stack"]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let groups = &env.profile.skills;
        if groups.is_empty() {
            return Err(FolioError::Command("no skills configured".to_string()));
        }
        // One column width across all groups keeps the bars aligned.
        let width = groups
            .iter()
            .flat_map(|g| &g.entries)
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = boxed_header("TECHNICAL SKILLS");
        for group in groups {
            lines.push(TerminalLine::blank());
            lines.push(TerminalLine::success(format!("[{}]", group.group)));
            let len = group.entries.len();
            for (i, skill) in group.entries.iter().enumerate() {
                lines.push(skill_line(skill, branch(i, len), width));
            }
        }
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

struct ProjectsCmd;
impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }
    fn description(&self) -> &str {
        "Featured projects"
    }
    fn usage(&self) -> &str {
        "projects"
    }
    fn aliases(&self) -> &[&str] {
        &["portfolio", "work"]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut lines = boxed_header("PROJECTS");
        lines.push(TerminalLine::blank());
        for (i, project) in env.profile.projects.iter().enumerate() {
            lines.push(TerminalLine::success(format!("[{}] Project: {}", i + 1, project.name)));
            lines.push(TerminalLine::output(format!("   └─ {}", project.description)));
            if !project.tech.is_empty() {
                lines.push(TerminalLine::output(format!("   └─ Tech: {}", project.tech)));
            }
            lines.push(TerminalLine::blank());
        }
        lines.push(TerminalLine::info("Use \"github\" to see more projects!"));
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// github
// ---------------------------------------------------------------------------

struct GithubCmd;
impl Command for GithubCmd {
    fn name(&self) -> &str {
        "github"
    }
    fn description(&self) -> &str {
        "Show my GitHub profile link"
    }
    fn usage(&self) -> &str {
        "github"
    }
    fn aliases(&self) -> &[&str] {
        &["git", "repo"]
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let url = github_url(env.profile)
            .ok_or_else(|| FolioError::Command("no GitHub link configured".to_string()))?;
        Ok(CommandOutput::Lines(vec![
            TerminalLine::info("[GitHub]"),
            TerminalLine::blank(),
            TerminalLine::success(format!("  {url}")),
            TerminalLine::blank(),
            TerminalLine::info("Check out my repositories!"),
        ]))
    }
}

/// Register profile commands into a registry.
pub fn register_info_commands(reg: &mut crate::CommandRegistry) -> Result<()> {
    reg.register(Box::new(AboutCmd))?;
    reg.register(Box::new(ContactCmd))?;
    reg.register(Box::new(SkillsCmd))?;
    reg.register(Box::new(ProjectsCmd))?;
    reg.register(Box::new(GithubCmd))?;
    Ok(())
}
