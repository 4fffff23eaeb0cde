//! The fixed command table
//!
//! Every verb maps to an `Action`. Most actions carry their reply as data;
//! the rest describe work the terminal asks its host to do (read the clock,
//! flip the theme) or the reserved clear instruction.

use indexmap::IndexMap;

use super::transcript::Content;
use crate::config::Profile;

/// What a command does when invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reply with a fixed payload
    Say(Content),
    /// Render the current date and time
    Now,
    /// Flip the global theme and report the new one
    ToggleTheme,
    /// Replace the transcript with a single notice
    Clear,
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub action: Action,
}

/// Command names in help order, with their help summaries
const SUMMARIES: [(&str, &str); 12] = [
    ("about", "Learn about me"),
    ("skills", "View my tech stack"),
    ("contact", "Get my contact info"),
    ("projects", "View my projects"),
    ("certs", "View certifications"),
    ("resume", "Download my resume"),
    ("whoami", "Who are you?"),
    ("date", "Current date & time"),
    ("clear", "Clear terminal"),
    ("theme", "Toggle dark/light mode"),
    ("loader", "Info about the loader"),
    ("namaste", "A greeting 🙏"),
];

/// Immutable registry of terminal commands, keyed by lower-case name
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: IndexMap<&'static str, CommandSpec>,
}

impl CommandTable {
    /// Build the table once at startup from the owner profile
    pub fn new(profile: &Profile) -> Self {
        let mut commands = IndexMap::new();

        commands.insert(
            "help",
            CommandSpec {
                name: "help",
                summary: "List available commands",
                action: Action::Say(Content::new()),
            },
        );

        for (name, summary) in SUMMARIES {
            let action = match name {
                "date" => Action::Now,
                "theme" => Action::ToggleTheme,
                "clear" => Action::Clear,
                _ => Action::Say(payload(name, profile)),
            };
            commands.insert(name, CommandSpec { name, summary, action });
        }

        let help = help_text(commands.values().filter(|spec| spec.name != "help"));
        if let Some(spec) = commands.get_mut("help") {
            spec.action = Action::Say(help);
        }

        Self { commands }
    }

    /// Find the command for an already-normalized key
    pub fn lookup(&self, key: &str) -> Option<&CommandSpec> {
        self.commands.get(key)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

fn help_text<'a>(specs: impl Iterator<Item = &'a CommandSpec>) -> Content {
    let mut content = Content::new().plain("Available commands:");
    for spec in specs {
        content = content
            .plain("\n  ")
            .command(format!("{:<9}", spec.name))
            .plain(format!(" — {}", spec.summary));
    }
    content
}

fn payload(name: &str, profile: &Profile) -> Content {
    match name {
        "about" => Content::new()
            .gold(profile.name.as_str())
            .plain(format!(
                "\n{}\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
                 Passionate about building secure networks\n\
                 and innovative software solutions. Cisco &\n\
                 Cloud specialist with full-stack capabilities.",
                profile.role
            )),
        "skills" => Content::new().gold("Tech Stack:").plain(
            "\n  Languages  │ Java, Python, JavaScript, C++\
             \n  Web Dev    │ HTML5, CSS3, Bootstrap 5, React\
             \n  Networking │ Cisco, OSPF, VLANs, ACLs, BGP\
             \n  Cloud      │ AWS, Docker, Git, Linux",
        ),
        "contact" => Content::new().gold("Contact Info:").plain(format!(
            "\n  📧 Email    │ {}\n  💼 LinkedIn │ {}\n  🐙 GitHub   │ {}",
            profile.email, profile.linkedin, profile.github
        )),
        "projects" => Content::new().gold("Projects:").plain(
            "\n  01. Enterprise Campus Network (Cisco)\
             \n  02. Full-Stack Task Manager (Java/React)\
             \n  03. Network Automation Suite (Python)",
        ),
        "certs" => Content::new().gold("Certifications:").plain(
            "\n  ✓ CCNA — Cisco Systems\
             \n  ✓ CompTIA A+\
             \n  ✓ AWS Cloud Practitioner\
             \n  ✓ CompTIA Network+\
             \n  ✓ Python Professional",
        ),
        "resume" => match &profile.resume_url {
            Some(url) => Content::new()
                .plain("📄 Resume download initiated...\n")
                .command(url.as_str()),
            None => Content::from("📄 Resume download initiated...\n(Add your actual resume link here)"),
        },
        "whoami" => Content::new()
            .plain("You are a ")
            .saffron("curious visitor")
            .plain(" exploring this portfolio. Welcome! 🙏"),
        "loader" => Content::new().plain("🌀 ").gold("Wave Loader").plain(
            "\nThe loading animation fills a progress meter in\
             \nuneven steps before the page is revealed,\
             \nrepresenting data flowing through the network!",
        ),
        "namaste" => Content::new().plain("🙏 ").saffron("Namaste!").plain(
            "\n\"I bow to the divine in you.\"\
             \nThank you for visiting my portfolio!\
             \nMay your code compile on the first try. ✨",
        ),
        _ => Content::new(),
    }
}
