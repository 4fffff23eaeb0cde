//! Portfolio status command
//!
//! Summarizes the owner profile, experience counter and stored state.

use colored::*;
use eyre::Result;
use serde::Serialize;

use super::open_site;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::storage::FileStore;

#[derive(Serialize)]
struct Status {
    version: String,
    name: String,
    role: String,
    experience: ExperienceStatus,
    theme: String,
    visitors: VisitorStatus,
    storage: String,
}

#[derive(Serialize)]
struct ExperienceStatus {
    since: String,
    compact: String,
    tenure: String,
}

#[derive(Serialize)]
struct VisitorStatus {
    count: usize,
    capacity: usize,
    latest: Option<String>,
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let site = open_site(config);
    let experience = site.experience();
    let visitors = site.visitors();

    let status = Status {
        version: env!("GIT_DESCRIBE").to_string(),
        name: config.profile.name.clone(),
        role: config.profile.role.clone(),
        experience: ExperienceStatus {
            since: config.profile.experience_start.to_string(),
            compact: experience.compact(),
            tenure: experience.tenure(),
        },
        theme: site.theme().to_string(),
        visitors: VisitorStatus {
            count: visitors.len(),
            capacity: config.visitors.capacity,
            latest: visitors.last().map(|v| v.name.clone()),
        },
        storage: FileStore::in_dir(&config.data_dir()).path().display().to_string(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&status)?),
        OutputFormat::Text => print_text(&status),
    }

    Ok(())
}

fn print_text(status: &Status) {
    println!("{} {}", status.name.bold(), format!("v{}", status.version).dimmed());
    println!("  {}", status.role);
    println!();

    println!("{}:", "experience".cyan());
    println!(
        "  {} {} since {}",
        status.experience.compact.green(),
        status.experience.tenure.dimmed(),
        status.experience.since
    );
    println!();

    println!("{}:", "state".cyan());
    println!("  theme: {}", status.theme);
    println!(
        "  visitors: {}/{}{}",
        status.visitors.count,
        status.visitors.capacity,
        status
            .visitors
            .latest
            .as_ref()
            .map(|n| format!(" (latest: {})", n))
            .unwrap_or_default()
    );
    println!("  storage: {}", status.storage.dimmed());
}
