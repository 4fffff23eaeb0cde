use chrono::Utc;
use colored::*;
use eyre::Result;

use super::open_site;
use crate::cli::{OutputFormat, VisitorsAction};
use crate::config::Config;
use crate::render;
use crate::site::Site;
use crate::visitor::VisitorCard;

pub fn run(action: VisitorsAction, config: &Config) -> Result<()> {
    match action {
        VisitorsAction::List { limit, format } => list(limit, OutputFormat::resolve(format), config),
        VisitorsAction::Count => {
            println!("{}", open_site(config).visitor_count());
            Ok(())
        }
        VisitorsAction::Register { name, skip } => register(name.as_deref(), skip, config),
    }
}

fn list(limit: Option<usize>, format: OutputFormat, config: &Config) -> Result<()> {
    let site = open_site(config);
    let cards = log_cards(&site, limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&cards)?),
        OutputFormat::Text => print_cards(&site, &cards),
    }

    Ok(())
}

fn log_cards(site: &Site, limit: Option<usize>) -> Vec<VisitorCard> {
    let mut cards = site.visitor_log(Utc::now());
    if let Some(limit) = limit {
        cards.truncate(limit);
    }
    cards
}

/// Visitor log with count badge, newest first
pub fn print_log(site: &Site) {
    print_cards(site, &log_cards(site, None));
}

fn print_cards(site: &Site, cards: &[VisitorCard]) {
    println!(
        "{} {} {}",
        "👥".blue(),
        "Recent visitors".bold(),
        format!("({})", site.visitor_count()).dimmed()
    );

    if cards.is_empty() {
        println!("  {}", "No visitors yet. Be the first!".dimmed());
        return;
    }

    for card in cards {
        println!("{}", render::visitor_card(card));
    }
}

fn register(name: Option<&str>, skip: bool, config: &Config) -> Result<()> {
    let mut site = open_site(config);
    let entry = site.register_visitor(if skip { None } else { name });
    println!("{} Registered {}", "✓".green(), entry.name.cyan());
    Ok(())
}
