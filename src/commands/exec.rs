//! One-shot terminal command

use eyre::Result;

use super::open_site;
use crate::config::Config;
use crate::render;
use crate::terminal::Submission;

pub fn run(input: &[String], config: &Config) -> Result<()> {
    let mut site = open_site(config);
    let line = input.join(" ");

    match site.on_terminal_input(&line) {
        Submission::Ignored => log::debug!("Ignoring blank exec input"),
        Submission::Appended(lines) => {
            for line in &lines {
                println!("{}", render::line(line, site.theme()));
            }
        }
        Submission::Cleared(notice) => println!("{}", render::line(&notice, site.theme())),
    }

    Ok(())
}
