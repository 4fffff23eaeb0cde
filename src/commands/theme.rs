use colored::*;
use eyre::Result;

use super::open_site;
use crate::cli::ThemeAction;
use crate::config::Config;

pub fn run(action: Option<ThemeAction>, config: &Config) -> Result<()> {
    let mut site = open_site(config);

    match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => println!("{}", site.theme()),
        ThemeAction::Toggle => {
            let theme = site.on_theme_toggle();
            println!("{} Theme switched to {}", "🎨".blue(), theme.as_str().cyan());
        }
        ThemeAction::Set { theme } => {
            site.set_theme(theme);
            println!("{} Theme set to {}", "✓".green(), theme.as_str().cyan());
        }
    }

    Ok(())
}
