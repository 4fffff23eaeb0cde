//! Console rendering for transcript lines, visitor cards and banners

use colored::*;

use crate::terminal::{Content, LineKind, Tone, TranscriptLine};
use crate::theme::Theme;
use crate::visitor::VisitorCard;

const MAX_RULE_WIDTH: usize = 60;

/// Render styled content for the given theme
pub fn content(content: &Content, theme: Theme) -> String {
    content
        .spans()
        .iter()
        .map(|span| {
            let text = span.text.as_str();
            let styled = match (span.tone, theme) {
                (Tone::Plain, _) => text.normal(),
                (Tone::Command, Theme::Dark) => text.bright_green(),
                (Tone::Command, Theme::Light) => text.green(),
                (Tone::Gold, Theme::Dark) => text.bright_yellow().bold(),
                (Tone::Gold, Theme::Light) => text.yellow().bold(),
                (Tone::Saffron, Theme::Dark) => text.truecolor(255, 153, 51),
                (Tone::Saffron, Theme::Light) => text.truecolor(204, 102, 0),
                (Tone::Prompt, _) => text.cyan().bold(),
            };
            styled.to_string()
        })
        .collect()
}

pub fn line(line: &TranscriptLine, theme: Theme) -> String {
    match line.kind {
        LineKind::EchoedInput | LineKind::Response => content(&line.content, theme),
        LineKind::Error => line.content.plain_text().red().to_string(),
        LineKind::SystemNotice => line.content.plain_text().dimmed().to_string(),
    }
}

pub fn visitor_card(card: &VisitorCard) -> String {
    format!(
        "  {} {} {}",
        format!("[{:^2}]", card.initials).yellow(),
        card.name.bold(),
        card.time_ago.dimmed()
    )
}

/// Horizontal rule sized to the terminal
pub fn rule() -> String {
    let width = terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(MAX_RULE_WIDTH)
        .min(MAX_RULE_WIDTH);
    "━".repeat(width).dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_keeps_text() {
        colored::control::set_override(false);
        let styled = content(&Content::new().gold("Projects:").plain(" 3"), Theme::Dark);
        assert_eq!(styled, "Projects: 3");
    }

    #[test]
    fn test_error_line_is_plain_text() {
        colored::control::set_override(false);
        let rendered = line(&TranscriptLine::error("Command not found: \"x\"."), Theme::Light);
        assert_eq!(rendered, "Command not found: \"x\".");
    }

    #[test]
    fn test_visitor_card_shows_initials() {
        colored::control::set_override(false);
        let card = VisitorCard {
            initials: "AR".to_string(),
            name: "Asha Rao".to_string(),
            time_ago: "just now".to_string(),
            registered_at: chrono::Utc::now(),
        };
        assert_eq!(visitor_card(&card), "  [AR] Asha Rao just now");
    }
}
