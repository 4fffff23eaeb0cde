//! In-browser style command terminal
//!
//! A terminal owns its command table, its transcript and its panel
//! visibility. Side effects that reach outside the terminal (clock, theme)
//! go through the `Host` passed to `submit`, so the terminal can be driven
//! directly from tests.

pub mod commands;
pub mod transcript;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::time::Duration;

pub use commands::{Action, CommandTable};
pub use transcript::{Content, LineKind, Tone, TranscriptLine};

use crate::config::{Profile, TerminalConfig};
use crate::error::TerminalError;
use crate::theme::Theme;

/// Notice shown when a fresh terminal opens
pub const WELCOME_NOTICE: &str = "Welcome! Type help for available commands.";
/// Notice that replaces the transcript after `clear`
pub const CLEARED_NOTICE: &str = "Terminal cleared. Type help for commands.";

/// Effects a command may request from its environment
pub trait Host {
    /// Flip the global theme and return the new one
    fn toggle_theme(&mut self) -> Theme;

    /// Current instant
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result of submitting a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, nothing happened
    Ignored,
    /// These lines were appended to the transcript
    Appended(Vec<TranscriptLine>),
    /// The transcript was replaced by this single line
    Cleared(TranscriptLine),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Outcome of a panel control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChange {
    pub visibility: Visibility,
    /// Move focus to the input after this delay
    pub focus_after: Option<Duration>,
}

/// Two-state panel holding the terminal
#[derive(Debug, Clone)]
pub struct Panel {
    visibility: Visibility,
    focus_delay: Duration,
}

impl Panel {
    pub fn new(visible: bool, focus_delay: Duration) -> Self {
        Self {
            visibility: if visible { Visibility::Visible } else { Visibility::Hidden },
            focus_delay,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn toggle(&mut self) -> PanelChange {
        match self.visibility {
            Visibility::Hidden => self.open(),
            Visibility::Visible => self.close(),
        }
    }

    pub fn open(&mut self) -> PanelChange {
        self.visibility = Visibility::Visible;
        PanelChange {
            visibility: self.visibility,
            focus_after: Some(self.focus_delay),
        }
    }

    pub fn close(&mut self) -> PanelChange {
        self.visibility = Visibility::Hidden;
        PanelChange {
            visibility: self.visibility,
            focus_after: None,
        }
    }
}

pub struct Terminal {
    commands: CommandTable,
    transcript: Vec<TranscriptLine>,
    panel: Panel,
    prompt: String,
    offset: FixedOffset,
    timezone_label: String,
}

impl Terminal {
    pub fn new(config: &TerminalConfig, profile: &Profile) -> Self {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                log::warn!("Invalid utc_offset_minutes {}, using UTC", config.utc_offset_minutes);
                Utc.fix()
            });

        Self {
            commands: CommandTable::new(profile),
            transcript: vec![TranscriptLine::notice(WELCOME_NOTICE)],
            panel: Panel::new(
                config.start_visible,
                Duration::from_millis(config.focus_delay_ms),
            ),
            prompt: config.prompt.clone(),
            offset,
            timezone_label: config.timezone_label.clone(),
        }
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Handle one submitted line of input
    pub fn submit(&mut self, raw: &str, host: &mut dyn Host) -> Submission {
        let input = raw.trim();
        if input.is_empty() {
            return Submission::Ignored;
        }

        let key = input.to_lowercase();
        log::debug!("Terminal command: {}", key);

        let echoed = TranscriptLine::echoed(&self.prompt, input);
        let reply = match self.commands.lookup(&key) {
            Some(spec) => match &spec.action {
                Action::Say(content) => TranscriptLine::response(content.clone()),
                Action::Now => TranscriptLine::response(self.render_date(host.now())),
                Action::ToggleTheme => {
                    let theme = host.toggle_theme();
                    TranscriptLine::response(
                        Content::new()
                            .plain("🎨 Theme switched to ")
                            .command(theme.as_str())
                            .plain(" mode."),
                    )
                }
                Action::Clear => {
                    let notice = TranscriptLine::notice(CLEARED_NOTICE);
                    self.transcript = vec![notice.clone()];
                    return Submission::Cleared(notice);
                }
            },
            None => TranscriptLine::error(TerminalError::UnknownCommand(input.to_string()).to_string()),
        };

        let lines = vec![echoed, reply];
        self.transcript.extend(lines.iter().cloned());
        Submission::Appended(lines)
    }

    fn render_date(&self, now: DateTime<Utc>) -> Content {
        let local = now.with_timezone(&self.offset);
        Content::from(format!(
            "📅 {} at {} {}",
            local.format("%A, %-d %B %Y"),
            local.format("%-I:%M:%S %P"),
            self.timezone_label
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct TestHost {
        theme: Theme,
        toggles: usize,
        now: DateTime<Utc>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                theme: Theme::Dark,
                toggles: 0,
                now: Utc.with_ymd_and_hms(2026, 10, 17, 9, 34, 5).unwrap(),
            }
        }
    }

    impl Host for TestHost {
        fn toggle_theme(&mut self) -> Theme {
            self.toggles += 1;
            self.theme = self.theme.toggled();
            self.theme
        }

        fn now(&self) -> DateTime<Utc> {
            self.now
        }
    }

    fn terminal() -> Terminal {
        Terminal::new(&TerminalConfig::default(), &Profile::default())
    }

    fn appended(submission: Submission) -> Vec<TranscriptLine> {
        match submission {
            Submission::Appended(lines) => lines,
            other => panic!("expected appended lines, got {:?}", other),
        }
    }

    #[test]
    fn test_new_terminal_has_welcome_notice() {
        let term = terminal();
        assert_eq!(term.transcript().len(), 1);
        assert_eq!(term.transcript()[0].kind, LineKind::SystemNotice);
    }

    #[test]
    fn test_every_command_echoes_then_responds() {
        let mut host = TestHost::new();
        let names: Vec<&str> = terminal().commands().names().filter(|n| *n != "clear").collect();
        for name in names {
            for raw in [name.to_string(), format!("  {}  ", name.to_uppercase())] {
                let mut term = terminal();
                let lines = appended(term.submit(&raw, &mut host));
                assert_eq!(lines.len(), 2, "command {}", raw);
                assert_eq!(lines[0].kind, LineKind::EchoedInput);
                assert_eq!(lines[1].kind, LineKind::Response);
                assert_eq!(term.transcript().len(), 3);
            }
        }
    }

    #[test]
    fn test_echo_keeps_original_case() {
        let mut term = terminal();
        let lines = appended(term.submit("  WhoAmI ", &mut TestHost::new()));
        assert_eq!(lines[0].content.plain_text(), "visitor@portfolio:~$ WhoAmI");
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let mut term = terminal();
        let lines = appended(term.submit("rm -rf /", &mut TestHost::new()));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, LineKind::EchoedInput);
        assert_eq!(lines[1].kind, LineKind::Error);
        assert_eq!(
            lines[1].content.plain_text(),
            "Command not found: \"rm -rf /\". Type \"help\" for available commands."
        );
    }

    #[test]
    fn test_unknown_command_keeps_case() {
        let mut term = terminal();
        let lines = appended(term.submit(" Sudo ", &mut TestHost::new()));
        assert!(lines[1].content.plain_text().starts_with("Command not found: \"Sudo\"."));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut term = terminal();
        assert_eq!(term.submit("", &mut TestHost::new()), Submission::Ignored);
        assert_eq!(term.submit("   ", &mut TestHost::new()), Submission::Ignored);
        assert_eq!(term.submit("\t\n", &mut TestHost::new()), Submission::Ignored);
        assert_eq!(term.transcript().len(), 1);
    }

    #[test]
    fn test_clear_replaces_transcript() {
        let mut term = terminal();
        let mut host = TestHost::new();
        term.submit("help", &mut host);
        term.submit("bogus", &mut host);
        assert_eq!(term.transcript().len(), 5);

        let result = term.submit(" CLEAR ", &mut host);
        assert_eq!(result, Submission::Cleared(TranscriptLine::notice(CLEARED_NOTICE)));
        assert_eq!(term.transcript().len(), 1);
        assert_eq!(term.transcript()[0].kind, LineKind::SystemNotice);
    }

    #[test]
    fn test_theme_toggles_host() {
        let mut term = terminal();
        let mut host = TestHost::new();

        let lines = appended(term.submit("  THEME  ", &mut host));
        assert_eq!(host.toggles, 1);
        assert_eq!(host.theme, Theme::Light);
        assert!(lines[1].content.plain_text().contains("light"));

        let lines = appended(term.submit("theme", &mut host));
        assert_eq!(host.theme, Theme::Dark);
        assert!(lines[1].content.plain_text().contains("dark"));
    }

    #[test]
    fn test_date_uses_host_clock() {
        let mut term = terminal();
        let mut host = TestHost::new();
        let lines = appended(term.submit("date", &mut host));
        assert_eq!(
            lines[1].content.plain_text(),
            "📅 Saturday, 17 October 2026 at 3:04:05 pm IST"
        );

        host.now = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        let lines = appended(term.submit("date", &mut host));
        assert!(lines[1].content.plain_text().contains("Friday, 1 January 2027"));
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        for minutes in [40_000_000, i32::MIN, 24 * 60] {
            let config = TerminalConfig {
                utc_offset_minutes: minutes,
                ..TerminalConfig::default()
            };
            let mut term = Terminal::new(&config, &Profile::default());
            let lines = appended(term.submit("date", &mut TestHost::new()));
            assert_eq!(
                lines[1].content.plain_text(),
                "📅 Saturday, 17 October 2026 at 9:34:05 am IST"
            );
        }
    }

    #[test]
    fn test_panel_toggle_and_close() {
        let mut panel = Panel::new(false, Duration::from_millis(300));
        assert!(!panel.is_visible());

        let change = panel.toggle();
        assert_eq!(change.visibility, Visibility::Visible);
        assert_eq!(change.focus_after, Some(Duration::from_millis(300)));

        let change = panel.toggle();
        assert_eq!(change.visibility, Visibility::Hidden);
        assert_eq!(change.focus_after, None);

        panel.open();
        panel.close();
        panel.close();
        assert!(!panel.is_visible());
    }
}
