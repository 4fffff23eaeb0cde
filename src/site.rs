//! Page-level state: the components plus the stores they share
//!
//! Event handlers are plain methods taking the event payload, so the whole
//! startup flow can be driven without a console attached.

use chrono::{DateTime, Local, Utc};

use crate::config::Config;
use crate::experience::Experience;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::terminal::{Host, PanelChange, Submission, Terminal};
use crate::theme::{Theme, ThemeState};
use crate::visitor::{PromptExit, SessionGate, VisitorCard, VisitorEntry, VisitorPrompt, VisitorRegistry};

/// What the page should do once the loader completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    pub reveal: bool,
    pub prompt_visitor: bool,
}

pub struct Site {
    config: Config,
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    theme: ThemeState,
    visitors: VisitorRegistry,
    gate: SessionGate,
    prompt: VisitorPrompt,
    terminal: Terminal,
    revealed: bool,
}

/// Host view handed to the terminal while a command runs
struct SiteHost<'a> {
    theme: &'a mut ThemeState,
    durable: &'a mut dyn KeyValueStore,
}

impl Host for SiteHost<'_> {
    fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(self.durable)
    }
}

impl Site {
    pub fn new(config: Config, durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        let theme = ThemeState::load(durable.as_ref(), config.theme.default);
        let visitors = VisitorRegistry::new(&config.visitors);
        let terminal = Terminal::new(&config.terminal, &config.profile);

        Self {
            config,
            durable,
            session,
            theme,
            visitors,
            gate: SessionGate::new(),
            prompt: VisitorPrompt::new(),
            terminal,
            revealed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_open()
    }

    /// Loader reached 100%: reveal once, then offer the visitor prompt
    pub fn on_loader_complete(&mut self) -> Startup {
        let reveal = !self.revealed;
        self.revealed = true;
        let prompt_visitor = self.prompt.open(&self.gate, self.session.as_ref());
        Startup { reveal, prompt_visitor }
    }

    pub fn on_prompt_exit(&mut self, exit: PromptExit) -> Option<VisitorEntry> {
        self.prompt.resolve(
            exit,
            &self.visitors,
            self.durable.as_mut(),
            &mut self.gate,
            self.session.as_mut(),
        )
    }

    /// Input ended before the visitor answered
    pub fn dismiss_prompt(&mut self) {
        self.prompt.dismiss();
        log::debug!("Visitor prompt dismissed without an answer");
    }

    /// Start a new browsing session: the session store and gate are reset
    pub fn begin_session(&mut self) {
        self.session = Box::new(MemoryStore::new());
        self.gate = SessionGate::new();
        self.prompt = VisitorPrompt::new();
        log::info!("New session started");
    }

    pub fn on_terminal_input(&mut self, raw: &str) -> Submission {
        let mut host = SiteHost {
            theme: &mut self.theme,
            durable: self.durable.as_mut(),
        };
        self.terminal.submit(raw, &mut host)
    }

    pub fn on_terminal_toggle(&mut self) -> PanelChange {
        self.terminal.panel_mut().toggle()
    }

    pub fn on_terminal_close(&mut self) -> PanelChange {
        self.terminal.panel_mut().close()
    }

    pub fn on_terminal_open(&mut self) -> PanelChange {
        self.terminal.panel_mut().open()
    }

    /// Theme toggle control outside the terminal
    pub fn on_theme_toggle(&mut self) -> Theme {
        self.theme.toggle(self.durable.as_mut())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.theme.set(theme, self.durable.as_mut())
    }

    pub fn register_visitor(&mut self, name: Option<&str>) -> VisitorEntry {
        self.visitors.register(self.durable.as_mut(), name)
    }

    pub fn visitors(&self) -> Vec<VisitorEntry> {
        self.visitors.list(self.durable.as_ref())
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors.count(self.durable.as_ref())
    }

    /// Newest-first cards limited by the configured display window
    pub fn visitor_log(&self, now: DateTime<Utc>) -> Vec<VisitorCard> {
        self.visitors
            .recent(self.durable.as_ref(), self.config.visitors.display_limit)
            .iter()
            .map(|entry| VisitorCard::from_entry(entry, now))
            .collect()
    }

    pub fn experience(&self) -> Experience {
        Experience::between(self.config.profile.experience_start, Local::now().date_naive())
    }
}
