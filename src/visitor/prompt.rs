//! Session-gated visitor name prompt
//!
//! The prompt opens at most once per session. Resolving it by any exit
//! registers a visitor, sets the session gate and hides the prompt.

use super::{VisitorEntry, VisitorRegistry};
use crate::storage::{KeyValueStore, SESSION_GATE_KEY};

/// "Already prompted" flag scoped to one session
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    latched: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the prompt was resolved in this session
    pub fn is_set(&self, session: &dyn KeyValueStore) -> bool {
        if self.latched {
            return true;
        }
        match session.get(SESSION_GATE_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                log::warn!("Session gate unreadable: {}", e);
                false
            }
        }
    }

    pub fn set(&mut self, session: &mut dyn KeyValueStore) {
        self.latched = true;
        if let Err(e) = session.set(SESSION_GATE_KEY, "true") {
            log::warn!("Failed to persist session gate: {}", e);
        }
        log::info!("Visitor prompt resolved for this session");
    }
}

/// How the visitor left the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptExit {
    /// Submit control with the typed name (may be empty)
    Submit(String),
    /// Enter pressed in the name field
    Enter(String),
    /// Explicit skip
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct VisitorPrompt {
    open: bool,
}

impl VisitorPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the prompt unless this session already resolved it
    pub fn open(&mut self, gate: &SessionGate, session: &dyn KeyValueStore) -> bool {
        if gate.is_set(session) {
            log::debug!("Visitor prompt suppressed by session gate");
            self.open = false;
            return false;
        }
        self.open = true;
        true
    }

    /// Hide the prompt without registering; the gate stays unset
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Apply an exit; a prompt that is not open ignores it
    pub fn resolve(
        &mut self,
        exit: PromptExit,
        registry: &VisitorRegistry,
        durable: &mut dyn KeyValueStore,
        gate: &mut SessionGate,
        session: &mut dyn KeyValueStore,
    ) -> Option<VisitorEntry> {
        if !self.open {
            return None;
        }

        let entry = match exit {
            PromptExit::Submit(name) | PromptExit::Enter(name) => registry.register(durable, Some(&name)),
            PromptExit::Skip => registry.register(durable, None),
        };

        gate.set(session);
        self.open = false;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisitorsConfig;
    use crate::storage::MemoryStore;

    struct Fixture {
        registry: VisitorRegistry,
        durable: MemoryStore,
        session: MemoryStore,
        gate: SessionGate,
        prompt: VisitorPrompt,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: VisitorRegistry::new(&VisitorsConfig::default()),
                durable: MemoryStore::new(),
                session: MemoryStore::new(),
                gate: SessionGate::new(),
                prompt: VisitorPrompt::new(),
            }
        }

        fn open(&mut self) -> bool {
            self.prompt.open(&self.gate, &self.session)
        }

        fn resolve(&mut self, exit: PromptExit) -> Option<VisitorEntry> {
            self.prompt.resolve(
                exit,
                &self.registry,
                &mut self.durable,
                &mut self.gate,
                &mut self.session,
            )
        }

        fn new_session(&mut self) {
            self.session = MemoryStore::new();
            self.gate = SessionGate::new();
        }
    }

    #[test]
    fn test_each_exit_closes_for_the_session() {
        for exit in [
            PromptExit::Submit("Asha Rao".to_string()),
            PromptExit::Enter("Asha Rao".to_string()),
            PromptExit::Skip,
        ] {
            let mut fx = Fixture::new();
            assert!(fx.open());
            assert!(fx.resolve(exit).is_some());
            assert!(!fx.prompt.is_open());
            assert!(!fx.open());
            assert!(!fx.open());
            assert_eq!(fx.registry.count(&fx.durable), 1);
        }
    }

    #[test]
    fn test_skip_records_placeholder() {
        let mut fx = Fixture::new();
        fx.open();
        let entry = fx.resolve(PromptExit::Skip).unwrap();
        assert_eq!(entry.name, "Anonymous Visitor");
    }

    #[test]
    fn test_empty_submit_records_placeholder() {
        let mut fx = Fixture::new();
        fx.open();
        let entry = fx.resolve(PromptExit::Submit("   ".to_string())).unwrap();
        assert_eq!(entry.name, "Anonymous Visitor");
    }

    #[test]
    fn test_resolve_without_open_is_noop() {
        let mut fx = Fixture::new();
        assert!(fx.resolve(PromptExit::Skip).is_none());
        assert_eq!(fx.registry.count(&fx.durable), 0);
    }

    #[test]
    fn test_dismiss_leaves_gate_unset() {
        let mut fx = Fixture::new();
        assert!(fx.open());
        fx.prompt.dismiss();
        assert!(!fx.prompt.is_open());
        assert!(fx.resolve(PromptExit::Skip).is_none());
        assert_eq!(fx.registry.count(&fx.durable), 0);
        assert!(fx.open());
    }

    #[test]
    fn test_double_resolve_registers_once() {
        let mut fx = Fixture::new();
        fx.open();
        fx.resolve(PromptExit::Enter("Asha".to_string()));
        assert!(fx.resolve(PromptExit::Submit("Asha".to_string())).is_none());
        assert_eq!(fx.registry.count(&fx.durable), 1);
    }

    #[test]
    fn test_new_session_allows_one_more_prompt() {
        let mut fx = Fixture::new();
        fx.open();
        fx.resolve(PromptExit::Skip);
        assert!(!fx.open());

        fx.new_session();
        assert!(fx.open());
        fx.resolve(PromptExit::Submit("Ravi".to_string()));
        assert!(!fx.open());
        assert_eq!(fx.registry.count(&fx.durable), 2);
    }

    #[test]
    fn test_gate_reads_session_store() {
        let mut session = MemoryStore::new();
        session.set(SESSION_GATE_KEY, "true").unwrap();
        assert!(SessionGate::new().is_set(&session));
    }
}
