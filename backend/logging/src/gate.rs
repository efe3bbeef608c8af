use rotalog_core::{Persistence, Severity};

/// Per-call decision on whether a record is emitted and whether it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    level: Severity,
    persistence: Persistence,
}

impl Gate {
    pub fn new(level: Severity, persistence: Persistence) -> Self {
        Self { level, persistence }
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    /// Console emission. Alerts are never suppressed.
    pub fn console(&self, severity: Severity) -> bool {
        severity.is_enabled(self.level)
    }

    /// `Print` is gated like Debug.
    pub fn print(&self) -> bool {
        self.console(Severity::Debug)
    }

    pub fn persist(&self, severity: Severity) -> bool {
        self.console(severity) && self.persistence.stores(severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_level_hides_info_and_debug() {
        let gate = Gate::new(Severity::Warning, Persistence::Urgent);
        assert!(gate.console(Severity::Alert));
        assert!(gate.console(Severity::Warning));
        assert!(!gate.console(Severity::Info));
        assert!(!gate.console(Severity::Debug));
        assert!(!gate.print());
    }

    #[test]
    fn alert_survives_strictest_level() {
        let gate = Gate::new(Severity::Alert, Persistence::Urgent);
        assert!(gate.console(Severity::Alert));
        assert!(gate.persist(Severity::Alert));
        assert!(!gate.console(Severity::Warning));
    }

    #[test]
    fn persistence_follows_policy() {
        let urgent = Gate::new(Severity::Debug, Persistence::Urgent);
        assert!(urgent.persist(Severity::Warning));
        assert!(!urgent.persist(Severity::Info));

        let all = Gate::new(Severity::Info, Persistence::All);
        assert!(all.persist(Severity::Info));
        assert!(!all.persist(Severity::Debug), "gated records are never stored");
    }
}
