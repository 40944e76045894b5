//! Defeat: the resource pool is empty.

use crate::resources::SharedResourceBar;

/// Reads the session's shared pool; never owns or copies it.
#[derive(Clone, Debug)]
pub struct DefeatConditionChecker {
    resources: SharedResourceBar,
    critical_threshold: f64,
}

impl DefeatConditionChecker {
    /// Default warning threshold.
    pub const CRITICAL_THRESHOLD: f64 = 10.0;

    #[must_use]
    pub fn new(resources: SharedResourceBar) -> Self {
        Self::with_threshold(resources, Self::CRITICAL_THRESHOLD)
    }

    #[must_use]
    pub fn with_threshold(resources: SharedResourceBar, critical_threshold: f64) -> Self {
        Self {
            resources,
            critical_threshold,
        }
    }

    #[must_use]
    pub fn critical_threshold(&self) -> f64 {
        self.critical_threshold
    }

    /// The handle this checker reads.
    #[must_use]
    pub fn resources(&self) -> &SharedResourceBar {
        &self.resources
    }

    #[must_use]
    pub fn check_defeat(&self) -> bool {
        self.resources.borrow().is_depleted()
    }

    /// Advisory low-resource warning. Changes nothing.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.resources.borrow().current() <= self.critical_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceBar;

    #[test]
    fn test_defeat_tracks_shared_pool() {
        let pool = SharedResourceBar::new(ResourceBar::full(100.0));
        let checker = DefeatConditionChecker::new(pool.clone());
        assert!(!checker.check_defeat());
        assert!(!checker.is_critical());

        pool.borrow_mut().consume(90.0);
        assert!(checker.is_critical());
        assert!(!checker.check_defeat());

        pool.borrow_mut().consume(10.0);
        assert!(checker.check_defeat());
    }

    #[test]
    fn test_custom_threshold() {
        let pool = SharedResourceBar::new(ResourceBar::new(25.0, 100.0));
        let checker = DefeatConditionChecker::with_threshold(pool, 30.0);
        assert!(checker.is_critical());
        assert_eq!(checker.critical_threshold(), 30.0);
    }
}
