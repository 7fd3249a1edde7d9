//! A rule that fails a subject when one component scores below a percentage of its cap.
//!
//! Used for the external and termwork minimums (35% by default). A component
//! whose cap is 0 is not assessed, so the rule never fires for it.

use crate::traits::fail_rule::FailRule;
use crate::types::{Component, ComponentCaps, ComponentMarks, FailReason};

pub struct ComponentMinimum {
    component: Component,
    min_percent: f64,
}

impl ComponentMinimum {
    pub fn new(component: Component, min_percent: f64) -> Self {
        Self {
            component,
            min_percent,
        }
    }
}

impl FailRule for ComponentMinimum {
    fn name(&self) -> &'static str {
        match self.component {
            Component::External => "external_minimum",
            Component::Termwork => "termwork_minimum",
            Component::Sessional => "sessional_minimum",
            Component::Attendance => "attendance_minimum",
        }
    }

    fn check(&self, caps: &ComponentCaps, marks: &ComponentMarks) -> Option<FailReason> {
        let cap = caps.cap_for(self.component);
        if cap == 0 {
            return None;
        }

        let obtained = marks.get(self.component);
        let percent = obtained * 100.0 / cap as f64;
        if percent < self.min_percent {
            Some(FailReason {
                component: self.component,
                message: format!(
                    "{} marks {}/{} ({:.2}%) are below the {}% minimum",
                    self.component, obtained, cap, percent, self.min_percent
                ),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps() -> ComponentCaps {
        ComponentCaps {
            sessional: 20,
            attendance: 4,
            termwork: 25,
            external: 50,
        }
    }

    fn marks(termwork: f64, external: f64) -> ComponentMarks {
        ComponentMarks {
            sessional: 14.0,
            attendance: 4.0,
            termwork,
            external,
        }
    }

    #[test]
    fn test_external_below_minimum_fails() {
        let rule = ComponentMinimum::new(Component::External, 35.0);
        let reason = rule.check(&caps(), &marks(20.0, 10.0)).unwrap();
        assert_eq!(reason.component, Component::External);
        assert!(reason.message.contains("20.00%"));
    }

    #[test]
    fn test_exactly_at_minimum_passes() {
        let rule = ComponentMinimum::new(Component::External, 35.0);
        // 17.5 / 50 = 35%
        assert!(rule.check(&caps(), &marks(20.0, 17.5)).is_none());
    }

    #[test]
    fn test_termwork_rule_only_looks_at_termwork() {
        let rule = ComponentMinimum::new(Component::Termwork, 35.0);
        assert!(rule.check(&caps(), &marks(20.0, 0.0)).is_none());
        // 8 / 25 = 32%
        assert!(rule.check(&caps(), &marks(8.0, 50.0)).is_some());
    }

    #[test]
    fn test_disabled_component_never_fails() {
        let rule = ComponentMinimum::new(Component::Termwork, 35.0);
        let caps = ComponentCaps {
            termwork: 0,
            ..caps()
        };
        assert!(rule.check(&caps, &marks(0.0, 40.0)).is_none());
        assert_eq!(rule.name(), "termwork_minimum");
    }
}
