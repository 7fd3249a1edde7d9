//! A rule that fails a subject when sessional marks (attendance excluded) fall
//! below the configured floor.
//!
//! The default floor is an absolute 8 marks regardless of the sessional cap.
//! A proportional floor compares against the sessional cap minus the
//! attendance allotment instead.

use util::grading_config::SessionalFloor;

use crate::traits::fail_rule::FailRule;
use crate::types::{Component, ComponentCaps, ComponentMarks, FailReason};

pub struct SessionalMinimum {
    floor: SessionalFloor,
}

impl SessionalMinimum {
    pub fn new(floor: SessionalFloor) -> Self {
        Self { floor }
    }
}

impl FailRule for SessionalMinimum {
    fn name(&self) -> &'static str {
        "sessional_floor"
    }

    fn check(&self, caps: &ComponentCaps, marks: &ComponentMarks) -> Option<FailReason> {
        if caps.sessional == 0 {
            return None;
        }

        let obtained = marks.sessional;
        match self.floor {
            SessionalFloor::Absolute { marks: floor } => {
                (obtained < floor).then(|| FailReason {
                    component: Component::Sessional,
                    message: format!("sessional marks {obtained} are below the floor of {floor}"),
                })
            }
            SessionalFloor::Proportional { percent } => {
                let cap = caps.sessional_without_attendance();
                if cap == 0 {
                    return None;
                }
                let obtained_percent = obtained * 100.0 / cap as f64;
                (obtained_percent < percent).then(|| FailReason {
                    component: Component::Sessional,
                    message: format!(
                        "sessional marks {obtained}/{cap} ({obtained_percent:.2}%) are below the {percent}% floor"
                    ),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(sessional: u32, attendance: u32) -> ComponentCaps {
        ComponentCaps {
            sessional,
            attendance,
            termwork: 0,
            external: 100,
        }
    }

    fn sessional(marks: f64) -> ComponentMarks {
        ComponentMarks {
            sessional: marks,
            attendance: 4.0,
            termwork: 0.0,
            external: 60.0,
        }
    }

    #[test]
    fn test_absolute_floor() {
        let rule = SessionalMinimum::new(SessionalFloor::Absolute { marks: 8.0 });
        assert!(rule.check(&caps(30, 4), &sessional(7.5)).is_some());
        assert!(rule.check(&caps(30, 4), &sessional(8.0)).is_none());
    }

    #[test]
    fn test_absolute_floor_ignores_attendance() {
        let rule = SessionalMinimum::new(SessionalFloor::Absolute { marks: 8.0 });
        // 6 sessional + 4 attendance is still below the floor.
        let reason = rule.check(&caps(20, 4), &sessional(6.0)).unwrap();
        assert_eq!(reason.component, Component::Sessional);
    }

    #[test]
    fn test_proportional_floor_scales_with_cap() {
        let rule = SessionalMinimum::new(SessionalFloor::Proportional { percent: 40.0 });
        // cap excluding attendance = 16; 6/16 = 37.5%
        assert!(rule.check(&caps(20, 4), &sessional(6.0)).is_some());
        // 7/16 = 43.75%
        assert!(rule.check(&caps(20, 4), &sessional(7.0)).is_none());
    }

    #[test]
    fn test_no_sessional_component() {
        let rule = SessionalMinimum::new(SessionalFloor::Absolute { marks: 8.0 });
        assert!(rule.check(&caps(0, 0), &sessional(0.0)).is_none());

        let rule = SessionalMinimum::new(SessionalFloor::Proportional { percent: 40.0 });
        assert!(rule.check(&caps(4, 4), &sessional(0.0)).is_none());
    }

    #[test]
    fn test_zero_floor_disables_rule() {
        let rule = SessionalMinimum::new(SessionalFloor::Absolute { marks: 0.0 });
        assert!(rule.check(&caps(20, 4), &sessional(0.0)).is_none());
    }
}
