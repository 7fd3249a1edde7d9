//! # Fail Rules
//!
//! Implementations of [`FailRule`](crate::traits::fail_rule::FailRule). Each rule
//! checks one minimum threshold and, when it is missed, forces the subject to
//! FF with 0 points. All rules run on every subject; any one firing is enough.
//!
//! The available rules are:
//! - [`component_minimum`]: a component must reach a percentage of its cap (external, termwork).
//! - [`sessional_floor`]: sessional marks must reach an absolute or proportional floor.

pub mod component_minimum;
pub mod sessional_floor;

use util::grading_config::FailPolicy;

use crate::traits::fail_rule::FailRule;
use crate::types::Component;
use component_minimum::ComponentMinimum;
use sessional_floor::SessionalMinimum;

/// Builds the standard rule set for `policy`: external minimum, termwork
/// minimum, sessional floor.
pub fn rules_for(policy: &FailPolicy) -> Vec<Box<dyn FailRule>> {
    vec![
        Box::new(ComponentMinimum::new(
            Component::External,
            policy.external_min_percent,
        )),
        Box::new(ComponentMinimum::new(
            Component::Termwork,
            policy.termwork_min_percent,
        )),
        Box::new(SessionalMinimum::new(policy.sessional_floor)),
    ]
}
