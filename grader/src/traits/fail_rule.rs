use crate::types::{ComponentCaps, ComponentMarks, FailReason};

/// FailRule is a strategy trait for pass/fail overrides.
/// Each implementation checks one minimum threshold on a graded subject's
/// validated marks. Rules can only downgrade a subject to FF, never upgrade it.
pub trait FailRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns a reason when `marks` fall below this rule's minimum.
    ///
    /// - `caps`: the subject's component caps.
    /// - `marks`: validated marks, disabled components already zeroed.
    fn check(&self, caps: &ComponentCaps, marks: &ComponentMarks) -> Option<FailReason>;
}
