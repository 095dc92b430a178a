#![forbid(unsafe_code)]

//! A single unit of a guided derivation.

use core::fmt;

/// Narration plus the visual action that brings the page up to this step.
///
/// `apply` must be idempotent and cumulative-safe: running the actions of
/// steps `0..=k` in order always yields the same visible state, however many
/// times it is repeated. Backward navigation relies on this because it
/// rebuilds the scene by replaying from the first step.
pub struct Step<V> {
    narration: String,
    apply: Box<dyn Fn(&mut V)>,
}

impl<V> Step<V> {
    /// Create a step from its narration and action.
    pub fn new(narration: impl Into<String>, apply: impl Fn(&mut V) + 'static) -> Self {
        Self {
            narration: narration.into(),
            apply: Box::new(apply),
        }
    }

    /// A step that only changes the narration.
    pub fn narrate(narration: impl Into<String>) -> Self {
        Self::new(narration, |_| {})
    }

    /// Narration shown while this step is active.
    #[must_use]
    pub fn narration(&self) -> &str {
        &self.narration
    }

    /// Run the step's action against the page surface.
    pub fn apply(&self, surface: &mut V) {
        (self.apply)(surface);
    }
}

impl<V> fmt::Debug for Step<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("narration", &self.narration)
            .finish_non_exhaustive()
    }
}
