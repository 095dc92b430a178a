#![forbid(unsafe_code)]

//! Capabilities through which steps and the stepper reach the page.
//!
//! [`VisualSink`] is what step actions use to reveal annotations and redraw
//! geometry. [`StepperView`] is what the stepper itself writes: narration,
//! the result area, and which navigation triggers are enabled.
//! [`MemorySurface`] implements both in memory for tests and headless hosts.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;

bitflags! {
    /// Navigation triggers that are currently enabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlFlags: u8 {
        /// "Previous" is enabled (not at the first step).
        const PREVIOUS = 0b01;
        /// "Next" is enabled (not at the last step).
        const NEXT = 0b10;
    }
}

impl ControlFlags {
    /// Derive the enabled triggers for `index` within `len` steps.
    #[must_use]
    pub fn for_position(index: usize, len: usize) -> Self {
        let mut flags = Self::empty();
        if index > 0 {
            flags |= Self::PREVIOUS;
        }
        if index + 1 < len {
            flags |= Self::NEXT;
        }
        flags
    }

    /// Whether the position is the first step.
    #[must_use]
    pub fn at_start(self) -> bool {
        !self.contains(Self::PREVIOUS)
    }

    /// Whether the position is the last step.
    #[must_use]
    pub fn at_end(self) -> bool {
        !self.contains(Self::NEXT)
    }
}

/// Mutations a step action may perform on the visual scene.
///
/// Ids name page elements (annotations, curves, labels). Implementations
/// must tolerate ids they do not know.
pub trait VisualSink {
    /// Make an element visible.
    fn show(&mut self, id: &str);

    /// Hide an element.
    fn hide(&mut self, id: &str);

    /// Replace an element's point geometry (line endpoints, polyline, markers).
    fn set_geometry(&mut self, id: &str, points: &[(f64, f64)]);

    /// Replace an element's path data (a possibly broken curve).
    fn set_path(&mut self, id: &str, data: &str);

    /// Replace an element's text content.
    fn set_text(&mut self, id: &str, text: &str);

    /// Show every element in `ids`.
    fn show_all(&mut self, ids: &[&str]) {
        for id in ids {
            self.show(id);
        }
    }

    /// Hide every element in `ids`.
    fn hide_all(&mut self, ids: &[&str]) {
        for id in ids {
            self.hide(id);
        }
    }
}

/// Display targets owned by the stepper.
///
/// The stepper does not own the navigation triggers, only their enabled
/// state, which it reports after every operation.
pub trait StepperView {
    /// Replace the narration text.
    fn set_narration(&mut self, text: &str);

    /// Clear the result/summary area.
    fn clear_result(&mut self);

    /// Report which navigation triggers should be enabled.
    fn set_controls(&mut self, controls: ControlFlags);

    /// Report a play-state change (hosts typically relabel Play/Pause).
    fn set_playing(&mut self, _playing: bool) {}
}

/// In-memory surface recording the visible state of a lesson page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    shown: BTreeSet<String>,
    geometry: BTreeMap<String, Vec<(f64, f64)>>,
    paths: BTreeMap<String, String>,
    texts: BTreeMap<String, String>,
    narration: String,
    result: String,
    controls: ControlFlags,
    playing: bool,
    narration_writes: usize,
}

impl MemorySurface {
    /// Create an empty surface with nothing shown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently shown.
    #[must_use]
    pub fn is_shown(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    /// Ids of all shown elements, sorted.
    pub fn shown(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().map(String::as_str)
    }

    /// Last geometry written for `id`.
    #[must_use]
    pub fn geometry(&self, id: &str) -> Option<&[(f64, f64)]> {
        self.geometry.get(id).map(Vec::as_slice)
    }

    /// Last path data written for `id`.
    #[must_use]
    pub fn path(&self, id: &str) -> Option<&str> {
        self.paths.get(id).map(String::as_str)
    }

    /// Last text written for `id`.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    /// Narration currently displayed.
    #[must_use]
    pub fn narration(&self) -> &str {
        &self.narration
    }

    /// Result/summary text ("" when cleared).
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Write the result/summary area (steps call this for their final summary).
    pub fn set_result(&mut self, text: &str) {
        self.result.clear();
        self.result.push_str(text);
    }

    /// Navigation triggers last reported as enabled.
    #[must_use]
    pub const fn controls(&self) -> ControlFlags {
        self.controls
    }

    /// Play state last reported.
    #[must_use]
    pub const fn playing(&self) -> bool {
        self.playing
    }

    /// How many times narration has been written.
    #[must_use]
    pub const fn narration_writes(&self) -> usize {
        self.narration_writes
    }
}

impl VisualSink for MemorySurface {
    fn show(&mut self, id: &str) {
        self.shown.insert(id.to_owned());
    }

    fn hide(&mut self, id: &str) {
        self.shown.remove(id);
    }

    fn set_geometry(&mut self, id: &str, points: &[(f64, f64)]) {
        self.geometry.insert(id.to_owned(), points.to_vec());
    }

    fn set_path(&mut self, id: &str, data: &str) {
        self.paths.insert(id.to_owned(), data.to_owned());
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.texts.insert(id.to_owned(), text.to_owned());
    }
}

impl StepperView for MemorySurface {
    fn set_narration(&mut self, text: &str) {
        self.narration_writes += 1;
        self.narration.clear();
        self.narration.push_str(text);
    }

    fn clear_result(&mut self) {
        self.result.clear();
    }

    fn set_controls(&mut self, controls: ControlFlags) {
        self.controls = controls;
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}
