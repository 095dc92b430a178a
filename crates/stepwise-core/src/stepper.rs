#![forbid(unsafe_code)]

//! Step sequencing with replay-based backward navigation and timed playback.
//!
//! A [`Stepper`] owns a fixed list of [`Step`]s, the page surface they act
//! on, and a [`Scheduler`] for auto-play. It keeps exactly one piece of
//! mutable state beyond the surface: the current index and, while playing,
//! the handle of the single recurring timer.
//!
//! Forward navigation is incremental (only the new step's action runs).
//! Backward navigation cannot undo an action, so it resets the visuals and
//! replays every step up to the new position.
//!
//! # Example
//!
//! ```
//! use stepwise_core::{ManualScheduler, MemorySurface, Step, Stepper, StepperConfig, VisualSink};
//!
//! let steps = vec![
//!     Step::new("Look at the denominator.", |s: &mut MemorySurface| s.show("den")),
//!     Step::new("Vertical asymptote at x = 3.", |s: &mut MemorySurface| s.show("va")),
//! ];
//! let mut stepper = Stepper::new(
//!     steps,
//!     |s: &mut MemorySurface| s.hide_all(&["den", "va"]),
//!     MemorySurface::new(),
//!     ManualScheduler::new(),
//!     StepperConfig::default(),
//! )
//! .unwrap();
//!
//! stepper.go_to_next();
//! assert!(stepper.surface().is_shown("va"));
//! stepper.go_to_previous();
//! assert!(!stepper.surface().is_shown("va"));
//! ```

use core::time::Duration;

use crate::error::StepperError;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use crate::step::Step;
use crate::surface::{ControlFlags, StepperView};

/// Default auto-play interval between steps.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1100);

/// Default narration shown after a reset, before the learner starts.
pub const DEFAULT_INTRO: &str = "Press Next or Play to start.";

/// Playback and narration settings for a [`Stepper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperConfig {
    /// Delay between automatic advances while playing.
    pub interval: Duration,
    /// Placeholder narration shown at the start position.
    pub intro: String,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            intro: DEFAULT_INTRO.to_owned(),
        }
    }
}

impl StepperConfig {
    /// Set the auto-play interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the auto-play interval in milliseconds.
    #[must_use]
    pub fn with_interval_ms(self, millis: u64) -> Self {
        self.with_interval(Duration::from_millis(millis))
    }

    /// Set the placeholder narration shown at the start position.
    #[must_use]
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }
}

/// User-facing navigation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Next,
    Previous,
    TogglePlay,
    Reset,
}

/// Snapshot of a stepper's navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperState {
    /// Index of the active step.
    pub current_index: usize,
    /// Whether auto-play is running.
    pub is_playing: bool,
    /// The recurring timer, present exactly while playing.
    pub timer: Option<TimerHandle>,
}

/// Sequences steps over a page surface `V` using scheduler `S` for playback.
pub struct Stepper<V, S> {
    steps: Vec<Step<V>>,
    reset_visuals: Box<dyn Fn(&mut V)>,
    surface: V,
    scheduler: S,
    config: StepperConfig,
    index: usize,
    // `Some` iff playing.
    timer: Option<TimerHandle>,
    showing_intro: bool,
}

impl<V: StepperView, S: Scheduler> Stepper<V, S> {
    /// Build a stepper and bring the surface to the start position.
    ///
    /// The start position is the same state [`reset_to_start`](Self::reset_to_start)
    /// produces: visuals reset, step 0 applied, intro narration shown.
    ///
    /// # Errors
    ///
    /// [`StepperError::InvalidConfiguration`] if `steps` is empty or the
    /// auto-play interval is zero.
    pub fn new(
        steps: Vec<Step<V>>,
        reset_visuals: impl Fn(&mut V) + 'static,
        surface: V,
        scheduler: S,
        config: StepperConfig,
    ) -> Result<Self, StepperError> {
        if steps.is_empty() {
            return Err(StepperError::InvalidConfiguration(
                "a stepper needs at least one step",
            ));
        }
        if config.interval.is_zero() {
            return Err(StepperError::InvalidConfiguration(
                "auto-play interval must be positive",
            ));
        }

        let mut stepper = Self {
            steps,
            reset_visuals: Box::new(reset_visuals),
            surface,
            scheduler,
            config,
            index: 0,
            timer: None,
            showing_intro: true,
        };
        stepper.restart();
        crate::debug!(len = stepper.steps.len(), "stepper initialized");
        Ok(stepper)
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`: construction rejects empty step lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the active step.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Whether auto-play is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// Snapshot of the navigation state.
    #[must_use]
    pub fn state(&self) -> StepperState {
        StepperState {
            current_index: self.index,
            is_playing: self.timer.is_some(),
            timer: self.timer,
        }
    }

    /// Navigation triggers enabled at the current position.
    #[must_use]
    pub fn controls(&self) -> ControlFlags {
        ControlFlags::for_position(self.index, self.steps.len())
    }

    /// Whether the active step is the first one.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// Whether the active step is the last one.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    /// Narration currently on display.
    ///
    /// Equals the active step's narration except at the start position after
    /// a reset, where the intro placeholder is shown instead.
    #[must_use]
    pub fn narration(&self) -> &str {
        if self.showing_intro {
            &self.config.intro
        } else {
            self.steps[self.index].narration()
        }
    }

    /// The steps being sequenced.
    #[must_use]
    pub fn steps(&self) -> &[Step<V>] {
        &self.steps
    }

    /// Playback and narration settings.
    #[must_use]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// The page surface.
    #[must_use]
    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Mutable access to the page surface, for setup-time drawing.
    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    /// The playback scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the playback scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Advance one step, applying only the new step's action.
    ///
    /// Returns `false` (and changes nothing) at the last step.
    pub fn go_to_next(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        self.showing_intro = false;
        let step = &self.steps[self.index];
        self.surface.set_narration(step.narration());
        step.apply(&mut self.surface);
        self.publish_controls();
        crate::debug!(index = self.index, len = self.steps.len(), "stepper advanced");
        true
    }

    /// Go back one step by resetting the visuals and replaying from step 0.
    ///
    /// Returns `false` (and changes nothing) at the first step.
    pub fn go_to_previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.rebuild_to(self.index - 1);
        crate::debug!(index = self.index, len = self.steps.len(), "stepper rewound");
        true
    }

    /// Jump to `index` (clamped to the last step) by full replay.
    ///
    /// Returns `false` if the stepper is already there.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index.min(self.steps.len() - 1);
        if target == self.index && !self.showing_intro {
            return false;
        }
        self.rebuild_to(target);
        crate::debug!(index = self.index, len = self.steps.len(), "stepper jumped");
        true
    }

    /// Start auto-play.
    ///
    /// No-op when already playing (a second timer is never scheduled) and
    /// when already at the last step, where playback would stop on its
    /// first tick anyway.
    pub fn play(&mut self) -> bool {
        if self.timer.is_some() || self.is_at_end() {
            return false;
        }
        let handle = self.scheduler.schedule(self.config.interval);
        self.timer = Some(handle);
        self.surface.set_playing(true);
        crate::debug!(timer = handle.raw(), index = self.index, "playback started");
        true
    }

    /// Stop auto-play, cancelling the timer. Idempotent.
    pub fn pause(&mut self) -> bool {
        let Some(handle) = self.timer.take() else {
            return false;
        };
        self.scheduler.cancel(handle);
        self.surface.set_playing(false);
        crate::debug!(timer = handle.raw(), index = self.index, "playback stopped");
        true
    }

    /// Pause when playing, play otherwise.
    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Pause, reset the visuals, apply step 0, and show the intro narration.
    pub fn reset_to_start(&mut self) {
        self.pause();
        self.restart();
        crate::debug!(len = self.steps.len(), "stepper reset");
    }

    /// Dispatch a user trigger. Returns whether anything changed.
    pub fn handle(&mut self, control: Control) -> bool {
        match control {
            Control::Next => self.go_to_next(),
            Control::Previous => self.go_to_previous(),
            Control::TogglePlay => self.toggle_play(),
            Control::Reset => {
                self.reset_to_start();
                true
            }
        }
    }

    /// Host callback for a fired timer.
    ///
    /// Ticks from a handle other than the current timer (already cancelled,
    /// or never ours) are ignored. A tick at the last step stops playback.
    pub fn on_tick(&mut self, handle: TimerHandle) -> bool {
        if self.timer != Some(handle) {
            crate::trace!(timer = handle.raw(), "ignoring stale tick");
            return false;
        }
        if self.is_at_end() {
            return self.pause();
        }
        self.go_to_next()
    }

    /// Give up the stepper, returning the surface and scheduler.
    ///
    /// A running timer is cancelled first.
    pub fn into_parts(mut self) -> (V, S) {
        self.pause();
        (self.surface, self.scheduler)
    }

    fn restart(&mut self) {
        (self.reset_visuals)(&mut self.surface);
        self.surface.clear_result();
        self.index = 0;
        self.steps[0].apply(&mut self.surface);
        self.showing_intro = true;
        self.surface.set_narration(&self.config.intro);
        self.publish_controls();
        self.surface.set_playing(self.timer.is_some());
    }

    fn rebuild_to(&mut self, target: usize) {
        let _span = crate::debug_span!("stepper_replay", to = target).entered();
        (self.reset_visuals)(&mut self.surface);
        self.surface.clear_result();
        for step in &self.steps[..=target] {
            step.apply(&mut self.surface);
        }
        self.index = target;
        self.showing_intro = false;
        self.surface.set_narration(self.steps[target].narration());
        self.publish_controls();
    }

    fn publish_controls(&mut self) {
        let controls = self.controls();
        self.surface.set_controls(controls);
    }
}

impl<V: StepperView> Stepper<V, ManualScheduler> {
    /// Advance the manual scheduler's clock by `delta`, delivering firings
    /// one at a time while playback runs.
    ///
    /// Once playback stops, the clock jumps to the end of `delta` and later
    /// firings are dropped. Returns the number of firings that changed the
    /// stepper.
    pub fn advance_time(&mut self, delta: Duration) -> usize {
        let target = self.scheduler.now().saturating_add(delta);
        let mut changed = 0;
        while self.timer.is_some() {
            let Some(handle) = self.scheduler.fire_next(target) else {
                break;
            };
            if self.on_tick(handle) {
                changed += 1;
            }
        }
        self.scheduler.skip_to(target);
        changed
    }
}

impl<V, S> core::fmt::Debug for Stepper<V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stepper")
            .field("len", &self.steps.len())
            .field("index", &self.index)
            .field("timer", &self.timer)
            .field("showing_intro", &self.showing_intro)
            .finish_non_exhaustive()
    }
}
