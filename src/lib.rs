#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Gesture recognition and input translation core for capacitive trackpad
//! drivers.
//!
//! Touch controllers deliver a periodic stream of raw samples: finger
//! positions with strength and area, relative movement deltas, and the
//! verdicts of their on-chip gesture recognizers. This crate turns that
//! stream into the logical input events a host expects from a trackpad:
//!
//! - Single finger: taps, tap-and-hold dragging, and sensitivity-scaled
//!   cursor movement with fractional carry
//! - Two fingers: right-click taps, horizontal/vertical scrolling, and
//!   pinch zoom
//! - Three fingers: middle-click and vertical swipe-to-switch-desktop
//!
//! The crate is deliberately transport-free. Register maps, I2C traffic,
//! interrupt scheduling, and the host input sink all belong to the
//! surrounding driver; the core consumes assembled [`Sample`] records and
//! emits [`InputEvent`]s through an [`EventSink`]. That keeps the hard part,
//! real-time classification of noisy contact data under timing windows and
//! hysteresis, deterministic and testable on any machine.
//!
//! ```no_run
//! use trackpad_gestures::{Config, GestureEngine, InputEvent, Orientation, Sample};
//!
//! let config = Config::default().with_orientation(Orientation::new().with_rotate_90());
//! let mut engine = GestureEngine::new(config);
//!
//! // Per sample, from the transport's interrupt/work context:
//! let sample: Sample = /* assembled from the controller's report window */
//! #   Sample::new(0, 0);
//! let mut events: heapless::Vec<InputEvent, 8> = heapless::Vec::new();
//! engine.process(&sample, &mut events);
//! for event in &events {
//!   // forward to the host input pipeline
//! }
//! ```
//!
//! # Concurrency
//!
//! Processing is synchronous and bounded; nothing blocks, suspends, or
//! retries. [`GestureEngine::process`] takes `&mut self`, so Rust's ownership
//! rules already serialize samples; callers that share an engine across
//! contexts wrap it in their own mutex. Back-pressure, if ever needed, is the
//! scheduler's job: drop or coalesce samples before they reach the core.

mod config;
mod event;
mod filter;
mod handler;
mod sample;
mod state;
mod transform;

pub use config::*;
pub use event::*;
pub use filter::MotionFilter;
pub use sample::*;
pub use state::*;
pub use transform::*;

/// Gesture state machine for one trackpad instance.
///
/// Owns the [`GestureState`] exclusively and routes every incoming sample to
/// the handler matching its finger count, tearing down whichever session no
/// longer applies first. Construct one per device with [`GestureEngine::new`]
/// and feed it samples in arrival order.
#[derive(Debug, Default)]
pub struct GestureEngine {
  config: Config,
  state: GestureState,
}

impl GestureEngine {
  /// Create an engine with zeroed state and the given configuration.
  pub const fn new(config: Config) -> Self {
    Self { config, state: GestureState::new() }
  }

  /// The configuration this engine was built with.
  pub const fn config(&self) -> &Config {
    &self.config
  }

  /// Read-only view of the current gesture state, mainly for diagnostics.
  pub const fn state(&self) -> &GestureState {
    &self.state
  }

  /// Process one raw sample, emitting whatever events it produces.
  ///
  /// The sample passes through the coordinate transform, then through the
  /// finger-count dispatch: the session variant for the new count is
  /// constructed (flushing the outgoing variant's release events) and the
  /// matching handler runs. Counts of zero or more than three reset
  /// everything and recognize nothing.
  pub fn process<S: EventSink>(&mut self, sample: &Sample, sink: &mut S) {
    debug_assert!((sample.finger_count as usize) <= MAX_FINGERS, "finger count out of range");

    let sample = self.config.orientation.apply_sample(sample);
    let count = sample.finger_count;

    if count != self.state.last_finger_count {
      log::trace!("finger count {} -> {}", self.state.last_finger_count, count);
    }

    self.retarget(count, sample.timestamp_ms, sink);

    match &mut self.state.mode {
      Mode::Single(st) => handler::single::handle(&sample, st, &mut self.state.filter, &self.config, sink),
      Mode::Dual(st) => handler::dual::handle(&sample, st, sink),
      Mode::Triple(st) => handler::triple::handle(&sample, st, &mut self.state.swipe_cooldown_at, sink),
      Mode::Idle => {}
    }

    self.state.last_finger_count = count;
  }

  /// Swap the live session variant to the one matching `count`.
  ///
  /// Leaving a finger count flushes that handler's teardown exactly once
  /// before any other handler can become live, so button pairings and
  /// session classifications never leak across a count change.
  fn retarget<S: EventSink>(&mut self, count: u8, now: u64, sink: &mut S) {
    if self.state.mode.matches(count) {
      return;
    }

    match core::mem::replace(&mut self.state.mode, Mode::for_finger_count(count)) {
      Mode::Single(st) => handler::single::teardown(st, sink),
      Mode::Dual(st) => handler::dual::teardown(st, now, sink),
      Mode::Triple(st) => handler::triple::teardown(st, now, sink),
      Mode::Idle => {}
    }
  }
}
