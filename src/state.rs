//! Shared mutable gesture state.
//!
//! One [`GestureState`] exists per trackpad instance and lives for the whole
//! operating session of the device. The finger-count-specific session data is
//! held inside [`Mode`], a tagged union with at most one live variant: the
//! engine tears the outgoing variant down (flushing its release events)
//! before constructing the incoming one, so state can never leak across a
//! finger-count change.

use crate::filter::MotionFilter;

/// Session data for the single-finger handler.
///
/// `carry_x`/`carry_y` hold the fractional cursor displacement left over
/// after integer truncation, so sub-unit movement is not lost between
/// samples. Invariant: `drag_start_sent` implies `dragging`; the drag button
/// goes down at most once per drag session and up at most once on release.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SingleTouchState {
  pub carry_x: f32,
  pub carry_y: f32,
  pub dragging: bool,
  pub drag_start_sent: bool,
}

/// Software tap/pinch session for the two-finger handler.
///
/// Created on the first two-finger sample that carries no hardware gesture
/// bit, destroyed on teardown. `travel` is the straight-line distance of each
/// finger from its session start, recomputed every sample: circular or
/// back-and-forth motion deliberately counts as small movement, matching the
/// shipped tap-detection policy.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DualSession {
  pub started_at: u64,
  pub starts: [(f32, f32); 2],
  pub travel: [f32; 2],
  /// Distance between the two contacts, re-baselined after each zoom step.
  pub span: f32,
  /// Set once a pinch step fired; suppresses tap classification at teardown.
  pub zoomed: bool,
}

/// State for the two-finger handler.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DualTouchState {
  pub session: Option<DualSession>,
  /// Rolling horizontal scroll accumulator used by the hardware scroll path.
  pub scroll_carry: i32,
}

/// Press session for the three-finger handler.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripleSession {
  pub pressed_at: u64,
  pub starts: [(f32, f32); 3],
}

/// State for the three-finger handler.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripleTouchState {
  pub session: Option<TripleSession>,
  /// Set after a swipe fired; the handler then idles until the fingers lift.
  pub swiped: bool,
}

/// The finger-count-keyed session variant currently live.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  #[default]
  Idle,
  Single(SingleTouchState),
  Dual(DualTouchState),
  Triple(TripleTouchState),
}

impl Mode {
  /// The variant that should be live for the given finger count.
  ///
  /// Counts of zero and of four or more map to [`Mode::Idle`]: nothing is
  /// recognized there, but every other handler must still be torn down.
  pub(crate) fn for_finger_count(count: u8) -> Self {
    match count {
      1 => Mode::Single(SingleTouchState::default()),
      2 => Mode::Dual(DualTouchState::default()),
      3 => Mode::Triple(TripleTouchState::default()),
      _ => Mode::Idle,
    }
  }

  /// Returns `true` if this variant already matches the given finger count.
  pub(crate) fn matches(&self, count: u8) -> bool {
    matches!(
      (self, count),
      (Mode::Idle, 0) | (Mode::Single(_), 1) | (Mode::Dual(_), 2) | (Mode::Triple(_), 3)
    ) || (matches!(self, Mode::Idle) && count >= 4)
  }
}

/// All mutable state one trackpad instance carries between samples.
///
/// Owned exclusively by the engine and handed to exactly one handler per
/// sample. The [`MotionFilter`] and the swipe cooldown survive session
/// teardown on purpose; everything else lives and dies with its [`Mode`]
/// variant.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureState {
  pub mode: Mode,
  pub filter: MotionFilter,
  /// Timestamp of the last triggered three-finger swipe, across sessions.
  pub swipe_cooldown_at: Option<u64>,
  /// Previous sample's finger count, kept for transition diagnostics only.
  pub last_finger_count: u8,
}

impl GestureState {
  pub const fn new() -> Self {
    Self { mode: Mode::Idle, filter: MotionFilter::new(), swipe_cooldown_at: None, last_finger_count: 0 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mode_for_finger_count_covers_all_cardinalities() {
    assert!(matches!(Mode::for_finger_count(0), Mode::Idle));
    assert!(matches!(Mode::for_finger_count(1), Mode::Single(_)));
    assert!(matches!(Mode::for_finger_count(2), Mode::Dual(_)));
    assert!(matches!(Mode::for_finger_count(3), Mode::Triple(_)));
    assert!(matches!(Mode::for_finger_count(4), Mode::Idle));
    assert!(matches!(Mode::for_finger_count(5), Mode::Idle));
  }

  #[test]
  fn mode_matching_is_exact() {
    assert!(Mode::Idle.matches(0));
    assert!(Mode::Idle.matches(4));
    assert!(!Mode::Idle.matches(2));
    assert!(Mode::Dual(DualTouchState::default()).matches(2));
    assert!(!Mode::Dual(DualTouchState::default()).matches(3));
  }

  #[test]
  fn fresh_state_is_idle() {
    let state = GestureState::new();
    assert!(matches!(state.mode, Mode::Idle));
    assert_eq!(state.last_finger_count, 0);
    assert!(state.swipe_cooldown_at.is_none());
  }
}
