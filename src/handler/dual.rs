//! Two-finger handling: right-click taps, scrolling, and pinch zoom.
//!
//! Two detection paths run hardware-first. When the controller's own
//! recognizer already flagged a two-finger tap or a scroll, that verdict is
//! trusted and the software session is skipped for the sample. Only samples
//! with no hardware gesture feed the session-based tap and pinch detectors.

use crate::event::{self, Button, EventSink, InputEvent, ScrollAxis, Shortcut};
use crate::sample::Sample;
use crate::state::{DualSession, DualTouchState};

/// Session age below which a release can classify as a tap.
const TAP_WINDOW_MS: u64 = 300;

/// Per-finger travel bound for tap classification, in sensor units.
const TAP_MAX_TRAVEL: f32 = 50.0;

/// Accumulated horizontal movement per emitted scroll step.
const SCROLL_STEP: i32 = 15;

/// Divisor turning raw vertical deltas into scroll amounts.
const VERTICAL_SCROLL_DIVISOR: i32 = 10;

/// Minimum session age before pinch evaluation starts.
const PINCH_MIN_AGE_MS: u64 = 100;

/// Contact-span change per emitted zoom step. Sits above the tap travel
/// bound so a tap-classifiable session can never also pinch.
const PINCH_STEP: f32 = 60.0;

pub(crate) fn handle<S: EventSink>(sample: &Sample, st: &mut DualTouchState, sink: &mut S) {
  if sample.multi.two_finger_tap {
    log::debug!("two-finger tap (hardware)");
    event::click(sink, Button::Right);
    return;
  }

  if sample.multi.scroll {
    scroll(sample, st, sink);
    return;
  }

  let now = sample.timestamp_ms;
  let a = position(sample, 0);
  let b = position(sample, 1);

  if let Some(session) = st.session.as_mut() {
    // Straight-line distance from the session start, not path length.
    session.travel = [distance(a, session.starts[0]), distance(b, session.starts[1])];

    if now.saturating_sub(session.started_at) >= PINCH_MIN_AGE_MS {
      let span = distance(a, b);
      let stretch = span - session.span;
      if stretch > PINCH_STEP {
        log::debug!("pinch out, span {} -> {}", session.span, span);
        sink.emit(InputEvent::Shortcut(Shortcut::ZoomIn));
        session.span = span;
        session.zoomed = true;
      } else if stretch < -PINCH_STEP {
        log::debug!("pinch in, span {} -> {}", session.span, span);
        sink.emit(InputEvent::Shortcut(Shortcut::ZoomOut));
        session.span = span;
        session.zoomed = true;
      }
    }
  } else {
    st.session = Some(DualSession {
      started_at: now,
      starts: [a, b],
      travel: [0.0, 0.0],
      span: distance(a, b),
      zoomed: false,
    });
  }
}

fn scroll<S: EventSink>(sample: &Sample, st: &mut DualTouchState, sink: &mut S) {
  st.scroll_carry += sample.delta.dx as i32;
  if st.scroll_carry.abs() >= SCROLL_STEP {
    let amount = if st.scroll_carry > 0 { 1 } else { -1 };
    sink.emit(InputEvent::Scroll { axis: ScrollAxis::Horizontal, amount });
    st.scroll_carry = 0;
  }

  // Vertical scrolling is unaccumulated; natural direction flips the sign.
  let vertical = -(sample.delta.dy as i32) / VERTICAL_SCROLL_DIVISOR;
  if vertical != 0 {
    sink.emit(InputEvent::Scroll { axis: ScrollAxis::Vertical, amount: vertical });
  }
}

/// Classify the ending session when the finger count moves away from two.
///
/// A short session in which neither finger strayed far from its start is a
/// software-detected tap; anything else ends silently. Session state clears
/// unconditionally because the variant is consumed.
pub(crate) fn teardown<S: EventSink>(st: DualTouchState, now: u64, sink: &mut S) {
  let Some(session) = st.session else { return };

  let quick = now.saturating_sub(session.started_at) < TAP_WINDOW_MS;
  let still = session.travel[0] < TAP_MAX_TRAVEL && session.travel[1] < TAP_MAX_TRAVEL;
  if !session.zoomed && quick && still {
    log::debug!("two-finger tap (session)");
    event::click(sink, Button::Right);
  }
}

fn position(sample: &Sample, slot: usize) -> (f32, f32) {
  (sample.fingers[slot].x as f32, sample.fingers[slot].y as f32)
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
  let dx = a.0 - b.0;
  let dy = a.1 - b.1;
  libm::sqrtf(dx * dx + dy * dy)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sample::{Finger, MultiTouchGestures};

  type Sink = heapless::Vec<InputEvent, 8>;

  fn pair_sample(ts: u64, a: (u16, u16), b: (u16, u16)) -> Sample {
    Sample::new(ts, 2)
      .with_finger(0, Finger::new(a.0, a.1, 30, 4))
      .with_finger(1, Finger::new(b.0, b.1, 30, 4))
  }

  #[test]
  fn hardware_tap_right_clicks_immediately() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();
    let sample = pair_sample(0, (100, 100), (200, 100)).with_multi_gestures(MultiTouchGestures::new(true, false));

    handle(&sample, &mut st, &mut sink);

    assert_eq!(
      sink.as_slice(),
      &[InputEvent::ButtonDown(Button::Right), InputEvent::ButtonUp(Button::Right)]
    );
    // The fast path does not open a session.
    assert!(st.session.is_none());
  }

  #[test]
  fn scroll_accumulates_horizontal_steps() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();
    let gestures = MultiTouchGestures::new(false, true);

    // 8 + 8 = 16 crosses the step threshold on the second sample.
    let sample = pair_sample(0, (100, 100), (200, 100)).with_multi_gestures(gestures).with_delta(8, 0);
    handle(&sample, &mut st, &mut sink);
    assert!(sink.is_empty());

    handle(&sample, &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Scroll { axis: ScrollAxis::Horizontal, amount: 1 }]);
    assert_eq!(st.scroll_carry, 0);
  }

  #[test]
  fn scroll_emits_vertical_every_sample() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();
    let sample = pair_sample(0, (100, 100), (200, 100))
      .with_multi_gestures(MultiTouchGestures::new(false, true))
      .with_delta(0, -25);

    handle(&sample, &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Scroll { axis: ScrollAxis::Vertical, amount: 2 }]);
  }

  #[test]
  fn quick_still_session_taps_on_teardown() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    handle(&pair_sample(0, (100, 100), (200, 100)), &mut st, &mut sink);
    handle(&pair_sample(50, (110, 105), (205, 95)), &mut st, &mut sink);
    assert!(sink.is_empty());

    teardown(st, 120, &mut sink);
    assert_eq!(
      sink.as_slice(),
      &[InputEvent::ButtonDown(Button::Right), InputEvent::ButtonUp(Button::Right)]
    );
  }

  #[test]
  fn slow_session_does_not_tap() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    handle(&pair_sample(0, (100, 100), (200, 100)), &mut st, &mut sink);
    teardown(st, 350, &mut sink);
    assert!(sink.is_empty());
  }

  #[test]
  fn travelled_session_does_not_tap() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    handle(&pair_sample(0, (100, 100), (200, 100)), &mut st, &mut sink);
    handle(&pair_sample(50, (170, 100), (200, 100)), &mut st, &mut sink);

    teardown(st, 120, &mut sink);
    assert!(sink.is_empty());
  }

  #[test]
  fn travel_is_distance_from_start_not_path_length() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    // Finger zero wanders 70 units away and comes back; the last recomputed
    // displacement is what teardown sees.
    handle(&pair_sample(0, (100, 100), (200, 100)), &mut st, &mut sink);
    handle(&pair_sample(40, (170, 100), (200, 100)), &mut st, &mut sink);
    handle(&pair_sample(80, (102, 100), (200, 100)), &mut st, &mut sink);

    teardown(st, 120, &mut sink);
    assert_eq!(sink.len(), 2); // tap fires: it ended where it began
  }

  #[test]
  fn pinch_ratchets_zoom_steps() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    // Span starts at 100 units.
    handle(&pair_sample(0, (100, 100), (200, 100)), &mut st, &mut sink);
    // Too young for pinch evaluation regardless of span.
    handle(&pair_sample(50, (100, 100), (265, 100)), &mut st, &mut sink);
    assert!(sink.is_empty());

    // Old enough, span 165: one step out, baseline moves to 165.
    handle(&pair_sample(120, (100, 100), (265, 100)), &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Shortcut(Shortcut::ZoomIn)]);

    // Another 65 units of spread: second step.
    sink.clear();
    handle(&pair_sample(180, (100, 100), (330, 100)), &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Shortcut(Shortcut::ZoomIn)]);

    // Collapsing back below the baseline by more than a step zooms out.
    sink.clear();
    handle(&pair_sample(240, (100, 100), (230, 100)), &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Shortcut(Shortcut::ZoomOut)]);
  }

  #[test]
  fn zoomed_session_never_taps_on_teardown() {
    let mut st = DualTouchState::default();
    let mut sink = Sink::new();

    handle(&pair_sample(0, (100, 100), (140, 100)), &mut st, &mut sink);
    // Each finger moves about 35 units (under the tap travel bound) but the
    // span grows by 70: a pinch, not a tap.
    handle(&pair_sample(120, (65, 100), (175, 100)), &mut st, &mut sink);
    assert_eq!(sink.as_slice(), &[InputEvent::Shortcut(Shortcut::ZoomIn)]);

    sink.clear();
    teardown(st, 150, &mut sink);
    assert!(sink.is_empty());
  }
}
