//! Three-finger handling: middle-click and vertical swipe-to-switch.
//!
//! A press session starts on the first three-finger sample. A quick release
//! is a middle-click; a sustained vertical displacement of the three-finger
//! centroid is a desktop-switch swipe. After a swipe fires the handler idles
//! until the fingers lift, and a global cooldown keeps a slow lift-off from
//! re-triggering across sessions.

use crate::event::{self, Button, EventSink, InputEvent, Shortcut};
use crate::sample::Sample;
use crate::state::{TripleSession, TripleTouchState};

/// Session age below which a release classifies as a click.
const CLICK_WINDOW_MS: u64 = 200;

/// Minimum session age before swipe evaluation starts.
const SWIPE_MIN_AGE_MS: u64 = 100;

/// Average-Y displacement past which a swipe fires, in sensor units.
const SWIPE_THRESHOLD: f32 = 30.0;

/// Quiet period after a triggered swipe, across sessions.
const SWIPE_COOLDOWN_MS: u64 = 500;

pub(crate) fn handle<S: EventSink>(
  sample: &Sample,
  st: &mut TripleTouchState,
  cooldown_at: &mut Option<u64>,
  sink: &mut S,
) {
  // A swipe already fired for this touch; nothing more until the lift.
  if st.swiped {
    return;
  }

  let now = sample.timestamp_ms;
  let session = match st.session {
    Some(session) => session,
    None => {
      st.session = Some(TripleSession {
        pressed_at: now,
        starts: [position(sample, 0), position(sample, 1), position(sample, 2)],
      });
      return;
    }
  };

  if now.saturating_sub(session.pressed_at) < SWIPE_MIN_AGE_MS {
    return;
  }
  // All three contacts must still be firmly down to judge a swipe.
  if !sample.fingers[..3].iter().all(|f| f.is_active()) {
    return;
  }

  if let Some(at) = *cooldown_at {
    if now.saturating_sub(at) < SWIPE_COOLDOWN_MS {
      return;
    }
  }

  let initial = average_y(&session.starts);
  let current = (sample.fingers[0].y as f32 + sample.fingers[1].y as f32 + sample.fingers[2].y as f32) / 3.0;
  let dy = current - initial;

  let shortcut = if dy < -SWIPE_THRESHOLD {
    Shortcut::DesktopPrevious
  } else if dy > SWIPE_THRESHOLD {
    Shortcut::DesktopNext
  } else {
    return;
  };

  log::debug!("three-finger swipe, centroid dy {}", dy);
  sink.emit(InputEvent::Shortcut(shortcut));
  st.session = None;
  st.swiped = true;
  *cooldown_at = Some(now);
}

/// Classify the ending press when the finger count moves away from three.
pub(crate) fn teardown<S: EventSink>(st: TripleTouchState, now: u64, sink: &mut S) {
  let Some(session) = st.session else { return };

  if now.saturating_sub(session.pressed_at) < CLICK_WINDOW_MS {
    log::debug!("three-finger click");
    event::click(sink, Button::Middle);
  }
}

fn position(sample: &Sample, slot: usize) -> (f32, f32) {
  (sample.fingers[slot].x as f32, sample.fingers[slot].y as f32)
}

fn average_y(points: &[(f32, f32); 3]) -> f32 {
  (points[0].1 + points[1].1 + points[2].1) / 3.0
}
