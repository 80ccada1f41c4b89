//! Single-finger handling: taps, tap-and-hold dragging, cursor movement.

use crate::config::Config;
use crate::event::{self, Button, EventSink, InputEvent};
use crate::filter::MotionFilter;
use crate::sample::Sample;
use crate::state::SingleTouchState;

/// Fractional displacement at which a pointer step is attempted.
const MOVE_THRESHOLD: f32 = 0.3;

/// Sanity bound on a single emitted pointer step, in cursor units.
const MAX_STEP: i32 = 50;

pub(crate) fn handle<S: EventSink>(
  sample: &Sample,
  st: &mut SingleTouchState,
  filter: &mut MotionFilter,
  config: &Config,
  sink: &mut S,
) {
  // Hardware tap bits. A tap while a drag is in flight is swallowed; the
  // button is already down and a second press would corrupt the pairing.
  if sample.touch.single_tap && !st.dragging {
    log::debug!("single tap");
    event::click(sink, Button::Left);
  }

  if sample.touch.press_hold && !st.dragging {
    log::debug!("drag start");
    sink.emit(InputEvent::ButtonDown(Button::Left));
    st.dragging = true;
    st.drag_start_sent = true;
  }

  // Cursor movement is independent of the tap/drag state.
  if !sample.delta.is_zero() && filter.accept(sample.delta) {
    let scale = config.sensitivity_scale();
    st.carry_x += sample.delta.dx as f32 * scale;
    st.carry_y += sample.delta.dy as f32 * scale;

    if libm::fabsf(st.carry_x) >= MOVE_THRESHOLD || libm::fabsf(st.carry_y) >= MOVE_THRESHOLD {
      let dx = st.carry_x as i32;
      let dy = st.carry_y as i32;
      if dx.abs() <= MAX_STEP && dy.abs() <= MAX_STEP {
        sink.emit(InputEvent::PointerMove { dx, dy });
        st.carry_x -= dx as f32;
        st.carry_y -= dy as f32;
      } else {
        // One corrupt sample must not become a cursor jump across the screen.
        log::warn!("discarding implausible pointer step ({}, {})", dx, dy);
        st.carry_x = 0.0;
        st.carry_y = 0.0;
      }
    }
  }
}

/// Flush the drag release when the finger count moves away from one.
pub(crate) fn teardown<S: EventSink>(st: SingleTouchState, sink: &mut S) {
  if st.dragging && st.drag_start_sent {
    log::debug!("drag end");
    sink.emit(InputEvent::ButtonUp(Button::Left));
  }
}
