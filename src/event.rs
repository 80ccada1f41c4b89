//! Abstract input events produced by the gesture core.
//!
//! The core never talks to the host input stack directly. Every recognized
//! gesture is reduced to a sequence of [`InputEvent`] values handed to an
//! [`EventSink`], and the surrounding driver maps them onto HID reports,
//! evdev codes, or whatever the platform expects. The contract is purely
//! "these logical events, in this order, for this input sequence".

/// Pointer buttons the core can press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
  Left,
  Right,
  Middle,
}

impl Button {
  /// Returns a human-readable string representation of the button.
  pub const fn as_str(self) -> &'static str {
    match self {
      Button::Left => "left",
      Button::Right => "right",
      Button::Middle => "middle",
    }
  }
}

/// Scroll directions reported by the two-finger handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollAxis {
  Horizontal,
  Vertical,
}

impl ScrollAxis {
  /// Returns `true` if this is the horizontal scroll axis.
  pub const fn is_horizontal(self) -> bool {
    matches!(self, ScrollAxis::Horizontal)
  }

  /// Returns `true` if this is the vertical scroll axis.
  pub const fn is_vertical(self) -> bool {
    matches!(self, ScrollAxis::Vertical)
  }
}

/// Named shortcuts triggered by multi-finger gestures.
///
/// The sink decides which key combination (or compositor action) each
/// shortcut maps to; the core only names the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shortcut {
  /// Switch to the previous virtual desktop (three-finger swipe up).
  DesktopPrevious,
  /// Switch to the next virtual desktop (three-finger swipe down).
  DesktopNext,
  /// Zoom in (two-finger spread).
  ZoomIn,
  /// Zoom out (two-finger pinch).
  ZoomOut,
}

/// A single logical input event emitted toward the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
  /// A pointer button was pressed.
  ButtonDown(Button),
  /// A pointer button was released.
  ButtonUp(Button),
  /// Relative pointer movement in device units.
  PointerMove { dx: i32, dy: i32 },
  /// A scroll step along one axis. `amount` carries both magnitude and sign.
  Scroll { axis: ScrollAxis, amount: i32 },
  /// A named shortcut was triggered.
  Shortcut(Shortcut),
}

impl InputEvent {
  /// Returns `true` if this is a button press or release.
  pub const fn is_button(&self) -> bool {
    matches!(self, InputEvent::ButtonDown(_) | InputEvent::ButtonUp(_))
  }

  /// Returns `true` if this is a relative pointer movement.
  pub const fn is_pointer_move(&self) -> bool {
    matches!(self, InputEvent::PointerMove { .. })
  }
}

/// Receiver for the events the core emits.
///
/// Emission is fire-and-forget: the core never waits for acknowledgment and
/// treats delivery as always succeeding. A sink that can fail internally
/// (a full HID queue, a dead client) must log and drop on its own side
/// rather than push the problem back into gesture processing.
pub trait EventSink {
  fn emit(&mut self, event: InputEvent);
}

/// Fixed-capacity buffering sink.
///
/// Useful when the surrounding driver wants to collect everything one sample
/// produced and forward it in a single batch. Events past the capacity are
/// dropped with a warning, never reordered.
impl<const N: usize> EventSink for heapless::Vec<InputEvent, N> {
  fn emit(&mut self, event: InputEvent) {
    if self.push(event).is_err() {
      log::warn!("event buffer full, dropping {:?}", event);
    }
  }
}

/// Convenience helper emitting a press immediately followed by a release.
pub(crate) fn click<S: EventSink>(sink: &mut S, button: Button) {
  sink.emit(InputEvent::ButtonDown(button));
  sink.emit(InputEvent::ButtonUp(button));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn click_emits_down_then_up() {
    let mut sink: heapless::Vec<InputEvent, 4> = heapless::Vec::new();
    click(&mut sink, Button::Right);
    assert_eq!(
      sink.as_slice(),
      &[InputEvent::ButtonDown(Button::Right), InputEvent::ButtonUp(Button::Right)]
    );
  }

  #[test]
  fn full_buffer_drops_without_panicking() {
    let mut sink: heapless::Vec<InputEvent, 1> = heapless::Vec::new();
    sink.emit(InputEvent::ButtonDown(Button::Left));
    sink.emit(InputEvent::ButtonUp(Button::Left));
    assert_eq!(sink.len(), 1);
  }

  #[test]
  fn event_predicates() {
    assert!(InputEvent::ButtonDown(Button::Left).is_button());
    assert!(InputEvent::PointerMove { dx: 1, dy: 0 }.is_pointer_move());
    assert!(!InputEvent::Shortcut(Shortcut::ZoomIn).is_button());
  }
}
