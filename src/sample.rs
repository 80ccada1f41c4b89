//! Per-sample input records handed to the gesture core.
//!
//! The transport layer owns the register map and the I2C traffic; once it has
//! read a report window it assembles a [`Sample`] and passes it to
//! [`GestureEngine::process`](crate::GestureEngine::process). The bit-packed
//! types in this module double as the wire codec for that assembly: a finger
//! record or a gesture bitmask can be decoded straight from register bytes via
//! their `TryFrom` impls.

/// Absolute position, pressure, and contact size of a single finger slot.
///
/// `strength == 0` marks an inactive slot; such fingers carry no meaningful
/// coordinates and are never transformed or read by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 8)]
pub struct Finger {
  pub x: u16,
  pub y: u16,
  pub strength: u16,
  pub area: u16,
}

impl Finger {
  pub const fn new(x: u16, y: u16, strength: u16, area: u16) -> Self {
    Self { x, y, strength, area }
  }

  /// Returns `true` if the slot holds an active touch.
  pub const fn is_active(&self) -> bool {
    self.strength != 0
  }
}

/// Single-finger gesture bits reported by the controller's on-chip
/// recognizer.
///
/// These are trusted as a fast path ahead of any software heuristics: a set
/// bit means the hardware already classified the gesture and the core only
/// translates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(u8)]
pub struct TouchGestures {
  /// A quick tap was recognized.
  pub single_tap: bool,
  /// The finger stayed down past the hold window (tap-and-hold).
  pub press_hold: bool,
}

impl TouchGestures {
  pub const fn new(single_tap: bool, press_hold: bool) -> Self {
    Self { single_tap, press_hold }
  }

  pub const fn none() -> Self {
    Self::new(false, false)
  }
}

/// Multi-finger gesture bits reported by the controller's on-chip
/// recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(u8)]
pub struct MultiTouchGestures {
  /// Two fingers tapped together.
  pub two_finger_tap: bool,
  /// Two fingers are dragging in a scroll motion.
  pub scroll: bool,
}

impl MultiTouchGestures {
  pub const fn new(two_finger_tap: bool, scroll: bool) -> Self {
    Self { two_finger_tap, scroll }
  }

  pub const fn none() -> Self {
    Self::new(false, false)
  }
}

/// Signed relative movement accumulated by the controller since the previous
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector {
  pub dx: i16,
  pub dy: i16,
}

impl Vector {
  pub const fn new(dx: i16, dy: i16) -> Self {
    Self { dx, dy }
  }

  /// Returns `true` if there is no movement on either axis.
  pub const fn is_zero(&self) -> bool {
    self.dx == 0 && self.dy == 0
  }
}

/// Maximum number of finger slots a sample can carry.
pub const MAX_FINGERS: usize = 5;

/// One assembled report from the touch controller.
///
/// `finger_count` is the authoritative contact cardinality for this sample;
/// slots at indices `>= finger_count` are undefined and must not be read.
/// The timestamp comes from a monotonic clock owned by the caller and is in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
  pub timestamp_ms: u64,
  pub finger_count: u8,
  pub fingers: [Finger; MAX_FINGERS],
  pub touch: TouchGestures,
  pub multi: MultiTouchGestures,
  pub delta: Vector,
}

impl Sample {
  /// Create an empty sample at the given timestamp.
  pub const fn new(timestamp_ms: u64, finger_count: u8) -> Self {
    Self {
      timestamp_ms,
      finger_count,
      fingers: [Finger::new(0, 0, 0, 0); MAX_FINGERS],
      touch: TouchGestures::none(),
      multi: MultiTouchGestures::none(),
      delta: Vector::new(0, 0),
    }
  }

  /// Place a finger snapshot into the given slot.
  pub const fn with_finger(mut self, slot: usize, finger: Finger) -> Self {
    self.fingers[slot] = finger;
    self
  }

  /// Attach the relative movement reported with this sample.
  pub const fn with_delta(mut self, dx: i16, dy: i16) -> Self {
    self.delta = Vector::new(dx, dy);
    self
  }

  /// Attach single-finger hardware gesture bits.
  pub const fn with_touch_gestures(mut self, touch: TouchGestures) -> Self {
    self.touch = touch;
    self
  }

  /// Attach multi-finger hardware gesture bits.
  pub const fn with_multi_gestures(mut self, multi: MultiTouchGestures) -> Self {
    self.multi = multi;
    self
  }

  /// Active finger slots within the reported cardinality.
  pub fn active_fingers(&self) -> impl Iterator<Item = &Finger> {
    let count = (self.finger_count as usize).min(MAX_FINGERS);
    self.fingers[..count].iter().filter(|f| f.is_active())
  }
}
