//! Per-finger-count gesture handlers.
//!
//! Exactly one handler runs per sample, selected by the engine from the
//! sample's finger count. Each handler exposes `handle` for live samples and
//! `teardown` for the moment its finger count stops holding; teardown
//! consumes the session state so nothing can survive into the next variant.

pub(crate) mod dual;
pub(crate) mod single;
pub(crate) mod triple;
