#![forbid(unsafe_code)]

//! Measurement and arrangement seams for layout participants.
//!
//! The flow engine treats every participant as an opaque handle behind
//! [`Measure`]: it asks for width bounds at a probe extent, asks for a
//! preferred height at a resolved width, and nothing else. Hosts that also
//! want the engine to position their nodes implement [`LayoutNode`] on top.

use crate::geometry::Rect;

/// Nominal probe extent used when querying an item's width bounds before
/// its final size is known.
pub const SIZE_PROBE: f64 = 10.0;

/// Read-only size queries for one layout participant.
///
/// Implementations may in principle answer differently on repeated calls;
/// the flow engine measures each item once per pass and treats the answer
/// as immutable for the remainder of that pass.
pub trait Measure {
    /// Minimum width when laid out at the given height.
    fn min_width(&self, height: f64) -> f64;

    /// Maximum width when laid out at the given height.
    ///
    /// `f64::INFINITY` means unbounded.
    fn max_width(&self, height: f64) -> f64;

    /// Preferred height when laid out at the given width.
    fn pref_height(&self, width: f64) -> f64;
}

/// A layout participant that can receive its resolved bounds.
pub trait LayoutNode: Measure {
    /// Assign the final position and size for one pass.
    fn arrange(&mut self, bounds: Rect);
}

impl<T: Measure + ?Sized> Measure for &T {
    fn min_width(&self, height: f64) -> f64 {
        (**self).min_width(height)
    }

    fn max_width(&self, height: f64) -> f64 {
        (**self).max_width(height)
    }

    fn pref_height(&self, width: f64) -> f64 {
        (**self).pref_height(width)
    }
}
