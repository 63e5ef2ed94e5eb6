#![forbid(unsafe_code)]

//! Flexbox-style wrapping layout.
//!
//! This crate computes a CSS-flexbox-inspired 2D layout for rectangular
//! items inside a container:
//!
//! - [`FlexFlow`] - the one-pass flow solver: item snapshot, greedy row
//!   partitioning, and proportional leftover-space distribution
//! - [`FlexContainer`] - child ownership, order/grow attachments, the
//!   re-entrancy guard, and height publication
//! - [`ConstraintTable`] - order/grow metadata keyed by [`ItemId`], kept
//!   out-of-band from the items themselves
//!
//! # Example
//!
//! ```ignore
//! use flexkit_layout::{FlexFlow, FlowItem};
//!
//! let flow = FlexFlow::row().horizontal_space(10.0);
//! let result = flow.compute(300.0, &items);
//! for rect in &result.rects {
//!     // rects are index-aligned with the input items
//! }
//! ```

pub mod constraints;
pub mod container;
pub mod flow;

pub use constraints::{
    ConstraintError, ConstraintTable, DEFAULT_GROW, DEFAULT_ORDER, ItemId, ItemIdAllocator,
};
pub use container::FlexContainer;
pub use flexkit_core::geometry::{Rect, Sides};
pub use flow::{FlexFlow, FlowItem, FlowResult};

/// The direction items flow through the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right, wrapping onto new rows when the running minimum
    /// width overflows the container.
    #[default]
    Row,
    /// Same row partitioning as [`Row`](Self::Row), but each row's items
    /// are positioned in reverse display order.
    RowReverse,
    /// One item per row, stretched toward the container width. Order and
    /// grow attachments are not consulted.
    Column,
    /// Identical to [`Column`](Self::Column); column flows have no
    /// reversed positioning.
    ColumnReverse,
}

impl Direction {
    /// Whether this direction wraps along the horizontal primary axis.
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Whether display order within a row is flipped for positioning.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}
