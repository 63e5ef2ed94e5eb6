#![forbid(unsafe_code)]

//! Core primitives shared by the flexkit crates.
//!
//! This crate holds the pieces that do not depend on any particular flow
//! algorithm:
//!
//! - [`geometry`] - container-local rectangles and edge insets
//! - [`item`] - the measurement and arrangement seams a layout participant
//!   must expose

pub mod geometry;
pub mod item;

pub use geometry::{Rect, Sides};
pub use item::{LayoutNode, Measure, SIZE_PROBE};
