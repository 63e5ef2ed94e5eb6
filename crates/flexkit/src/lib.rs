#![forbid(unsafe_code)]

//! Flexkit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use flexkit_core::geometry::{Rect, Sides};
pub use flexkit_core::item::{LayoutNode, Measure, SIZE_PROBE};

// --- Layout re-exports -----------------------------------------------------

pub use flexkit_layout::{
    ConstraintError, ConstraintTable, DEFAULT_GROW, DEFAULT_ORDER, Direction, FlexContainer,
    FlexFlow, FlowItem, FlowResult, ItemId, ItemIdAllocator,
};

/// Common imports for typical usage.
///
/// ```
/// use flexkit::prelude::*;
///
/// let flow = FlexFlow::row().horizontal_space(4.0);
/// let result = flow.compute(120.0, &[]);
/// assert!(result.rects.is_empty());
/// ```
pub mod prelude {
    pub use crate::{
        Direction, FlexContainer, FlexFlow, FlowItem, FlowResult, ItemId, LayoutNode, Measure,
        Rect, Sides,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    struct Label {
        min: f64,
        height: f64,
        bounds: Option<Rect>,
    }

    impl Measure for Label {
        fn min_width(&self, _height: f64) -> f64 {
            self.min
        }

        fn max_width(&self, _height: f64) -> f64 {
            f64::INFINITY
        }

        fn pref_height(&self, _width: f64) -> f64 {
            self.height
        }
    }

    impl LayoutNode for Label {
        fn arrange(&mut self, bounds: Rect) {
            self.bounds = Some(bounds);
        }
    }

    #[test]
    fn facade_round_trip() {
        let mut container = FlexContainer::new();
        let id = container
            .push(Label {
                min: 50.0,
                height: 12.0,
                bounds: None,
            })
            .unwrap();
        container.set_grow(id, Some(2.0));
        container.layout(200.0);

        let bounds = container.node(id).unwrap().bounds.unwrap();
        assert_eq!(bounds.width, 200.0);
        assert_eq!(container.min_height(), 12.0);
    }
}
