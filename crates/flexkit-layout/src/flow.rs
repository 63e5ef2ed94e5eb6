#![forbid(unsafe_code)]

//! The one-pass flow solver.
//!
//! A pass runs three stages in order:
//!
//! 1. **Snapshot** - each item's minimum width, order, and grow weight are
//!    read once and cached, so later stages never re-enter the item's
//!    measurement functions with inconsistent results.
//! 2. **Row partitioning** - items are grouped greedily into wrap lines:
//!    a row accepts its first item unconditionally, then accepts further
//!    items while the running minimum width plus spacing stays within the
//!    available width. Column directions bypass this stage (one item per
//!    row).
//! 3. **Row resolution** - leftover width in each row is distributed
//!    proportionally to grow weights, clamped to each item's own bounds,
//!    and items are positioned along the horizontal cursor while rows
//!    stack along the vertical one.

use flexkit_core::geometry::{Rect, Sides};
use flexkit_core::item::{Measure, SIZE_PROBE};

use crate::Direction;

/// One layout participant handed to [`FlexFlow::compute`].
pub struct FlowItem<'a> {
    /// The measurable handle.
    pub node: &'a dyn Measure,
    /// Resequencing key. Items keep source order while every order is 0;
    /// otherwise the whole sequence is stable-sorted by this value.
    pub order: i32,
    /// Unitless share of leftover row width. Negative values are treated
    /// as zero.
    pub grow: f64,
}

impl<'a> FlowItem<'a> {
    /// Wrap a node with default order (0) and grow weight (1.0).
    pub fn new(node: &'a dyn Measure) -> Self {
        Self {
            node,
            order: 0,
            grow: 1.0,
        }
    }
}

/// Result of one flow pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowResult {
    /// Resolved bounds, index-aligned with the input items.
    pub rects: Vec<Rect>,
    /// Total content height including padding. Row flows publish it;
    /// column flows yield `None` and leave the container's published
    /// height untouched.
    pub content_height: Option<f64>,
}

/// Cached measurements for one item, taken once at the start of a pass.
#[derive(Debug, Clone, Copy)]
struct Slot {
    /// Index into the caller's item slice; placements map back through it.
    index: usize,
    min_width: f64,
    order: i32,
    grow: f64,
}

/// One wrap line. Built incrementally during partitioning, immutable once
/// resolution begins.
#[derive(Debug, Clone, Default)]
struct Row {
    slots: Vec<Slot>,
    min_width_sum: f64,
    grow_sum: f64,
}

impl Row {
    fn push(&mut self, slot: Slot) {
        self.min_width_sum += slot.min_width;
        self.grow_sum += slot.grow;
        self.slots.push(slot);
    }
}

/// Flow configuration and entry point.
///
/// Builder-style setters mirror the container's configuration surface;
/// a `FlexFlow` itself is cheap to build per pass and carries no state
/// across passes.
#[derive(Debug, Clone, Default)]
pub struct FlexFlow {
    direction: Direction,
    horizontal_space: f64,
    vertical_space: f64,
    padding: Sides,
}

impl FlexFlow {
    /// Create a flow with default configuration (row direction, no
    /// spacing, no padding).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row-direction flow.
    pub fn row() -> Self {
        Self::default()
    }

    /// Create a column-direction flow.
    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Default::default()
        }
    }

    /// Set the flow direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the gap between items within a row.
    pub fn horizontal_space(mut self, space: f64) -> Self {
        self.horizontal_space = space;
        self
    }

    /// Set the gap between rows.
    pub fn vertical_space(mut self, space: f64) -> Self {
        self.vertical_space = space;
        self
    }

    /// Set the container padding.
    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Compute placements for `items` in a container of the given width.
    ///
    /// Placements are index-aligned with `items` regardless of any order
    /// resequencing. Two column-flow quirks are part of the contract:
    /// items are positioned from x = 0 (left padding does not offset the
    /// cursor) and heights are probed at the stretch-target width rather
    /// than the max-clamped final width.
    pub fn compute(&self, width: f64, items: &[FlowItem<'_>]) -> FlowResult {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "flex_flow",
            width,
            items = items.len(),
            direction = ?self.direction,
        )
        .entered();
        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();

        let result = if self.direction.is_row() {
            self.compute_rows(width, items)
        } else {
            self.compute_columns(width, items)
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "flow pass complete"
        );

        result
    }

    fn compute_rows(&self, width: f64, items: &[FlowItem<'_>]) -> FlowResult {
        let mut rects = vec![Rect::default(); items.len()];

        let mut slots: Vec<Slot> = items
            .iter()
            .enumerate()
            .map(|(index, item)| Slot {
                index,
                min_width: item.node.min_width(SIZE_PROBE),
                order: item.order,
                grow: item.grow.max(0.0),
            })
            .collect();

        if slots.iter().any(|slot| slot.order != 0) {
            // Stable, so equal orders keep their source sequence.
            slots.sort_by_key(|slot| slot.order);
        }

        let available = width - self.padding.horizontal_sum();
        let grid = partition_rows(slots, available, self.horizontal_space);

        let row_count = grid.len();
        let mut y = self.padding.top;

        for (row_index, row) in grid.iter().enumerate() {
            let gaps = self.horizontal_space * (row.slots.len() - 1) as f64;
            let remaining = width - row.min_width_sum - gaps - self.padding.horizontal_sum();
            let grow_unit = if row.grow_sum > 0.0 {
                remaining / row.grow_sum
            } else {
                0.0
            };

            let display: Box<dyn Iterator<Item = &Slot>> = if self.direction.is_reverse() {
                Box::new(row.slots.iter().rev())
            } else {
                Box::new(row.slots.iter())
            };

            let mut x = self.padding.left;
            let mut row_height = 0.0f64;

            for slot in display {
                let item = &items[slot.index];
                let max_width = item.node.max_width(SIZE_PROBE);
                let stretched = slot.min_width + grow_unit * slot.grow;
                let item_width = stretched.max(slot.min_width).min(max_width).max(0.0);
                let item_height = item.node.pref_height(item_width);

                rects[slot.index] = Rect::new(x, y, item_width, item_height);
                row_height = row_height.max(item_height);
                x += item_width + self.horizontal_space;
            }

            y += row_height;
            if row_index + 1 < row_count {
                y += self.vertical_space;
            }
        }

        y += self.padding.bottom;

        FlowResult {
            rects,
            content_height: Some(y),
        }
    }

    fn compute_columns(&self, width: f64, items: &[FlowItem<'_>]) -> FlowResult {
        let mut rects = vec![Rect::default(); items.len()];
        let stretch = width - self.padding.horizontal_sum();
        let count = items.len();
        let mut y = self.padding.top;

        for (index, item) in items.iter().enumerate() {
            let min_width = item.node.min_width(SIZE_PROBE);
            let max_width = item.node.max_width(SIZE_PROBE);
            let item_width = stretch.max(min_width).min(max_width).max(0.0);
            // Height is probed at the stretch width; a max-width cap does
            // not trigger a re-measure.
            let item_height = item.node.pref_height(stretch);

            rects[index] = Rect::new(0.0, y, item_width, item_height);
            y += item_height;
            if index + 1 < count {
                y += self.vertical_space;
            }
        }

        FlowResult {
            rects,
            content_height: None,
        }
    }
}

/// Greedy first-fit row partitioning.
///
/// The first item of a row is admitted unconditionally, so a single item
/// wider than the container still gets a row (unavoidable overflow, not an
/// error). Afterwards an item wraps when the running minimum width plus
/// one gap would exceed `available`. A zero or negative `available`
/// degenerates to one item per row.
fn partition_rows(slots: Vec<Slot>, available: f64, gap: f64) -> Vec<Row> {
    let mut grid: Vec<Row> = Vec::new();
    let mut current = Row::default();
    let mut running = 0.0f64;

    for slot in slots {
        if current.slots.is_empty() {
            running = slot.min_width;
        } else if running + gap + slot.min_width > available {
            grid.push(std::mem::take(&mut current));
            running = slot.min_width;
        } else {
            running += gap + slot.min_width;
        }
        current.push(slot);
    }
    if !current.slots.is_empty() {
        grid.push(current);
    }

    grid
}
