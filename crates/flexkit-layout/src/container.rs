#![forbid(unsafe_code)]

//! Child ownership and pass orchestration around the flow engine.
//!
//! [`FlexContainer`] is the host-facing wrapper: it owns the child nodes,
//! the order/grow side-table, and the configuration, and it runs one flow
//! pass at a time. While a pass is running, invalidation requests are
//! dropped - a pass's own mutations (arranging children) must not queue up
//! another pass.

use flexkit_core::geometry::Sides;
use flexkit_core::item::{LayoutNode, Measure};

use crate::Direction;
use crate::constraints::{ConstraintError, ConstraintTable, ItemId, ItemIdAllocator};
use crate::flow::{FlexFlow, FlowItem};

#[derive(Debug)]
struct Child<N> {
    id: ItemId,
    node: N,
}

/// A flex container: owns child nodes, their order/grow attachments, and
/// the height published by the last row-direction pass.
///
/// All layout-affecting calls must happen on the one logical thread that
/// performs layout; the container carries no synchronization of its own.
#[derive(Debug)]
pub struct FlexContainer<N> {
    children: Vec<Child<N>>,
    constraints: ConstraintTable,
    allocator: ItemIdAllocator,
    direction: Direction,
    horizontal_space: f64,
    vertical_space: f64,
    padding: Sides,
    computed_height: f64,
    performing_layout: bool,
    needs_layout: bool,
}

impl<N> FlexContainer<N> {
    /// Create an empty container with default configuration (row
    /// direction, no spacing, no padding). A fresh container needs a pass.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            constraints: ConstraintTable::new(),
            allocator: ItemIdAllocator::default(),
            direction: Direction::Row,
            horizontal_space: 0.0,
            vertical_space: 0.0,
            padding: Sides::default(),
            computed_height: 0.0,
            performing_layout: false,
            needs_layout: true,
        }
    }

    // --- Children ---

    /// Append a child, returning its stable ID.
    pub fn push(&mut self, node: N) -> Result<ItemId, ConstraintError> {
        let id = self.allocator.allocate()?;
        self.children.push(Child { id, node });
        self.request_layout();
        Ok(id)
    }

    /// Insert a child at `index` (clamped to the child count), returning
    /// its stable ID.
    pub fn insert(&mut self, index: usize, node: N) -> Result<ItemId, ConstraintError> {
        let id = self.allocator.allocate()?;
        let index = index.min(self.children.len());
        self.children.insert(index, Child { id, node });
        self.request_layout();
        Ok(id)
    }

    /// Remove a child by ID, dropping its attachments.
    pub fn remove(&mut self, id: ItemId) -> Option<N> {
        let position = self.children.iter().position(|child| child.id == id)?;
        let child = self.children.remove(position);
        self.constraints.clear(id);
        self.request_layout();
        Some(child.node)
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child IDs in source order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.children.iter().map(|child| child.id)
    }

    /// Borrow a child node by ID.
    pub fn node(&self, id: ItemId) -> Option<&N> {
        self.children
            .iter()
            .find(|child| child.id == id)
            .map(|child| &child.node)
    }

    /// Mutably borrow a child node by ID.
    ///
    /// Mutating a node invalidates any previous pass; callers should
    /// follow up with [`request_layout`](Self::request_layout).
    pub fn node_mut(&mut self, id: ItemId) -> Option<&mut N> {
        self.children
            .iter_mut()
            .find(|child| child.id == id)
            .map(|child| &mut child.node)
    }

    // --- Configuration ---

    /// Current flow direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the flow direction.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.request_layout();
        }
    }

    /// Gap between items within a row.
    #[must_use]
    pub fn horizontal_space(&self) -> f64 {
        self.horizontal_space
    }

    /// Set the gap between items within a row.
    pub fn set_horizontal_space(&mut self, space: f64) {
        if self.horizontal_space != space {
            self.horizontal_space = space;
            self.request_layout();
        }
    }

    /// Gap between rows.
    #[must_use]
    pub fn vertical_space(&self) -> f64 {
        self.vertical_space
    }

    /// Set the gap between rows.
    pub fn set_vertical_space(&mut self, space: f64) {
        if self.vertical_space != space {
            self.vertical_space = space;
            self.request_layout();
        }
    }

    /// Container padding.
    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    /// Set the container padding.
    pub fn set_padding(&mut self, padding: impl Into<Sides>) {
        let padding = padding.into();
        if self.padding != padding {
            self.padding = padding;
            self.request_layout();
        }
    }

    // --- Order/grow attachments ---

    /// Set or clear the order attachment for `id`. `None` removes the
    /// attachment so the default applies again.
    pub fn set_order(&mut self, id: ItemId, order: Option<i32>) {
        self.constraints.set_order(id, order);
        self.request_layout();
    }

    /// Resolved order for `id`.
    #[must_use]
    pub fn order(&self, id: ItemId) -> i32 {
        self.constraints.order(id)
    }

    /// Set or clear the grow attachment for `id`. `None` removes the
    /// attachment so the default applies again.
    pub fn set_grow(&mut self, id: ItemId, grow: Option<f64>) {
        self.constraints.set_grow(id, grow);
        self.request_layout();
    }

    /// Resolved grow weight for `id`.
    #[must_use]
    pub fn grow(&self, id: ItemId) -> f64 {
        self.constraints.grow(id)
    }

    // --- Invalidation ---

    /// Ask for a new pass.
    ///
    /// Requests arriving while a pass is running are side effects of that
    /// same pass and are silently dropped, not queued.
    pub fn request_layout(&mut self) {
        if self.performing_layout {
            return;
        }
        self.needs_layout = true;
    }

    /// Whether a pass has been requested since the last one completed.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    // --- Published sizes ---

    /// Published minimum height: the content height of the last
    /// row-direction pass (column passes leave it untouched).
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.computed_height
    }

    /// Published preferred height. Identical to [`min_height`](Self::min_height).
    #[must_use]
    pub fn pref_height(&self) -> f64 {
        self.computed_height
    }
}

impl<N: LayoutNode> FlexContainer<N> {
    /// Run one full layout pass at the given container width and arrange
    /// every child.
    ///
    /// The pass runs to completion with no suspension points; row-direction
    /// passes publish the resulting content height through
    /// [`min_height`](Self::min_height) / [`pref_height`](Self::pref_height).
    pub fn layout(&mut self, width: f64) {
        self.performing_layout = true;

        let flow = FlexFlow::new()
            .direction(self.direction)
            .horizontal_space(self.horizontal_space)
            .vertical_space(self.vertical_space)
            .padding(self.padding);

        let result = {
            let items: Vec<FlowItem<'_>> = self
                .children
                .iter()
                .map(|child| FlowItem {
                    node: &child.node as &dyn Measure,
                    order: self.constraints.order(child.id),
                    grow: self.constraints.grow(child.id),
                })
                .collect();
            flow.compute(width, &items)
        };

        for (child, rect) in self.children.iter_mut().zip(&result.rects) {
            child.node.arrange(*rect);
        }
        if let Some(height) = result.content_height {
            self.computed_height = height;
        }

        self.performing_layout = false;
        self.needs_layout = false;
    }
}

impl<N> Default for FlexContainer<N> {
    fn default() -> Self {
        Self::new()
    }
}
