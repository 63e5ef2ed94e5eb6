#![forbid(unsafe_code)]

//! Order/grow metadata attached to items out-of-band.
//!
//! Flex items do not carry their order or grow weight themselves; the
//! values live in a side-table keyed by a stable [`ItemId`]. Absence of an
//! attachment means the default, and setting an attachment to `None`
//! removes it. The table is owned by whoever owns the items (normally
//! [`FlexContainer`](crate::FlexContainer)); the flow engine only ever
//! reads resolved values.

use std::collections::HashMap;
use std::fmt;

/// Order used for items with no attachment.
pub const DEFAULT_ORDER: i32 = 0;

/// Grow weight used for items with no attachment.
pub const DEFAULT_GROW: f64 = 1.0;

/// Stable identifier for container children.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Lowest valid item ID.
    pub const MIN: Self = Self(1);

    /// Create a new item ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, ConstraintError> {
        if raw == 0 {
            return Err(ConstraintError::ZeroItemId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, ConstraintError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(ConstraintError::ItemIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Deterministic allocator for item IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemIdAllocator {
    next: ItemId,
}

impl ItemIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: ItemId) -> Self {
        Self { next }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> ItemId {
        self.next
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<ItemId, ConstraintError> {
        let id = self.next;
        self.next = id.checked_next()?;
        Ok(id)
    }
}

/// Errors from ID allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintError {
    /// Item ID 0 is reserved.
    ZeroItemId,
    /// The allocator ran out of IDs.
    ItemIdOverflow {
        /// The last ID that was handed out.
        current: ItemId,
    },
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroItemId => write!(f, "item ID 0 is reserved"),
            Self::ItemIdOverflow { current } => {
                write!(f, "item ID overflow after {current}")
            }
        }
    }
}

impl std::error::Error for ConstraintError {}

/// Per-item attachment slots. An empty attachment is pruned from the
/// table so unset and never-set are indistinguishable.
#[derive(Debug, Clone, Copy, Default)]
struct Attachment {
    order: Option<i32>,
    grow: Option<f64>,
}

impl Attachment {
    fn is_empty(&self) -> bool {
        self.order.is_none() && self.grow.is_none()
    }
}

/// Side-table of per-item layout metadata.
#[derive(Debug, Clone, Default)]
pub struct ConstraintTable {
    attachments: HashMap<ItemId, Attachment>,
}

impl ConstraintTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the order attachment.
    ///
    /// Returns true when the resolved order for `id` changed.
    pub fn set_order(&mut self, id: ItemId, order: Option<i32>) -> bool {
        let before = self.order(id);
        self.update(id, |attachment| attachment.order = order);
        self.order(id) != before
    }

    /// Resolved order for `id` ([`DEFAULT_ORDER`] when unset).
    pub fn order(&self, id: ItemId) -> i32 {
        self.attachments
            .get(&id)
            .and_then(|attachment| attachment.order)
            .unwrap_or(DEFAULT_ORDER)
    }

    /// Set or clear the grow attachment.
    ///
    /// Returns true when the resolved grow weight for `id` changed.
    pub fn set_grow(&mut self, id: ItemId, grow: Option<f64>) -> bool {
        let before = self.grow(id);
        self.update(id, |attachment| attachment.grow = grow);
        self.grow(id) != before
    }

    /// Resolved grow weight for `id` ([`DEFAULT_GROW`] when unset).
    pub fn grow(&self, id: ItemId) -> f64 {
        self.attachments
            .get(&id)
            .and_then(|attachment| attachment.grow)
            .unwrap_or(DEFAULT_GROW)
    }

    /// Drop every attachment for `id`.
    pub fn clear(&mut self, id: ItemId) {
        self.attachments.remove(&id);
    }

    /// Number of items with at least one attachment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Whether no item carries an attachment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    fn update(&mut self, id: ItemId, apply: impl FnOnce(&mut Attachment)) {
        let attachment = self.attachments.entry(id).or_default();
        apply(attachment);
        if attachment.is_empty() {
            self.attachments.remove(&id);
        }
    }
}
