#![forbid(unsafe_code)]

//! Flow Invariant Suite
//!
//! Cross-cutting invariants of the flow solver and the container wrapper,
//! checked over hand-picked cases and randomized inputs.
//!
//! # Invariants Tested
//!
//! | ID       | Invariant                                                |
//! |----------|----------------------------------------------------------|
//! | COVER-1  | Every input item gets exactly one placement              |
//! | FIT-1    | Multi-item rows fit min widths + gaps in available width |
//! | GROW-1   | Leftover space splits in the ratio of grow weights       |
//! | CLAMP-1  | No width below an item's min or above its max            |
//! | ORDER-1  | Row membership is non-decreasing in order, stable ties   |
//! | MIRROR-1 | RowReverse mirrors positions, keeps row membership       |
//! | IDEM-1   | Re-running a pass with unchanged inputs does not drift   |
//! | PUB-1    | Row passes publish content height as min/pref height     |

use flexkit_core::geometry::Rect;
use flexkit_core::item::{LayoutNode, Measure};
use flexkit_layout::{Direction, FlexContainer, FlexFlow, FlowItem};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
struct Probe {
    min: f64,
    max: f64,
    height: f64,
}

impl Probe {
    fn new(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
            height: 10.0,
        }
    }
}

impl Measure for Probe {
    fn min_width(&self, _height: f64) -> f64 {
        self.min
    }

    fn max_width(&self, _height: f64) -> f64 {
        self.max
    }

    fn pref_height(&self, _width: f64) -> f64 {
        self.height
    }
}

#[derive(Debug)]
struct ProbeNode {
    probe: Probe,
    bounds: Option<Rect>,
}

impl Measure for ProbeNode {
    fn min_width(&self, height: f64) -> f64 {
        self.probe.min_width(height)
    }

    fn max_width(&self, height: f64) -> f64 {
        self.probe.max_width(height)
    }

    fn pref_height(&self, width: f64) -> f64 {
        self.probe.pref_height(width)
    }
}

impl LayoutNode for ProbeNode {
    fn arrange(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }
}

fn flow_items(probes: &[Probe]) -> Vec<FlowItem<'_>> {
    probes.iter().map(|p| FlowItem::new(p)).collect()
}

/// Group placements into rows by their y coordinate. All probes share one
/// height, so items share a row exactly when they share a y.
fn rows_by_y(rects: &[Rect]) -> Vec<Vec<usize>> {
    let mut ys: Vec<f64> = rects.iter().map(|r| r.y).collect();
    ys.sort_by(|a, b| a.total_cmp(b));
    ys.dedup_by(|a, b| (*a - *b).abs() < EPS);

    ys.iter()
        .map(|&y| {
            let mut members: Vec<usize> = (0..rects.len())
                .filter(|&i| (rects[i].y - y).abs() < EPS)
                .collect();
            members.sort_by(|&a, &b| rects[a].x.total_cmp(&rects[b].x));
            members
        })
        .collect()
}

// ============================================================================
// Deterministic cases
// ============================================================================

#[test]
fn order_sequence_is_non_decreasing_with_stable_ties() {
    let probes = vec![Probe::new(40.0); 6];
    let mut items = flow_items(&probes);
    // Two items per explicit order value, one pair left at the default.
    items[0].order = 5;
    items[1].order = 5;
    items[2].order = -3;
    items[3].order = -3;

    let result = FlexFlow::row().compute(1000.0, &items);
    let rows = rows_by_y(&result.rects);
    assert_eq!(rows.len(), 1);

    // Display sequence: the -3 pair, the default pair, the 5 pair, each
    // pair keeping source order.
    assert_eq!(rows[0], vec![2, 3, 4, 5, 0, 1]);
}

#[test]
fn oversized_item_overflows_alone_without_error() {
    let probes = vec![Probe::new(50.0), Probe::new(900.0), Probe::new(50.0)];
    let result = FlexFlow::row().compute(300.0, &flow_items(&probes));
    let rows = rows_by_y(&result.rects);

    // The oversized item ends a row on its own and keeps its min width.
    assert!(rows.iter().any(|row| row == &vec![1]));
    assert!(result.rects[1].width >= 900.0 - EPS);
}

#[test]
fn publishes_height_not_preferred_width() {
    // The computed total height feeds the container's min and preferred
    // height. It is deliberately not reused as a preferred width.
    let mut container = FlexContainer::new();
    container
        .push(ProbeNode {
            probe: Probe::new(100.0),
            bounds: None,
        })
        .unwrap();
    container
        .push(ProbeNode {
            probe: Probe::new(100.0),
            bounds: None,
        })
        .unwrap();
    container.set_padding(3.0);

    container.layout(150.0);

    // Two stacked rows of height 10 plus vertical padding.
    assert!((container.min_height() - 26.0).abs() < EPS);
    assert!((container.pref_height() - 26.0).abs() < EPS);
}

#[test]
fn column_pass_keeps_previous_published_height() {
    let mut container = FlexContainer::new();
    container
        .push(ProbeNode {
            probe: Probe::new(100.0),
            bounds: None,
        })
        .unwrap();

    container.layout(300.0);
    let published = container.min_height();
    assert!(published > 0.0);

    container.set_direction(Direction::ColumnReverse);
    container.layout(300.0);
    assert_eq!(container.min_height(), published);
}

// ============================================================================
// Randomized invariants
// ============================================================================

fn probe_row() -> impl Strategy<Value = Vec<Probe>> {
    prop::collection::vec((1.0f64..120.0).prop_map(Probe::new), 1..12)
}

proptest! {
    // COVER-1
    #[test]
    fn every_item_is_placed_exactly_once(
        probes in probe_row(),
        width in 1.0f64..500.0,
        gap in 0.0f64..20.0,
    ) {
        let result = FlexFlow::row()
            .horizontal_space(gap)
            .compute(width, &flow_items(&probes));

        prop_assert_eq!(result.rects.len(), probes.len());
        let placed: usize = rows_by_y(&result.rects).iter().map(Vec::len).sum();
        prop_assert_eq!(placed, probes.len());
    }

    // FIT-1
    #[test]
    fn multi_item_rows_fit_available_width(
        probes in probe_row(),
        width in 50.0f64..500.0,
        gap in 0.0f64..20.0,
        pad in 0.0f64..10.0,
    ) {
        let result = FlexFlow::row()
            .horizontal_space(gap)
            .padding(pad)
            .compute(width, &flow_items(&probes));
        let available = width - 2.0 * pad;

        for row in rows_by_y(&result.rects) {
            if row.len() < 2 {
                continue;
            }
            let min_sum: f64 = row.iter().map(|&i| probes[i].min).sum();
            let gaps = gap * (row.len() - 1) as f64;
            prop_assert!(min_sum + gaps <= available + EPS);
        }
    }

    // GROW-1
    #[test]
    fn grow_ratio_governs_extra_width(
        min in 1.0f64..50.0,
        g1 in 0.1f64..8.0,
        g2 in 0.1f64..8.0,
        extra in 10.0f64..400.0,
    ) {
        let probes = vec![Probe::new(min), Probe::new(min)];
        let mut items = flow_items(&probes);
        items[0].grow = g1;
        items[1].grow = g2;

        let width = 2.0 * min + extra;
        let result = FlexFlow::row().compute(width, &items);

        let extra1 = result.rects[0].width - min;
        let extra2 = result.rects[1].width - min;
        prop_assert!((extra1 * g2 - extra2 * g1).abs() < 1e-6 * extra.max(1.0));
    }

    // CLAMP-1
    #[test]
    fn widths_respect_item_bounds(
        specs in prop::collection::vec((1.0f64..100.0, 0.0f64..200.0, 0.0f64..5.0), 1..10),
        width in 1.0f64..600.0,
    ) {
        let probes: Vec<Probe> = specs
            .iter()
            .map(|&(min, slack, _)| Probe {
                min,
                max: min + slack,
                height: 10.0,
            })
            .collect();
        let mut items = flow_items(&probes);
        for (item, &(_, _, grow)) in items.iter_mut().zip(&specs) {
            item.grow = grow;
        }

        let result = FlexFlow::row().compute(width, &items);
        for (rect, probe) in result.rects.iter().zip(&probes) {
            prop_assert!(rect.width + EPS >= probe.min);
            prop_assert!(rect.width <= probe.max + EPS);
        }
    }

    // ORDER-1
    #[test]
    fn row_sequence_is_sorted_by_order(
        orders in prop::collection::vec(-5i32..5, 2..10),
    ) {
        let probes = vec![Probe::new(10.0); orders.len()];
        let mut items = flow_items(&probes);
        for (item, &order) in items.iter_mut().zip(&orders) {
            item.order = order;
        }

        let result = FlexFlow::row().compute(10_000.0, &items);
        let rows = rows_by_y(&result.rects);
        prop_assert_eq!(rows.len(), 1);

        let sequence: Vec<i32> = rows[0].iter().map(|&i| orders[i]).collect();
        prop_assert!(sequence.windows(2).all(|w| w[0] <= w[1]));

        // Stable: equal orders keep their source index order.
        for pair in rows[0].windows(2) {
            if orders[pair[0]] == orders[pair[1]] {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    // MIRROR-1
    #[test]
    fn row_reverse_is_a_mirror_image(
        probes in prop::collection::vec((1.0f64..100.0).prop_map(Probe::new), 1..10),
        gap in 0.0f64..10.0,
    ) {
        let width = 250.0;
        let forward = FlexFlow::row()
            .horizontal_space(gap)
            .compute(width, &flow_items(&probes));
        let reversed = FlexFlow::row()
            .direction(Direction::RowReverse)
            .horizontal_space(gap)
            .compute(width, &flow_items(&probes));

        for i in 0..probes.len() {
            // Same row membership and width; mirrored horizontal span.
            prop_assert!((reversed.rects[i].y - forward.rects[i].y).abs() < EPS);
            prop_assert!((reversed.rects[i].width - forward.rects[i].width).abs() < EPS);
            let mirrored = width - forward.rects[i].x - forward.rects[i].width;
            prop_assert!((reversed.rects[i].x - mirrored).abs() < EPS);
        }
    }

    // IDEM-1
    #[test]
    fn recomputing_produces_identical_placements(
        probes in probe_row(),
        width in 1.0f64..500.0,
        gap in 0.0f64..20.0,
    ) {
        let flow = FlexFlow::row().horizontal_space(gap).vertical_space(3.0);
        let first = flow.compute(width, &flow_items(&probes));
        let second = flow.compute(width, &flow_items(&probes));
        prop_assert_eq!(first, second);
    }

    // PUB-1
    #[test]
    fn published_height_matches_bottom_most_row(
        probes in probe_row(),
        width in 50.0f64..500.0,
        vspace in 0.0f64..15.0,
    ) {
        let result = FlexFlow::row()
            .vertical_space(vspace)
            .compute(width, &flow_items(&probes));

        let bottom = result
            .rects
            .iter()
            .map(Rect::bottom)
            .fold(0.0f64, f64::max);
        let height = result.content_height.expect("row flows publish a height");
        prop_assert!((height - bottom).abs() < EPS);
    }
}
