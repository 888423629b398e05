//! Integration tests for the tree widget.
//!
//! Every test builds its own tree and headless canvas. Rows use a theme with
//! a 12-unit icon and 4-unit padding and a 12-unit-tall template, so every
//! row is 20 units tall and consecutive rows start 21 units apart.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thicket::Signal;
use thicket::render::{Point, Size};
use thicket::testing::{PaintedKind, TestCanvas, TestRow};
use thicket::theme::Theme;
use thicket::widget::widgets::{NodeShape, RowIndicator, Tree, TreeData, TreeNodeId};

const ROW: f32 = 20.0;
const STRIDE: f32 = 21.0;

fn theme() -> Theme {
    Theme {
        icon_inline_size: 12.0,
        padding: 4.0,
        text_size: 10.0,
    }
}

fn template() -> TestRow {
    TestRow::new(Size::new(40.0, 12.0))
}

/// A tree over a child map; nodes with an entry are branches.
fn tree_from(entries: &[(&str, &[&str])]) -> Tree<TestRow> {
    let map: HashMap<TreeNodeId, Vec<TreeNodeId>> = entries
        .iter()
        .map(|(uid, children)| {
            (
                uid.to_string(),
                children.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect();
    let map = Arc::new(map);
    let children = map.clone();
    Tree::new(
        TreeData::new()
            .with_child_uids(move |uid| children.get(uid).cloned().unwrap_or_default())
            .with_is_branch(move |uid| map.contains_key(uid))
            .with_create_node(|_| template())
            .with_update_node(|uid, _, row: &mut TestRow| row.bind(uid)),
    )
}

/// `count` leaves named `row_0..` directly under the root.
fn flat(count: usize) -> Tree<TestRow> {
    Tree::new(
        TreeData::new()
            .with_child_uids(move |uid| {
                if uid.is_empty() {
                    (0..count).map(|i| format!("row_{i}")).collect()
                } else {
                    Vec::new()
                }
            })
            .with_create_node(|_| template())
            .with_update_node(|uid, _, row: &mut TestRow| row.bind(uid)),
    )
}

fn host<C>(tree: &Tree<C>, width: f32, height: f32) -> TestCanvas
where
    C: thicket::widget::CanvasObject + Send + 'static,
{
    let canvas = TestCanvas::new(Size::new(width, height)).with_theme(theme());
    canvas.host(tree);
    canvas
}

fn record(signal: &Signal<TreeNodeId>, log: &Arc<Mutex<Vec<String>>>, tag: &'static str) {
    let log = log.clone();
    signal.connect(move |uid| log.lock().push(format!("{tag} {uid}")));
}

fn three_level() -> Tree<TestRow> {
    tree_from(&[("", &["A", "B"]), ("A", &["A1", "A2"])])
}

// =========================================================================
// Open state
// =========================================================================

#[test]
fn test_unset_branches_are_closed_and_root_is_open() {
    let tree = three_level();
    assert!(!tree.is_branch_open("A"));
    assert!(!tree.is_branch_open("never-seen"));
    assert!(tree.is_branch_open(""));

    tree.close_branch("");
    assert!(tree.is_branch_open(""));

    tree.set_root("A");
    assert!(tree.is_branch_open("A"));
    tree.close_branch("A");
    assert!(tree.is_branch_open("A"));
}

#[test]
fn test_toggle_twice_restores_state() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);
    let log = Arc::new(Mutex::new(Vec::new()));
    record(tree.branch_opened(), &log, "opened");
    record(tree.branch_closed(), &log, "closed");

    tree.toggle_branch("A");
    assert!(tree.is_branch_open("A"));
    tree.toggle_branch("A");
    assert!(!tree.is_branch_open("A"));

    assert_eq!(*log.lock(), vec!["opened A", "closed A"]);
}

#[test]
fn test_three_level_walk_order() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);

    let rows: Vec<_> = tree
        .flattened_rows()
        .into_iter()
        .map(|r| (r.uid, r.depth))
        .collect();
    assert_eq!(rows, vec![("A".to_string(), 0), ("B".to_string(), 0)]);

    tree.open_branch("A");
    let rows = tree.flattened_rows();
    let uids: Vec<_> = rows.iter().map(|r| r.uid.as_str()).collect();
    assert_eq!(uids, ["A", "A1", "A2", "B"]);
    assert_eq!(rows[1].depth, rows[0].depth + 1);
    assert_eq!(rows[2].depth, rows[0].depth + 1);
    assert_eq!(rows[0].shape, NodeShape::Branch);
    assert_eq!(rows[3].shape, NodeShape::Leaf);

    // Opening re-lays out immediately.
    let rendered: Vec<_> = tree.rendered_rows().into_iter().map(|r| r.uid).collect();
    assert_eq!(rendered, ["A", "A1", "A2", "B"]);
    assert!(tree.rendered_rows()[0].expanded);
}

#[test]
fn test_open_all_and_close_all_emit_nothing() {
    let tree = tree_from(&[
        ("", &["a", "b"]),
        ("a", &["a1", "a2"]),
        ("a1", &["a1x"]),
        ("b", &[]),
    ]);
    host(&tree, 200.0, 400.0);
    let log = Arc::new(Mutex::new(Vec::new()));
    record(tree.branch_opened(), &log, "opened");
    record(tree.branch_closed(), &log, "closed");

    tree.open_all_branches();
    let uids: Vec<_> = tree.flattened_rows().into_iter().map(|r| r.uid).collect();
    assert_eq!(uids, ["a", "a1", "a1x", "a2", "b"]);
    assert!(tree.is_branch_open("a1"));

    tree.close_all_branches();
    let uids: Vec<_> = tree.flattened_rows().into_iter().map(|r| r.uid).collect();
    assert_eq!(uids, ["a", "b"]);
    assert!(!tree.is_branch_open("a1"));

    assert!(log.lock().is_empty());
}

#[test]
fn test_custom_root_is_a_row() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);
    tree.set_root("A");

    let rows: Vec<_> = tree
        .flattened_rows()
        .into_iter()
        .map(|r| (r.uid, r.depth))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("A".to_string(), 0),
            ("A1".to_string(), 1),
            ("A2".to_string(), 1),
        ]
    );
    assert_eq!(tree.rendered_rows().len(), 3);
}

// =========================================================================
// Selection
// =========================================================================

#[test]
fn test_selection_notifications_are_ordered_and_exclusive() {
    let tree = flat(5);
    host(&tree, 200.0, 200.0);
    let log = Arc::new(Mutex::new(Vec::new()));
    record(tree.selected(), &log, "selected");
    record(tree.unselected(), &log, "unselected");

    tree.select("row_1");
    log.lock().clear();

    tree.select("row_3");
    assert_eq!(*log.lock(), vec!["unselected row_1", "selected row_3"]);

    tree.select("row_3");
    assert_eq!(log.lock().len(), 2);
    assert_eq!(tree.selection().as_deref(), Some("row_3"));
}

#[test]
fn test_unselect() {
    let tree = flat(5);
    host(&tree, 200.0, 200.0);
    let log = Arc::new(Mutex::new(Vec::new()));
    record(tree.unselected(), &log, "unselected");

    tree.unselect("row_0");
    assert!(log.lock().is_empty());

    tree.select("row_2");
    tree.unselect("row_2");
    assert_eq!(*log.lock(), vec!["unselected row_2"]);
    assert!(tree.selection().is_none());
}

#[test]
fn test_select_scrolls_row_into_view() {
    let tree = flat(100);
    host(&tree, 200.0, 200.0);
    assert_eq!(tree.offset().y, 0.0);

    tree.select("row_90");
    let top = 90.0 * STRIDE;
    let offset = tree.offset().y;
    assert!(top >= offset && top + ROW <= offset + 200.0, "offset {offset}");
    assert_eq!(offset, top + ROW - 200.0);

    let rendered: Vec<_> = tree.rendered_rows().into_iter().map(|r| r.uid).collect();
    assert!(rendered.contains(&"row_90".to_string()));

    // Selecting above the viewport scrolls up to the row's top edge.
    tree.select("row_5");
    assert_eq!(tree.offset().y, 5.0 * STRIDE);

    // Already visible: no scrolling.
    tree.select("row_6");
    assert_eq!(tree.offset().y, 5.0 * STRIDE);
}

#[test]
fn test_select_hidden_node_does_not_scroll() {
    let tree = tree_from(&[("", &["a", "b", "c", "d", "e", "f", "g", "h", "z"]), ("z", &["deep"])]);
    host(&tree, 200.0, 60.0);

    tree.select("deep");
    assert_eq!(tree.selection().as_deref(), Some("deep"));
    assert_eq!(tree.offset().y, 0.0);
}

#[test]
fn test_slots_may_call_back_into_the_tree() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);
    let handle = tree.clone();
    tree.branch_opened().connect(move |uid| handle.select(uid));

    tree.open_branch("A");
    assert_eq!(tree.selection().as_deref(), Some("A"));
}

// =========================================================================
// Virtualization
// =========================================================================

#[test]
fn test_pool_bounds_constructed_rows_across_scrolling() {
    let tree = flat(300);
    host(&tree, 200.0, 100.0);
    // ceil(100 / 20) + 1
    let bound = 6;

    for step in 0..200 {
        tree.scroll_by(37.0);
        assert!(tree.rendered_rows().len() <= bound, "step {step}");
    }
    for &y in &[0.0, 5000.0, 123.0, 6000.0, 0.0, 2500.5] {
        tree.scroll_to(Point::new(0.0, y));
    }
    assert!(tree.constructed_rows(NodeShape::Leaf) <= bound);
    assert_eq!(tree.constructed_rows(NodeShape::Branch), 0);
}

#[test]
fn test_materialized_rows_intersect_viewport() {
    let tree = flat(100);
    let height = 150.0;
    host(&tree, 200.0, height);

    for &y in &[0.0, 10.0, 20.5, 21.0, 400.0, 1234.0, 10_000.0] {
        tree.scroll_to(Point::new(0.0, y));
        let offset = tree.offset().y;
        let rows = tree.rendered_rows();
        assert!(!rows.is_empty());
        assert!(rows.len() <= (height / ROW).ceil() as usize + 1);
        for row in rows {
            assert!(row.rect.intersects_vertical_span(offset, offset + height), "{row:?} at {offset}");
        }
    }
}

#[test]
fn test_content_min_size_of_flat_tree() {
    for n in [0usize, 1, 2, 17] {
        let tree = flat(n);
        host(&tree, 200.0, 200.0);
        let expected = if n == 0 {
            0.0
        } else {
            n as f32 * ROW + (n - 1) as f32
        };
        assert_eq!(tree.content_min_size().height, expected, "n = {n}");
    }
}

#[test]
fn test_every_visible_row_updated_once_per_pass() {
    let counts: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
    let recorded = counts.clone();
    let tree = Tree::new(
        TreeData::new()
            .with_child_uids(|uid| {
                if uid.is_empty() {
                    (0..50).map(|i| format!("row_{i}")).collect()
                } else {
                    Vec::new()
                }
            })
            .with_create_node(|_| template())
            .with_update_node(move |uid, _, row: &mut TestRow| {
                row.bind(uid);
                *recorded.lock().entry(uid.to_string()).or_default() += 1;
            }),
    );
    host(&tree, 200.0, 100.0);

    let visible: Vec<_> = tree.rendered_rows().into_iter().map(|r| r.uid).collect();
    for uid in &visible {
        assert_eq!(counts.lock()[uid], 1, "{uid}");
    }

    tree.refresh();
    for uid in &visible {
        assert_eq!(counts.lock()[uid], 2, "{uid}");
    }
    assert_eq!(counts.lock().len(), visible.len());
}

#[test]
fn test_scrolling_moves_rows_and_dividers() {
    let tree = flat(40);
    let canvas = host(&tree, 200.0, 100.0);

    tree.scroll_by(2.0 * STRIDE);
    let painted = canvas.capture(&tree);
    let first_row = painted
        .iter()
        .find(|p| p.kind == PaintedKind::Leaf)
        .unwrap();
    assert_eq!(first_row.label.as_deref(), Some("row_2"));
    assert_eq!(first_row.rect.top(), 0.0);
    assert_eq!(first_row.rect.width(), 200.0);

    let divider = painted
        .iter()
        .find(|p| p.kind == PaintedKind::Divider && p.rect.top() > 0.0)
        .unwrap();
    assert_eq!(divider.rect.top(), ROW);
    assert_eq!(divider.rect.left(), 4.0);
    assert_eq!(divider.rect.width(), 192.0);
    assert_eq!(divider.rect.height(), 1.0);
}

// =========================================================================
// Sizing and theme
// =========================================================================

#[test]
fn test_zero_size_tree_takes_min_size() {
    let tree = three_level();
    tree.set_theme(theme());
    assert!(tree.size().is_zero());

    tree.refresh();
    // Row: 40 + 12 + 3 * 4 wide, 20 tall; the scroll container needs 32.
    assert_eq!(tree.min_size(), Size::new(64.0, 32.0));
    assert_eq!(tree.size(), tree.min_size());
    assert_eq!(tree.row_min_size(NodeShape::Branch), Size::new(64.0, ROW));
}

#[test]
fn test_resize_to_same_size_is_noop() {
    let tree = flat(3);
    host(&tree, 200.0, 200.0);
    let constructed = tree.constructed_rows(NodeShape::Leaf);
    tree.resize(Size::new(200.0, 200.0));
    assert_eq!(tree.constructed_rows(NodeShape::Leaf), constructed);
    assert_eq!(tree.size(), Size::new(200.0, 200.0));
}

#[test]
fn test_theme_change_rebuilds_rows() {
    let tree = flat(50);
    host(&tree, 200.0, 100.0);
    tree.scroll_by(500.0);
    tree.scroll_by(500.0);
    assert!(tree.pooled_rows(NodeShape::Leaf) > 0 || tree.constructed_rows(NodeShape::Leaf) > 5);

    tree.set_theme(Theme {
        padding: 8.0,
        ..theme()
    });
    assert_eq!(tree.pooled_rows(NodeShape::Leaf), 0);
    assert_eq!(tree.row_min_size(NodeShape::Leaf).height, 12.0 + 16.0);
    assert_eq!(
        tree.constructed_rows(NodeShape::Leaf),
        tree.rendered_rows().len()
    );
}

// =========================================================================
// Pointer input
// =========================================================================

#[test]
fn test_tap_expander_toggles_and_tap_row_selects() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);

    // Expander icon of the first row sits at (4, 4) with size 12 x 12.
    tree.tapped(Point::new(8.0, 10.0));
    assert!(tree.is_branch_open("A"));
    assert!(tree.selection().is_none());

    tree.tapped(Point::new(100.0, 10.0));
    assert_eq!(tree.selection().as_deref(), Some("A"));
    assert!(tree.is_branch_open("A"));

    // A1 is the second row.
    tree.tapped(Point::new(100.0, STRIDE + 5.0));
    assert_eq!(tree.selection().as_deref(), Some("A1"));

    // Below the last row.
    tree.tapped(Point::new(100.0, 190.0));
    assert_eq!(tree.selection().as_deref(), Some("A1"));
}

#[test]
fn test_tap_accounts_for_scroll_offset() {
    let tree = flat(30);
    host(&tree, 200.0, 100.0);
    tree.scroll_to(Point::new(0.0, 10.0 * STRIDE));
    tree.tapped(Point::new(100.0, 5.0));
    assert_eq!(tree.selection().as_deref(), Some("row_10"));
}

#[test]
fn test_hover_indicator_priority() {
    let tree = flat(5);
    host(&tree, 200.0, 200.0);
    let indicator = |uid: &str| {
        tree.rendered_rows()
            .into_iter()
            .find(|r| r.uid == uid)
            .map(|r| r.indicator)
    };

    tree.mouse_moved(Point::new(50.0, STRIDE + 5.0));
    assert_eq!(indicator("row_1"), Some(RowIndicator::Hovered));
    assert_eq!(indicator("row_0"), Some(RowIndicator::None));

    tree.select("row_1");
    assert_eq!(indicator("row_1"), Some(RowIndicator::Selected));

    tree.mouse_moved(Point::new(50.0, 5.0));
    assert_eq!(indicator("row_0"), Some(RowIndicator::Hovered));

    tree.mouse_out();
    assert_eq!(indicator("row_0"), Some(RowIndicator::None));
    assert_eq!(indicator("row_1"), Some(RowIndicator::Selected));
}

// =========================================================================
// String trees and threading
// =========================================================================

#[test]
fn test_with_strings() {
    let mut data = HashMap::new();
    data.insert(String::new(), vec!["fruit".to_string(), "bread".to_string()]);
    data.insert("fruit".to_string(), vec!["apple".to_string()]);
    let tree = Tree::with_strings(data);
    host(&tree, 300.0, 300.0);

    let rows = tree.flattened_rows();
    assert_eq!(rows[0].shape, NodeShape::Branch);
    assert_eq!(rows[1].shape, NodeShape::Leaf);

    tree.open_branch("fruit");
    let uids: Vec<_> = tree.rendered_rows().into_iter().map(|r| r.uid).collect();
    assert_eq!(uids, ["fruit", "apple", "bread"]);
}

#[test]
fn test_with_strings_rows_follow_theme_text_size() {
    let mut data = HashMap::new();
    data.insert(String::new(), vec!["a".to_string()]);
    let tree = Tree::with_strings(data);
    host(&tree, 300.0, 300.0);
    let before = tree.row_min_size(NodeShape::Leaf);

    tree.set_theme(Theme {
        text_size: 40.0,
        ..tree.theme()
    });
    let after = tree.row_min_size(NodeShape::Leaf);
    assert!(after.height > before.height, "{before:?} -> {after:?}");

    // Rows built after the change are measured with the new theme too.
    let row = &tree.rendered_rows()[0];
    assert_eq!(row.rect.height(), after.height);
}

#[test]
fn test_with_objects_sees_dividers_then_rows() {
    let tree = flat(10);
    host(&tree, 200.0, 100.0);
    let rendered = tree.rendered_rows().len();
    let dividers = tree.visible_dividers().len();

    let (visible, total) = tree.with_objects(|objects| {
        let visible = objects.iter().filter(|o| o.is_visible()).count();
        (visible, objects.len())
    });
    assert_eq!(total, 9 + rendered);
    assert!(visible >= rendered);
    assert!(dividers > 0);

    // The renderer is released once the closure returns.
    tree.scroll_by(STRIDE);
    assert_eq!(tree.rendered_rows()[0].uid, "row_1");
}

#[test]
fn test_scrolling_deep_open_tree_keeps_walk_and_open_set() {
    let tree = tree_from(&[
        ("", &["A", "B", "C"]),
        ("A", &["A1", "A2", "A3"]),
        ("B", &["B1", "B2", "B3"]),
        ("C", &["C1", "C2", "C3"]),
        ("A1", &["A1a", "A1b"]),
        ("B1", &["B1a", "B1b"]),
    ]);
    host(&tree, 200.0, 60.0);
    tree.open_all_branches();
    let walk: Vec<_> = tree.flattened_rows().into_iter().map(|r| r.uid).collect();
    assert_eq!(walk.len(), 16);

    for step in 1..12 {
        tree.scroll_to(Point::new(0.0, step as f32 * STRIDE));
        let rows = tree.rendered_rows();
        assert_eq!(rows[0].uid, walk[step]);
        for row in &rows {
            let index = walk.iter().position(|uid| *uid == row.uid).unwrap();
            assert_eq!(row.rect.top(), index as f32 * STRIDE);
        }
    }
    for branch in ["A", "B", "C", "A1", "B1"] {
        assert!(tree.is_branch_open(branch));
    }
}

#[test]
fn test_tree_handle_is_shareable_across_threads() {
    let tree = three_level();
    host(&tree, 200.0, 200.0);

    let worker = tree.clone();
    std::thread::spawn(move || {
        worker.open_branch("A");
        worker.select("A2");
    })
    .join()
    .unwrap();

    assert!(tree.is_branch_open("A"));
    assert_eq!(tree.selection().as_deref(), Some("A2"));
    assert_eq!(tree.rendered_rows().len(), 4);
}
