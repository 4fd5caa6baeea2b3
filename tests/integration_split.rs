use std::cell::RefCell;
use std::rc::Rc;

use indoc::indoc;
use pane_wm::geometry::{Point, Rect, Size};
use pane_wm::split::{SplitAxis, SplitGrid, SplitLayoutSnapshot, SplitOptions};

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

#[test]
fn dragging_row_divider_clamps_at_floor() {
    let mut grid = SplitGrid::new(SplitOptions::grid(2, 1));
    grid.set_container_extent(Size::new(400.0, 500.0));
    grid.begin_divider_drag(SplitAxis::Rows, 0, Point::new(0.0, 250.0));
    // 240px of 500 is 48%, pushing row 0 to 2%.
    grid.pointer_move(Point::new(0.0, 10.0));
    assert_eq!(grid.row_heights(), &[8.0, 92.0]);
    grid.pointer_up();
}

#[test]
fn column_drag_only_touches_neighbours() {
    let mut grid = SplitGrid::new(SplitOptions {
        initial_col_widths: Some(vec![20.0, 30.0, 50.0]),
        ..SplitOptions::grid(1, 3)
    });
    grid.set_container_extent(Size::new(1000.0, 300.0));
    grid.begin_divider_drag(SplitAxis::Columns, 1, Point::new(500.0, 0.0));
    grid.pointer_move(Point::new(600.0, 0.0));
    grid.pointer_up();
    assert_eq!(grid.col_widths()[0], 20.0);
    assert!((grid.col_widths()[1] - 40.0).abs() < 1e-9);
    assert!((grid.col_widths()[2] - 40.0).abs() < 1e-9);
    assert!((sum(grid.col_widths()) - 100.0).abs() < 1e-9);
}

#[test]
fn pasted_layout_is_normalized_and_reported() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut grid = SplitGrid::new(SplitOptions::grid(3, 2));
    grid.on_layout_change(move |snap| sink.borrow_mut().push(snap.clone()));
    let text = indoc! {r#"
        {"version": 1, "rowHeights": [1, 1, 98], "colWidths": [60, 40]}
    "#};
    let snapshot = SplitLayoutSnapshot::from_json(text).unwrap();
    grid.paste_layout(&snapshot);
    let rows = grid.row_heights();
    assert!(rows.iter().all(|r| *r >= 8.0 - 1e-9));
    assert!((sum(rows) - 100.0).abs() < 1e-9);
    assert_eq!(grid.col_widths(), &[60.0, 40.0]);
    assert_eq!(seen.borrow().as_slice(), &[snapshot]);
}

#[test]
fn copied_layout_round_trips_through_json() {
    let mut grid = SplitGrid::new(SplitOptions::grid(2, 2));
    grid.set_container_extent(Size::new(800.0, 800.0));
    grid.begin_divider_drag(SplitAxis::Columns, 0, Point::new(400.0, 0.0));
    grid.pointer_move(Point::new(480.0, 0.0));
    grid.pointer_up();
    let text = grid.layout_snapshot().to_json().unwrap();
    let mut other = SplitGrid::new(SplitOptions::grid(2, 2));
    other.apply_layout_snapshot(&SplitLayoutSnapshot::from_json(&text).unwrap());
    assert_eq!(other.col_widths(), grid.col_widths());
}

#[test]
fn divider_hit_starts_drag() {
    let mut grid = SplitGrid::new(SplitOptions::grid(1, 2));
    let area = Rect::new(0.0, 0.0, 408.0, 200.0);
    grid.set_container_extent(area.size());
    assert!(grid.pointer_down(area, Point::new(203.0, 100.0)));
    assert!(!grid.pointer_down(area, Point::new(203.0, 100.0)));
    grid.pointer_up();
    assert!(!grid.pointer_down(area, Point::new(20.0, 100.0)));
}
