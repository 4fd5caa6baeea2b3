use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indoc::indoc;
use pane_wm::clipboard::MemoryClipboard;
use pane_wm::controller::{ControllerOptions, ModalController, PointerOutcome, ToolbarAction};
use pane_wm::geometry::{Point, Rect, Size};
use pane_wm::keybindings::Action;
use pane_wm::scroll_sync::ScrollSyncRegistry;
use pane_wm::window::{AddWindow, CloseOutcome, WindowOptions};

fn controller(clipboard: MemoryClipboard) -> ModalController<String> {
    ModalController::new(Size::new(800.0, 600.0), ControllerOptions::default())
        .with_clipboard(clipboard)
        .with_scroll_sync(ScrollSyncRegistry::new())
}

fn window(id: &str, bounds: Rect) -> AddWindow<String> {
    AddWindow::new(id, format!("{id} body")).bounds(bounds)
}

#[test]
fn escape_walks_down_the_stack() {
    let mut ctl = controller(MemoryClipboard::new());
    ctl.add_window(window("a", Rect::new(0.0, 0.0, 300.0, 200.0))).unwrap();
    ctl.add_window(window("b", Rect::new(100.0, 100.0, 300.0, 200.0)).title("Bee"))
        .unwrap();
    let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(ctl.handle_key(&esc), Some(Action::CloseTopmost));
    assert_eq!(ctl.handle_key(&esc), Some(Action::CloseTopmost));
    let labels: Vec<String> = ctl.minimized_entries().into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["a", "Bee"]);
    assert_eq!(ctl.request_close_topmost(), None);
}

#[test]
fn header_drag_through_controller_uses_collision() {
    let mut ctl = controller(MemoryClipboard::new());
    let opts = WindowOptions {
        collision_detection: true,
        ..WindowOptions::default()
    };
    ctl.add_window(window("fixed", Rect::new(300.0, 0.0, 200.0, 200.0))).unwrap();
    ctl.add_window(window("mover", Rect::new(0.0, 0.0, 200.0, 200.0)).options(opts))
        .unwrap();
    assert_eq!(
        ctl.pointer_down(Point::new(20.0, 10.0)),
        PointerOutcome::Started("mover".into())
    );
    ctl.pointer_move(Point::new(170.0, 10.0));
    ctl.pointer_up();
    // Candidate x=150 overlaps by 50 on the left; pushed back to 100.
    assert_eq!(ctl.store().window("mover").unwrap().bounds.x, 100.0);
}

#[test]
fn body_clicks_are_absorbed() {
    let mut ctl = controller(MemoryClipboard::new());
    let opts = WindowOptions {
        close_on_backdrop_click: true,
        ..WindowOptions::default()
    };
    ctl.add_window(window("a", Rect::new(0.0, 0.0, 300.0, 200.0)).options(opts))
        .unwrap();
    assert_eq!(
        ctl.pointer_down(Point::new(150.0, 100.0)),
        PointerOutcome::Absorbed("a".into())
    );
    assert_eq!(
        ctl.pointer_down(Point::new(600.0, 500.0)),
        PointerOutcome::Backdrop(Some(CloseOutcome::Minimized("a".into())))
    );
}

#[test]
fn toolbar_scales_and_pastes() {
    let layout = indoc! {r#"
        {"version":1,"boundsById":{"a":{"x":50,"y":60,"width":250,"height":150}}}
    "#};
    let mut ctl = controller(MemoryClipboard::with_text(layout));
    ctl.add_window(window("a", Rect::new(100.0, 100.0, 300.0, 200.0))).unwrap();
    ctl.toolbar(ToolbarAction::ShrinkAll).unwrap();
    let b = ctl.store().window("a").unwrap().bounds;
    assert!((b.x - 90.0).abs() < 1e-9 && (b.width - 270.0).abs() < 1e-9);
    ctl.toolbar(ToolbarAction::PasteLayout).unwrap();
    assert_eq!(
        ctl.store().window("a").unwrap().bounds,
        Rect::new(50.0, 60.0, 250.0, 150.0)
    );
}

#[test]
fn scroll_groups_follow_window_lifetime() {
    let mut ctl = controller(MemoryClipboard::new());
    let grouped = WindowOptions {
        scroll_sync_group: Some("diff".into()),
        ..WindowOptions::default()
    };
    ctl.add_window(window("left", Rect::new(0.0, 0.0, 300.0, 200.0)).options(grouped.clone()))
        .unwrap();
    ctl.add_window(window("right", Rect::new(400.0, 0.0, 300.0, 200.0)).options(grouped))
        .unwrap();
    assert_eq!(ctl.scroll_sync().members("diff"), vec!["left", "right"]);
    ctl.remove_window("left");
    assert_eq!(ctl.scroll_sync().members("diff"), vec!["right"]);
}
