// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pointer gestures against a real store and viewport.

use kurbo::{Point, Size, Vec2};
use trellis_interaction::{DragKind, InteractionController, InteractionEvent};
use trellis_store::{DiagramStore, Node, NodeId, Shape};
use trellis_view::{Viewport, ViewportUpdate};

fn store_with(nodes: &[(&str, Point, f64)]) -> DiagramStore {
    let mut store = DiagramStore::new();
    for (id, at, side) in nodes {
        store
            .add_node(Node::new(*id, Shape::Rectangle, *at, Size::new(*side, *side)))
            .unwrap();
    }
    store
}

fn position(store: &DiagramStore, id: &str) -> Point {
    store.node(&NodeId::from(id)).unwrap().position
}

#[test]
fn dragging_a_node_commits_its_new_position() {
    let mut store = store_with(&[("N", Point::ORIGIN, 20.0)]);
    let mut viewport = Viewport::new(Size::new(640.0, 480.0));
    let mut ctl = InteractionController::default();

    let down = viewport.world_to_screen(Point::new(5.0, 5.0));
    ctl.pointer_down(&mut store, &viewport, down);
    let events = ctl.pointer_move(&mut store, &mut viewport, down + Vec2::new(50.0, 0.0));
    assert_eq!(events, [InteractionEvent::NodesMoved { ids: vec!["N".into()] }]);
    assert_eq!(
        ctl.pointer_up(),
        [InteractionEvent::DragFinished { kind: DragKind::Node }]
    );

    assert_eq!(position(&store, "N"), Point::new(50.0, 0.0));
    assert_eq!(store.hit_test(Point::new(55.0, 5.0)), [NodeId::from("N")]);
    assert!(!ctl.state().is_dragging());
}

#[test]
fn panning_moves_the_center_against_the_pointer() {
    let mut store = store_with(&[("far", Point::new(1_000.0, 1_000.0), 10.0)]);
    let mut viewport = Viewport::new(Size::new(640.0, 480.0));
    let mut ctl = InteractionController::default();

    let down = Point::new(100.0, 100.0);
    ctl.pointer_down(&mut store, &viewport, down);
    assert!(ctl.state().is_panning());
    ctl.pointer_move(&mut store, &mut viewport, down + Vec2::new(30.0, -10.0));
    ctl.pointer_up();

    assert_eq!(viewport.center(), Point::new(-30.0, 10.0));
    assert_eq!(viewport.zoom(), 1.0);
}

#[test]
fn drag_delta_uses_the_current_zoom() {
    let mut store = store_with(&[("N", Point::ORIGIN, 20.0)]);
    let mut viewport = Viewport::new(Size::new(640.0, 480.0));
    viewport.set_viewport(ViewportUpdate::default().with_zoom(2.0));
    let mut ctl = InteractionController::default();

    let down = viewport.world_to_screen(Point::new(5.0, 5.0));
    ctl.pointer_down(&mut store, &viewport, down);
    ctl.pointer_move(&mut store, &mut viewport, down + Vec2::new(40.0, 20.0));
    assert_eq!(position(&store, "N"), Point::new(20.0, 10.0));

    // Zoom changes mid-drag; the same screen offset now means less world.
    viewport.set_viewport(ViewportUpdate::default().with_zoom(4.0));
    ctl.pointer_move(&mut store, &mut viewport, down + Vec2::new(40.0, 20.0));
    assert_eq!(position(&store, "N"), Point::new(10.0, 5.0));
    ctl.pointer_leave();
    assert_eq!(position(&store, "N"), Point::new(10.0, 5.0));
}

#[test]
fn smallest_node_wins_and_replaces_selection() {
    let mut store = store_with(&[
        ("A", Point::new(-50.0, -50.0), 100.0),
        ("B", Point::new(-10.0, -10.0), 20.0),
    ]);
    let mut viewport = Viewport::new(Size::new(640.0, 480.0));
    let mut ctl = InteractionController::default();
    let center = viewport.world_to_screen(Point::ORIGIN);

    let events = ctl.pointer_down(&mut store, &viewport, center);
    assert_eq!(
        events,
        [InteractionEvent::SelectionChanged { selected: Some("B".into()) }]
    );
    ctl.pointer_up();

    let corner = viewport.world_to_screen(Point::new(-45.0, -45.0));
    ctl.pointer_down(&mut store, &viewport, corner);
    ctl.pointer_up();
    assert_eq!(store.selection().items(), [NodeId::from("A")]);

    // Empty canvas clears it.
    let empty = viewport.world_to_screen(Point::new(300.0, 200.0));
    let events = ctl.pointer_down(&mut store, &viewport, empty);
    assert_eq!(events, [InteractionEvent::SelectionChanged { selected: None }]);
    assert!(store.selection().is_empty());
    ctl.pointer_move(&mut store, &mut viewport, empty);
    ctl.pointer_up();
}

#[test]
fn double_click_leaves_state_alone() {
    let store = store_with(&[("N", Point::ORIGIN, 20.0)]);
    let viewport = Viewport::new(Size::new(640.0, 480.0));
    let mut ctl = InteractionController::default();

    let on_node = viewport.world_to_screen(Point::new(10.0, 10.0));
    let events = ctl.double_click(&store, &viewport, on_node);
    assert_eq!(
        events,
        [InteractionEvent::DoubleClicked {
            node: Some("N".into()),
            world: Point::new(10.0, 10.0),
        }]
    );
    assert!(store.selection().is_empty());
    assert!(!ctl.state().is_dragging());

    let miss = ctl.double_click(&store, &viewport, Point::new(1.0, 1.0));
    assert!(matches!(miss.as_slice(), [InteractionEvent::DoubleClicked { node: None, .. }]));
}

#[test]
fn wheel_zooms_about_the_cursor_during_a_pan() {
    let mut store = DiagramStore::new();
    let mut viewport = Viewport::new(Size::new(640.0, 480.0));
    let mut ctl = InteractionController::default();
    ctl.pointer_down(&mut store, &viewport, Point::new(10.0, 10.0));

    let cursor = Point::new(500.0, 100.0);
    let before = viewport.screen_to_world(cursor);
    assert_eq!(
        ctl.wheel(&mut viewport, -120.0, cursor),
        [InteractionEvent::ViewportChanged]
    );
    let after = viewport.screen_to_world(cursor);
    assert!((before - after).hypot() < 1e-9);
    assert!((viewport.zoom() - 1.1).abs() < 1e-12);
    assert!(ctl.state().is_panning());
}
