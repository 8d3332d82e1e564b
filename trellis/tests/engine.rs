// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-engine behavior through the host-facing handle.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use trellis::render::{TickSource, TickToken};
use trellis::{
    DrawCommand, Edge, Engine, EngineConfig, InteractionEvent, Node, NodeId, NodeTemplate, Shape,
    StoreError, TEMPLATE_DATA_KEY, ViewportUpdate,
};

fn config() -> EngineConfig {
    EngineConfig {
        screen_size: Size::new(800.0, 600.0),
        ..EngineConfig::default()
    }
}

fn node(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
    Node::new(id, Shape::Rectangle, Point::new(x, y), Size::new(w, h))
}

fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Engine {
    Engine::from_diagram(config(), nodes, Vec::<Edge>::new()).unwrap()
}

#[derive(Default)]
struct TestClock {
    next: u64,
    outstanding: Vec<TickToken>,
}

impl TickSource for TestClock {
    fn request_tick(&mut self) -> TickToken {
        self.next += 1;
        let token = TickToken(self.next);
        self.outstanding.push(token);
        token
    }

    fn cancel_tick(&mut self, token: TickToken) {
        self.outstanding.retain(|t| *t != token);
    }
}

impl TestClock {
    fn fire(&mut self) -> Option<TickToken> {
        (!self.outstanding.is_empty()).then(|| self.outstanding.remove(0))
    }
}

#[test]
fn drag_commit_scenario() {
    let mut engine = with_nodes([node("N", 0.0, 0.0, 40.0, 40.0)]);
    let down = engine.viewport().world_to_screen(Point::new(1.0, 1.0));

    engine.pointer_down(down);
    engine.pointer_move(Point::new(down.x + 50.0, down.y));
    engine.pointer_up();

    let id = NodeId::from("N");
    assert_eq!(engine.store().node(&id).unwrap().position, Point::new(50.0, 0.0));
    assert_eq!(engine.selection().items(), [id]);
    assert_eq!(engine.debug_info().drag_state, "idle");
}

#[test]
fn pan_scenario() {
    let mut engine = Engine::new(config());
    engine.pointer_down(Point::new(200.0, 200.0));
    assert_eq!(engine.debug_info().drag_state, "dragging-viewport");
    engine.pointer_move(Point::new(230.0, 190.0));
    engine.pointer_leave();

    assert_eq!(engine.viewport().center(), Point::new(-30.0, 10.0));
    assert_eq!(engine.viewport().zoom(), 1.0);
}

#[test]
fn hit_test_prefers_the_smaller_node() {
    let mut engine = Engine::from_diagram(
        config(),
        [
            node("A", -50.0, -50.0, 100.0, 100.0),
            node("B", -10.0, -10.0, 20.0, 20.0),
        ],
        Vec::<Edge>::new(),
    )
    .unwrap();
    assert_eq!(engine.store().hit_test(Point::ORIGIN), ["B".into(), "A".into()]);

    let center = engine.viewport().world_to_screen(Point::ORIGIN);
    let events = engine.double_click(center);
    assert_eq!(
        events,
        [InteractionEvent::DoubleClicked {
            node: Some("B".into()),
            world: Point::ORIGIN,
        }]
    );
    assert!(engine.selection().is_empty());
}

#[test]
fn from_diagram_stops_at_the_first_rejection() {
    let err = Engine::from_diagram(
        config(),
        [node("a", 0.0, 0.0, 10.0, 10.0), node("a", 5.0, 5.0, 10.0, 10.0)],
        Vec::<Edge>::new(),
    )
    .unwrap_err();
    assert_eq!(err, StoreError::DuplicateId("a".into()));

    let err = Engine::from_diagram(
        config(),
        [node("a", 0.0, 0.0, 10.0, 10.0)],
        [Edge::new("e", "a", "b")],
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::DanglingEndpoint { .. }));
}

#[test]
fn dropped_nodes_land_under_the_cursor() {
    let mut engine = Engine::new(config());
    engine.set_viewport(ViewportUpdate::default().with_zoom(2.0));
    let green = Color::from_rgb8(0x10, 0xB9, 0x81);
    let template = NodeTemplate::new("decision", "Decision", Shape::Diamond)
        .with_color(green)
        .with_size(80.0, 80.0);

    let first = engine.drop_node(&template, Point::new(500.0, 400.0)).unwrap();
    let second = engine.drop_node(&template, Point::new(500.0, 400.0)).unwrap();
    assert_ne!(first, second);

    let node = engine.store().node(&first).unwrap();
    assert_eq!(node.position, Point::new(50.0, 50.0));
    assert_eq!(node.size, Size::new(80.0, 80.0));
    assert_eq!(node.label, "Decision");
    assert_eq!(node.shape, Shape::Diamond);
    assert_eq!(node.style.fill, green);
    assert_eq!(node.data.get(TEMPLATE_DATA_KEY).map(String::as_str), Some("decision"));

    let bad = NodeTemplate::new("bad", "Bad", Shape::Rectangle).with_size(-1.0, 5.0);
    assert!(matches!(
        engine.drop_node(&bad, Point::ORIGIN),
        Err(StoreError::InvalidGeometry { .. })
    ));
    assert_eq!(engine.store().node_count(), 2);
}

#[test]
fn resize_keeps_pan_and_zoom() {
    let mut engine = Engine::new(config());
    engine.set_viewport(
        ViewportUpdate::default()
            .with_center(Point::new(120.0, -40.0))
            .with_zoom(1.5),
    );
    assert!(engine.set_viewport(ViewportUpdate::resize(1024.0, 768.0)));
    let info = engine.debug_info().viewport;
    assert_eq!(info.center, Point::new(120.0, -40.0));
    assert_eq!(info.zoom, 1.5);
    assert_eq!(info.screen_size, Size::new(1024.0, 768.0));
}

#[test]
fn zoom_to_fit_frames_all_content() {
    let mut engine = Engine::new(config());
    assert!(!engine.zoom_to_fit(20.0));

    engine.add_node(node("a", -400.0, -100.0, 10.0, 10.0)).unwrap();
    engine.add_node(node("b", 390.0, 90.0, 10.0, 10.0)).unwrap();
    assert!(engine.zoom_to_fit(20.0));

    let visible = engine.viewport().visible_world_rect();
    assert!(visible.contains(Point::new(-400.0, -100.0)));
    assert!(visible.contains(Point::new(400.0, 100.0)));
    assert_eq!(engine.viewport().center(), Point::ORIGIN);
    assert_eq!(engine.visible_nodes().len(), 2);
}

#[test]
fn removal_cascades_through_the_engine() {
    let mut engine = Engine::from_diagram(
        config(),
        [node("a", 0.0, 0.0, 10.0, 10.0), node("b", 50.0, 0.0, 10.0, 10.0)],
        [Edge::new("ab", "a", "b")],
    )
    .unwrap();
    let grab = engine.viewport().world_to_screen(Point::new(55.0, 5.0));
    engine.pointer_down(grab);
    engine.pointer_up();
    assert_eq!(engine.selection().items(), [NodeId::from("b")]);

    engine.remove_node(&"b".into()).unwrap();
    assert!(engine.selection().is_empty());
    assert_eq!(engine.store().edge_count(), 0);
    assert!(engine.remove_edge(&"ab".into()).is_err());

    let frame = engine.render_frame();
    assert!(!frame.commands.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
}

#[test]
fn scheduler_stops_cleanly() {
    let mut engine = with_nodes([node("a", 0.0, 0.0, 10.0, 10.0)]);
    let mut clock = TestClock::default();

    engine.start(&mut clock);
    let token = clock.fire().unwrap();
    let frame = engine.tick(&mut clock, token).unwrap();
    assert_eq!(frame.stats.frame, 1);
    assert_eq!(clock.outstanding.len(), 1);

    engine.stop(&mut clock);
    assert!(clock.outstanding.is_empty());
    assert!(engine.tick(&mut clock, TickToken(2)).is_none());
    assert_eq!(engine.debug_info().last_frame.map(|s| s.frame), Some(1));
}

#[test]
fn debug_info_reflects_the_model_without_changing_it() {
    let mut engine = Engine::from_diagram(
        config(),
        (0..50).map(|i| node(&format!("n{i}"), f64::from(i) * 30.0, 0.0, 20.0, 20.0)),
        Vec::<Edge>::new(),
    )
    .unwrap();
    let before = engine.debug_info();
    assert_eq!(before.node_count, 50);
    assert_eq!(before.index.total_items, 50);
    assert!(before.last_frame.is_none());
    assert_eq!(engine.debug_info(), before);

    engine.render_frame();
    let after = engine.debug_info();
    let stats = after.last_frame.unwrap();
    assert!(stats.visible_nodes > 0 && stats.visible_nodes < 50);
    assert_eq!(
        engine.viewport().visible_world_rect(),
        Rect::new(-400.0, -300.0, 400.0, 300.0)
    );
}
