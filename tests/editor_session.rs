use balanca::graph::{
    Document, Hit, InteractionState, Mode, NodeId, NodeKind, PointerEvent, pointer_down,
    pointer_move, pointer_up,
};
use eframe::egui::{Pos2, pos2};

fn assert_near(actual: Pos2, expected: Pos2) {
    assert!(
        actual.distance(expected) < 1e-3,
        "expected {expected:?}, got {actual:?}"
    );
}

fn position(document: &Document, id: NodeId) -> Pos2 {
    document.graph().node(id).map(|node| node.pos()).unwrap()
}

struct Session {
    document: Document,
    state: InteractionState,
}

impl Session {
    fn new() -> Self {
        Self {
            document: Document::default(),
            state: InteractionState::default(),
        }
    }

    fn down(&mut self, event: PointerEvent) {
        self.state = pointer_down(&mut self.document, self.state, event);
    }

    fn hover(&mut self, pos: Pos2) {
        self.state = pointer_move(&mut self.document, self.state, PointerEvent::at(pos));
    }

    fn up(&mut self) {
        self.state = pointer_up(&mut self.document, self.state);
    }

    fn link(&mut self, from: Pos2, to: Pos2) {
        self.down(PointerEvent::linking(from));
        self.down(PointerEvent::at(to));
    }
}

/// Two anchors on a horizontal line with a float hanging below them.
fn balance() -> (Session, NodeId, NodeId, NodeId) {
    let mut session = Session::new();
    let left = session.document.add_node(NodeKind::Fixed, pos2(100.0, 100.0));
    let right = session.document.add_node(NodeKind::Fixed, pos2(300.0, 100.0));
    let float = session.document.add_node(NodeKind::Float, pos2(200.0, 300.0));

    session.link(pos2(100.0, 100.0), pos2(200.0, 300.0));
    assert_eq!(session.state.mode, Mode::Idle);
    assert_near(position(&session.document, float), pos2(200.0, 300.0));

    session.link(pos2(300.0, 100.0), pos2(200.0, 300.0));
    assert_near(position(&session.document, float), pos2(200.0, 100.0));

    (session, left, right, float)
}

#[test]
fn linking_two_anchors_pulls_the_float_to_their_midpoint() {
    let (session, left, right, float) = balance();
    let graph = session.document.graph();
    assert_eq!(graph.connection_count(), 2);
    assert!(graph.connection_between(left, float).is_some());
    assert!(graph.connection_between(float, right).is_some());
    assert!(!graph.is_draggable(float));
}

#[test]
fn turning_a_handle_reweights_and_undoes_as_one_step() {
    let (mut session, left, _, float) = balance();
    let undo_depth = session.document.history().len();

    match session.document.hit_test(pos2(158.0, 100.0)) {
        Hit::Handle(handle) => assert_near(handle.center, pos2(150.0, 100.0)),
        other => panic!("expected a handle, got {other:?}"),
    }

    session.down(PointerEvent::at(pos2(158.0, 100.0)));
    assert!(session.state.dial().is_some());

    session.hover(pos2(150.0, 108.0));
    let connection = session
        .document
        .graph()
        .connection_between(left, float)
        .map(|connection| connection.id)
        .unwrap();
    let weight = session.document.graph().connection(connection).unwrap().weight;
    assert!((weight - 1.5).abs() < 1e-4, "weight {weight}");
    assert_near(position(&session.document, float), pos2(180.0, 100.0));

    session.up();
    assert_eq!(session.state.mode, Mode::Idle);
    assert_eq!(session.document.history().len(), undo_depth + 1);

    assert!(session.document.undo());
    assert_near(position(&session.document, float), pos2(200.0, 100.0));
    assert!(session.document.redo());
    assert_near(position(&session.document, float), pos2(180.0, 100.0));
}

#[test]
fn hovering_then_clicking_an_edge_deletes_it() {
    let (mut session, _, right, float) = balance();

    session.hover(pos2(270.0, 104.0));
    let hovered = session.state.hovered.unwrap();
    assert!(
        session
            .document
            .graph()
            .connection(hovered)
            .unwrap()
            .joins(right, float)
    );

    session.down(PointerEvent::at(pos2(270.0, 104.0)));
    assert_eq!(session.state.hovered, None);
    assert!(session.document.graph().connection(hovered).is_none());
    assert!(session.document.graph().is_draggable(float));

    assert!(session.document.undo());
    assert!(session.document.graph().connection(hovered).is_some());
}

#[test]
fn duplicate_link_changes_nothing() {
    let (mut session, ..) = balance();
    let before = session.document.graph().clone();
    let depth = session.document.history().len();

    session.link(pos2(100.0, 100.0), pos2(200.0, 100.0));

    assert_eq!(session.document.graph(), &before);
    assert_eq!(session.document.history().len(), depth);
}

#[test]
fn dragging_a_leaf_float_is_one_undo_step() {
    let mut session = Session::new();
    let anchor = session.document.add_node(NodeKind::Fixed, pos2(50.0, 50.0));
    let float = session.document.add_node(NodeKind::Float, pos2(200.0, 200.0));
    session.link(pos2(50.0, 50.0), pos2(200.0, 200.0));
    assert!(session.document.graph().connection_between(anchor, float).is_some());

    session.down(PointerEvent::at(pos2(205.0, 200.0)));
    assert_eq!(session.state.dragged(), Some(float));
    for step in 1..=10 {
        session.hover(pos2(200.0 + step as f32 * 10.0, 200.0));
    }
    session.up();
    assert_near(position(&session.document, float), pos2(300.0, 200.0));

    assert!(session.document.undo());
    assert_near(position(&session.document, float), pos2(200.0, 200.0));
}
