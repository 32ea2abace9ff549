use balanca::graph::{
    Document, NodeKind, ScenarioConfig, deserialize, generate_scenario, serialize,
};
use balanca::util::scenario_rng;
use eframe::egui::{pos2, vec2};

#[test]
fn generated_puzzle_becomes_a_fresh_document() {
    let mut rng = scenario_rng(Some(42));
    let scenario = generate_scenario(vec2(1280.0, 800.0), &ScenarioConfig::default(), &mut rng);
    assert!(scenario.is_solved(&scenario.target));

    let mut document = Document::default();
    document.add_node(NodeKind::Fixed, pos2(10.0, 10.0));
    document.load_scenario(scenario.start.clone());

    assert!(!document.can_undo());
    assert!(!document.can_redo());
    assert_eq!(
        document.graph().node_count(),
        scenario.target.node_count()
    );
    for node in scenario.target.nodes() {
        let loaded = document.graph().node(node.id).unwrap();
        assert_eq!(loaded.kind, node.kind);
        if node.kind == NodeKind::Fixed {
            assert_eq!(
                loaded.pos(),
                scenario.start.node(node.id).unwrap().pos()
            );
        }
    }

    let added = document.add_node(NodeKind::Float, pos2(5.0, 5.0));
    assert!(added.0 > scenario.start.max_id());
    assert!(document.undo());
    assert_eq!(document.graph().node_count(), scenario.start.node_count());
}

#[test]
fn puzzle_survives_a_save_and_reload() {
    let mut rng = scenario_rng(Some(8));
    let scenario = generate_scenario(vec2(1024.0, 768.0), &ScenarioConfig::default(), &mut rng);

    let bytes = serialize(&scenario.start).unwrap();
    let reloaded = deserialize(&bytes).unwrap();
    assert_eq!(reloaded, scenario.start);

    let mut document = Document::default();
    assert!(document.load(reloaded).is_empty());
    assert!(document.can_undo());
    assert!(document.undo());
    assert!(document.graph().is_empty());
}

#[test]
fn unsolved_start_reports_its_error() {
    let mut rng = scenario_rng(Some(3));
    let scenario = generate_scenario(vec2(1280.0, 800.0), &ScenarioConfig::default(), &mut rng);

    let mut document = Document::default();
    document.load_scenario(scenario.start.clone());
    let error = scenario.mean_error(document.graph()).unwrap();
    assert!(error.is_finite());
    assert!(error >= 0.0);

    document.clear();
    assert_eq!(scenario.mean_error(document.graph()), None);
    assert!(!scenario.is_solved(document.graph()));
}
