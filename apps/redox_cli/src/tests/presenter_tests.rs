use catalog::Catalog;
use engine::Simulator;
use shared::domain::{AtomId, ScenarioId};

use super::*;

#[test]
fn menu_shows_every_level() {
    let simulator = Simulator::new(Catalog::builtin());
    let text = render_menu(&simulator.menu());
    assert!(text.contains("[level1] Level 1"));
    assert!(text.contains("[level4] Level 4"));
}

#[test]
fn scene_marks_draggable_source_and_open_slots() {
    let mut simulator = Simulator::new(Catalog::builtin());
    let session = simulator
        .select(&ScenarioId::new("level2"))
        .expect("select");

    let text = render_scene(&session.view(None));
    assert!(text.starts_with("level2 (rev 0) 進行中"));
    let mg = text.lines().find(|l| l.trim_start().starts_with("Mg")).expect("Mg line");
    assert!(mg.ends_with('*'));
    let o = text.lines().find(|l| l.trim_start().starts_with('O')).expect("O line");
    assert!(o.contains("+2 空位"));

    session.commit(&AtomId::new("Mg"), &AtomId::new("O")).expect("first");
    session.commit(&AtomId::new("Mg"), &AtomId::new("O")).expect("second");
    let done = render_scene(&session.view(None));
    assert!(done.contains("反應完成！"));
    assert!(done.contains("Mg [+2]"));
}

#[test]
fn outcomes_read_naturally() {
    let outcome = GestureOutcome::Transferred {
        from: AtomId::new("Na"),
        to: AtomId::new("Cl"),
        completed: true,
    };
    assert_eq!(render_outcome(&outcome), "e⁻ Na -> Cl (complete)");
    assert_eq!(
        render_outcome(&GestureOutcome::Abandoned { source: AtomId::new("Zn") }),
        "e⁻ from Zn returned"
    );
}
