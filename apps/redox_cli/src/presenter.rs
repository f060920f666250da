use std::fmt::Write as _;

use engine::{GestureOutcome, MenuEntry};
use shared::protocol::{AtomView, Presenter, SceneView};

/// Prints each scene to stdout.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&mut self, view: &SceneView) {
        print!("{}", render_scene(view));
    }
}

pub fn render_menu(entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "[{}] Level {} {}", entry.id, entry.level, entry.title);
        let _ = writeln!(out, "    {}", entry.equation);
        let _ = writeln!(out, "    {}", entry.summary);
    }
    out
}

pub fn render_scene(view: &SceneView) -> String {
    let mut out = String::new();
    let status = if view.is_complete { "反應完成！" } else { "進行中" };
    let _ = writeln!(out, "{} (rev {}) {status}", view.scenario_id, view.revision);
    for atom in &view.atoms {
        let _ = writeln!(out, "  {}", render_atom(atom));
    }
    if let Some(ghost) = view.ghost {
        let _ = writeln!(out, "  e⁻ @ ({:.0}, {:.0})", ghost.x, ghost.y);
    }
    out
}

fn render_atom(atom: &AtomView) -> String {
    let charge = if atom.charge_label.is_empty() {
        String::new()
    } else {
        format!(" [{}]", atom.charge_label)
    };
    let slots = if atom.empty_slot_markers > 0 {
        format!(" +{} 空位", atom.empty_slot_markers)
    } else {
        String::new()
    };
    let drag = if atom.draggable { " *" } else { "" };
    format!(
        "{}{charge} {} ({}) e⁻={}{slots} at ({:.0}, {:.0}) x{:.1}{drag}",
        atom.symbol,
        atom.name,
        atom.role.label(),
        atom.electron_markers,
        atom.position.x,
        atom.position.y,
        atom.scale,
    )
}

pub fn render_outcome(outcome: &GestureOutcome) -> String {
    match outcome {
        GestureOutcome::Transferred {
            from,
            to,
            completed,
        } => {
            let suffix = if *completed { " (complete)" } else { "" };
            format!("e⁻ {from} -> {to}{suffix}")
        }
        GestureOutcome::Abandoned { source } => format!("e⁻ from {source} returned"),
        GestureOutcome::Ignored => "ignored".into(),
        GestureOutcome::DragStarted { source } => format!("drag from {source}"),
        GestureOutcome::DragMoved { point } => format!("drag at ({:.0}, {:.0})", point.x, point.y),
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
