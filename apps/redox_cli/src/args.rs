use std::path::PathBuf;

use clap::{Parser, Subcommand};
use engine::Viewport;
use shared::domain::{AtomId, Point};

#[derive(Parser, Debug)]
#[command(name = "redox", about = "Drag electrons between atoms to complete redox reactions")]
pub struct Args {
    /// Settings file; defaults to ./redox.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Extra scenario catalog appended to the built-in levels.
    #[arg(long)]
    pub scenarios: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the level menu.
    List,
    /// Print a level's initial scene.
    Show { id: String },
    /// Replay drags against a level.
    Play {
        id: String,
        /// Device surface size as WIDTHxHEIGHT; drop points are then device pixels.
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<Viewport>,
        /// FROM@X,Y: drag an electron from atom FROM and release at (X, Y).
        #[arg(long = "drag", value_parser = parse_drag, required = true)]
        drags: Vec<DragStep>,
    },
    /// Ask the tutor to explain a level.
    Explain { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStep {
    pub from: AtomId,
    pub drop: Point,
}

pub fn parse_drag(raw: &str) -> Result<DragStep, String> {
    let (from, point) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected FROM@X,Y, got '{raw}'"))?;
    let from = from.trim();
    if from.is_empty() {
        return Err(format!("missing atom id in '{raw}'"));
    }
    let (x, y) = point
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y after '@' in '{raw}'"))?;
    Ok(DragStep {
        from: AtomId::new(from),
        drop: Point::new(parse_coord(x)?, parse_coord(y)?),
    })
}

pub fn parse_viewport(raw: &str) -> Result<Viewport, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let (width, height) = (parse_coord(w)?, parse_coord(h)?);
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("viewport must be positive, got '{raw}'"));
    }
    Ok(Viewport::new(width, height))
}

fn parse_coord(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{raw}'"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("invalid number '{raw}'"))
    }
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
