use std::path::Path;

use anyhow::{bail, Context, Result};
use catalog::Catalog;
use clap::Parser;
use engine::{GestureController, NoCapture, PointerEvent, PointerPhase, Simulator, Viewport};
use explainer::Tutor;
use shared::{domain::ScenarioId, protocol::Presenter};
use tokio::sync::oneshot;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod presenter;

use args::{Args, Command, DragStep};
use config::Settings;
use presenter::{render_menu, render_outcome, TextPresenter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = load_catalog(&settings, args.scenarios.as_deref())?;
    debug!(scenarios = catalog.len(), "catalog ready");
    let mut simulator = Simulator::new(catalog);

    match args.command {
        Command::List => print!("{}", render_menu(&simulator.menu())),
        Command::Show { id } => {
            let session = simulator.select(&ScenarioId::new(id))?;
            TextPresenter.present(&session.view(None));
        }
        Command::Play {
            id,
            viewport,
            drags,
        } => play(&mut simulator, ScenarioId::new(id), viewport, &drags)?,
        Command::Explain { id } => {
            let tutor = Tutor::from_config(settings.gemini_config());
            explain(&mut simulator, ScenarioId::new(id), tutor).await?;
        }
    }

    Ok(())
}

fn load_catalog(settings: &Settings, extra: Option<&Path>) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    for path in [settings.scenario_file.as_deref(), extra].into_iter().flatten() {
        let loaded = Catalog::load_file(path)?;
        catalog
            .extend(loaded)
            .with_context(|| format!("cannot merge scenarios from '{}'", path.display()))?;
    }
    Ok(catalog)
}

fn play(
    simulator: &mut Simulator,
    id: ScenarioId,
    viewport: Option<Viewport>,
    drags: &[DragStep],
) -> Result<()> {
    let session = simulator.select(&id)?;
    let viewport = viewport.unwrap_or_default();
    let mut controller = GestureController::new(NoCapture).with_viewport(viewport);
    let mut presenter = TextPresenter;

    for step in drags {
        let Some(source) = session.scenario().atom(&step.from) else {
            bail!("scenario '{id}' has no atom '{}'", step.from);
        };
        let press = viewport.to_device(source.center());

        controller.handle(session, PointerEvent::mouse(PointerPhase::Down, press.x, press.y));
        controller.handle(
            session,
            PointerEvent::mouse(PointerPhase::Move, step.drop.x, step.drop.y),
        );
        let outcome = controller.handle(
            session,
            PointerEvent::mouse(PointerPhase::Up, step.drop.x, step.drop.y),
        );
        println!("{}", render_outcome(&outcome));
    }

    presenter.present(&session.view(controller.ghost()));
    Ok(())
}

async fn explain(simulator: &mut Simulator, id: ScenarioId, tutor: Tutor) -> Result<()> {
    let session = simulator.select(&id)?;
    let Some(request) = session.request_explanation() else {
        return Ok(());
    };

    let (tx, rx) = oneshot::channel();
    let prompt = request.prompt;
    tokio::spawn(async move {
        let _ = tx.send(tutor.explain(&prompt).await);
    });
    let text = rx.await.context("explanation task ended early")?;

    session.fulfil_explanation(request.ticket, text);
    if let Some(answer) = session.explanation().text() {
        println!("{answer}");
    }
    Ok(())
}
