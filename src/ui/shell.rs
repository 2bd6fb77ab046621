use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        images_dir = %context.layout.images_dir.display(),
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state(), orchestrator.store()))?;
        pump(event_source, orchestrator)?;
    }

    tracing::info!("TUI shell stopped");
    Ok(())
}

/// Feeds at most one event from the source to the orchestrator.
fn pump(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    if let Some(event) = event_source.next_event()? {
        orchestrator.handle_event(event)?;
    }
    Ok(())
}
