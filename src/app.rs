use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::{
    cli::{Cli, Command},
    domain::generation::ImagePayload,
    imagegen::client::ImagenClient,
    ui::{self, CrosstermEventSource},
    usecases::{
        bootstrap::{self, ShellComposition},
        context::AppContext,
        open_image,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    match cli.command_or_default() {
        Command::Run => run_shell(&context)?,
        Command::Generate { prompt, out } => {
            let path = generate_sticker(&context, &prompt, &out)?;
            println!("Sticker written to {}", path.display());
        }
    }

    Ok(())
}

fn run_shell(context: &AppContext) -> Result<()> {
    let ShellComposition {
        mut orchestrator,
        app_events,
        connectivity,
        connectivity_monitor,
    } = bootstrap::compose_shell(context);

    let mut event_source = CrosstermEventSource::new(app_events, connectivity);
    let result = ui::shell::start(context, &mut event_source, &mut orchestrator);

    drop(connectivity_monitor);
    result
}

fn generate_sticker(context: &AppContext, prompt: &str, out: &Path) -> Result<PathBuf> {
    if prompt.trim().is_empty() {
        bail!("prompt must not be empty");
    }

    let client = ImagenClient::from_env(&context.config.image_generation, context.http.clone())
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;

    tracing::info!(out = %out.display(), "generating sticker from CLI");
    let payload = context
        .runtime
        .block_on(client.generate(prompt))
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;

    let path = output_path(out, &payload);
    open_image::write_payload(&payload, &path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Adds the payload's extension when `out` has none.
fn output_path(out: &Path, payload: &ImagePayload) -> PathBuf {
    if out.extension().is_some() {
        out.to_path_buf()
    } else {
        out.with_extension(payload.file_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_keeps_explicit_extension() {
        let payload = ImagePayload::from_bytes("image/jpeg", b"x");

        assert_eq!(
            output_path(Path::new("cat.png"), &payload),
            PathBuf::from("cat.png")
        );
    }

    #[test]
    fn output_path_adds_payload_extension() {
        let payload = ImagePayload::from_bytes("image/jpeg", b"x");

        assert_eq!(
            output_path(Path::new("out/cat"), &payload),
            PathBuf::from("out/cat.jpg")
        );
    }
}
