use std::path::Path;

use anyhow::{Context, Result};

use crate::infra::contracts::ExternalOpener;

#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, target: &Path) -> Result<()> {
        open::that_detached(target)
            .with_context(|| format!("failed to open {}", target.display()))
    }
}
