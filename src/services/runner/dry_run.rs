use crate::error::Result;
use crate::events::ToolOutput;
use tracing::info;

use super::r#trait::ToolRunner;

/// Ничего не запускает, только логирует вызов и возвращает код 0
pub struct DryRunRunner;

impl DryRunRunner {
    pub fn new() -> Self {
        info!("Инициализация DryRunRunner");
        Self
    }
}

impl Default for DryRunRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for DryRunRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        info!("[DRY RUN] {} {:?}", program, args);
        Ok(ToolOutput::default())
    }
}
