//! Validation of loaded validator configuration.

use anyhow::Result;
use std::collections::HashSet;

use super::{ToolConfig, ValidatorConfig};

impl ValidatorConfig {
    /// Check the configuration before any validator is spawned
    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            anyhow::bail!("tools must list at least one validator");
        }

        let mut seen = HashSet::new();
        for (index, tool) in self.tools.iter().enumerate() {
            tool.validate(index)?;
            if !seen.insert(tool.name.as_str()) {
                anyhow::bail!("tools[{}]: duplicate validator name '{}'", index, tool.name);
            }
        }

        Ok(())
    }
}

impl ToolConfig {
    fn validate(&self, index: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("tools[{}]: name must not be empty", index);
        }
        if self.program.trim().is_empty() {
            anyhow::bail!("tools[{}] ('{}'): program must not be empty", index, self.name);
        }
        Ok(())
    }
}
