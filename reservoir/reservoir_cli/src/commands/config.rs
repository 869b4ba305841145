//! Configuration validation command

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use reservoir_core::PoolConfig;

/// Arguments for the check-config command
#[derive(Args)]
pub struct CheckConfigArgs {
    /// Path to the TOML pool configuration
    #[clap(long)]
    pub path: PathBuf,
}

/// Print the effective, already validated configuration as JSON
pub fn execute(config: &PoolConfig, out: &mut impl Write) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(config).context("Failed to render configuration")?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_renders_effective_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pool.toml");
        fs::write(&path, "[exhaustion]\nmode = \"block\"\ntimeout_ms = 100\n").unwrap();
        let config = PoolConfig::load(Some(path.as_path())).unwrap();

        let mut out = Vec::new();
        execute(&config, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "model-pool");
        assert_eq!(value["exhaustion"]["mode"], "block");
        assert_eq!(value["exhaustion"]["timeout_ms"], 100);
        assert_eq!(value["log_level"], "warn");
    }

    #[test]
    fn test_renders_defaults() {
        let mut out = Vec::new();
        execute(&PoolConfig::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["exhaustion"]["mode"], "fail_fast");
        assert!(value["exhaustion"].get("timeout_ms").is_none());
    }
}
