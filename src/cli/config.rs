use std::path::Path;

use anyhow::{bail, Result};
use feishu_digest::config::{default_config_path, DigestConfig};

use super::load_config;

/// `config show` — effective configuration, secrets masked.
pub fn run_show(config: Option<&Path>) -> Result<()> {
    let cfg = load_config(config)?;
    println!("{}", serde_json::to_string_pretty(&cfg.redacted())?);
    Ok(())
}

/// `config path` — where the default config file lives.
pub fn run_path() -> Result<()> {
    println!("{}", default_config_path().display());
    Ok(())
}

/// `config init` — write the effective configuration (file plus `FEISHU_*`
/// values) so later runs no longer need the environment.
pub fn run_init(config: Option<&Path>, force: bool) -> Result<()> {
    let path = config.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let cfg = load_config(Some(&path))?;
    write_config(&path, &cfg, force)?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn write_config(path: &Path, cfg: &DigestConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }
    cfg.save(path)?;
    Ok(())
}
