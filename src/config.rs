use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::modules::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Unset means "follow the terminal".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    pub rail_collapsed: bool,
    /// When false, toasts have no presentation root and are dropped.
    pub toasts: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            theme: None,
            rail_collapsed: false,
            toasts: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub path: PathBuf,
    pub theme: Option<Theme>,
    pub rail_collapsed: bool,
    pub toasts: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(config_path()?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            let default = ConfigFile::default();
            let toml = toml::to_string_pretty(&default)?;
            if let Some(parent) = path.parent() { fs::create_dir_all(parent)?; }
            fs::write(&path, toml).with_context(|| format!("Writing {:?}", &path))?;
        }
        let content = fs::read_to_string(&path).with_context(|| format!("Reading {:?}", &path))?;
        let cfg: ConfigFile = toml::from_str(&content).with_context(|| "Parsing config TOML")?;
        Ok(Self { path, theme: cfg.theme, rail_collapsed: cfg.rail_collapsed, toasts: cfg.toasts })
    }

    fn save(&self) -> Result<()> {
        let cfg = ConfigFile { theme: self.theme, rail_collapsed: self.rail_collapsed, toasts: self.toasts };
        let toml = toml::to_string_pretty(&cfg)?;
        if let Some(parent) = self.path.parent() { fs::create_dir_all(parent)?; }
        fs::write(&self.path, toml).with_context(|| format!("Writing {:?}", &self.path))?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> { self.theme = Some(theme); self.save() }
    pub fn set_rail_collapsed(&mut self, collapsed: bool) -> Result<()> { self.rail_collapsed = collapsed; self.save() }
}

fn config_path() -> Result<PathBuf> {
    let base = config_dir().context("Could not determine config directory")?;
    Ok(base.join("railshell").join("config.toml"))
}
