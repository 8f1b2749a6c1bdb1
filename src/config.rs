use crate::error::{GuardError, Result};
use crate::types::config::GuardConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "xpguard.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".xpguard/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/xpguard/config.toml";

/// Where a policy setting came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Global,
    Repo,
    Local,
}

impl Layer {
    pub fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Repo => "repo",
            Self::Local => "local",
        }
    }
}

/// Effective policy plus the layers that contributed to it. No layers
/// means built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct LoadedPolicy {
    pub config: GuardConfig,
    pub layers: Vec<Layer>,
}

impl LoadedPolicy {
    pub fn uses_defaults(&self) -> bool {
        self.layers.is_empty()
    }
}

pub fn load_config(root: &Path) -> Result<Option<LoadedPolicy>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// The repo file switches layering on: without it, global and local
/// files are ignored too.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<LoadedPolicy>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.is_file() {
        return Ok(None);
    }

    let candidates = global_path
        .map(|path| (Layer::Global, path.to_path_buf()))
        .into_iter()
        .chain([
            (Layer::Repo, repo_path),
            (Layer::Local, root.join(DEFAULT_LOCAL_FILE)),
        ]);

    let mut merged = Table::new();
    let mut layers = Vec::new();
    for (layer, path) in candidates {
        let Some(table) = read_layer(&path)? else {
            continue;
        };
        tracing::debug!(layer = layer.name(), path = %path.display(), "applying config layer");
        overlay(&mut merged, table);
        layers.push(layer);
    }

    let config: GuardConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| GuardError::ConfigParse(e.to_string()))?;
    config.validate()?;
    Ok(Some(LoadedPolicy { config, layers }))
}

fn read_layer(path: &Path) -> Result<Option<Table>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    content
        .parse::<Table>()
        .map(Some)
        .map_err(|e| GuardError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Nested tables merge key by key; any other value replaces what is there.
fn overlay(base: &mut Table, upper: Table) {
    for (key, value) in upper {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay(existing, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
