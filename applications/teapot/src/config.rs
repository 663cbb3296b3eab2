use crate::error::{ApplicationError, ApplicationResult};
use engine_teapot::{
    KeyBinding, KeyBindings, DEFAULT_MESH_DETAIL, DEFAULT_SHADER_DIR, MAX_MESH_DETAIL,
};
use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use teapot_framework::WindowConfig;

/// Settings of the demo, read from an optional JSON file.
///
/// Every field is optional; missing fields keep their built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DemoConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) shader_dir: PathBuf,
    pub(crate) mesh_detail: u32,
    /// replaces the built-in key table as a whole
    pub(crate) key_bindings: Option<Vec<KeyBinding>>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Teapot Vision".to_owned(),
            width: 600,
            height: 600,
            shader_dir: PathBuf::from(DEFAULT_SHADER_DIR),
            mesh_detail: DEFAULT_MESH_DETAIL,
            key_bindings: None,
        }
    }
}

impl DemoConfig {
    pub(crate) fn load(path: &Path) -> ApplicationResult<Self> {
        debug!("reading configuration from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ApplicationError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> ApplicationResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|source| ApplicationError::ParseConfig {
                path: path.to_owned(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ApplicationResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ApplicationError::InvalidConfig(format!(
                "window size {}x{} must not be empty",
                self.width, self.height
            )));
        }
        if self.mesh_detail > MAX_MESH_DETAIL {
            return Err(ApplicationError::InvalidConfig(format!(
                "mesh detail {} exceeds the maximum of {MAX_MESH_DETAIL}",
                self.mesh_detail
            )));
        }
        if self
            .key_bindings
            .as_ref()
            .is_some_and(|bindings| bindings.is_empty())
        {
            return Err(ApplicationError::InvalidConfig(
                "the key binding table must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub(crate) fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn key_bindings(&self) -> KeyBindings {
        self.key_bindings
            .clone()
            .map_or_else(KeyBindings::default, KeyBindings::new)
    }
}
