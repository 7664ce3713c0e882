// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module argument loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ParamsLoader::new()
//!   .add_toml_file(defaults)
//!   .add_json_file(args)      <- path Ansible passes as argv[1]
//!   .add_json_str()
//!   .with_env_prefix("GIT_ACP")
//!   .set("key", value)
//!        |
//!        v
//!    build() --> RawParams (+ unknown keys)
//! ```

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat, Source as _};

use super::types::RawParams;
use crate::error::{AcpResult, ConfigError};

/// Builder for loading module arguments from multiple sources.
pub struct ParamsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl ParamsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file of site defaults.
    ///
    /// The file is read when `build()` is called; a missing file is an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("defaults".to_string(), p.to_path_buf()));
        self
    }

    /// Adds the JSON arguments file written by the controller.
    #[must_use]
    pub fn add_json_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Json).required(true));
        self.files.push(("args".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_json_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Json));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<KEY>` variables, e.g. `GIT_ACP_PUSH=no`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets an argument override. Nested keys use dots, e.g.
    /// `git_config.user_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key path is invalid.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> AcpResult<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(ConfigError::Load)?;
        Ok(self)
    }

    /// Builds the raw arguments from all added sources.
    ///
    /// Keys that no module declares are kept in [`RawParams::unknown`] so the
    /// module rules can reject them; `_ansible_*` keys are always accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A source file is missing or not valid JSON/TOML.
    /// - A value has the wrong type for its parameter.
    pub fn build(self) -> AcpResult<RawParams> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let cfg = builder.build().map_err(ConfigError::Load)?;

        let mut unknown: Vec<String> = cfg
            .collect()
            .map_err(ConfigError::Load)?
            .into_keys()
            .filter(|key| {
                !key.starts_with("_ansible_") && !RawParams::DECLARED.contains(&key.as_str())
            })
            .collect();
        unknown.sort_unstable();

        let mut raw: RawParams = cfg.try_deserialize().map_err(ConfigError::Load)?;
        raw.unknown = unknown;
        Ok(raw)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ParamsLoader {
    fn default() -> Self {
        Self::new()
    }
}
