use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const CONFIG_BASENAME: &str = "repostats";
const ENV_PREFIX: &str = "REPOSTATS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fold both tables in one history walk instead of one walk per table.
    pub single_pass: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Rows kept in the most-modified-files table.
    pub max_files: usize,
    pub color_output: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            single_pass: false,
            show_progress: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_files: 10,
            color_output: true,
        }
    }
}

impl Config {
    /// Layers, lowest first: defaults, `repostats.*` in the working directory
    /// (or `file`, which must then exist), `REPOSTATS_<SECTION>__<KEY>`.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::layered(file, None)
    }

    /// `env` replaces the process environment when given.
    fn layered(file: Option<&Path>, env: Option<::config::Map<String, String>>) -> Result<Self> {
        let source = match file {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(CONFIG_BASENAME).required(false),
        };

        let config = ::config::Config::builder()
            .add_source(source)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(|layered| layered.try_deserialize::<Self>())
            .context("Failed to load configuration")?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}
