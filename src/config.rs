//! # Configuration
//!
//! Settings for the planning model, loaded from an optional file and
//! `TASK_ASSIGNING__*` environment variables (nested keys separated by `__`,
//! e.g. `TASK_ASSIGNING__LOGGING__FORMAT=json`). Environment variables win
//! over the file; anything missing falls back to the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::{DEFAULT_PLANNING_USER_ID, DEFAULT_TASK_DURATION};
use crate::error::{Result, TaskAssigningError};

pub const ENV_PREFIX: &str = "TASK_ASSIGNING";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; derived from the environment when unset
    pub level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskAssigningConfig {
    /// Duration given to tasks that don't carry their own
    pub default_task_duration: i64,
    /// Entity id of the user parking tasks nobody else can take
    pub planning_user_id: String,
    pub logging: LoggingConfig,
}

impl Default for TaskAssigningConfig {
    fn default() -> Self {
        Self {
            default_task_duration: DEFAULT_TASK_DURATION,
            planning_user_id: DEFAULT_PLANNING_USER_ID.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TaskAssigningConfig {
    /// Loads from `TASK_ASSIGNING__*` environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Loads from a required file, overridden by environment variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path.as_ref()))
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading task assigning configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_task_duration <= 0 {
            return Err(TaskAssigningError::ConfigurationError(format!(
                "default_task_duration must be positive, got {}",
                self.default_task_duration
            )));
        }
        if self.planning_user_id.trim().is_empty() {
            return Err(TaskAssigningError::ConfigurationError(
                "planning_user_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
