//! Configuration errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use transport::{MaterialError, ParticleError};

/// Every problem found while checking a configuration document
///
/// Validation keeps going after the first problem so that all of them can
/// be reported at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn missing(&mut self, path: &str) {
        self.add(format!(
            "Required configuration value '{path}' is null or missing"
        ));
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.has_errors() {
            Err(ConfigError::Invalid(self))
        } else {
            Ok(())
        }
    }
}

/// One message per line
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(ValidationErrors),

    #[error("invalid material: {0}")]
    Material(#[from] MaterialError),

    #[error("invalid particle: {0}")]
    Particle(#[from] ParticleError),
}

impl ConfigError {
    pub(crate) fn missing(path: &str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.missing(path);
        ConfigError::Invalid(errors)
    }
}
