use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// Credentials for the two upstream services, persisted as `config.yaml`
/// in the working directory.
///
/// Field names are the YAML keys; they are kept as-is so existing config
/// files keep working.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token_bot: String,
    pub reddit_id: String,
    pub reddit_secret: String,
    pub reddit_agent: String,
}

impl Credentials {
    /// "Configured" means every field is non-empty. No further validation;
    /// bad values surface as upstream auth failures.
    pub fn is_configured(&self) -> bool {
        !self.token_bot.trim().is_empty()
            && !self.reddit_id.trim().is_empty()
            && !self.reddit_secret.trim().is_empty()
            && !self.reddit_agent.trim().is_empty()
    }
}

/// Load/save access to the credentials file.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the credentials file.
    ///
    /// A missing file is not an error: a template with all fields empty is
    /// written and returned so the operator has something to fill in. Any
    /// other I/O error, and YAML parse errors, are surfaced.
    pub fn load(&self) -> Result<Credentials> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_yaml::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "credentials file missing, writing template");
                let template = Credentials::default();
                self.save(&template)?;
                Ok(template)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the credentials file with the given record.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        fs::write(&self.path, serde_yaml::to_string(credentials)?)?;
        Ok(())
    }
}
