use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

pub const CONFIG_FILE: &str = "config.yaml";
pub const HISTORY_FILE: &str = "already_sended_submissions.csv";

/// Process-owned working directory holding the credentials file and the
/// sent-history ledger. Resolved once at startup and passed to the stores
/// instead of being re-derived at every file access.
#[derive(Clone, Debug)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    /// `~/TelegramRedditScrapper`, created if absent.
    pub fn resolve() -> Result<Self> {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| Error::Config("HOME is not set".to_string()))?;
        Self::at(home.join("TelegramRedditScrapper"))
    }

    /// Use an explicit root (tests point this at a temp directory).
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn config_file(&self) -> PathBuf {
        self.file(CONFIG_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.file(HISTORY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_root_and_joins_file_paths() {
        let root = PathBuf::from(format!("/tmp/trs-workdir-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);

        let workdir = WorkDir::at(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(workdir.config_file(), root.join("config.yaml"));
        assert_eq!(
            workdir.history_file(),
            root.join("already_sended_submissions.csv")
        );

        let _ = fs::remove_dir_all(&root);
    }
}
