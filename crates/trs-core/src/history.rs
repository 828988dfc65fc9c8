use std::{
    fs::{File, OpenOptions},
    io,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// CSV header of the ledger, in column order.
const COLUMNS: [&str; 3] = ["ID", "Postname", "Subreddit"];

/// One row of the sent-history ledger. Appended after every delivered post,
/// never modified or removed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Postname")]
    pub title: String,
    #[serde(rename = "Subreddit")]
    pub subreddit: String,
}

/// Append-only flat-file ledger of already-delivered submission ids
/// (`already_sended_submissions.csv`).
///
/// The CSV file is the durable source of truth; membership checks scan it
/// in full on every call. Unbounded growth is an accepted property of this
/// store, not something it tries to fix.
#[derive(Clone, Debug)]
pub struct SentHistory {
    path: PathBuf,
}

impl SentHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// True iff a record with this exact id exists anywhere in the file.
    ///
    /// The scan must run to the end of the file before answering `false`;
    /// a missing file self-heals to an empty ledger.
    pub fn contains(&self, id: &str) -> Result<bool> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.recreate()?;
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        for record in reader.deserialize::<SentRecord>() {
            if record?.id == id {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Append one row, creating the file (header included) first if it does
    /// not exist yet.
    pub fn append(&self, record: &SentRecord) -> Result<()> {
        if !self.path.exists() {
            self.recreate()?;
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Create/truncate the ledger with just the header row.
    pub fn recreate(&self) -> Result<()> {
        warn!(path = %self.path.display(), "recreating sent-history ledger");
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_history(tag: &str) -> SentHistory {
        let root = PathBuf::from(format!("/tmp/trs-history-{}-{tag}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        SentHistory::new(root.join("already_sended_submissions.csv"))
    }

    fn record(id: &str) -> SentRecord {
        SentRecord {
            id: id.to_string(),
            title: format!("title of {id}"),
            subreddit: "AskRedditespanol".to_string(),
        }
    }

    #[test]
    fn append_then_contains() {
        let history = temp_history("append");

        history.append(&record("abc123")).unwrap();
        assert!(history.contains("abc123").unwrap());
        assert!(!history.contains("xyz999").unwrap());
    }

    #[test]
    fn contains_on_missing_file_heals_and_answers_false() {
        let history = temp_history("heal");

        assert!(!history.contains("anything").unwrap());
        // The self-heal left a header-only file behind.
        let text = fs::read_to_string(&history.path).unwrap();
        assert_eq!(text.trim(), "ID,Postname,Subreddit");
    }

    #[test]
    fn match_in_last_row_is_found() {
        let history = temp_history("full-scan");

        for id in ["a1", "b2", "c3", "d4"] {
            history.append(&record(id)).unwrap();
        }
        assert!(history.contains("d4").unwrap());
    }

    #[test]
    fn recreate_forgets_everything() {
        let history = temp_history("recreate");

        history.append(&record("abc123")).unwrap();
        history.recreate().unwrap();
        assert!(!history.contains("abc123").unwrap());
    }

    #[test]
    fn titles_with_commas_survive_the_round_trip() {
        let history = temp_history("quoting");

        let rec = SentRecord {
            id: "q1".to_string(),
            title: "ELI5: why, exactly, \"this\"?".to_string(),
            subreddit: "explainlikeimfive".to_string(),
        };
        history.append(&rec).unwrap();
        history.append(&record("q2")).unwrap();

        assert!(history.contains("q1").unwrap());
        assert!(history.contains("q2").unwrap());
    }

    #[test]
    fn rows_accumulate_append_only() {
        let history = temp_history("accumulate");

        history.append(&record("a1")).unwrap();
        history.append(&record("a1")).unwrap();

        let text = fs::read_to_string(&history.path).unwrap();
        assert_eq!(text.lines().count(), 3); // header + two rows
    }
}
