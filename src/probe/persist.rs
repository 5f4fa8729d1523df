//! Saving player data payloads to timestamped files
//!
//! Files land in `<output_root>/<protocol>/<username>_<YYYYMMDD_HHMMSS>.json`.
//! Two saves within the same second for the same username overwrite each other.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::constants::{DEFAULT_USERNAME, FILE_TIMESTAMP_FORMAT};
use crate::error::{PersistError, PersistResult};
use crate::probe::session::Session;

#[derive(Debug, Clone)]
pub struct Persister {
    output_dir: PathBuf,
}

impl Persister {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for a save by `username` at `at`
    pub fn file_path(&self, username: &str, at: NaiveDateTime) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.json",
            filename_segment(username),
            at.format(FILE_TIMESTAMP_FORMAT)
        ))
    }

    /// Save `payload` under the session's current username, stamped with local time
    pub async fn save(&self, session: &Session, payload: &Value) -> PersistResult<PathBuf> {
        self.save_at(session, payload, chrono::Local::now().naive_local())
            .await
    }

    pub async fn save_at(
        &self,
        session: &Session,
        payload: &Value,
        at: NaiveDateTime,
    ) -> PersistResult<PathBuf> {
        let path = self.file_path(session.username(), at);
        let content = serde_json::to_string_pretty(payload)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PersistError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| PersistError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

/// Make a username safe to embed in a file name
fn filename_segment(username: &str) -> String {
    let cleaned: String = username
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.trim().is_empty() || cleaned == "." || cleaned == ".." {
        DEFAULT_USERNAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(12, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_file_path_layout() {
        let persister = Persister::new(PathBuf::from("data").join("wikisync"));
        assert_eq!(
            persister.file_path("bob", noon()),
            PathBuf::from("data").join("wikisync").join("bob_20240309_120405.json")
        );
    }

    #[test]
    fn test_filename_segment_sanitizes() {
        assert_eq!(filename_segment("Iron Bob"), "Iron Bob");
        assert_eq!(filename_segment("../etc"), ".._etc");
        assert_eq!(filename_segment("a:b|c"), "a_b_c");
        assert_eq!(filename_segment(""), DEFAULT_USERNAME);
        assert_eq!(filename_segment(".."), DEFAULT_USERNAME);
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_pretty_prints() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("data").join("wikisync");
        let persister = Persister::new(&output_dir);
        let mut session = Session::new();
        session.set_username("bob");

        let payload = json!({"_wsType": "GetPlayer", "payload": {"loadouts": [{"name": "range"}]}});
        let path = persister.save_at(&session, &payload, noon()).await.unwrap();

        assert_eq!(path, output_dir.join("bob_20240309_120405.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"payload\""));
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_save_keeps_received_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let persister = Persister::new(temp_dir.path());
        let payload: Value = serde_json::from_str(
            r#"{"_wsType":"GetPlayer","payload":{"name":"bob","loadouts":[],"bank":{}}}"#,
        )
        .unwrap();

        let path = persister.save_at(&Session::new(), &payload, noon()).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let name_at = written.find("\"name\"").unwrap();
        let loadouts_at = written.find("\"loadouts\"").unwrap();
        let bank_at = written.find("\"bank\"").unwrap();
        assert!(written.find("\"_wsType\"").unwrap() < written.find("\"payload\"").unwrap());
        assert!(name_at < loadouts_at && loadouts_at < bank_at, "keys reordered:\n{}", written);
    }

    #[tokio::test]
    async fn test_same_second_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let persister = Persister::new(temp_dir.path());
        let session = Session::new();

        let first = persister.save_at(&session, &json!({"n": 1}), noon()).await.unwrap();
        let second = persister.save_at(&session, &json!({"n": 2}), noon()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(written, json!({"n": 2}));
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();

        let persister = Persister::new(blocker.join("wikisync"));
        let result = persister.save(&Session::new(), &json!({})).await;
        assert!(matches!(result, Err(PersistError::CreateDir { .. })));
    }
}
