//! Export artifacts: the compiled dataset written as pretty JSON inside a scoped temporary
//! directory.

use chrono::{DateTime, Local};
use nerlabel::ExportRecord;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::ServerError;

/// Name of the downloaded file, `<dataset>_<YYYYMMDD_HHMMSS>.json`. Characters of the dataset
/// name that cannot appear in a file name or a header are replaced by `_`.
pub fn export_file_name(dataset: &str, now: DateTime<Local>) -> String {
    let dataset: String = dataset
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.json", dataset, now.format("%Y%m%d_%H%M%S"))
}

/// An export file living in its own temporary directory. The directory is removed when the
/// artifact is dropped or consumed.
#[derive(Debug)]
pub struct ExportArtifact {
    dir: TempDir,
    path: PathBuf,
    file_name: String,
}

impl ExportArtifact {
    /// Creates a directory named after `prefix` in the system temp dir and writes `records` into
    /// `file_name` as JSON indented with 2 spaces.
    pub fn write(
        prefix: &str,
        file_name: String,
        records: &[ExportRecord],
    ) -> Result<Self, ServerError> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        let path = dir.path().join(&file_name);
        tracing::debug!(path = %path.display(), "writing export file");
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(ExportArtifact {
            dir,
            path,
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Reads the file back and removes the directory.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        let bytes = fs::read(&self.path)?;
        self.dir.close()?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn build_records() -> Vec<ExportRecord> {
        vec![ExportRecord {
            tokens: vec![String::from("Paris"), String::from(".")],
            ner_tags: vec![String::from("B-LOC"), String::from("O")],
        }]
    }

    #[rstest]
    #[case("news", "news_20240305_090807.json")]
    #[case("my-data_v1.2", "my-data_v1.2_20240305_090807.json")]
    #[case("a b\"c", "a_b_c_20240305_090807.json")]
    #[case("données", "donn_es_20240305_090807.json")]
    fn test_export_file_name(#[case] dataset: &str, #[case] expected: &str) {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 9, 8, 7).unwrap();
        assert_eq!(export_file_name(dataset, now), expected);
    }

    #[test]
    fn test_artifact_is_removed_once_read() {
        let artifact = ExportArtifact::write(
            "nerlabel_artifact_test_",
            String::from("news.json"),
            &build_records(),
        )
        .unwrap();
        let dir = artifact.dir().to_path_buf();
        assert!(artifact.path().exists());
        assert_eq!(artifact.file_name(), "news.json");
        let dir_name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(dir_name.starts_with("nerlabel_artifact_test_"));

        let bytes = artifact.into_bytes().unwrap();
        assert!(!dir.exists());
        let text = String::from_utf8(bytes).unwrap();
        let expected = "[\n  {\n    \"tokens\": [\n      \"Paris\",\n      \".\"\n    ],\n    \"ner_tags\": [\n      \"B-LOC\",\n      \"O\"\n    ]\n  }\n]";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_artifact_is_removed_on_drop() {
        let artifact =
            ExportArtifact::write("nerlabel_artifact_drop_", String::from("x.json"), &[]).unwrap();
        let dir = artifact.dir().to_path_buf();
        drop(artifact);
        assert!(!dir.exists());
    }
}
