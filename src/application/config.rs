// ============================================================
// Layer 2 — Loader Configuration
// ============================================================
// Every knob of the data pipeline in one serialisable struct.
//
// Defaults:
//   batch_size   16
//   shuffle      true
//   buffer_size  239   (None → 3 × batch_size)
//   seed         1997
//   threads      4
//   prefetch     1
//
// `texts` and `targets` accept either a single path or a list
// of paths in JSON, so a one-file corpus needs no brackets:
//
//   { "texts": "data/train.txt", "targets": ["data/train.tags"], ... }
//
// Reference: serde documentation (untagged enums)

use anyhow::{ensure, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Text files, one sentence or paragraph per line
    #[serde(deserialize_with = "one_or_many")]
    pub texts: Vec<PathBuf>,

    /// Label files, one tag line per text line
    #[serde(deserialize_with = "one_or_many")]
    pub targets: Vec<PathBuf>,

    /// Word vocabulary, one word per line
    pub word_table: PathBuf,

    /// Tag vocabulary, one tag per line
    pub tag_table: PathBuf,

    pub batch_size: usize,
    pub shuffle: bool,

    /// Shuffle buffer size; None means three batches
    pub buffer_size: Option<usize>,

    pub seed: u64,

    /// Data-loader worker threads
    pub threads: usize,

    /// Batches prepared ahead of the consumer
    pub prefetch: usize,

    /// Label used in log lines
    pub name: String,

    /// Extra ids for words/tags missing from a vocabulary
    pub num_oov_buckets: usize,

    /// Lowercase text lines before lookup (tags are never lowercased)
    pub lowercase: bool,

    /// Use a new shuffle order on every pass over the data
    pub reshuffle_each_iteration: bool,

    /// Drop a final batch smaller than batch_size
    pub drop_remainder: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            texts:                    vec![PathBuf::from("data/texts.txt")],
            targets:                  vec![PathBuf::from("data/targets.txt")],
            word_table:               PathBuf::from("data/words.txt"),
            tag_table:                PathBuf::from("data/tags.txt"),
            batch_size:               16,
            shuffle:                  true,
            buffer_size:              Some(239),
            seed:                     1997,
            threads:                  4,
            prefetch:                 1,
            name:                     "Dataset Loader".to_string(),
            num_oov_buckets:          1,
            lowercase:                false,
            reshuffle_each_iteration: true,
            drop_remainder:           false,
        }
    }
}

impl LoaderConfig {
    /// Config for the given files with every other field at its default
    pub fn new(
        texts:      impl Into<FileList>,
        targets:    impl Into<FileList>,
        word_table: impl Into<PathBuf>,
        tag_table:  impl Into<PathBuf>,
    ) -> Self {
        Self {
            texts:      texts.into().0,
            targets:    targets.into().0,
            word_table: word_table.into(),
            tag_table:  tag_table.into(),
            ..Self::default()
        }
    }

    /// Shuffle buffer actually used: the configured size, or 3 × batch_size
    pub fn resolved_buffer_size(&self) -> usize {
        self.buffer_size.unwrap_or(self.batch_size * 3)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be greater than 0");
        ensure!(self.num_oov_buckets > 0, "num_oov_buckets must be greater than 0");
        ensure!(!self.texts.is_empty(), "at least one text file is required");
        ensure!(!self.targets.is_empty(), "at least one target file is required");
        ensure!(
            !self.word_table.as_os_str().is_empty(),
            "word table path must not be empty"
        );
        ensure!(
            !self.tag_table.as_os_str().is_empty(),
            "tag table path must not be empty"
        );
        ensure!(
            self.resolved_buffer_size() > 0,
            "shuffle buffer size must be greater than 0"
        );
        Ok(())
    }
}

// ─── FileList ─────────────────────────────────────────────────────────────────
/// One path or several, normalised to a list.
#[derive(Debug, Clone, PartialEq)]
pub struct FileList(pub Vec<PathBuf>);

impl From<&str> for FileList {
    fn from(path: &str) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<String> for FileList {
    fn from(path: String) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<PathBuf> for FileList {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<Vec<PathBuf>> for FileList {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

impl From<Vec<&str>> for FileList {
    fn from(paths: Vec<&str>) -> Self {
        Self(paths.into_iter().map(PathBuf::from).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LoaderConfig::new("t.txt", "g.txt", "w.txt", "tags.txt");
        assert_eq!(cfg.batch_size, 16);
        assert!(cfg.shuffle);
        assert_eq!(cfg.resolved_buffer_size(), 239);
        assert_eq!(cfg.seed, 1997);
        assert_eq!(cfg.threads, 4);
        assert_eq!(cfg.prefetch, 1);
        assert_eq!(cfg.name, "Dataset Loader");
        assert_eq!(cfg.texts, vec![PathBuf::from("t.txt")]);
    }

    #[test]
    fn test_buffer_defaults_to_three_batches() {
        let cfg = LoaderConfig { buffer_size: None, batch_size: 10, ..LoaderConfig::default() };
        assert_eq!(cfg.resolved_buffer_size(), 30);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let cfg = LoaderConfig { batch_size: 0, ..LoaderConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_table_path_rejected() {
        let cfg = LoaderConfig { tag_table: PathBuf::new(), ..LoaderConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("tag table"));
    }

    #[test]
    fn test_missing_text_files_rejected() {
        let cfg = LoaderConfig { texts: Vec::new(), ..LoaderConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_json_accepts_single_path_or_list() {
        let json = r#"{
            "texts": "a.txt",
            "targets": ["b.txt", "c.txt"],
            "batch_size": 4
        }"#;
        let cfg: LoaderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.texts, vec![PathBuf::from("a.txt")]);
        assert_eq!(cfg.targets.len(), 2);
        assert_eq!(cfg.batch_size, 4);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.seed, 1997);
    }
}
