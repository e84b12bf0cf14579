// ============================================================
// Layer 4 — Vocabulary Lookup Table
// ============================================================
// Turns word and tag strings into integer ids.
//
// File format:
//   One entry per line. The whole line is the key and its
//   zero-based line number is the id:
//
//     line 0: "the"    → 0
//     line 1: "cat"    → 1
//     line 2: "sat"    → 2
//
// Out-of-vocabulary handling:
//   Any key that is not in the file is hashed into one of
//   `num_oov_buckets` extra ids placed after the vocabulary:
//
//     id = len + fingerprint(key) % num_oov_buckets
//
//   With a single bucket (the default) every unknown word
//   shares id `len`. The fingerprint is FNV-1a 64 so ids are
//   identical across runs and platforms.
//
// Reference: Rust Book §8 (Hash Maps)

use anyhow::{bail, ensure, Context, Result};
use std::{collections::HashMap, fs, path::Path};

use crate::domain::traits::TokenLookup;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A static string → id table with hashed out-of-vocabulary buckets.
#[derive(Debug, Clone)]
pub struct VocabTable {
    /// Key → line number
    ids: HashMap<String, usize>,

    /// Number of extra ids reserved for unknown keys
    num_oov_buckets: usize,
}

impl VocabTable {
    /// Read a vocabulary file, one key per line.
    ///
    /// `\n` and `\r\n` terminators are both accepted. An empty line is
    /// a valid (empty-string) key. Repeated keys are rejected because
    /// a key can only have one id.
    pub fn from_file(path: impl AsRef<Path>, num_oov_buckets: usize) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read vocabulary file '{}'", path.display()))?;

        let table = Self::from_tokens(split_lines(&text), num_oov_buckets)
            .with_context(|| format!("Invalid vocabulary file '{}'", path.display()))?;

        tracing::debug!(
            "Loaded vocabulary '{}' ({} entries, {} oov buckets)",
            path.display(),
            table.len(),
            table.num_oov_buckets,
        );
        Ok(table)
    }

    /// Build a table from keys in id order.
    pub fn from_tokens<I, S>(tokens: I, num_oov_buckets: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure!(num_oov_buckets > 0, "num_oov_buckets must be greater than 0");

        let mut ids = HashMap::new();
        for (line, token) in tokens.into_iter().enumerate() {
            let token = token.into();
            if let Some(first) = ids.get(&token) {
                bail!("duplicate key {:?} on line {} (first seen on line {})", token, line, first);
            }
            ids.insert(token, line);
        }

        Ok(Self { ids, num_oov_buckets })
    }

    /// Id for `token`. Unknown tokens land in an OOV bucket.
    pub fn lookup(&self, token: &str) -> usize {
        match self.ids.get(token) {
            Some(&id) => id,
            None => self.oov_id(token),
        }
    }

    /// Look up every token in order
    pub fn lookup_all<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        tokens.iter().map(|t| self.lookup(t.as_ref())).collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    /// Number of keys read from the file (excludes OOV buckets)
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Size of the id space: keys plus OOV buckets
    pub fn size(&self) -> usize {
        self.ids.len() + self.num_oov_buckets
    }

    pub fn num_oov_buckets(&self) -> usize {
        self.num_oov_buckets
    }

    /// True when `id` is one of the OOV bucket ids
    pub fn is_oov(&self, id: usize) -> bool {
        id >= self.ids.len() && id < self.size()
    }

    fn oov_id(&self, token: &str) -> usize {
        let bucket = fingerprint(token) % self.num_oov_buckets as u64;
        self.ids.len() + bucket as usize
    }
}

impl TokenLookup for VocabTable {
    fn lookup(&self, token: &str) -> usize {
        VocabTable::lookup(self, token)
    }

    fn size(&self) -> usize {
        VocabTable::size(self)
    }
}

/// Split file contents into lines, dropping the terminator of each.
/// A final newline does not start another (empty) line.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// FNV-1a 64-bit hash of the key's UTF-8 bytes
fn fingerprint(key: &str) -> u64 {
    key.bytes()
        .fold(FNV_OFFSET, |hash, b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_vocab(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_line_number_is_id() {
        let f     = write_vocab("the\ncat\nsat\n");
        let table = VocabTable::from_file(f.path(), 1).unwrap();
        assert_eq!(table.lookup("the"), 0);
        assert_eq!(table.lookup("cat"), 1);
        assert_eq!(table.lookup("sat"), 2);
        assert_eq!(table.len(), 3);
        assert_eq!(table.size(), 4);
    }

    #[test]
    fn test_unknown_word_uses_single_bucket() {
        let table = VocabTable::from_tokens(["a", "b"], 1).unwrap();
        assert_eq!(table.lookup("zebra"), 2);
        assert_eq!(table.lookup("yak"), 2);
        assert!(table.is_oov(2));
        assert!(!table.is_oov(1));
    }

    #[test]
    fn test_oov_buckets_are_stable_and_in_range() {
        let table = VocabTable::from_tokens(["a", "b"], 8).unwrap();
        let id    = table.lookup("unseen");
        assert!(id >= 2 && id < 10);
        // Same key, same bucket
        assert_eq!(id, table.lookup("unseen"));
    }

    #[test]
    fn test_windows_line_endings() {
        let f     = write_vocab("O\r\nB-PER\r\nI-PER\r\n");
        let table = VocabTable::from_file(f.path(), 1).unwrap();
        assert_eq!(table.lookup("B-PER"), 1);
        assert!(!table.contains("B-PER\r"));
    }

    #[test]
    fn test_empty_line_is_a_key() {
        let table = VocabTable::from_tokens(["a", "", "b"], 1).unwrap();
        assert_eq!(table.lookup(""), 1);
        assert_eq!(table.lookup("b"), 2);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = VocabTable::from_tokens(["a", "b", "a"], 1).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert!(VocabTable::from_tokens(["a"], 0).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = VocabTable::from_file("/definitely/not/here.txt", 1).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_lookup_all() {
        let table = VocabTable::from_tokens(["x", "y"], 1).unwrap();
        assert_eq!(table.lookup_all(&["y", "x", "?"]), vec![1, 0, 2]);
    }
}
