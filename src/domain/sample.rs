// ============================================================
// Layer 3 — TaggedSample Domain Type
// ============================================================
// One training example for sequence tagging: the word ids of a
// text line and the tag ids of its label line.
//
// Example:
//   text line:   "John lives in Paris"
//   target line: "B-PER O O B-LOC"
//   tokens:      [412, 87, 9, 1530]   (word table ids)
//   tags:        [1, 0, 0, 3]         (tag table ids)
//
// The two sequences are normally the same length, but nothing
// here enforces it. Each side is padded independently when a
// batch is formed, so a malformed line pair still loads.

use serde::{Deserialize, Serialize};

/// Word ids and tag ids for one line pair, before padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSample {
    /// Word table ids, one per whitespace-separated token
    pub tokens: Vec<usize>,

    /// Tag table ids, one per whitespace-separated tag
    pub tags: Vec<usize>,
}

impl TaggedSample {
    pub fn new(tokens: Vec<usize>, tags: Vec<usize>) -> Self {
        Self { tokens, tags }
    }

    /// Number of word tokens in this sample
    pub fn token_len(&self) -> usize {
        self.tokens.len()
    }

    /// Number of tags in this sample
    pub fn tag_len(&self) -> usize {
        self.tags.len()
    }

    /// True when the text and target lines disagree on length
    pub fn is_misaligned(&self) -> bool {
        self.tokens.len() != self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let s = TaggedSample::new(vec![4, 5, 6], vec![1, 0, 0]);
        assert_eq!(s.token_len(), 3);
        assert_eq!(s.tag_len(), 3);
        assert!(!s.is_misaligned());
    }

    #[test]
    fn test_misaligned_pair() {
        let s = TaggedSample::new(vec![4, 5], vec![1]);
        assert!(s.is_misaligned());
    }
}
