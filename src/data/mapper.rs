// ============================================================
// Layer 4 — Line Mappers
// ============================================================
// Burn `Mapper` implementations that turn one raw line into a
// sequence of vocabulary ids:
//
//   "John lives in Paris"  ──TextMapper──►  [412, 87, 9, 1530]
//   "B-PER O O B-LOC"      ─TargetMapper─►  [1, 0, 0, 3]
//
// Mapping is lazy: a MapperDataset calls map() only when an
// item is fetched, so the work runs on whichever data-loader
// worker asks for it.
//
// Reference: Burn Book §4 (Dataset transforms)

use burn::data::dataset::transform::Mapper;
use std::sync::Arc;

use crate::data::preprocessor::Preprocessor;
use crate::domain::traits::TokenLookup;

/// Maps a text line to word ids.
#[derive(Clone)]
pub struct TextMapper {
    table:        Arc<dyn TokenLookup>,
    preprocessor: Preprocessor,
}

impl TextMapper {
    pub fn new(table: Arc<dyn TokenLookup>, preprocessor: Preprocessor) -> Self {
        Self { table, preprocessor }
    }
}

impl Mapper<String, Vec<usize>> for TextMapper {
    fn map(&self, item: &String) -> Vec<usize> {
        self.preprocessor
            .tokenize(item)
            .iter()
            .map(|token| self.table.lookup(token))
            .collect()
    }
}

/// Maps a target line to tag ids. Tags are never lowercased:
/// `B-PER` and `b-per` are different labels.
#[derive(Clone)]
pub struct TargetMapper {
    table:        Arc<dyn TokenLookup>,
    preprocessor: Preprocessor,
}

impl TargetMapper {
    pub fn new(table: Arc<dyn TokenLookup>) -> Self {
        Self { table, preprocessor: Preprocessor::new(false) }
    }

    /// Width of the one-hot tag encoding
    pub fn num_tags(&self) -> usize {
        self.table.size()
    }
}

impl Mapper<String, Vec<usize>> for TargetMapper {
    fn map(&self, item: &String) -> Vec<usize> {
        self.preprocessor
            .tokenize(item)
            .iter()
            .map(|tag| self.table.lookup(tag))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::VocabTable;

    fn words() -> Arc<dyn TokenLookup> {
        Arc::new(VocabTable::from_tokens(["john", "lives", "in", "paris"], 1).unwrap())
    }

    fn tags() -> Arc<dyn TokenLookup> {
        Arc::new(VocabTable::from_tokens(["O", "B-PER", "B-LOC"], 1).unwrap())
    }

    #[test]
    fn test_text_line_to_ids() {
        let m = TextMapper::new(words(), Preprocessor::new(true));
        assert_eq!(m.map(&"John lives in Paris".to_string()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unknown_word_goes_to_oov() {
        let m = TextMapper::new(words(), Preprocessor::new(false));
        // "John" is not in the table without lowercasing
        assert_eq!(m.map(&"John lives".to_string()), vec![4, 1]);
    }

    #[test]
    fn test_target_line_to_ids() {
        let m = TargetMapper::new(tags());
        assert_eq!(m.map(&"B-PER O O B-LOC".to_string()), vec![1, 0, 0, 2]);
        assert_eq!(m.num_tags(), 4);
    }

    #[test]
    fn test_empty_line_maps_to_empty() {
        let m = TargetMapper::new(tags());
        assert!(m.map(&String::new()).is_empty());
    }
}
