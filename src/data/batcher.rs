// ============================================================
// Layer 4 — Tagging Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<TaggedSample>
// into padded integer tensors.
//
// Why dynamic padding?
//   Lines have different lengths. Every row of a tensor must
//   have the same length, so each batch is padded with 0 up
//   to its own longest row (not a global maximum). Short
//   batches stay small.
//
//   Input:  N samples with token lengths [3, 5, 2]
//   Output: tokens [N, 5]
//             [t t t 0 0]
//             [t t t t t]
//             [t t 0 0 0]
//
// Tokens and tags are padded independently, each to its own
// longest row. Tags are also expanded to one-hot rows of width
// num_tags; padded tag positions are all zeros.
//
// Padding uses id 0, which is also a real vocabulary id. Use
// `mask` (or `lengths`) to tell real tokens from padding.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{data::dataloader::batcher::Batcher, prelude::*, tensor::TensorData};

use crate::domain::sample::TaggedSample;

const PAD_ID: i64 = 0;

// ─── TaggingBatch ─────────────────────────────────────────────────────────────
/// A padded batch of line pairs ready for a tagging model.
#[derive(Debug, Clone)]
pub struct TaggingBatch<B: Backend> {
    /// Word ids — shape: [batch_size, max_tokens]
    pub tokens: Tensor<B, 2, Int>,

    /// One-hot tags — shape: [batch_size, max_tags, num_tags]
    pub tags: Tensor<B, 3, Int>,

    /// Tag ids — shape: [batch_size, max_tags]
    pub tag_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding — shape: [batch_size, max_tokens]
    pub mask: Tensor<B, 2, Int>,

    /// Unpadded token count of each row
    pub lengths: Vec<usize>,
}

impl<B: Backend> TaggingBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.lengths.len()
    }
}

// ─── TaggingBatcher ───────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct TaggingBatcher<B: Backend> {
    /// The device to create tensors on
    device: B::Device,

    /// Width of the one-hot tag encoding (tag table size incl. OOV buckets)
    num_tags: usize,
}

impl<B: Backend> TaggingBatcher<B> {
    pub fn new(device: B::Device, num_tags: usize) -> Self {
        Self { device, num_tags }
    }

    pub fn num_tags(&self) -> usize {
        self.num_tags
    }
}

impl<B: Backend> Batcher<TaggedSample, TaggingBatch<B>> for TaggingBatcher<B> {
    fn batch(&self, items: Vec<TaggedSample>) -> TaggingBatch<B> {
        let batch_size = items.len();
        let lengths: Vec<usize> = items.iter().map(TaggedSample::token_len).collect();

        // A batch of empty lines still gets one (padding) column
        let token_width = padded_width(items.iter().map(TaggedSample::token_len));
        let tag_width   = padded_width(items.iter().map(TaggedSample::tag_len));

        // ── Flatten with padding ──────────────────────────────────────────────
        let token_flat = pad_rows(items.iter().map(|s| s.tokens.as_slice()), token_width);
        let tag_flat   = pad_rows(items.iter().map(|s| s.tags.as_slice()), tag_width);

        let mask_flat: Vec<i64> = lengths
            .iter()
            .flat_map(|&len| (0..token_width).map(move |i| i64::from(i < len)))
            .collect();

        // ── One-hot tags ──────────────────────────────────────────────────────
        // Row-major over [batch, tag position, tag id]
        let mut one_hot = vec![0i64; batch_size * tag_width * self.num_tags];
        for (row, sample) in items.iter().enumerate() {
            for (pos, &tag) in sample.tags.iter().enumerate() {
                if tag < self.num_tags {
                    one_hot[(row * tag_width + pos) * self.num_tags + tag] = 1;
                }
            }
        }

        // ── Create tensors ────────────────────────────────────────────────────
        // i64 end to end, so large vocabulary ids are never narrowed
        let tokens = Tensor::<B, 2, Int>::from_data(
            TensorData::new(token_flat, [batch_size, token_width]), &self.device,
        );

        let tag_ids = Tensor::<B, 2, Int>::from_data(
            TensorData::new(tag_flat, [batch_size, tag_width]), &self.device,
        );

        let mask = Tensor::<B, 2, Int>::from_data(
            TensorData::new(mask_flat, [batch_size, token_width]), &self.device,
        );

        let tags = Tensor::<B, 3, Int>::from_data(
            TensorData::new(one_hot, [batch_size, tag_width, self.num_tags]), &self.device,
        );

        TaggingBatch { tokens, tags, tag_ids, mask, lengths }
    }
}

// ─── ChunkBatcher ─────────────────────────────────────────────────────────────
/// Batches pre-grouped chunks of samples. Each chunk is already one
/// full batch, so a data loader running with batch size 1 over chunks
/// keeps every batch boundary no matter how its workers split the data.
#[derive(Clone, Debug)]
pub struct ChunkBatcher<B: Backend> {
    inner: TaggingBatcher<B>,
}

impl<B: Backend> ChunkBatcher<B> {
    pub fn new(inner: TaggingBatcher<B>) -> Self {
        Self { inner }
    }
}

impl<B: Backend> Batcher<Vec<TaggedSample>, TaggingBatch<B>> for ChunkBatcher<B> {
    fn batch(&self, chunks: Vec<Vec<TaggedSample>>) -> TaggingBatch<B> {
        self.inner.batch(chunks.into_iter().flatten().collect())
    }
}

fn padded_width(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.max().unwrap_or(0).max(1)
}

/// Concatenate rows, each right-padded with PAD_ID to `width`
fn pad_rows<'a>(rows: impl Iterator<Item = &'a [usize]>, width: usize) -> Vec<i64> {
    rows.flat_map(|row| {
        row.iter()
            .map(|&id| id as i64)
            .chain(std::iter::repeat(PAD_ID))
            .take(width)
    })
    .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn batcher(num_tags: usize) -> TaggingBatcher<TestBackend> {
        TaggingBatcher::new(Default::default(), num_tags)
    }

    fn ints<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().convert::<i64>().to_vec::<i64>().unwrap()
    }

    #[test]
    fn test_pads_to_longest_row() {
        let batch = batcher(3).batch(vec![
            TaggedSample::new(vec![5, 6, 7], vec![1, 0, 2]),
            TaggedSample::new(vec![8], vec![1]),
        ]);

        assert_eq!(batch.tokens.dims(), [2, 3]);
        assert_eq!(ints(batch.tokens), vec![5, 6, 7, 8, 0, 0]);
        assert_eq!(ints(batch.tag_ids), vec![1, 0, 2, 1, 0, 0]);
        assert_eq!(batch.lengths, vec![3, 1]);
    }

    #[test]
    fn test_mask_marks_real_tokens() {
        let batch = batcher(2).batch(vec![
            TaggedSample::new(vec![0, 0], vec![0, 0]),
            TaggedSample::new(vec![0], vec![0]),
        ]);
        // Real id 0 and padding 0 are told apart only by the mask
        assert_eq!(ints(batch.mask), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_one_hot_tags() {
        let batch = batcher(3).batch(vec![
            TaggedSample::new(vec![1, 2], vec![2, 0]),
            TaggedSample::new(vec![3], vec![1]),
        ]);

        assert_eq!(batch.tags.dims(), [2, 2, 3]);
        assert_eq!(
            ints(batch.tags),
            vec![
                0, 0, 1, /**/ 1, 0, 0, // row 0
                0, 1, 0, /**/ 0, 0, 0, // row 1, second position is padding
            ]
        );
    }

    #[test]
    fn test_tokens_and_tags_padded_independently() {
        let batch = batcher(2).batch(vec![
            TaggedSample::new(vec![1, 2, 3, 4], vec![1]),
            TaggedSample::new(vec![5], vec![0, 1]),
        ]);
        assert_eq!(batch.tokens.dims(), [2, 4]);
        assert_eq!(batch.tag_ids.dims(), [2, 2]);
    }

    #[test]
    fn test_large_ids_are_not_narrowed() {
        let big   = 3_000_000_000usize;
        let batch = batcher(2).batch(vec![TaggedSample::new(vec![big, 7], vec![1, 0])]);
        assert_eq!(ints(batch.tokens), vec![3_000_000_000, 7]);
    }

    #[test]
    fn test_chunk_batcher_flattens_chunks() {
        let chunks = ChunkBatcher::new(batcher(2));
        let batch  = chunks.batch(vec![
            vec![TaggedSample::new(vec![1], vec![0]), TaggedSample::new(vec![2, 3], vec![1, 1])],
            vec![TaggedSample::new(vec![4], vec![0])],
        ]);
        assert_eq!(batch.batch_size(), 3);
        assert_eq!(ints(batch.tokens), vec![1, 0, 2, 3, 4, 0]);
    }

    #[test]
    fn test_all_empty_lines_get_one_column() {
        let batch = batcher(2).batch(vec![
            TaggedSample::new(vec![], vec![]),
            TaggedSample::new(vec![], vec![]),
        ]);
        assert_eq!(batch.tokens.dims(), [2, 1]);
        assert_eq!(batch.batch_size(), 2);
        assert_eq!(ints(batch.mask.clone()), vec![0, 0]);
    }
}
