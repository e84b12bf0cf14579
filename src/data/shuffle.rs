// ============================================================
// Layer 4 — Buffered Shuffle
// ============================================================
// Reorders a dataset the way a streaming shuffle buffer does,
// so memory-bounded shuffling behaves the same whether the
// data is streamed or indexed.
//
// How a shuffle buffer works:
//   1. Fill a buffer with the first `buffer_size` items
//   2. Pick a random slot, emit its item
//   3. Refill that slot with the next item from the stream
//   4. Once the stream is exhausted, drain the buffer randomly
//
// Example with buffer_size = 2 over [0, 1, 2, 3]:
//   buffer [0, 1] → emit 1 → buffer [0, 2]
//   buffer [0, 2] → emit 0 → buffer [3, 2]
//   buffer [3, 2] → emit 2 → buffer [3]
//   buffer [3]    → emit 3
//   order: [1, 0, 2, 3]
//
// An item can only move forward by roughly buffer_size places,
// so a small buffer gives a local shuffle and a buffer at
// least as large as the dataset gives a full uniform shuffle.
// buffer_size = 1 keeps the original order.
//
// The permutation is computed once per iteration from a seeded
// StdRng, so the same seed always gives the same order.
//
// Reference: rand crate documentation (SeedableRng, Rng)

use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::marker::PhantomData;

/// Index order produced by a shuffle buffer of `buffer_size` over `len` items.
pub fn buffered_permutation(len: usize, buffer_size: usize, seed: u64) -> Vec<usize> {
    let mut rng    = StdRng::seed_from_u64(seed);
    let capacity   = buffer_size.max(1).min(len);
    let mut buffer: Vec<usize> = (0..capacity).collect();
    let mut next   = capacity;
    let mut order  = Vec::with_capacity(len);

    while !buffer.is_empty() {
        let slot = rng.gen_range(0..buffer.len());
        order.push(buffer[slot]);

        if next < len {
            // Refill the emitted slot from the stream
            buffer[slot] = next;
            next += 1;
        } else {
            buffer.swap_remove(slot);
        }
    }

    order
}

/// A dataset viewed through a buffered-shuffle permutation.
pub struct BufferedShuffleDataset<D, I> {
    dataset: D,
    indices: Vec<usize>,
    input:   PhantomData<I>,
}

impl<D, I> BufferedShuffleDataset<D, I>
where
    D: Dataset<I>,
{
    pub fn new(dataset: D, buffer_size: usize, seed: u64) -> Self {
        let indices = buffered_permutation(dataset.len(), buffer_size, seed);
        tracing::debug!(
            "Shuffled {} items (buffer_size={}, seed={})",
            indices.len(),
            buffer_size,
            seed,
        );
        Self { dataset, indices, input: PhantomData }
    }

    /// Identity order, used when shuffling is disabled
    pub fn ordered(dataset: D) -> Self {
        let indices = (0..dataset.len()).collect();
        Self { dataset, indices, input: PhantomData }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D, I> Dataset<I> for BufferedShuffleDataset<D, I>
where
    D: Dataset<I>,
    I: Send + Sync,
{
    fn get(&self, index: usize) -> Option<I> {
        let original = *self.indices.get(index)?;
        self.dataset.get(original)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::dataset::InMemDataset;

    fn is_permutation(order: &[usize], len: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..len).collect::<Vec<_>>()
    }

    #[test]
    fn test_every_index_appears_once() {
        for buffer in [1, 3, 10, 100] {
            let order = buffered_permutation(25, buffer, 7);
            assert!(is_permutation(&order, 25), "buffer {buffer}");
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        assert_eq!(buffered_permutation(50, 8, 1997), buffered_permutation(50, 8, 1997));
    }

    #[test]
    fn test_different_seed_different_order() {
        assert_ne!(buffered_permutation(50, 50, 1), buffered_permutation(50, 50, 2));
    }

    #[test]
    fn test_buffer_of_one_keeps_order() {
        assert_eq!(buffered_permutation(6, 1, 3), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_items_move_forward_at_most_buffer_size() {
        // An item is only eligible once it enters the buffer, so item i
        // can never be emitted before position i - (buffer_size - 1).
        let buffer = 4;
        let order  = buffered_permutation(40, buffer, 11);
        for (pos, &item) in order.iter().enumerate() {
            assert!(pos + buffer > item, "item {item} emitted at {pos}");
        }
    }

    #[test]
    fn test_empty_dataset() {
        assert!(buffered_permutation(0, 10, 1).is_empty());
    }

    #[test]
    fn test_dataset_view() {
        let data     = InMemDataset::new(vec!['a', 'b', 'c', 'd']);
        let shuffled = BufferedShuffleDataset::new(data, 4, 5);
        let mut seen: Vec<char> = (0..shuffled.len()).filter_map(|i| shuffled.get(i)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!['a', 'b', 'c', 'd']);
        assert!(shuffled.get(4).is_none());
    }

    #[test]
    fn test_ordered_view() {
        let data    = InMemDataset::new(vec![10, 20, 30]);
        let ordered = BufferedShuffleDataset::ordered(data);
        assert_eq!(ordered.indices(), &[0, 1, 2]);
        assert_eq!(ordered.get(2), Some(30));
    }
}
