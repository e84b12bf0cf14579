use burn::data::dataset::{
    transform::{Mapper, MapperDataset},
    Dataset, InMemDataset,
};
use std::sync::Arc;

use crate::domain::sample::TaggedSample;

/// Raw lines held in memory
pub type LineDataset = InMemDataset<String>;

/// Lines mapped lazily to vocabulary ids
pub type IdDataset<M> = MapperDataset<LineDataset, M, String>;

/// Wrap raw lines with a mapper. Nothing is tokenised until `get`.
pub fn map_lines<M>(lines: Vec<String>, mapper: M) -> IdDataset<M>
where
    M: Mapper<String, Vec<usize>>,
{
    MapperDataset::new(InMemDataset::new(lines), mapper)
}

/// Pairs item `i` of a text dataset with item `i` of a target dataset.
/// The zipped length is the shorter of the two.
pub struct ZipDataset<T, G> {
    texts:   T,
    targets: G,
}

impl<T, G> ZipDataset<T, G>
where
    T: Dataset<Vec<usize>>,
    G: Dataset<Vec<usize>>,
{
    pub fn new(texts: T, targets: G) -> Self {
        if texts.len() != targets.len() {
            tracing::warn!(
                "Text and target line counts differ ({} vs {}); zipping the first {}",
                texts.len(),
                targets.len(),
                texts.len().min(targets.len()),
            );
        }
        Self { texts, targets }
    }
}

impl<T, G> Dataset<TaggedSample> for ZipDataset<T, G>
where
    T: Dataset<Vec<usize>>,
    G: Dataset<Vec<usize>>,
{
    fn get(&self, index: usize) -> Option<TaggedSample> {
        if index >= self.len() {
            return None;
        }
        Some(TaggedSample::new(self.texts.get(index)?, self.targets.get(index)?))
    }

    fn len(&self) -> usize {
        self.texts.len().min(self.targets.len())
    }
}

/// Cheaply cloneable handle to a sample dataset, so the same zipped
/// samples can back several iterations and a Burn data loader.
#[derive(Clone)]
pub struct SharedDataset(Arc<dyn Dataset<TaggedSample>>);

impl SharedDataset {
    pub fn new<D>(dataset: D) -> Self
    where
        D: Dataset<TaggedSample> + 'static,
    {
        Self(Arc::new(dataset))
    }
}

impl Dataset<TaggedSample> for SharedDataset {
    fn get(&self, index: usize) -> Option<TaggedSample> {
        self.0.get(index)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Groups a sample dataset into consecutive batch-sized chunks.
/// Chunk `i` holds samples `i * batch_size ..` of the inner order; the
/// last chunk is short unless `drop_remainder` removed it.
pub struct BatchDataset<D> {
    dataset:    D,
    batch_size: usize,
    /// One past the last sample index that belongs to a chunk
    end:        usize,
}

impl<D> BatchDataset<D>
where
    D: Dataset<TaggedSample>,
{
    pub fn new(dataset: D, batch_size: usize, drop_remainder: bool) -> Self {
        let batch_size = batch_size.max(1);
        let len        = dataset.len();
        let end        = if drop_remainder { len - len % batch_size } else { len };
        Self { dataset, batch_size, end }
    }

    /// Samples covered by all chunks
    pub fn num_samples(&self) -> usize {
        self.end
    }
}

impl<D> Dataset<Vec<TaggedSample>> for BatchDataset<D>
where
    D: Dataset<TaggedSample>,
{
    fn get(&self, index: usize) -> Option<Vec<TaggedSample>> {
        let start = index.checked_mul(self.batch_size)?;
        if start >= self.end {
            return None;
        }
        let stop = (start + self.batch_size).min(self.end);
        Some((start..stop).filter_map(|i| self.dataset.get(i)).collect())
    }

    fn len(&self) -> usize {
        self.end.div_ceil(self.batch_size)
    }
}
