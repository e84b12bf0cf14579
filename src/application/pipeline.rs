// ============================================================
// Layer 2 — Dataset Loader
// ============================================================
// Assembles the data layer into one pipeline:
//
//   Step 1: Validate the configuration
//   Step 2: Build word and tag lookup tables      (Layer 4 - vocab)
//   Step 3: Read text and target lines            (Layer 4 - loader)
//   Step 4: Map lines to ids, lazily              (Layer 4 - mapper)
//   Step 5: Zip texts with targets                (Layer 4 - dataset)
//   Step 6: Shuffle with a seeded buffer          (Layer 4 - shuffle)
//   Step 7: Pad and batch                         (Layer 4 - batcher)
//   Step 8: Prefetch ahead of the training loop   (Layer 4 - prefetch)
//
// Steps 1-2 happen once in DatasetLoader::new. Steps 3-5 build
// a TaggingPipeline. Steps 6-8 run per pass over the data.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::{Context, Result};
use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    prelude::*,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::application::config::LoaderConfig;
use crate::data::{
    batcher::{ChunkBatcher, TaggingBatch, TaggingBatcher},
    dataset::{map_lines, BatchDataset, SharedDataset, ZipDataset},
    loader::TextLineLoader,
    mapper::{TargetMapper, TextMapper},
    prefetch::Prefetcher,
    preprocessor::Preprocessor,
    shuffle::BufferedShuffleDataset,
    vocab::VocabTable,
};
use crate::domain::{sample::TaggedSample, traits::LineSource};

/// Samples in the order of one pass
type EpochDataset = BufferedShuffleDataset<SharedDataset, TaggedSample>;

/// One pass, already cut into batch-sized chunks
type EpochBatches = BatchDataset<EpochDataset>;

// ─── DatasetLoader ────────────────────────────────────────────────────────────
/// Owns the configuration and the two vocabulary tables.
pub struct DatasetLoader {
    config:     LoaderConfig,
    word_table: Arc<VocabTable>,
    tag_table:  Arc<VocabTable>,
}

impl DatasetLoader {
    /// Validate `config` and build both lookup tables.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;

        let word_table = VocabTable::from_file(&config.word_table, config.num_oov_buckets)
            .context("Cannot build word table")?;
        let tag_table = VocabTable::from_file(&config.tag_table, config.num_oov_buckets)
            .context("Cannot build tag table")?;

        tracing::info!(
            "[{}] vocabulary: {} words, {} tags ({} oov buckets)",
            config.name,
            word_table.len(),
            tag_table.len(),
            config.num_oov_buckets,
        );

        Ok(Self {
            config,
            word_table: Arc::new(word_table),
            tag_table:  Arc::new(tag_table),
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn word_table(&self) -> &VocabTable {
        &self.word_table
    }

    pub fn tag_table(&self) -> &VocabTable {
        &self.tag_table
    }

    /// Read the configured files and build the pipeline.
    pub fn call<B: Backend>(&self, device: B::Device) -> Result<TaggingPipeline<B>> {
        let texts   = TextLineLoader::new(self.config.texts.clone());
        let targets = TextLineLoader::new(self.config.targets.clone());
        self.load(&texts, &targets, device)
    }

    /// Build the pipeline from any pair of line sources.
    pub fn load<B: Backend>(
        &self,
        texts:   &dyn LineSource,
        targets: &dyn LineSource,
        device:  B::Device,
    ) -> Result<TaggingPipeline<B>> {
        let texts   = texts.load_lines().context("Cannot load text lines")?;
        let targets = targets.load_lines().context("Cannot load target lines")?;
        Ok(self.process(texts, targets, device))
    }

    /// Map text and target lines to ids and zip them into a pipeline.
    pub fn process<B: Backend>(
        &self,
        texts:   Vec<String>,
        targets: Vec<String>,
        device:  B::Device,
    ) -> TaggingPipeline<B> {
        let cfg = &self.config;

        let text_mapper = TextMapper::new(self.word_table.clone(), Preprocessor::new(cfg.lowercase));
        let tag_mapper  = TargetMapper::new(self.tag_table.clone());
        let num_tags    = tag_mapper.num_tags();

        let samples = SharedDataset::new(ZipDataset::new(
            map_lines(texts, text_mapper),
            map_lines(targets, tag_mapper),
        ));

        tracing::info!(
            "[{}] {} samples, batch_size={}, shuffle={}, threads={}, prefetch={}",
            cfg.name,
            samples.len(),
            cfg.batch_size,
            cfg.shuffle,
            cfg.threads,
            cfg.prefetch,
        );

        TaggingPipeline {
            samples,
            batcher:   TaggingBatcher::new(device, num_tags),
            shuffle:   cfg.shuffle.then(|| ShuffleOptions {
                buffer_size: cfg.resolved_buffer_size(),
                seed:        cfg.seed,
                reshuffle:   cfg.reshuffle_each_iteration,
            }),
            batch_size:     cfg.batch_size,
            threads:        cfg.threads,
            prefetch:       cfg.prefetch,
            drop_remainder: cfg.drop_remainder,
            iteration:      AtomicU64::new(0),
        }
    }
}

// ─── TaggingPipeline ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy)]
struct ShuffleOptions {
    buffer_size: usize,
    seed:        u64,
    reshuffle:   bool,
}

/// Zipped samples plus everything needed to batch them.
pub struct TaggingPipeline<B: Backend> {
    samples:        SharedDataset,
    batcher:        TaggingBatcher<B>,
    shuffle:        Option<ShuffleOptions>,
    batch_size:     usize,
    threads:        usize,
    prefetch:       usize,
    drop_remainder: bool,
    /// Passes started so far; drives reshuffling
    iteration:      AtomicU64,
}

impl<B: Backend> TaggingPipeline<B> {
    /// Start one pass over the data. Batches are prepared on a
    /// background thread, at most `prefetch` ahead of the caller.
    pub fn iter(&self) -> Prefetcher<TaggingBatch<B>> {
        let pass = self.iteration.fetch_add(1, Ordering::Relaxed);
        let producer = BatchIter {
            batches: self.epoch_batches(pass),
            batcher: self.batcher.clone(),
            next:    0,
        };
        Prefetcher::spawn(producer, self.prefetch)
    }

    /// A Burn data loader over the first pass order, with `threads`
    /// workers mapping and batching in parallel.
    ///
    /// The loader sees whole batches (chunks) with a loader batch size
    /// of 1, so splitting the work across workers never produces a short
    /// batch mid-pass. Batch contents follow the seeded order; with more
    /// than one worker, the order batches arrive in depends on scheduling.
    pub fn loader(&self) -> Arc<dyn DataLoader<TaggingBatch<B>>> {
        let mut builder = DataLoaderBuilder::new(ChunkBatcher::new(self.batcher.clone())).batch_size(1);
        if self.threads > 0 {
            builder = builder.num_workers(self.threads);
        }
        builder.build(self.epoch_batches(0))
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn num_batches(&self) -> usize {
        let n = self.samples.len();
        if self.drop_remainder {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    pub fn num_tags(&self) -> usize {
        self.batcher.num_tags()
    }

    fn epoch_dataset(&self, pass: u64) -> EpochDataset {
        match self.shuffle {
            Some(opts) => {
                let seed = if opts.reshuffle { opts.seed.wrapping_add(pass) } else { opts.seed };
                BufferedShuffleDataset::new(self.samples.clone(), opts.buffer_size, seed)
            }
            None => BufferedShuffleDataset::ordered(self.samples.clone()),
        }
    }

    fn epoch_batches(&self, pass: u64) -> EpochBatches {
        BatchDataset::new(self.epoch_dataset(pass), self.batch_size, self.drop_remainder)
    }
}

/// Walks the chunks of one pass in order
struct BatchIter<B: Backend> {
    batches: EpochBatches,
    batcher: TaggingBatcher<B>,
    next:    usize,
}

impl<B: Backend> Iterator for BatchIter<B> {
    type Item = TaggingBatch<B>;

    fn next(&mut self) -> Option<Self::Item> {
        use burn::data::dataloader::batcher::Batcher;

        let chunk = self.batches.get(self.next)?;
        self.next += 1;
        Some(self.batcher.batch(chunk))
    }
}
