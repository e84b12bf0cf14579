//! Load text/tag line pairs from files into padded Burn tensor batches.
//!
//! ```ignore
//! let config   = LoaderConfig::new("train.txt", "train.tags", "words.txt", "tags.txt");
//! let loader   = DatasetLoader::new(config)?;
//! let pipeline = loader.call::<NdArray>(Default::default())?;
//! for batch in pipeline.iter() {
//!     // batch.tokens: [batch, max_len], batch.tags: [batch, max_len, num_tags]
//! }
//! ```

pub mod application;
pub mod data;
pub mod domain;
pub mod infra;

pub use application::{
    config::LoaderConfig,
    pipeline::{DatasetLoader, TaggingPipeline},
};
pub use data::batcher::TaggingBatch;
