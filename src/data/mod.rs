// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw line files all the
// way to padded tensor batches.
//
// The pipeline flows in this order:
//
//   texts.txt            targets.txt
//       │                    │
//       ▼                    ▼
//   TextLineLoader       TextLineLoader   → reads lines from files
//       │                    │
//       ▼                    ▼
//   TextMapper           TargetMapper     → tokens → vocabulary ids
//       │                    │
//       └────────┬───────────┘
//                ▼
//           ZipDataset                    → (tokens, tags) pairs
//                │
//                ▼
//      BufferedShuffleDataset             → seeded buffer shuffle
//                │
//                ▼
//         TaggingBatcher                  → pads and stacks tensors
//                │
//                ▼
//           Prefetcher                    → prepares batches ahead
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads line files into memory
pub mod loader;

/// Cleans and splits single lines into tokens
pub mod preprocessor;

/// Static vocabulary tables with out-of-vocabulary buckets
pub mod vocab;

/// Burn mappers from lines to vocabulary ids
pub mod mapper;

/// Line datasets and the text/target zip
pub mod dataset;

/// Seeded shuffle-buffer reordering
pub mod shuffle;

/// Implements Burn's Batcher trait to create padded tensor batches
pub mod batcher;

/// Background batch preparation with a bounded queue
pub mod prefetch;
