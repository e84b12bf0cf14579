// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Files the loader writes besides its batches:
//
//   config_store.rs — LoaderConfig to and from JSON, so a run
//                     can be reproduced exactly
//
//   stats.rs        — Per-batch statistics (padding and OOV
//                     rates) appended to a CSV file
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Loader configuration persistence
pub mod config_store;

/// Batch statistics CSV logger
pub mod stats;
