// ============================================================
// Layer 2 — Application
// ============================================================
// Wires the data layer together from a single configuration.
//
// Rules for this layer:
//   - No tensor code here (that's the batcher in Layer 4)
//   - No printing (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// Loader settings and their defaults
pub mod config;

// The dataset loader and the batch pipeline it builds
pub mod pipeline;
