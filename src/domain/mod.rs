// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that describe what the loader
// works with, independent of Burn and of the file system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One tokenised text line paired with its tag line
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
