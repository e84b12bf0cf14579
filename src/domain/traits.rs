// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline only needs two things from the outside world:
// a source of raw lines, and a way to turn a token into an id.
// Both are traits so tests can feed lines and vocabularies
// from memory instead of files.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

// ─── LineSource ───────────────────────────────────────────────────────────────
/// Any component that can produce the lines of a corpus.
///
/// Implementations:
///   - TextLineLoader → reads one or more plain-text files
///   - Vec<String>    → lines already in memory
pub trait LineSource {
    /// Load every line, in order, with line terminators removed.
    fn load_lines(&self) -> Result<Vec<String>>;
}

impl LineSource for Vec<String> {
    fn load_lines(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

// ─── TokenLookup ──────────────────────────────────────────────────────────────
/// Maps a token string to an integer id. Unknown tokens must still
/// map to a valid id (an out-of-vocabulary bucket), so lookup
/// never fails.
pub trait TokenLookup: Send + Sync {
    /// Id for `token`, in `0..self.size()`
    fn lookup(&self, token: &str) -> usize;

    /// Total id space, including out-of-vocabulary buckets
    fn size(&self) -> usize;
}
