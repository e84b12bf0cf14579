// ============================================================
// Layer 4 — Line Preprocessor
// ============================================================
// Cleans a single text or target line and splits it into
// whitespace-separated tokens ready for vocabulary lookup.
//
// Why clean before splitting?
//   Corpus files often carry stray characters that would
//   otherwise glue two tokens together or create a token
//   that no vocabulary contains:
//   - Tabs between a word and its neighbour
//   - Non-breaking spaces (U+00A0) from word processors
//   - Zero-width spaces (U+200B) and byte order marks
//   - A trailing \r from Windows line endings
//
// Cleaning steps (applied in order):
//   1. Replace whitespace variants and control chars with a space
//   2. Optionally lowercase
//   3. Collapse runs of spaces and trim both ends
//
// Tokenisation is a plain whitespace split. Anything smarter
// belongs in the corpus, not in the loader.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    /// Lowercase every line before splitting
    lowercase: bool,
}

impl Preprocessor {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }

    /// Clean one line. Takes a &str and returns an owned String.
    pub fn clean(&self, line: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let normalised: String = line
            .chars()
            .map(|c| match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // ── Step 2: Optional lowercasing ──────────────────────────────────────
        let cased = if self.lowercase {
            normalised.to_lowercase()
        } else {
            normalised
        };

        // ── Step 3: Collapse spaces and trim ──────────────────────────────────
        cased.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Clean a line and split it into tokens
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        self.clean(line)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
