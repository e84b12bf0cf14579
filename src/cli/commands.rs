// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `inspect` and `lookup`, and all
// their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use tagline_loader::application::config::LoaderConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the pipeline and print the shape of every batch
    Inspect(InspectArgs),

    /// Print vocabulary ids for the given words
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Load every loader setting from a saved JSON config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Text files, one sentence per line
    #[arg(long, num_args = 1..)]
    pub texts: Vec<PathBuf>,

    /// Target files, one tag line per text line
    #[arg(long, num_args = 1..)]
    pub targets: Vec<PathBuf>,

    /// Word vocabulary file
    #[arg(long, default_value = "data/words.txt")]
    pub word_table: PathBuf,

    /// Tag vocabulary file
    #[arg(long, default_value = "data/tags.txt")]
    pub tag_table: PathBuf,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Keep file order instead of shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Shuffle buffer size (default: 239)
    #[arg(long)]
    pub buffer_size: Option<usize>,

    #[arg(long, default_value_t = 1997)]
    pub seed: u64,

    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    #[arg(long, default_value_t = 1)]
    pub prefetch: usize,

    #[arg(long, default_value_t = 1)]
    pub num_oov_buckets: usize,

    /// Lowercase text lines before lookup
    #[arg(long)]
    pub lowercase: bool,

    /// Drop a final batch smaller than batch size
    #[arg(long)]
    pub drop_remainder: bool,

    /// Number of passes over the data
    #[arg(long, default_value_t = 1)]
    pub passes: usize,

    /// Append per-batch statistics to this CSV file
    #[arg(long)]
    pub stats: Option<PathBuf>,

    /// Write the effective loader config to this JSON file
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

/// Convert CLI flags into the application-layer LoaderConfig.
/// The application layer never sees clap types.
impl From<&InspectArgs> for LoaderConfig {
    fn from(a: &InspectArgs) -> Self {
        LoaderConfig {
            texts:           a.texts.clone(),
            targets:         a.targets.clone(),
            word_table:      a.word_table.clone(),
            tag_table:       a.tag_table.clone(),
            batch_size:      a.batch_size,
            shuffle:         !a.no_shuffle,
            buffer_size:     a.buffer_size.or(LoaderConfig::default().buffer_size),
            seed:            a.seed,
            threads:         a.threads,
            prefetch:        a.prefetch,
            num_oov_buckets: a.num_oov_buckets,
            lowercase:       a.lowercase,
            drop_remainder:  a.drop_remainder,
            ..LoaderConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Vocabulary file, one entry per line
    #[arg(long)]
    pub vocab: PathBuf,

    #[arg(long, default_value_t = 1)]
    pub num_oov_buckets: usize,

    /// Words (or tags) to look up
    #[arg(required = true)]
    pub words: Vec<String>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn inspect_config(extra: &[&str]) -> LoaderConfig {
        let mut argv = vec!["tagline-loader", "inspect", "--texts", "a.txt", "--targets", "b.txt"];
        argv.extend_from_slice(extra);

        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Inspect(args) => LoaderConfig::from(&args),
            other => panic!("expected inspect, got {other:?}"),
        }
    }

    #[test]
    fn test_buffer_size_matches_library_default() {
        let cfg = inspect_config(&["--batch-size", "4"]);
        assert_eq!(cfg.resolved_buffer_size(), 239);
        assert_eq!(cfg.buffer_size, LoaderConfig::default().buffer_size);
    }

    #[test]
    fn test_explicit_buffer_size_wins() {
        let cfg = inspect_config(&["--buffer-size", "8"]);
        assert_eq!(cfg.resolved_buffer_size(), 8);
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cfg = inspect_config(&["--no-shuffle", "--seed", "7", "--drop-remainder"]);
        assert!(!cfg.shuffle);
        assert_eq!(cfg.seed, 7);
        assert!(cfg.drop_remainder);
        assert_eq!(cfg.texts, vec![PathBuf::from("a.txt")]);
    }
}
