// ============================================================
// Layer 5 — Batch Statistics Logger
// ============================================================
// Records one CSV row per batch so padding overhead and OOV
// rates can be checked before committing to a long run.
//
// Columns:
//   batch:        batch number within the pass (starts at 1)
//   size:         rows in the batch
//   token_width:  padded token length
//   tag_width:    padded tag length
//   padding:      fraction of token cells that are padding
//   oov:          fraction of real tokens that hit an OOV bucket
//
// Example CSV output:
//   batch,size,token_width,tag_width,padding,oov
//   1,16,41,41,0.382622,0.021000
//   2,16,37,37,0.350000,0.015700
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use burn::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::data::{batcher::TaggingBatch, vocab::VocabTable};

/// Summary of one padded batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub batch:       usize,
    pub size:        usize,
    pub token_width: usize,
    pub tag_width:   usize,
    pub padding:     f64,
    pub oov:         f64,
}

impl BatchStats {
    /// Measure `batch`. OOV ids are judged against `words`.
    pub fn measure<B: Backend>(index: usize, batch: &TaggingBatch<B>, words: &VocabTable) -> Result<Self> {
        let [size, token_width] = batch.tokens.dims();
        let [_, tag_width]      = batch.tag_ids.dims();

        let cells     = size * token_width;
        let real: usize = batch.lengths.iter().sum();

        let ids = batch
            .tokens
            .clone()
            .into_data()
            .convert::<i64>()
            .to_vec::<i64>()
            .map_err(|e| anyhow::anyhow!("Cannot read token ids: {e:?}"))?;

        // Only count positions inside each row's real length
        let oov_hits = ids
            .chunks(token_width)
            .zip(&batch.lengths)
            .flat_map(|(row, &len)| &row[..len])
            .filter(|&&id| words.is_oov(id as usize))
            .count();

        Ok(Self {
            batch: index,
            size,
            token_width,
            tag_width,
            padding: ratio(cells - real, cells),
            oov:     ratio(oov_hits, real),
        })
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Appends batch statistics to a CSV file.
pub struct BatchStatsLogger {
    csv_path: PathBuf,
}

impl BatchStatsLogger {
    /// Create the logger, writing the CSV header if the file is new.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "batch,size,token_width,tag_width,padding,oov")?;
            tracing::debug!("Created batch stats CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, s: &BatchStats) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{},{},{},{:.6},{:.6}",
            s.batch, s.size, s.token_width, s.tag_width, s.padding, s.oov,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
