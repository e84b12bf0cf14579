// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates everything else to the library.
//
//   1. `inspect` — builds the pipeline and prints batch shapes
//   2. `lookup`  — prints vocabulary ids for some words
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use burn::backend::NdArray;
use clap::Parser;
use commands::{Commands, InspectArgs, LookupArgs};

use tagline_loader::{
    application::{config::LoaderConfig, pipeline::DatasetLoader},
    data::vocab::VocabTable,
    infra::{
        config_store::ConfigStore,
        stats::{BatchStats, BatchStatsLogger},
    },
};

#[derive(Parser, Debug)]
#[command(
    name = "tagline-loader",
    version,
    about = "Load text/tag line pairs into padded tensor batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => run_inspect(args),
            Commands::Lookup(args)  => run_lookup(args),
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigStore::new(path).load()?,
        None => LoaderConfig::from(&args),
    };

    if let Some(path) = &args.save_config {
        ConfigStore::new(path).save(&config)?;
        tracing::info!("Wrote loader config to '{}'", path.display());
    }

    let loader   = DatasetLoader::new(config)?;
    let pipeline = loader.call::<NdArray>(Default::default())?;
    let logger   = args.stats.as_ref().map(BatchStatsLogger::new).transpose()?;

    println!(
        "{} samples → {} batches per pass ({} word ids, {} tag ids)",
        pipeline.num_samples(),
        pipeline.num_batches(),
        loader.word_table().size(),
        pipeline.num_tags(),
    );

    for pass in 1..=args.passes {
        for (i, batch) in pipeline.iter().enumerate() {
            let stats = BatchStats::measure(i + 1, &batch, loader.word_table())?;
            println!(
                "pass {pass} batch {:>4} | tokens {:?} | tags {:?} | padding {:.1}% | oov {:.1}%",
                stats.batch,
                batch.tokens.dims(),
                batch.tags.dims(),
                stats.padding * 100.0,
                stats.oov * 100.0,
            );
            if let Some(logger) = &logger {
                logger.log(&stats)?;
            }
        }
    }

    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<()> {
    let table = VocabTable::from_file(&args.vocab, args.num_oov_buckets)?;
    for word in &args.words {
        let id  = table.lookup(word);
        let tag = if table.is_oov(id) { " (oov)" } else { "" };
        println!("{word}\t{id}{tag}");
    }
    Ok(())
}
