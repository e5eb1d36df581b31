//! # `train` Subcommand

use std::io::BufRead;

use tinybpe::training::BpeTrainer;

use crate::logging::LogArgs;

/// Args for the `train` subcommand.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input files, one training sample per line. Reads stdin if empty.
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Target vocab size, including the 256 byte ids.
    #[arg(long, default_value = "512")]
    vocab_size: usize,

    /// Prefix for the written `<prefix>.tinybpe` model file.
    #[arg(long)]
    output_prefix: String,
}

impl TrainArgs {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let corpus = self.read_corpus()?;
        log::info!("training on {} samples", corpus.len());

        let mut trainer = BpeTrainer::new(corpus);
        let target_merges = self.vocab_size.saturating_sub(tinybpe::BYTE_RANGE as usize);

        while trainer.merges_size() < target_merges {
            if trainer.step().is_none() {
                log::info!("corpus exhausted after {} merges", trainer.merges_size());
                break;
            }
        }

        trainer.save(&self.output_prefix)?;
        Ok(())
    }

    fn read_corpus(&self) -> Result<Vec<Vec<u8>>, Box<dyn std::error::Error>> {
        let mut corpus = Vec::new();
        if self.files.is_empty() {
            for line in std::io::stdin().lock().lines() {
                corpus.push(line?.into_bytes());
            }
            return Ok(corpus);
        }
        for path in &self.files {
            log::info!("reading {path}");
            let file = std::fs::File::open(path)?;
            for line in std::io::BufReader::new(file).lines() {
                corpus.push(line?.into_bytes());
            }
        }
        Ok(corpus)
    }
}
