//! # Subcommands

pub mod decode;
pub mod dump_vocab;
pub mod encode;
pub mod train;

use decode::DecodeArgs;
use dump_vocab::DumpVocabArgs;
use encode::EncodeArgs;
use train::TrainArgs;

/// Subcommands for `tinybpe-cli`.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a BPE model from one or more line-oriented text files.
    Train(TrainArgs),

    /// Encode text through a trained model.
    Encode(EncodeArgs),

    /// Decode a sequence of token ids through a trained model.
    Decode(DecodeArgs),

    /// Write the human-readable vocab dump for a trained model.
    DumpVocab(DumpVocabArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::DumpVocab(cmd) => cmd.run(),
        }
    }
}

/// Parse `--special literal=id` entries shared by the encode/decode/
/// dump-vocab subcommands.
pub fn parse_specials(values: &[String]) -> Result<Vec<(Vec<u8>, u32)>, Box<dyn std::error::Error>> {
    let mut parsed = Vec::with_capacity(values.len());
    for entry in values {
        let (literal, id) = entry
            .split_once('=')
            .ok_or_else(|| format!("malformed --special entry (want literal=id): {entry}"))?;
        let id: u32 = id
            .parse()
            .map_err(|_| format!("malformed --special id: {entry}"))?;
        parsed.push((literal.as_bytes().to_vec(), id));
    }
    Ok(parsed)
}
