//! # `encode` Subcommand

use std::io::Read;

use tinybpe::io::{model_file, remap_file};
use tinybpe::TokenizerBuilder;

use crate::commands::parse_specials;
use crate::input_output::InputArgs;
use crate::logging::LogArgs;

/// Args for the `encode` subcommand.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    /// Path to a `.tinybpe` model file.
    #[arg(long)]
    model: String,

    /// Path to a `.remaps` byte-permutation file, if the model needs one.
    #[arg(long)]
    remap: Option<String>,

    /// Reserved special tokens, as repeated `literal=id` entries.
    #[arg(long = "special", value_name = "LITERAL=ID")]
    specials: Vec<String>,

    /// Text to encode. Reads the input file/stdin if omitted.
    text: Option<String>,

    #[clap(flatten)]
    input: InputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl EncodeArgs {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let merges = model_file::load_model(&self.model)?;
        let mut builder = TokenizerBuilder::new(merges);
        if let Some(remap_path) = &self.remap {
            builder = builder.with_byte_remap(remap_file::load_remap(remap_path)?);
        }
        for (literal, id) in parse_specials(&self.specials)? {
            builder = builder.with_special(literal, id);
        }
        let tokenizer = builder.build()?;

        let text = match &self.text {
            Some(t) => t.clone(),
            None => {
                let mut buf = String::new();
                self.input.open_reader()?.read_to_string(&mut buf)?;
                buf
            }
        };

        let ids = tokenizer.encode(&text)?;
        let rendered: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        println!("{}", rendered.join(" "));
        Ok(())
    }
}
