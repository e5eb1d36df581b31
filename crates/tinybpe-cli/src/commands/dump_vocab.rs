//! # `dump-vocab` Subcommand

use tinybpe::io::{model_file, remap_file, vocab_file};
use tinybpe::special::SpecialTable;
use tinybpe::{MergeTable, Vocab};

use crate::commands::parse_specials;
use crate::logging::LogArgs;

/// Args for the `dump-vocab` subcommand.
#[derive(clap::Args, Debug)]
pub struct DumpVocabArgs {
    /// Path to a `.tinybpe` model file.
    #[arg(long)]
    model: String,

    /// Path to a `.remaps` byte-permutation file, if the model needs one.
    #[arg(long)]
    remap: Option<String>,

    /// Reserved special tokens, as repeated `literal=id` entries.
    #[arg(long = "special", value_name = "LITERAL=ID")]
    specials: Vec<String>,

    /// Prefix for the written `<prefix>.vocab` dump file.
    #[arg(long)]
    output_prefix: String,

    #[clap(flatten)]
    logging: LogArgs,
}

impl DumpVocabArgs {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let merges = model_file::load_model(&self.model)?;
        let merge_table = MergeTable::new(merges);

        let remap = self.remap.as_deref().map(remap_file::load_remap).transpose()?;
        let vocab = Vocab::build(&merge_table, remap.as_ref());

        let special = SpecialTable::new(parse_specials(&self.specials)?, merge_table.next_free_id())?;

        log::info!("writing vocab dump to {}.vocab", self.output_prefix);
        vocab_file::save_vocab(&self.output_prefix, &vocab, &special)?;
        Ok(())
    }
}
