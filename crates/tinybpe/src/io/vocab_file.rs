//! # Vocab Dump File (`.vocab`)
//!
//! Human-readable, write-only. One `<id>: <byte-repr>` line per entry, with
//! a two-line header matching the model file's header shape. Never parsed
//! back: `<byte-repr>` is an ASCII-escaped literal, printable ASCII passes
//! through and everything else renders as `\xHH`.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::errors::TBResult;
use crate::special::SpecialTable;
use crate::vocab::Vocab;

const MAGIC: &str = "tinybpe vocab";

/// Render `bytes` as an ASCII-escaped literal.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out
}

/// Write the human-readable vocab dump to `<prefix>.vocab`.
pub fn save_vocab(
    prefix: &str,
    vocab: &Vocab,
    special: &SpecialTable,
) -> TBResult<()> {
    let path = format!("{prefix}.vocab");
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vocab(&mut writer, vocab, special)
}

/// Write the vocab dump format to an arbitrary writer.
pub fn write_vocab<W: Write>(
    writer: &mut W,
    vocab: &Vocab,
    special: &SpecialTable,
) -> TBResult<()> {
    writeln!(writer, "{MAGIC}")?;
    writeln!(writer, "{}", vocab.len() + special.len())?;

    for id in 0..vocab.len() as u32 {
        let bytes = vocab.get(id).expect("id within vocab.len() range");
        writeln!(writer, "{id}: {}", escape_bytes(bytes))?;
    }

    for id in special.ids() {
        let bytes = special.bytes_of(id).expect("id came from special table");
        writeln!(writer, "{id}: {}", escape_bytes(bytes))?;
    }

    Ok(())
}
