//! # Byte-Remap File (`.remaps` / `.map`)
//!
//! ```text
//! tinybpe remaps
//! <p_0>
//! <p_1>
//! ...
//! <p_255>
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::byte_remap::ByteRemap;
use crate::errors::{TBResult, TinyBpeError};

const MAGIC: &str = "tinybpe remaps";

/// Save `remap` to `<prefix>.remaps`.
pub fn save_remap(
    prefix: &str,
    remap: &ByteRemap,
) -> TBResult<()> {
    let path = format!("{prefix}.remaps");
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_remap(&mut writer, remap)
}

/// Write the remap format to an arbitrary writer.
pub fn write_remap<W: Write>(
    writer: &mut W,
    remap: &ByteRemap,
) -> TBResult<()> {
    writeln!(writer, "{MAGIC}")?;
    for &p in remap.forward_table() {
        writeln!(writer, "{p}")?;
    }
    Ok(())
}

/// Load a byte remap from `path`.
pub fn load_remap<P: AsRef<Path>>(path: P) -> TBResult<ByteRemap> {
    let file = File::open(path)?;
    read_remap(BufReader::new(file))
}

/// Read the remap format from an arbitrary reader.
pub fn read_remap<R: BufRead>(reader: R) -> TBResult<ByteRemap> {
    let mut lines = reader.lines();

    let magic = lines
        .next()
        .ok_or_else(|| TinyBpeError::InvalidRemap("empty file".to_string()))??;
    if magic.trim_end() != MAGIC {
        return Err(TinyBpeError::InvalidRemap(format!(
            "bad magic line: {magic:?}"
        )));
    }

    let mut entries = Vec::with_capacity(256);
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: u32 = line
            .parse()
            .map_err(|_| TinyBpeError::InvalidRemap(format!("malformed entry: {line:?}")))?;
        entries.push(value);
    }

    ByteRemap::from_entries(&entries)
}
