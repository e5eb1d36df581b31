//! # Model File (`.tinybpe` / `.tinymodel`)
//!
//! ```text
//! tinybpe model
//! <merges_len>
//! <left_0> <right_0>
//! <left_1> <right_1>
//! ...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{TBResult, TinyBpeError};
use crate::types::{Pair, TokenId};

const MAGIC: &str = "tinybpe model";

/// Save `merges` to `<prefix>.tinybpe`.
pub fn save_model(
    prefix: &str,
    merges: &[Pair],
) -> TBResult<()> {
    let path = format!("{prefix}.tinybpe");
    log::info!("writing {} merges to {path}", merges.len());
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_model(&mut writer, merges)
}

/// Write the model format to an arbitrary writer.
pub fn write_model<W: Write>(
    writer: &mut W,
    merges: &[Pair],
) -> TBResult<()> {
    writeln!(writer, "{MAGIC}")?;
    writeln!(writer, "{}", merges.len())?;
    for &(left, right) in merges {
        writeln!(writer, "{left} {right}")?;
    }
    Ok(())
}

/// Load a merge list from `path`.
pub fn load_model<P: AsRef<Path>>(path: P) -> TBResult<Vec<Pair>> {
    let path = path.as_ref();
    log::info!("loading model from {}", path.display());
    let file = File::open(path)?;
    read_model(BufReader::new(file))
}

/// Read the model format from an arbitrary reader.
pub fn read_model<R: BufRead>(reader: R) -> TBResult<Vec<Pair>> {
    let mut lines = reader.lines();

    let magic = lines
        .next()
        .ok_or_else(|| TinyBpeError::InvalidModelFile("empty file".to_string()))??;
    if magic.trim_end() != MAGIC {
        return Err(TinyBpeError::InvalidModelFile(format!(
            "bad magic line: {magic:?}"
        )));
    }

    let count_line = lines
        .next()
        .ok_or_else(|| TinyBpeError::InvalidModelFile("missing merge count".to_string()))??;
    let count: usize = count_line.trim().parse().map_err(|_| {
        TinyBpeError::InvalidModelFile(format!("malformed merge count: {count_line:?}"))
    })?;

    let mut merges = Vec::with_capacity(count);
    for (position, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TinyBpeError::InvalidModelFile(format!(
                "malformed merge line {position}: {line:?}"
            )));
        };
        let left: TokenId = left.parse().map_err(|_| {
            TinyBpeError::InvalidModelFile(format!("malformed merge line {position}: {line:?}"))
        })?;
        let right: TokenId = right.parse().map_err(|_| {
            TinyBpeError::InvalidModelFile(format!("malformed merge line {position}: {line:?}"))
        })?;

        let limit = 256 + position as TokenId;
        if left >= limit || right >= limit {
            return Err(TinyBpeError::InvalidModelFile(format!(
                "merge {position} references out-of-range id ({left}, {right}); limit is {limit}"
            )));
        }
        merges.push((left, right));
    }

    if merges.len() != count {
        return Err(TinyBpeError::InvalidModelFile(format!(
            "declared {count} merges but found {}",
            merges.len()
        )));
    }

    Ok(merges)
}
