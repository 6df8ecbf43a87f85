//! Work file codec.
//!
//! Each painted tile is stored as a quad: four `v` vertex lines carrying the
//! tile color, followed by two `i` index lines forming the two triangles.
//!
//! ```text
//! v 0 0 255 0 0
//! v 50 0 255 0 0
//! v 0 50 255 0 0
//! v 50 50 255 0 0
//! i 0 1 2
//! i 1 2 3
//! ```
//!
//! Only the first vertex of a quad carries information: the other corners
//! follow from the tile edge length. Decoding therefore reads the first `v`
//! line of a block and skips the next three lines without looking at them.
//! Index lines and anything else that does not start with `v` are ignored.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::cell::Cell;
use crate::color::Color;
use crate::tile_store::TileStore;

/// Integer fields after the `v` marker: `x y r g b`.
const RECORD_FIELDS: usize = 5;

/// Redundant corner vertices following the first vertex of a quad.
const SKIPPED_CORNERS: usize = 3;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: malformed tile record: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: file ends before the tile record is complete")]
    Truncated { line: usize },
    #[error("failed to read work file: {0}")]
    Io(#[from] io::Error),
}

/// Parse a work file into a tile store.
///
/// Lines are read as raw bytes. Only the `v` line of a block is decoded as
/// text, so ignored and skipped lines may hold arbitrary bytes.
pub fn decode<R: BufRead>(mut reader: R) -> Result<TileStore, FormatError> {
    let mut store = TileStore::new();
    let mut line = Vec::new();
    let mut line_no = 0;

    while next_line(&mut reader, &mut line)? {
        line_no += 1;

        if !line.starts_with(b"v") {
            continue;
        }

        let text = std::str::from_utf8(&line)
            .map_err(|_| malformed(line_no, "tile record is not valid UTF-8"))?;
        let (cell, color) = parse_record(text, line_no)?;
        store.insert(cell, color);

        let record_line = line_no;
        for _ in 0..SKIPPED_CORNERS {
            if !next_line(&mut reader, &mut line)? {
                return Err(FormatError::Truncated { line: record_line });
            }
            line_no += 1;
        }
    }

    Ok(store)
}

/// Read one line into `buf` without its terminator. `false` at end of input.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

pub fn decode_str(input: &str) -> Result<TileStore, FormatError> {
    decode(input.as_bytes())
}

/// Write every tile of `store` as a six line quad block, in store order.
pub fn encode<W: Write>(mut writer: W, store: &TileStore) -> io::Result<()> {
    for (i, (cell, color)) in store.iter().enumerate() {
        let Color { r, g, b } = color;
        for (x, y) in cell.corners() {
            writeln!(writer, "v {x} {y} {r} {g} {b}")?;
        }

        let base = 4 * i;
        writeln!(writer, "i {} {} {}", base, base + 1, base + 2)?;
        writeln!(writer, "i {} {} {}", base + 1, base + 2, base + 3)?;
    }
    Ok(())
}

pub fn encode_to_string(store: &TileStore) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = encode(&mut out, store);
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_record(line: &str, line_no: usize) -> Result<(Cell, Color), FormatError> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("v") {
        return Err(malformed(line_no, "expected a `v` record marker"));
    }

    let fields: Vec<&str> = tokens.collect();
    if fields.len() != RECORD_FIELDS {
        return Err(malformed(
            line_no,
            format!(
                "expected {} integer fields, found {}",
                RECORD_FIELDS,
                fields.len()
            ),
        ));
    }

    let x = parse_field::<i32>(fields[0], "x", line_no)?;
    let y = parse_field::<i32>(fields[1], "y", line_no)?;
    let r = parse_field::<i64>(fields[2], "r", line_no)?;
    let g = parse_field::<i64>(fields[3], "g", line_no)?;
    let b = parse_field::<i64>(fields[4], "b", line_no)?;

    Ok((Cell::new(x, y), Color::from_channels(r, g, b)))
}

fn parse_field<T: std::str::FromStr>(
    token: &str,
    name: &str,
    line_no: usize,
) -> Result<T, FormatError> {
    token.parse().map_err(|_| {
        malformed(
            line_no,
            format!("field `{}` is not a valid integer: {:?}", name, token),
        )
    })
}

fn malformed(line: usize, reason: impl Into<String>) -> FormatError {
    FormatError::Malformed {
        line,
        reason: reason.into(),
    }
}
