use std::collections::BTreeMap;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::codec::field_text;
use crate::error::CodecError;
use crate::stroke::{Stroke, StrokeStyle};

/// Largest stroke index accepted in a row. Keeps the sparse view bounded.
pub const MAX_CURVE_INDEX: usize = 1 << 20;

/// What to do with a row that is not `index,static,x,y`.
///
/// Fields may carry surrounding whitespace or double quotes; anything else
/// around a number makes the row malformed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Skip the row and keep going
    #[default]
    Lenient,
    /// Fail the whole decode
    Strict,
}

/// Strokes rebuilt from a table, keyed by their stroke index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedStrokes {
    strokes: BTreeMap<usize, Stroke>,
    skipped_rows: usize,
}

impl DecodedStrokes {
    /// Number of distinct stroke indices
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Rows dropped under [`DecodePolicy::Lenient`]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn get(&self, curve_index: usize) -> Option<&Stroke> {
        self.strokes.get(&curve_index)
    }

    /// Index-as-position view: gaps in the stroke indices are `None`.
    pub fn to_sparse(&self) -> Vec<Option<Stroke>> {
        let len = self.strokes.keys().next_back().map_or(0, |last| last + 1);
        let mut sparse = vec![None; len];
        for (&index, stroke) in &self.strokes {
            sparse[index] = Some(stroke.clone());
        }
        sparse
    }

    /// Strokes in index order with the gaps closed
    pub fn into_dense(self) -> Vec<Stroke> {
        self.strokes.into_values().collect()
    }
}

/// Parses a stroke table. The first line is the header and is skipped.
///
/// Every new stroke index starts a stroke with `style`; points are appended
/// in row order.
pub fn decode_strokes(
    text: &str,
    style: &StrokeStyle,
    policy: DecodePolicy,
) -> Result<DecodedStrokes, CodecError> {
    let mut decoded = DecodedStrokes::default();

    for (line_index, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok((curve_index, point)) => {
                decoded
                    .strokes
                    .entry(curve_index)
                    .or_insert_with(|| Stroke::new(*style, Vec::new()))
                    .push(point);
            }
            Err(reason) => {
                let line = line_index + 1;
                match policy {
                    DecodePolicy::Strict => {
                        return Err(CodecError::MalformedRow { line, reason });
                    }
                    DecodePolicy::Lenient => {
                        log::warn!("Skipping row {}: {}", line, reason);
                        decoded.skipped_rows += 1;
                    }
                }
            }
        }
    }

    log::debug!(
        "Decoded {} strokes ({} rows skipped)",
        decoded.len(),
        decoded.skipped_rows
    );
    Ok(decoded)
}

fn parse_row(line: &str) -> Result<(usize, Pos2), String> {
    let fields: Vec<&str> = line.split(',').map(field_text).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let curve_index = parse_index(fields[0])?;
    let x = parse_coordinate(fields[2])?;
    let y = parse_coordinate(fields[3])?;
    Ok((curve_index, Pos2::new(x, y)))
}

// Some writers emit integral floats such as `3.0` for the index column
fn parse_index(field: &str) -> Result<usize, String> {
    let index = match field.parse::<usize>() {
        Ok(index) => index,
        Err(_) => match field.parse::<f64>() {
            Ok(value) if value >= 0.0 && value.fract() == 0.0 && value.is_finite() => {
                value as usize
            }
            _ => return Err(format!("invalid stroke index {:?}", field)),
        },
    };
    if index > MAX_CURVE_INDEX {
        return Err(format!("stroke index {} out of range", index));
    }
    Ok(index)
}

fn parse_coordinate(field: &str) -> Result<f32, String> {
    match field.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("invalid coordinate {:?}", field)),
    }
}
