//! CSV exchange format for strokes.
//!
//! One row per point, tagged with the position of its stroke:
//!
//! ```text
//! curveIndex,static,x,y
//! 0,0.0000,12.000,40.500
//! 0,0.0000,13.250,41.000
//! 1,0.0000,80.000,10.000
//! ```
//!
//! The `static` column carries no meaning but is kept positionally.

mod decode;
mod encode;

pub use decode::{DecodePolicy, DecodedStrokes, decode_strokes};
pub use encode::{encode_strokes, records};

/// Header row written on encode
pub const HEADER: [&str; 4] = ["curveIndex", "static", "x", "y"];

/// Value of the placeholder column
pub const STATIC_FIELD: &str = "0.0000";

/// One flattened point of a stroke
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub curve_index: usize,
    pub x: f32,
    pub y: f32,
}

impl Record {
    /// Formats the record as a CSV row, coordinates to 3 decimals
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{:.3},{:.3}",
            self.curve_index, STATIC_FIELD, self.x, self.y
        )
    }
}

/// Whether `line` names the four stroke-table columns, ignoring case.
///
/// The service answers with `CurveIndex,Static,X,Y`.
pub fn is_header(line: &str) -> bool {
    let fields: Vec<&str> = line.trim().split(',').map(field_text).collect();
    fields.len() == HEADER.len()
        && fields
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.eq_ignore_ascii_case(name))
}

/// A field without surrounding whitespace or one pair of double quotes.
/// Quotes are never needed for numbers, but CSV writers may add them.
pub(crate) fn field_text(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map_or(field, str::trim)
}
