use super::{HEADER, Record};
use crate::error::CodecError;
use crate::stroke::Stroke;

/// Flattens strokes into records, one per point.
///
/// Strokes without points produce nothing, so their index is absent
/// from the output.
pub fn records(strokes: &[Stroke]) -> Vec<Record> {
    strokes
        .iter()
        .enumerate()
        .flat_map(|(curve_index, stroke)| {
            stroke.points().iter().map(move |point| Record {
                curve_index,
                x: point.x,
                y: point.y,
            })
        })
        .collect()
}

/// Encodes strokes as a CSV table with a header row.
pub fn encode_strokes(strokes: &[Stroke]) -> Result<String, CodecError> {
    let records = records(strokes);
    if records.is_empty() {
        return Err(CodecError::NothingToExport);
    }

    let mut csv = HEADER.join(",");
    for record in &records {
        csv.push('\n');
        csv.push_str(&record.to_row());
    }
    log::debug!(
        "Encoded {} strokes into {} records",
        strokes.len(),
        records.len()
    );
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use egui::Pos2;

    fn stroke(points: &[(f32, f32)]) -> Stroke {
        Stroke::new(
            StrokeStyle::default(),
            points.iter().map(|&(x, y)| Pos2::new(x, y)).collect(),
        )
    }

    #[test]
    fn test_precision_formatting() {
        let csv = encode_strokes(&[stroke(&[(1.23456, -0.001)])]).unwrap();
        assert_eq!(csv, "curveIndex,static,x,y\n0,0.0000,1.235,-0.001");
    }

    #[test]
    fn test_empty_strokes_keep_their_slot() {
        let strokes = [stroke(&[(0.0, 0.0)]), stroke(&[]), stroke(&[(5.0, 5.0)])];
        let indices: Vec<usize> = records(&strokes).iter().map(|r| r.curve_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_nothing_to_export() {
        assert!(matches!(
            encode_strokes(&[]),
            Err(CodecError::NothingToExport)
        ));
        assert!(matches!(
            encode_strokes(&[stroke(&[]), stroke(&[])]),
            Err(CodecError::NothingToExport)
        ));
    }
}
