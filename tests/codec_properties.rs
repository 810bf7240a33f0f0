use autosketch::codec::{self, DecodePolicy, Record};
use autosketch::{CodecError, Stroke, StrokeStyle};
use egui::{Color32, Pos2};

fn stroke(points: &[(f32, f32)]) -> Stroke {
    Stroke::new(
        StrokeStyle::new(Color32::RED, 3.0),
        points.iter().map(|&(x, y)| Pos2::new(x, y)).collect(),
    )
}

fn decode_style() -> StrokeStyle {
    StrokeStyle::new(Color32::WHITE, 1.0)
}

fn assert_close(a: Pos2, b: Pos2) {
    assert!(
        (a.x - b.x).abs() <= 0.0005 && (a.y - b.y).abs() <= 0.0005,
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn test_round_trip_identity() {
    let strokes = vec![
        stroke(&[(10.12345, 20.5), (11.0, 21.25), (12.9999, -3.0)]),
        stroke(&[(400.0, 300.0)]),
        stroke(&[(0.001, 0.002), (0.0, 0.0)]),
    ];

    let csv = codec::encode_strokes(&strokes).unwrap();
    let decoded = codec::decode_strokes(&csv, &decode_style(), DecodePolicy::Strict).unwrap();
    let restored = decoded.into_dense();

    assert_eq!(restored.len(), strokes.len());
    for (original, restored) in strokes.iter().zip(&restored) {
        assert_eq!(original.points().len(), restored.points().len());
        for (&a, &b) in original.points().iter().zip(restored.points()) {
            assert_close(a, b);
        }
        assert_eq!(restored.style(), decode_style());
    }
}

#[test]
fn test_round_trip_drops_empty_strokes() {
    let strokes = vec![stroke(&[(1.0, 1.0)]), stroke(&[]), stroke(&[(2.0, 2.0)])];

    let csv = codec::encode_strokes(&strokes).unwrap();
    let decoded = codec::decode_strokes(&csv, &decode_style(), DecodePolicy::Strict).unwrap();

    let sparse = decoded.to_sparse();
    assert_eq!(sparse.len(), 3);
    assert!(sparse[1].is_none());
    assert_eq!(decoded.into_dense().len(), 2);
}

#[test]
fn test_index_fidelity() {
    let strokes = vec![
        stroke(&[(0.0, 0.0), (1.0, 1.0)]),
        stroke(&[(5.0, 5.0)]),
        stroke(&[(7.0, 7.0), (8.0, 8.0), (9.0, 9.0)]),
    ];

    let records = codec::records(&strokes);
    let indices: Vec<usize> = records.iter().map(|r| r.curve_index).collect();
    assert_eq!(indices, vec![0, 0, 1, 2, 2, 2]);

    let csv = codec::encode_strokes(&strokes).unwrap();
    let decoded = codec::decode_strokes(&csv, &decode_style(), DecodePolicy::Strict).unwrap();
    for (index, original) in strokes.iter().enumerate() {
        assert_eq!(decoded.get(index).unwrap().points().len(), original.points().len());
    }
}

#[test]
fn test_point_order_preserved() {
    let points = [(3.0, 1.0), (1.0, 2.0), (2.0, 3.0)];
    let strokes = vec![stroke(&points)];

    let records = codec::records(&strokes);
    assert_eq!(
        records,
        points
            .iter()
            .map(|&(x, y)| Record {
                curve_index: 0,
                x,
                y
            })
            .collect::<Vec<_>>()
    );

    let csv = codec::encode_strokes(&strokes).unwrap();
    let decoded = codec::decode_strokes(&csv, &decode_style(), DecodePolicy::Strict).unwrap();
    let expected: Vec<Pos2> = points.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
    assert_eq!(decoded.get(0).unwrap().points(), expected.as_slice());
}

#[test]
fn test_empty_input_signals_nothing_to_export() {
    assert!(matches!(
        codec::encode_strokes(&[]),
        Err(CodecError::NothingToExport)
    ));
}

#[test]
fn test_precision_formatting() {
    let csv = codec::encode_strokes(&[stroke(&[(1.23456, -0.001)])]).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(row, "0,0.0000,1.235,-0.001");
}

#[test]
fn test_header_and_field_order() {
    let csv = codec::encode_strokes(&[stroke(&[(2.0, 4.0)]), stroke(&[(6.0, 8.0)])]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec!["curveIndex,static,x,y", "0,0.0000,2.000,4.000", "1,0.0000,6.000,8.000"]
    );
}

#[test]
fn test_sparse_index_decode() {
    let text = "curveIndex,static,x,y\n0,0.0000,1.0,2.0\n2,0.0000,3.0,4.0\n2,0.0000,5.0,6.0\n";
    let decoded = codec::decode_strokes(text, &decode_style(), DecodePolicy::Lenient).unwrap();

    let sparse = decoded.to_sparse();
    assert_eq!(sparse.len(), 3);
    assert_eq!(sparse[0].as_ref().unwrap().points(), &[Pos2::new(1.0, 2.0)]);
    assert!(sparse[1].is_none());
    assert_eq!(
        sparse[2].as_ref().unwrap().points(),
        &[Pos2::new(3.0, 4.0), Pos2::new(5.0, 6.0)]
    );
}

#[test]
fn test_decodes_service_output() {
    // Header and line endings as the auto-correct service writes them
    let text = "CurveIndex,Static,X,Y\r\n0,0.0000,10.0,10.0\r\n0,0.0000,12.5,10.0\r\n1,0.0000,50.0,60.0\r\n";
    let decoded = codec::decode_strokes(text, &decode_style(), DecodePolicy::Strict).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.skipped_rows(), 0);
}
