//! CSV encoding for exported records.
//!
//! Output is UTF-8 with a byte-order mark, CRLF after every row (header
//! included), and a fixed column order. Rows are sorted oldest first
//! regardless of the order the records arrive in.

use crate::record::{COORDINATE_PRECISION, Record, round_coordinate};
use std::borrow::Cow;

/// UTF-8 byte-order mark, for spreadsheet tools that sniff the encoding.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Row terminator.
pub const LINE_ENDING: &str = "\r\n";

/// Header row columns, in output order.
pub const COLUMNS: [&str; 7] = [
    "id",
    "timestamp",
    "lat",
    "lon",
    "accuracy_m",
    "note",
    "photoName",
];

/// Encode records as CSV bytes.
///
/// The input order is irrelevant: rows are emitted oldest first, with the
/// record id breaking timestamp ties. Encoding the same set twice yields
/// byte-identical output.
#[must_use]
pub fn encode(records: &[Record]) -> Vec<u8> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| Record::chronological(a, b));

    let mut out = String::with_capacity(64 * (records.len() + 1));
    push_row(&mut out, COLUMNS.iter().map(|c| Cow::Borrowed(*c)));
    for record in sorted {
        push_row(&mut out, row(record).into_iter());
    }

    let mut bytes = Vec::with_capacity(BOM.len() + out.len());
    bytes.extend_from_slice(&BOM);
    bytes.extend_from_slice(out.as_bytes());
    bytes
}

fn row(record: &Record) -> [Cow<'_, str>; 7] {
    [
        Cow::Borrowed(record.id.as_str()),
        Cow::Owned(record.timestamp_string()),
        Cow::Owned(coordinate(record.latitude)),
        Cow::Owned(coordinate(record.longitude)),
        record
            .accuracy
            .map_or(Cow::Borrowed(""), |a| Cow::Owned(a.to_string())),
        Cow::Borrowed(record.note.as_str()),
        Cow::Borrowed(record.photo_name().unwrap_or_default()),
    ]
}

fn coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_PRECISION, round_coordinate(value))
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = Cow<'a, str>>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(&field));
    }
    out.push_str(LINE_ENDING);
}

/// Quote a field if and only if it contains a comma, a double quote or a
/// newline character; inner quotes are doubled.
#[must_use]
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;
    use proptest::prelude::*;

    /// Decode with the `csv` crate; row 0 is the header.
    fn parse(bytes: &[u8]) -> Vec<Vec<String>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let header = reader.headers().unwrap().iter().map(String::from).collect();
        let mut rows = vec![header];
        for record in reader.records() {
            rows.push(record.unwrap().iter().map(String::from).collect());
        }
        rows
    }

    #[test]
    fn test_escape_field_rules() {
        assert_eq!(escape_field("plain text"), "plain text");
        assert_eq!(escape_field("a,b\"c"), "\"a,b\"\"c\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(escape_field("cr\ronly"), "\"cr\ronly\"");
        assert_eq!(escape_field(""), "");
        assert!(matches!(escape_field("untouched"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bom_header_and_crlf() {
        let bytes = encode(&[]);
        assert_eq!(&bytes[..3], &BOM);
        assert_eq!(
            &bytes[3..],
            b"id,timestamp,lat,lon,accuracy_m,note,photoName\r\n"
        );
    }

    #[test]
    fn test_row_layout() {
        let mut record = sample_record("r1", "2024-05-01T09:30:05Z", Some(b"jpeg"));
        record.note = "a,b\"c".to_string();
        let bytes = encode(&[record]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        let row = text.split(LINE_ENDING).nth(1).unwrap();
        assert_eq!(
            row,
            "r1,2024-05-01T09:30:05Z,35.6812368,139.7671251,12,\"a,b\"\"c\",r1.jpg"
        );
        assert!(text.ends_with(LINE_ENDING));
    }

    #[test]
    fn test_null_accuracy_and_missing_photo_are_empty_fields() {
        let mut record = sample_record("r1", "2024-05-01T09:30:05Z", None);
        record.accuracy = None;
        let bytes = encode(&[record]);
        assert!(!String::from_utf8_lossy(&bytes).contains("null"));
        let rows = parse(&bytes);
        assert_eq!(rows[1][4], "");
        assert_eq!(rows[1][6], "");
    }

    #[test]
    fn test_rows_sorted_oldest_first() {
        let later = sample_record("later", "2024-01-01T10:00:00Z", None);
        let earlier = sample_record("earlier", "2024-01-01T09:00:00Z", None);
        let rows = parse(&encode(&[later, earlier]));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "earlier");
        assert_eq!(rows[2][0], "later");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let records = vec![
            sample_record("b", "2024-01-01T10:00:00Z", Some(b"x")),
            sample_record("a", "2024-01-01T10:00:00Z", None),
        ];
        let reversed: Vec<_> = records.iter().rev().cloned().collect();
        assert_eq!(encode(&records), encode(&records));
        assert_eq!(encode(&records), encode(&reversed));
    }

    #[test]
    fn test_negative_coordinates_keep_precision() {
        let mut record = sample_record("r1", "2024-01-01T10:00:00Z", None);
        record.latitude = -33.8688;
        record.longitude = -0.000_000_1;
        let rows = parse(&encode(&[record]));
        assert_eq!(rows[1][2], "-33.8688000");
        assert_eq!(rows[1][3], "-0.0000001");
    }

    #[test]
    fn test_special_notes_decode_exactly() {
        for note in ["a,b\"c", "x\ny", "cr\ronly", "\"", "", "crlf\r\nnote"] {
            let mut record = sample_record("r1", "2024-01-01T10:00:00Z", None);
            record.note = note.to_string();
            let rows = parse(&encode(&[record]));
            assert_eq!(rows[0], COLUMNS, "header for {note:?}");
            assert_eq!(rows.len(), 2, "{note:?}");
            assert_eq!(rows[1][5], note);
        }
    }

    #[test]
    fn test_near_zero_negative_coordinate_has_no_sign() {
        let mut record = sample_record("r1", "2024-01-01T00:00:00Z", None);
        record.latitude = -0.000_000_01;
        record.longitude = -0.0;
        let rows = parse(&encode(&[record]));
        assert_eq!(rows[1][2], "0.0000000");
        assert_eq!(rows[1][3], "0.0000000");
    }

    proptest! {
        #[test]
        fn prop_note_roundtrips_through_csv_reader(note in "[a-z ,\"\r\n\u{3042}-\u{3093}]{0,40}") {
            let mut record = sample_record("r1", "2024-01-01T10:00:00Z", None);
            record.note = note.clone();
            let rows = parse(&encode(&[record]));
            prop_assert_eq!(rows.len(), 2);
            prop_assert_eq!(rows[1].len(), COLUMNS.len());
            prop_assert_eq!(&rows[1][5], &note);
        }
    }
}
