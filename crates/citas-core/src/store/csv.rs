//! CSV codec: header row, then one row per record.
//!
//! Rows are zipped positionally against the header. Short rows are padded
//! with empty strings and long rows are truncated.

use ::csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use super::{Decoded, StoreResult};
use crate::models::{is_internal_field, Record};

const BOM: &[u8] = b"\xef\xbb\xbf";

pub(super) fn decode(bytes: &[u8]) -> Decoded {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for row in reader.records() {
        match row {
            Ok(row) if is_blank(&row) => {}
            Ok(row) => rows.push(row),
            Err(e) => {
                return Decoded::Corrupted {
                    reason: format!("invalid CSV: {e}"),
                }
            }
        }
    }

    let mut rows = rows.into_iter();
    let header: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|name| name.trim().to_string()).collect(),
        None => return Decoded::Records(Vec::new()),
    };

    Decoded::Records(rows.map(|row| zip_row(&header, &row)).collect())
}

pub(super) fn encode(records: &[Record], fields: &[&str]) -> StoreResult<Vec<u8>> {
    let header = header_for(records, fields);
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|field| record.get(field)))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Canonical fields first, then extra persisted fields in first-seen order.
fn header_for(records: &[Record], fields: &[&str]) -> Vec<String> {
    let mut header: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    for record in records {
        for name in record.field_names() {
            if !is_internal_field(name) && !header.iter().any(|h| h == name) {
                header.push(name.to_string());
            }
        }
    }
    header
}

fn zip_row(header: &[String], row: &StringRecord) -> Record {
    header
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(i, name)| (name.clone(), row.get(i).unwrap_or_default().to_string()))
        .collect()
}

/// A line with nothing but whitespace.
fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::APPOINTMENT_FIELDS;

    fn records(text: &str) -> Vec<Record> {
        decode(text.as_bytes()).into_records()
    }

    #[test]
    fn test_decode_pads_and_truncates() {
        let rows = records("id,fecha,hora\n1,2025-10-30\n2,2025-10-31,09:00,extra\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("hora"), "");
        assert!(rows[0].contains("hora"));
        assert_eq!(rows[1].get("hora"), "09:00");
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_decode_skips_blank_lines_and_bom() {
        let rows = records("\u{feff}id, fecha\r\n\r\n1,2025-10-30\r\n   \n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("fecha"), "2025-10-30");
    }

    #[test]
    fn test_decode_quoted_fields() {
        let rows = records("id,motivo\n1,\"Dolor, fiebre\"\n2,\"Dice \"\"ya\"\"\"\n3,\"dos\nlíneas\"\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("motivo"), "Dolor, fiebre");
        assert_eq!(rows[1].get("motivo"), "Dice \"ya\"");
        assert_eq!(rows[2].get("motivo"), "dos\nlíneas");
    }

    #[test]
    fn test_decode_empty_and_invalid() {
        assert_eq!(decode(b""), Decoded::Records(Vec::new()));
        assert!(records("id,fecha\n").is_empty());
        assert!(decode(&[0x69, 0x64, 0xff, 0xfe]).is_corrupted());
    }

    #[test]
    fn test_encode_uses_canonical_order_then_extras() {
        let record = Record::from([
            ("estado", "Pendiente"),
            ("id", "1"),
            ("sala", "B"),
            ("_source", "json"),
        ]);
        let text = String::from_utf8(encode(&[record], APPOINTMENT_FIELDS).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "id,documento_paciente,documento_medico,fecha,hora,motivo,estado,sala"
        );
        assert_eq!(lines[1], "1,,,,,,Pendiente,B");
    }

    #[test]
    fn test_encode_quotes_only_when_needed() {
        let records = vec![
            Record::from([("id", "1"), ("motivo", "simple")]),
            Record::from([("id", "2"), ("motivo", "with,comma")]),
            Record::from([("id", "3"), ("motivo", "with\"quote")]),
            Record::from([("id", "4"), ("motivo", "two\nlines")]),
        ];
        let text = String::from_utf8(encode(&records, &["id", "motivo"]).unwrap()).unwrap();

        assert_eq!(
            text,
            "id,motivo\n1,simple\n2,\"with,comma\"\n3,\"with\"\"quote\"\n4,\"two\nlines\"\n"
        );
        assert_eq!(decode(text.as_bytes()).into_records(), records);
    }

    #[test]
    fn test_decode_unterminated_quote_keeps_rest() {
        let rows = records("id,motivo\n1,\"sin cierre\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("motivo"), "sin cierre\n");
    }
}
