//! Codificación CSV de conjuntos de registros
//!
//! Primera fila = nombres de campo, cada fila siguiente = un registro.
//! El escapado (delimitador, comillas, saltos de línea) lo resuelve `csv`.

use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::schema::{coerce, number_text, EntitySchema};
use super::Record;

/// Contenido decodificado de un fichero de entidad
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

/// Lee sólo la cabecera. `None` si el contenido está vacío.
pub fn read_header(contents: &[u8]) -> StoreResult<Option<Vec<String>>> {
    if contents.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents);
    let header = reader.headers()?.iter().map(str::to_string).collect();
    Ok(Some(header))
}

pub fn decode(contents: &[u8], schema: Option<&EntitySchema>) -> StoreResult<Table> {
    let header = match read_header(contents)? {
        Some(header) => header,
        None => return Ok(Table::default()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let mut record = Record::new();
        for (index, name) in header.iter().enumerate() {
            let field_type = schema.and_then(|s| s.field_type(name));
            let value = match row.get(index) {
                Some(raw) => coerce(raw, field_type),
                None => coerce("", field_type),
            };
            record.insert(name.clone(), value);
        }
        records.push(record);
    }

    Ok(Table { header, records })
}

/// Codifica filas en el orden de `header`; la cabecera sólo si `with_header`.
pub fn encode(header: &[String], records: &[Record], with_header: bool) -> StoreResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(header)?;
    }
    for record in records {
        let mut row = Vec::with_capacity(header.len());
        for name in header {
            row.push(render(record.get(name))?);
        }
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
}

fn render(value: Option<&Value>) -> StoreResult<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Number(n)) => Ok(number_text(n)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(StoreError::InvalidArgument(format!(
            "non-scalar field value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_encode_escapes_special_characters() {
        let header = vec!["id".to_string(), "Address".to_string()];
        let rows = vec![record(json!({"id": "1", "Address": "12 Main St, \"Flat 3\"\nBangkok"}))];

        let bytes = encode(&header, &rows, true).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("id,Address\n"));
        assert!(text.contains("\"12 Main St, \"\"Flat 3\"\"\nBangkok\""));

        let table = decode(&bytes, None).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0]["Address"], json!("12 Main St, \"Flat 3\"\nBangkok"));
    }

    #[test]
    fn test_decode_skips_blank_lines_and_pads_short_rows() {
        let contents = b"CarId,CarYear,Power\nC1,2020,150\n\nC2,2018\n";
        let table = decode(contents, None).unwrap();
        assert_eq!(table.header, vec!["CarId", "CarYear", "Power"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1]["CarYear"], json!(2018));
        assert_eq!(table.records[1]["Power"], json!(""));
    }

    #[test]
    fn test_read_header_of_empty_file() {
        assert!(read_header(b"").unwrap().is_none());
        assert!(read_header(b"\n").unwrap().is_none());
    }

    #[test]
    fn test_render_rejects_nested_values() {
        let header = vec!["id".to_string()];
        let rows = vec![record(json!({"id": ["a", "b"]}))];
        assert!(matches!(
            encode(&header, &rows, false),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_whole_floats_written_as_integers() {
        let header = vec!["DrivingExperience".to_string()];
        let rows = vec![record(json!({"DrivingExperience": 5.0}))];
        let bytes = encode(&header, &rows, false).unwrap();
        assert_eq!(bytes, b"5\n");
    }
}
