use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::TenderRecord;
use crate::utils::sanitize_path_component;
use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// UTF-8 byte order mark. Spreadsheet tools on Windows need it to detect
/// the encoding of the exported CSV.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the records to `<output_dir>/<region>/<keyword>/export_<timestamp>.csv`
/// (plus a JSON dump next to it when configured), creating directories as
/// needed. Returns the CSV path.
pub fn save_records(
    config: &ResolvedConfig,
    region_label: &str,
    keyword: &str,
    records: &[TenderRecord],
) -> AppResult<PathBuf> {
    let dir = export_dir(&config.output_dir, region_label, keyword);
    fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let csv_path = dir.join(format!("export_{timestamp}.csv"));
    write_csv(&csv_path, records, config.csv_delimiter)?;
    info!(path = %csv_path.display(), records = records.len(), "CSV saved");

    if config.json_dump {
        let json_path = dir.join(format!("export_{timestamp}.json"));
        write_json(&json_path, records)?;
        info!(path = %json_path.display(), "JSON dump saved");
    }

    Ok(csv_path)
}

/// Builds the export directory for a run, sanitizing both path components.
pub fn export_dir(root: &Path, region_label: &str, keyword: &str) -> PathBuf {
    root.join(sanitize_path_component(&region_label.to_lowercase()))
        .join(sanitize_path_component(keyword))
}

/// Writes records as delimited text, UTF-8 with BOM.
///
/// The `region` column appears if and only if at least one record carries a
/// region; field order matches the declared header order. A non-ASCII
/// delimiter is rejected, since the writer works on single bytes.
pub fn write_csv(path: &Path, records: &[TenderRecord], delimiter: char) -> AppResult<()> {
    if !delimiter.is_ascii() {
        return Err(AppError::InvalidInput(format!(
            "CSV delimiter must be a single ASCII character, got '{delimiter}'"
        )));
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .from_writer(file);

    let include_region = records.iter().any(|r| r.region.is_some());

    let mut header = vec!["url"];
    if include_region {
        header.push("region");
    }
    header.extend([
        "valor_estimado",
        "adjudicatario",
        "fecha_publicacion",
        "hora_publicacion",
    ]);
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.url.as_str()];
        if include_region {
            row.push(record.region.as_deref().unwrap_or(""));
        }
        row.extend([
            record.valor_estimado.as_str(),
            record.adjudicatario.as_str(),
            record.fecha_publicacion.as_str(),
            record.hora_publicacion.as_str(),
        ]);
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Pretty-printed UTF-8 JSON dump of the records.
pub fn write_json(path: &Path, records: &[TenderRecord]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TenderRecord;
    use std::path::PathBuf;

    fn record(url: &str, region: Option<&str>) -> TenderRecord {
        let mut r = TenderRecord::new(url.to_string(), region.map(str::to_string));
        r.valor_estimado = "1.234,56".to_string();
        r.adjudicatario = "ACME S.L.".to_string();
        r.fecha_publicacion = "04/06/2024".to_string();
        r.hora_publicacion = "12:05:21".to_string();
        r
    }

    #[test]
    fn export_dir_lowercases_and_sanitizes() {
        let dir = export_dir(&PathBuf::from("data/export"), "Sur", "obra civil");
        assert_eq!(dir, PathBuf::from("data/export/sur/obra_civil"));
    }

    #[test]
    fn csv_starts_with_bom_and_uses_delimiter() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_csv(&path, &[record("https://x/1", None)], ';').unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "url;valor_estimado;adjudicatario;fecha_publicacion;hora_publicacion"
        );
        assert_eq!(
            lines.next().unwrap(),
            "https://x/1;1.234,56;ACME S.L.;04/06/2024;12:05:21"
        );
    }

    #[test]
    fn region_column_present_iff_any_record_has_region() {
        let tmp = tempfile::tempdir().unwrap();

        let without = tmp.path().join("without.csv");
        write_csv(&without, &[record("https://x/1", None)], ';').unwrap();
        let text = std::fs::read_to_string(&without).unwrap();
        assert!(!text.contains("region"));

        let with = tmp.path().join("with.csv");
        write_csv(
            &with,
            &[record("https://x/1", None), record("https://x/2", Some("Sur"))],
            ';',
        )
        .unwrap();
        let text = std::fs::read_to_string(&with).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("\u{feff}url;region;"));
        // The record without a region gets an empty cell in that column.
        assert!(text.contains("https://x/1;;"));
        assert!(text.contains("https://x/2;Sur;"));
    }

    #[test]
    fn comma_delimiter_quotes_embedded_commas() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("comma.csv");
        let mut r = record("https://x/1", None);
        r.adjudicatario = "ACME, S.L.".to_string();
        write_csv(&path, &[r], ',').unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"ACME, S.L.\""));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.csv");
        let err = write_csv(&path, &[record("https://x/1", None)], 'ñ').unwrap_err();
        assert!(err.to_string().contains("ASCII"));
        assert!(!path.exists(), "no file is created for a rejected delimiter");
    }

    #[test]
    fn json_dump_is_pretty_and_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        write_json(&path, &[record("https://x/1", Some("Este"))]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let parsed: Vec<TenderRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0].region.as_deref(), Some("Este"));
    }
}
