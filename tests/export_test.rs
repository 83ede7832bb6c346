//! Tests for the export module

mod common;

use common::sample_record;
use licita_crawler::config::ResolvedConfig;
use licita_crawler::export::{export_dir, save_records, write_csv};
use licita_crawler::models::TenderRecord;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_records_creates_region_keyword_layout() {
    let temp_dir = TempDir::new().unwrap();
    let config = ResolvedConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..ResolvedConfig::default()
    };

    let records = vec![
        sample_record("https://contrataciondelestado.es/d/1", Some("Sur")),
        sample_record("https://contrataciondelestado.es/d/2", Some("Sur")),
    ];

    let csv_path = save_records(&config, "Sur", "alimentación", &records).unwrap();

    assert!(csv_path.exists());
    assert!(csv_path
        .parent()
        .unwrap()
        .ends_with("sur/alimentación"));
    let name = csv_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("export_"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn test_save_records_json_dump_is_optional() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = ResolvedConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..ResolvedConfig::default()
    };

    let records = vec![sample_record("https://x/1", Some("Este"))];

    let csv_path = save_records(&config, "Este", "obras", &records).unwrap();
    let json_path = csv_path.with_extension("json");
    assert!(!json_path.exists());

    config.json_dump = true;
    let csv_path = save_records(&config, "Este", "obras", &records).unwrap();
    let json_path = csv_path.with_extension("json");
    assert!(json_path.exists());

    let parsed: Vec<TenderRecord> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].adjudicatario, "Suministros del Sur S.L.");
}

#[test]
fn test_csv_header_and_field_order_with_region() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tenders.csv");

    let records = vec![
        sample_record("https://x/1", Some("Sur")),
        sample_record("https://x/2", Some("Centro")),
    ];
    write_csv(&path, &records, ';').unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF", "CSV must start with UTF-8 BOM");

    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "url;region;valor_estimado;adjudicatario;fecha_publicacion;hora_publicacion"
    );
    assert_eq!(
        lines.next().unwrap(),
        "https://x/1;Sur;120.500,00 Euros;Suministros del Sur S.L.;04/06/2024;12:05:21"
    );
    assert_eq!(lines.clone().count(), 1);
}

#[test]
fn test_csv_without_region_omits_the_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tenders.csv");

    write_csv(&path, &[sample_record("https://x/1", None)], ';').unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header.trim_start_matches('\u{feff}'),
        "url;valor_estimado;adjudicatario;fecha_publicacion;hora_publicacion"
    );
}

#[test]
fn test_csv_empty_fields_stay_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tenders.csv");

    // An untouched record: every scraped field defaulted to empty.
    let record = TenderRecord::new("https://x/1".to_string(), Some("Oeste".to_string()));
    write_csv(&path, &[record], ';').unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().nth(1).unwrap(), "https://x/1;Oeste;;;;");
}

#[test]
fn test_export_dir_sanitizes_keyword() {
    let temp_dir = TempDir::new().unwrap();
    let dir = export_dir(temp_dir.path(), "Todas", "material de oficina");
    assert!(dir.ends_with("todas/material_de_oficina"));
}
