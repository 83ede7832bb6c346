//! Common test utilities for integration tests

use licita_crawler::models::TenderRecord;

/// Builds a fully populated record for the given detail URL.
#[allow(dead_code)]
pub fn sample_record(url: &str, region: Option<&str>) -> TenderRecord {
    let mut record = TenderRecord::new(url.to_string(), region.map(str::to_string));
    record.valor_estimado = "120.500,00 Euros".to_string();
    record.adjudicatario = "Suministros del Sur S.L.".to_string();
    record.fecha_publicacion = "04/06/2024".to_string();
    record.hora_publicacion = "12:05:21".to_string();
    record
}

/// Detail-page hrefs as the results table renders them.
#[allow(dead_code)]
pub const RELATIVE_DETAIL_HREF: &str =
    "/wps/poc?uri=deeplink:detalle_licitacion&idEvl=IVv54tL29qQ%3D";

#[allow(dead_code)]
pub const ABSOLUTE_DETAIL_HREF: &str =
    "https://contrataciondelestado.es/wps/poc?uri=deeplink:detalle_licitacion&idEvl=7QuTKak6qkc%3D";
