use crate::browser::BrowserSession;
use crate::constants::{
    AWARDEE_SELECTORS, AWARD_ROW_MARKER, AWARD_TABLE_ROWS_XPATH, ESTIMATED_VALUE_SELECTORS,
    ESTIMATED_VALUE_UNIT_SELECTORS,
};
use crate::errors::AppResult;
use crate::models::{Region, TenderRecord};
use crate::navigator::Interactor;
use thirtyfour::prelude::*;

/// Splits a combined "date time" cell on its first whitespace.
///
/// `"04/06/2024 12:05:21"` becomes `("04/06/2024", "12:05:21")`; input with
/// no whitespace is all date, leaving the time empty.
pub fn split_date_time(combined: &str) -> (String, String) {
    let trimmed = combined.trim();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => {
            let (date, time) = trimmed.split_at(idx);
            (date.to_string(), time.trim_start().to_string())
        }
        None => (trimmed.to_string(), String::new()),
    }
}

/// Opens `url` in an auxiliary tab, scrapes the award fields and closes the
/// tab again, restoring the results page.
///
/// Field misses leave the field empty; only tab handling and navigation
/// failures surface as errors, and the caller skips the record on those.
pub async fn visit_detail(
    session: &BrowserSession,
    interactor: &Interactor<'_>,
    url: &str,
    region: Region,
) -> AppResult<TenderRecord> {
    let original = session.open_detail_tab(url).await?;
    let mut record = TenderRecord::new(url.to_string(), Some(region.display_name().to_string()));
    extract_fields(session.driver(), interactor, &mut record).await;
    session.close_detail_tab(original).await?;
    Ok(record)
}

/// Best-effort extraction of the three award fields from the current tab.
async fn extract_fields(driver: &WebDriver, interactor: &Interactor<'_>, record: &mut TenderRecord) {
    if let Some(value) = interactor.first_visible_text(ESTIMATED_VALUE_SELECTORS).await {
        let unit = interactor
            .first_visible_text(ESTIMATED_VALUE_UNIT_SELECTORS)
            .await;
        record.valor_estimado = with_unit(value, unit);
    }
    if let Some(value) = interactor.first_visible_text(AWARDEE_SELECTORS).await {
        record.adjudicatario = value;
    }
    if let Some(combined) = find_award_timestamp(driver).await {
        let (date, time) = split_date_time(&combined);
        record.fecha_publicacion = date;
        record.hora_publicacion = time;
    }
}

/// Appends the currency unit to the scraped value when the unit span was
/// visible. `"120.500,00"` plus `"Euros"` becomes `"120.500,00 Euros"`.
fn with_unit(value: String, unit: Option<String>) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("{value} {unit}"),
        _ => value,
    }
}

/// Scans the detail table for the row whose document-type cell names the
/// award ("Adjudicación") and returns that row's date cell text.
async fn find_award_timestamp(driver: &WebDriver) -> Option<String> {
    let rows = driver.find_all(By::XPath(AWARD_TABLE_ROWS_XPATH)).await.ok()?;
    for row in rows {
        let cells = row.find_all(By::Tag("td")).await.unwrap_or_default();
        if cells.len() < 2 {
            continue;
        }
        let doc_type = cells[1].text().await.unwrap_or_default();
        if !doc_type.contains(AWARD_ROW_MARKER) {
            continue;
        }
        let stamp = cells[0]
            .text()
            .await
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        if stamp.is_empty() {
            return None;
        }
        return Some(stamp);
    }
    None
}
