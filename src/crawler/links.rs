use crate::constants::{
    DETAIL_LINK_ID_PARAM, DETAIL_LINK_MARKER, RESULT_FALLBACK_LINKS_XPATH,
    RESULT_TABLE_LINKS_XPATH, SITE_ORIGIN,
};
use thirtyfour::prelude::*;
use tracing::{debug, warn};
use url::Url;

/// Normalizes one result-table href into an absolute detail-page URL.
///
/// Hrefs without the detail marker (or, when `require_id_param` is set,
/// without the tender id parameter) are rejected. Relative hrefs are
/// resolved against the fixed site origin; absolute ones pass through
/// unchanged.
pub fn normalize_detail_href(href: &str, require_id_param: bool) -> Option<String> {
    if !href.contains(DETAIL_LINK_MARKER) {
        return None;
    }
    if require_id_param && !href.contains(DETAIL_LINK_ID_PARAM) {
        return None;
    }
    let base = Url::parse(SITE_ORIGIN).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}

/// Normalizes and deduplicates a batch of raw hrefs, preserving the order
/// in which they first appeared on the page.
pub fn filter_detail_links<'a, I>(hrefs: I, require_id_param: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut links: Vec<String> = Vec::new();
    for href in hrefs {
        if let Some(url) = normalize_detail_href(href, require_id_param) {
            if !links.contains(&url) {
                links.push(url);
            }
        }
    }
    links
}

/// Collects the detail-page links of the current result page.
///
/// Scans the results table first; when that finds nothing (the table id is
/// not stable across profiles) falls back to a whole-page scan restricted to
/// anchors that carry the tender id parameter.
pub async fn discover_result_links(driver: &WebDriver) -> Vec<String> {
    let table_hrefs = collect_hrefs(driver, RESULT_TABLE_LINKS_XPATH).await;
    let links = filter_detail_links(table_hrefs.iter().map(String::as_str), false);
    if !links.is_empty() {
        return links;
    }

    debug!("Results table scan found no links, falling back to page-wide scan");
    let page_hrefs = collect_hrefs(driver, RESULT_FALLBACK_LINKS_XPATH).await;
    filter_detail_links(page_hrefs.iter().map(String::as_str), true)
}

async fn collect_hrefs(driver: &WebDriver, xpath: &str) -> Vec<String> {
    let anchors = match driver.find_all(By::XPath(xpath)).await {
        Ok(anchors) => anchors,
        Err(e) => {
            warn!(error = %e, "Anchor scan failed");
            return Vec::new();
        }
    };

    let mut hrefs = Vec::new();
    for anchor in anchors {
        if let Ok(Some(href)) = anchor.attr("href").await {
            hrefs.push(href);
        }
    }
    hrefs
}
