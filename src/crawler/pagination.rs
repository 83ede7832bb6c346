use super::detail::visit_detail;
use super::links::discover_result_links;
use super::search_form::{submit_search, SearchStage};
use crate::browser::BrowserSession;
use crate::config::ResolvedConfig;
use crate::constants::NEXT_PAGE_SELECTORS;
use crate::errors::AppResult;
use crate::models::{Region, RegionOutcome, TenderRecord};
use crate::navigator::Interactor;
use crate::ui;
use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Wait granted to each "Siguiente" candidate when probing for another page.
const NEXT_PAGE_CANDIDATE_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Crawls one region end to end: submit the search, then walk every result
/// page, visiting each tender's detail page in an auxiliary tab.
///
/// A failed navigation sequence aborts only this region and yields an empty
/// record set. An empty first result page is the regular "no results"
/// outcome. Per-record failures are logged and skipped.
pub async fn process_region(
    session: &BrowserSession,
    config: &ResolvedConfig,
    region: Region,
    keyword: &str,
) -> AppResult<(Vec<TenderRecord>, RegionOutcome)> {
    let interactor = Interactor::new(session.driver(), config);

    let stage = submit_search(session, &interactor, region, keyword).await;
    if stage != SearchStage::SearchSubmitted {
        warn!(
            region = region.display_name(),
            stage = ?stage,
            "Navigation sequence aborted, skipping region"
        );
        return Ok((Vec::new(), RegionOutcome::default()));
    }

    let mut records: Vec<TenderRecord> = Vec::new();
    let mut pages_visited = 0usize;

    loop {
        let links = discover_result_links(session.driver()).await;
        if links.is_empty() {
            if pages_visited == 0 {
                info!(region = region.display_name(), "No results for this search");
            }
            break;
        }
        pages_visited += 1;
        info!(
            region = region.display_name(),
            page = pages_visited,
            tenders = links.len(),
            "Processing result page"
        );

        let pb = ui::create_progress_bar(links.len() as u64)?;
        pb.set_message(format!("página {pages_visited}"));
        let page_records = scrape_links(&links, &pb, |link| {
            visit_detail(session, &interactor, link, region)
        })
        .await;
        records.extend(page_records);
        pb.finish_and_clear();

        if !advance_to_next_page(session, &interactor).await {
            break;
        }
    }

    let outcome = RegionOutcome {
        records_extracted: records.len(),
        pages_visited,
    };
    info!(
        region = region.display_name(),
        records = outcome.records_extracted,
        pages = outcome.pages_visited,
        "Region done"
    );
    Ok((records, outcome))
}

/// Visits every link of one result page through `visit`, collecting the
/// records that survive. A failed visit is logged and skipped; the links
/// after it are still processed.
async fn scrape_links<'a, F, Fut>(links: &'a [String], pb: &ProgressBar, mut visit: F) -> Vec<TenderRecord>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = AppResult<TenderRecord>>,
{
    let mut records = Vec::new();
    for link in links {
        match visit(link).await {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(url = %link, error = %e, "Skipping tender");
            }
        }
        pb.inc(1);
    }
    records
}

/// Clicks the "Siguiente" control when one is visible and enabled.
/// Returns `false` when there is no further page (terminates the loop).
async fn advance_to_next_page(session: &BrowserSession, interactor: &Interactor<'_>) -> bool {
    for candidate in NEXT_PAGE_SELECTORS {
        let element = match interactor
            .wait_for_visible(candidate, NEXT_PAGE_CANDIDATE_TIMEOUT)
            .await
        {
            Some(element) => element,
            None => continue,
        };
        if !element.is_enabled().await.unwrap_or(false) {
            continue;
        }
        if element.click().await.is_err() {
            continue;
        }
        if let Err(e) = session.wait_until_settled().await {
            warn!(error = %e, "Next page did not settle, stopping pagination");
            return false;
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::scrape_links;
    use crate::errors::AppError;
    use crate::models::TenderRecord;
    use indicatif::ProgressBar;

    #[tokio::test]
    async fn failed_visit_is_skipped_and_later_links_still_processed() {
        let links = vec![
            "https://x/1".to_string(),
            "https://x/2".to_string(),
            "https://x/3".to_string(),
        ];
        let pb = ProgressBar::hidden();

        let records = scrape_links(&links, &pb, |link| {
            let fails = link.ends_with("/2");
            async move {
                if fails {
                    Err(AppError::WebDriverError("tab crashed".to_string()))
                } else {
                    Ok(TenderRecord::new(link.to_string(), None))
                }
            }
        })
        .await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://x/1");
        assert_eq!(records[1].url, "https://x/3");
    }

    #[tokio::test]
    async fn all_visits_failing_yields_no_records() {
        let links = vec!["https://x/1".to_string(), "https://x/2".to_string()];
        let pb = ProgressBar::hidden();

        let records = scrape_links(&links, &pb, |_| async {
            Err(AppError::NavigationError("page did not settle".to_string()))
        })
        .await;

        assert!(records.is_empty());
    }
}
