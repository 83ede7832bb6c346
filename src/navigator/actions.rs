use super::locator::{candidate_budget_ms, Locator};
use crate::config::ResolvedConfig;
use std::future::Future;
use std::time::{Duration, Instant};
use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;
use tracing::{debug, warn};

/// Interval between polls while waiting for a candidate to become visible.
const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Wait granted to each candidate during best-effort field extraction.
const EXTRACT_CANDIDATE_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Runs `attempt` over the ordered candidates, pausing between failures.
///
/// Returns `true` as soon as one attempt succeeds; `false` only after every
/// candidate has been exhausted. An empty candidate list fails immediately.
pub async fn first_success<'a, F, Fut>(candidates: &[&'a str], pause: Duration, mut attempt: F) -> bool
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = bool>,
{
    for &candidate in candidates {
        if attempt(candidate).await {
            return true;
        }
        tokio::time::sleep(pause).await;
    }
    false
}

/// Best-effort element interaction over ordered candidate lists.
///
/// All operations return a plain `bool` (or `Option`): the first candidate
/// that succeeds wins, exhaustion of the list is reported as failure, and
/// WebDriver errors never escape. This mirrors the contract the portal
/// forces on us: the markup is unstable, so a miss is an expected outcome,
/// not an error.
pub struct Interactor<'a> {
    driver: &'a WebDriver,
    total_timeout_ms: u64,
    floor_timeout_ms: u64,
    attempt_pause: Duration,
}

impl<'a> Interactor<'a> {
    pub fn new(driver: &'a WebDriver, config: &ResolvedConfig) -> Self {
        Self {
            driver,
            total_timeout_ms: config.element_timeout_ms,
            floor_timeout_ms: config.min_candidate_timeout_ms,
            attempt_pause: Duration::from_millis(config.attempt_pause_ms),
        }
    }

    /// Clicks the first candidate that becomes visible within its share of
    /// the time budget. Returns `true` as soon as one click lands.
    pub async fn click_first(&self, candidates: &[&str], description: &str) -> bool {
        let budget = self.per_candidate_budget(candidates.len());
        let clicked = first_success(candidates, self.attempt_pause, |candidate| async move {
            let ok = self.try_click(candidate, budget).await;
            if ok {
                debug!(description, candidate, "Click succeeded");
            }
            ok
        })
        .await;
        if !clicked {
            warn!(
                description,
                candidates = candidates.len(),
                "No candidate could be clicked"
            );
        }
        clicked
    }

    /// Clears and fills the first visible candidate input or textarea.
    pub async fn fill_first(&self, candidates: &[&str], value: &str, description: &str) -> bool {
        let budget = self.per_candidate_budget(candidates.len());
        let filled = first_success(candidates, self.attempt_pause, |candidate| async move {
            let ok = self.try_fill(candidate, value, budget).await;
            if ok {
                debug!(description, candidate, value, "Fill succeeded");
            }
            ok
        })
        .await;
        if !filled {
            warn!(
                description,
                candidates = candidates.len(),
                "No candidate could be filled"
            );
        }
        filled
    }

    /// Selects `value` in the first visible candidate dropdown.
    ///
    /// Within one dropdown the strategies are tried in order: by option
    /// value, by exact visible label, then a scan of every option for a
    /// case-insensitive partial match, selecting by resolved value or by
    /// clicking the matched option as last resort.
    pub async fn select_first(&self, candidates: &[&str], value: &str, description: &str) -> bool {
        let budget = self.per_candidate_budget(candidates.len());
        let selected = first_success(candidates, self.attempt_pause, |candidate| async move {
            if let Some(element) = self.wait_for_visible(candidate, budget).await {
                let _ = element.scroll_into_view().await;
                if self.try_select(&element, value).await {
                    debug!(description, candidate, value, "Select succeeded");
                    return true;
                }
            }
            false
        })
        .await;
        if !selected {
            warn!(
                description,
                value,
                candidates = candidates.len(),
                "No candidate dropdown accepted the value"
            );
        }
        selected
    }

    /// Returns the trimmed text of the first candidate that is visible,
    /// trying each candidate independently with a short wait. `None` when
    /// every candidate misses.
    pub async fn first_visible_text(&self, candidates: &[&str]) -> Option<String> {
        for candidate in candidates {
            if let Some(element) = self.wait_for_visible(candidate, EXTRACT_CANDIDATE_TIMEOUT).await
            {
                if let Ok(text) = element.text().await {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }

    /// Polls for an element matching `candidate` until it is present and
    /// displayed, or the timeout elapses.
    pub async fn wait_for_visible(&self, candidate: &str, timeout: Duration) -> Option<WebElement> {
        let by = Locator::parse(candidate).to_by();
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.driver.find(by.clone()).await {
                if element.is_displayed().await.unwrap_or(false) {
                    return Some(element);
                }
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn per_candidate_budget(&self, candidates: usize) -> Duration {
        Duration::from_millis(candidate_budget_ms(
            self.total_timeout_ms,
            candidates,
            self.floor_timeout_ms,
        ))
    }

    async fn try_click(&self, candidate: &str, budget: Duration) -> bool {
        match self.wait_for_visible(candidate, budget).await {
            Some(element) => {
                let _ = element.scroll_into_view().await;
                element.click().await.is_ok()
            }
            None => false,
        }
    }

    async fn try_fill(&self, candidate: &str, value: &str, budget: Duration) -> bool {
        match self.wait_for_visible(candidate, budget).await {
            Some(element) => {
                let _ = element.scroll_into_view().await;
                if element.clear().await.is_err() {
                    return false;
                }
                element.send_keys(value).await.is_ok()
            }
            None => false,
        }
    }

    async fn try_select(&self, element: &WebElement, value: &str) -> bool {
        let select = SelectElement::new(element).await.ok();

        if let Some(sel) = &select {
            if sel.select_by_value(value).await.is_ok() {
                return true;
            }
            if sel.select_by_exact_text(value).await.is_ok() {
                return true;
            }
        }

        // Last resort: scan every option for a partial match on text or value.
        let options = element.find_all(By::Tag("option")).await.unwrap_or_default();
        let wanted = value.to_lowercase();
        for option in options {
            let text = option
                .text()
                .await
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            let option_value = option.attr("value").await.ok().flatten().unwrap_or_default();
            let text_lower = text.to_lowercase();

            let matches = text_lower.contains(&wanted)
                || (!text_lower.is_empty() && wanted.contains(&text_lower))
                || value == text
                || value == option_value;
            if !matches {
                continue;
            }

            if !option_value.is_empty() {
                if let Some(sel) = &select {
                    if sel.select_by_value(&option_value).await.is_ok() {
                        return true;
                    }
                }
            }
            // Positional fallback: selecting the option element directly.
            if option.click().await.is_ok() {
                return true;
            }
        }
        false
    }
}
