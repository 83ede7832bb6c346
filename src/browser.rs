use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;
use thirtyfour::WindowHandle;
use tracing::{debug, info};

/// Interval between readiness polls while waiting for a page to settle.
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Extra pause after the document reports itself complete. The portal fires
/// late XHR updates into the results table, so readyState alone is not enough.
const POST_SETTLE_PAUSE: Duration = Duration::from_millis(500);

/// A single WebDriver browser session.
///
/// Owns the driver handle for the whole run. At most one auxiliary tab is
/// open at any time; detail pages are visited through
/// [`open_detail_tab`](Self::open_detail_tab) /
/// [`close_detail_tab`](Self::close_detail_tab) so the results page keeps its
/// pagination state.
pub struct BrowserSession {
    driver: WebDriver,
    settle_timeout: Duration,
}

impl BrowserSession {
    /// Connects to the WebDriver endpoint and starts a Chrome session
    /// configured for the Spanish portal (es-ES, 1920x1080).
    pub async fn start(config: &ResolvedConfig) -> AppResult<Self> {
        info!(webdriver_url = %config.webdriver_url, headless = config.headless, "Starting browser session");

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg("--lang=es-ES")?;

        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        Ok(Self {
            driver,
            settle_timeout: Duration::from_millis(config.page_settle_timeout_ms),
        })
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigates the current tab to `url` and waits for the page to settle.
    pub async fn open(&self, url: &str) -> AppResult<()> {
        debug!(url, "Navigating");
        self.driver.goto(url).await?;
        self.wait_until_settled().await
    }

    /// Waits until `document.readyState` reports `complete`, then pauses
    /// briefly for late asynchronous updates. WebDriver has no network-idle
    /// signal, so this is the closest observable equivalent.
    pub async fn wait_until_settled(&self) -> AppResult<()> {
        let deadline = Instant::now() + self.settle_timeout;
        loop {
            let ready = match self.driver.execute("return document.readyState", Vec::new()).await {
                Ok(ret) => ret.json().as_str() == Some("complete"),
                Err(_) => false,
            };
            if ready {
                tokio::time::sleep(POST_SETTLE_PAUSE).await;
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AppError::NavigationError(format!(
                    "page did not settle within {} ms",
                    self.settle_timeout.as_millis()
                )));
            }
            tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
        }
    }

    /// Opens `url` in a fresh auxiliary tab and switches to it.
    ///
    /// Returns the handle of the tab that was current before, so the caller
    /// can restore it with [`close_detail_tab`](Self::close_detail_tab).
    pub async fn open_detail_tab(&self, url: &str) -> AppResult<WindowHandle> {
        let original = self.driver.window().await?;
        let aux = self.driver.new_tab().await?;
        self.driver.switch_to_window(aux).await?;

        let navigated = match self.driver.goto(url).await {
            Ok(()) => self.wait_until_settled().await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = navigated {
            // Do not leak the tab when navigation fails mid-way.
            let _ = self.driver.close_window().await;
            let _ = self.driver.switch_to_window(original).await;
            return Err(e);
        }
        Ok(original)
    }

    /// Closes the current auxiliary tab and switches back to `original`.
    ///
    /// The switch back is attempted even when closing the tab fails, so the
    /// session never stays focused on a dead auxiliary tab.
    pub async fn close_detail_tab(&self, original: WindowHandle) -> AppResult<()> {
        let closed = self.driver.close_window().await.map_err(Into::into);
        let switched = self.driver.switch_to_window(original).await.map_err(Into::into);
        cleanup_outcome(closed, switched)
    }

    /// Ends the WebDriver session. Consumes the session so it cannot be used
    /// after cleanup.
    pub async fn quit(self) -> AppResult<()> {
        info!("Closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}

/// Combines the close and switch-back outcomes of the auxiliary-tab cleanup.
/// The close failure takes priority; a switch failure is never masked by a
/// successful close.
fn cleanup_outcome(closed: AppResult<()>, switched: AppResult<()>) -> AppResult<()> {
    closed?;
    switched
}

#[cfg(test)]
mod tests {
    use super::cleanup_outcome;
    use crate::errors::AppError;

    #[test]
    fn close_failure_wins_over_switch_failure() {
        let closed = Err(AppError::WebDriverError("no such window".to_string()));
        let switched = Err(AppError::WebDriverError("switch failed".to_string()));
        let err = cleanup_outcome(closed, switched).unwrap_err();
        assert!(err.to_string().contains("no such window"));
    }

    #[test]
    fn switch_failure_surfaces_after_successful_close() {
        let switched = Err(AppError::WebDriverError("switch failed".to_string()));
        let err = cleanup_outcome(Ok(()), switched).unwrap_err();
        assert!(err.to_string().contains("switch failed"));
    }

    #[test]
    fn both_ok_is_ok() {
        assert!(cleanup_outcome(Ok(()), Ok(())).is_ok());
    }
}
