use crate::browser::BrowserSession;
use crate::constants::{
    CONTRACT_TYPE_SELECTORS, CONTRACT_TYPE_VALUE, KEYWORD_SELECTORS, LICITACIONES_TAB_SELECTORS,
    SEARCH_BUTTON_SELECTORS, STATUS_SELECTORS, STATUS_VALUE,
};
use crate::models::Region;
use crate::navigator::Interactor;
use tracing::{info, warn};

/// Progress through the fixed navigation sequence for one region.
///
/// The sequence is strictly linear; the only branching is an early abort
/// when a required step fails, leaving the run at the last reached stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Init,
    Loaded,
    LicitacionesOpen,
    FormFilled,
    SearchSubmitted,
}

/// Drives the region's profile page up to a submitted search:
/// open the deeplink, click the "Licitaciones" tab, fill the filters
/// (contract type, status, object keyword) and click "Buscar".
///
/// The filter fields are best effort; the portal renders them with
/// different ids per profile and a missed filter only widens the search.
/// The page load, the tab click and the submit click are required; failing
/// one of them aborts this region at the stage reached.
pub async fn submit_search(
    session: &BrowserSession,
    interactor: &Interactor<'_>,
    region: Region,
    keyword: &str,
) -> SearchStage {
    let mut stage = SearchStage::Init;

    info!(region = region.display_name(), "Opening contracting profile");
    if let Err(e) = session.open(region.url()).await {
        warn!(region = region.display_name(), error = %e, "Profile page did not load");
        return stage;
    }
    stage = SearchStage::Loaded;

    if !interactor
        .click_first(LICITACIONES_TAB_SELECTORS, "Pestaña Licitaciones")
        .await
    {
        return stage;
    }
    if let Err(e) = session.wait_until_settled().await {
        warn!(error = %e, "Licitaciones tab did not settle");
        return stage;
    }
    stage = SearchStage::LicitacionesOpen;

    info!(
        contract_type = CONTRACT_TYPE_VALUE,
        status = STATUS_VALUE,
        keyword,
        "Filling search filters"
    );
    let _ = interactor
        .select_first(CONTRACT_TYPE_SELECTORS, CONTRACT_TYPE_VALUE, "Tipo de contrato")
        .await;
    let _ = interactor
        .select_first(STATUS_SELECTORS, STATUS_VALUE, "Estado")
        .await;
    let _ = interactor
        .fill_first(KEYWORD_SELECTORS, keyword, "Objeto del contrato")
        .await;
    stage = SearchStage::FormFilled;

    if !interactor
        .click_first(SEARCH_BUTTON_SELECTORS, "Botón Buscar")
        .await
    {
        return stage;
    }
    if let Err(e) = session.wait_until_settled().await {
        warn!(error = %e, "Search results did not settle");
        return stage;
    }
    SearchStage::SearchSubmitted
}
