// Portal endpoints
pub const SITE_ORIGIN: &str = "https://contrataciondelestado.es";

pub const REGION_SUR_URL: &str =
    "https://contrataciondelestado.es/wps/poc?uri=deeplink:perfilContratante&idBp=IVv54tL29qQ%3D";
pub const REGION_ESTE_URL: &str =
    "https://contrataciondelestado.es/wps/poc?uri=deeplink:perfilContratante&idBp=7QuTKak6qkc%3D";
pub const REGION_OESTE_URL: &str =
    "https://contrataciondelestado.es/wps/poc?uri=deeplink:perfilContratante&idBp=uVw2GiaBY5s%3D";
pub const REGION_CENTRO_URL: &str =
    "https://contrataciondelestado.es/wps/poc?uri=deeplink:perfilContratante&idBp=BxL%2BJUo%2Bqpg%3D";

// Detail page link markers
pub const DETAIL_LINK_MARKER: &str = "detalle_licitacion";
pub const DETAIL_LINK_ID_PARAM: &str = "idEvl=";

// Fixed search filter values: Tipo=Suministros, Estado=Resuelta
pub const CONTRACT_TYPE_VALUE: &str = "1";
pub const STATUS_VALUE: &str = "RES";
pub const DEFAULT_KEYWORD: &str = "alimentación";

// Candidate selector lists. The portal renders different internal field ids
// per contracting profile, so every interaction goes through an ordered
// fallback list rather than a single locator.
pub const LICITACIONES_TAB_SELECTORS: &[&str] = &[
    "//input[contains(@id, 'linkPrepLic')]",
    "//input[contains(@name, 'linkPrepLic')]",
    "//input[@type='submit' and @value='Licitaciones']",
    "//input[@title='Licitaciones']",
];

pub const CONTRACT_TYPE_SELECTORS: &[&str] = &[
    "//select[contains(@name, 'busReasProc07')]",
    "//select[contains(@id, 'busReasProc07')]",
    "//select[@title='Tipo de contrato']",
];

pub const STATUS_SELECTORS: &[&str] = &[
    "//select[contains(@name, 'busReasProc11')]",
    "//select[contains(@id, 'busReasProc11')]",
    "//select[@title='Estado']",
];

pub const KEYWORD_SELECTORS: &[&str] = &[
    "//textarea[contains(@name, 'busReasProc17')]",
    "//textarea[contains(@id, 'busReasProc17')]",
    "//textarea[@title='Objeto del contrato']",
];

pub const SEARCH_BUTTON_SELECTORS: &[&str] = &[
    "//input[contains(@id, 'busReasProc18')]",
    "//input[contains(@name, 'busReasProc18')]",
    "//input[@type='submit' and @value='Buscar']",
];

pub const RESULT_TABLE_LINKS_XPATH: &str =
    "//table[@id='tableLicitacionesPerfilContratante']//td[@class='tdExpediente']//a[@target='_blank']";
pub const RESULT_FALLBACK_LINKS_XPATH: &str =
    "//a[contains(@href, 'detalle_licitacion') and contains(@href, 'idEvl=')]";

pub const NEXT_PAGE_SELECTORS: &[&str] = &[
    "//input[@id='viewns_Z7_AVEQAI930GRPE02BR764FO30G0_:form1:siguienteLink']",
    "//input[@name='viewns_Z7_AVEQAI930GRPE02BR764FO30G0_:form1:siguienteLink']",
    "//input[@type='submit' and contains(@value, 'Siguiente')]",
];

// Detail page field selectors
pub const ESTIMATED_VALUE_SELECTORS: &[&str] = &[
    "//span[contains(@id, 'text_ValorContrato')]",
    "//span[contains(@id, 'ValorContrato')]",
];

// The "Euros" unit renders as a sibling span next to the value span.
pub const ESTIMATED_VALUE_UNIT_SELECTORS: &[&str] = &[
    "//span[contains(@id, 'ValorContrato')]/..//span[contains(text(), 'Euros')]",
];

pub const AWARDEE_SELECTORS: &[&str] = &[
    "//span[contains(@id, 'text_Adjudicatario')]",
    "//span[contains(@id, 'Adjudicatario')]",
];

pub const AWARD_TABLE_ROWS_XPATH: &str = "//table[@id='myTablaDetalleVISUOE']//tbody//tr";
pub const AWARD_ROW_MARKER: &str = "Adjudicación";
