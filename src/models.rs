use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Contracting profile region on the procurement portal.
///
/// Each region maps to a fixed deeplink URL of its contracting profile.
/// The "all regions" sentinel is handled at the CLI level; this enum only
/// carries concrete crawl targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Sur,
    Este,
    Oeste,
    Centro,
}

impl Region {
    /// All concrete regions, in the order they are crawled for a full run.
    pub const ALL: [Region; 4] = [Region::Sur, Region::Este, Region::Oeste, Region::Centro];

    /// Returns a human-readable name for the region.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sur => "Sur",
            Self::Este => "Este",
            Self::Oeste => "Oeste",
            Self::Centro => "Centro",
        }
    }

    /// Returns the contracting profile deeplink URL for the region.
    pub fn url(&self) -> &'static str {
        match self {
            Self::Sur => REGION_SUR_URL,
            Self::Este => REGION_ESTE_URL,
            Self::Oeste => REGION_OESTE_URL,
            Self::Centro => REGION_CENTRO_URL,
        }
    }

    /// Parses a region name case-insensitively. Returns `None` for unknown
    /// names, including the "todas" sentinel which callers handle themselves.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sur" => Some(Self::Sur),
            "este" => Some(Self::Este),
            "oeste" => Some(Self::Oeste),
            "centro" => Some(Self::Centro),
            _ => None,
        }
    }
}

/// One scraped detail page. All fields are kept as the portal renders them;
/// a field that could not be located stays an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenderRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub valor_estimado: String,
    pub adjudicatario: String,
    pub fecha_publicacion: String,
    pub hora_publicacion: String,
}

impl TenderRecord {
    /// Creates an empty record for the given detail URL.
    pub fn new(url: String, region: Option<String>) -> Self {
        Self {
            url,
            region,
            valor_estimado: String::new(),
            adjudicatario: String::new(),
            fecha_publicacion: String::new(),
            hora_publicacion: String::new(),
        }
    }
}

/// Summary of crawling one region, used for end-of-run logging.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionOutcome {
    pub records_extracted: usize,
    pub pages_visited: usize,
}
