use thirtyfour::By;

/// A single candidate locator, parsed from its string form.
///
/// The convention follows the selector lists in [`crate::constants`]:
/// strings starting with `//` or `(//` are XPath, a `text=` prefix matches
/// link text, anything else is treated as a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    XPath(String),
    Css(String),
    LinkText(String),
}

impl Locator {
    pub fn parse(candidate: &str) -> Self {
        if candidate.starts_with("//") || candidate.starts_with("(//") {
            Self::XPath(candidate.to_string())
        } else if let Some(text) = candidate.strip_prefix("text=") {
            Self::LinkText(text.to_string())
        } else {
            Self::Css(candidate.to_string())
        }
    }

    pub fn to_by(&self) -> By {
        match self {
            Self::XPath(s) => By::XPath(s.as_str()),
            Self::Css(s) => By::Css(s.as_str()),
            Self::LinkText(s) => By::LinkText(s.as_str()),
        }
    }
}

/// Splits a total wait budget evenly across candidates, never dropping below
/// the per-candidate floor. A long candidate list must not starve the
/// individual attempts.
pub fn candidate_budget_ms(total_ms: u64, candidates: usize, floor_ms: u64) -> u64 {
    if candidates == 0 {
        return floor_ms;
    }
    std::cmp::max(floor_ms, total_ms / candidates as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_xpath_prefixes() {
        assert_eq!(
            Locator::parse("//input[@id='x']"),
            Locator::XPath("//input[@id='x']".to_string())
        );
        assert_eq!(
            Locator::parse("(//a)[1]"),
            Locator::XPath("(//a)[1]".to_string())
        );
    }

    #[test]
    fn parse_text_prefix() {
        assert_eq!(
            Locator::parse("text=Licitaciones"),
            Locator::LinkText("Licitaciones".to_string())
        );
    }

    #[test]
    fn parse_plain_string_is_css() {
        assert_eq!(
            Locator::parse("table#results a"),
            Locator::Css("table#results a".to_string())
        );
    }

    #[test]
    fn budget_divides_evenly_above_floor() {
        assert_eq!(candidate_budget_ms(15_000, 3, 3_000), 5_000);
    }

    #[test]
    fn budget_applies_floor() {
        assert_eq!(candidate_budget_ms(8_000, 4, 3_000), 3_000);
        assert_eq!(candidate_budget_ms(1_000, 1, 3_000), 3_000);
    }

    #[test]
    fn budget_handles_empty_list() {
        assert_eq!(candidate_budget_ms(15_000, 0, 3_000), 3_000);
    }
}
