use std::collections::HashMap;

use url::form_urlencoded;

pub const DEFAULT_SOURCE: &str = "Google Lead";
pub const DEFAULT_CONTENT: &str = "Content";
pub const DEFAULT_CAMPAIGN: &str = "Campaign Name";
pub const DEFAULT_KEYWORD: &str = "Keyword";

/// Ad-campaign tags carried on the landing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub source: String,
    pub content: String,
    pub campaign: String,
    pub keyword: String,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            content: DEFAULT_CONTENT.to_string(),
            campaign: DEFAULT_CAMPAIGN.to_string(),
            keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

impl Campaign {
    /// Parses `location.search`. Missing and empty params fall back to the
    /// defaults; repeated params keep their first value.
    pub fn from_query(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }

        let pick = |key: &str, fallback: &str| {
            params
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            source: pick("utm_source", DEFAULT_SOURCE),
            content: pick("utm_content", DEFAULT_CONTENT),
            campaign: pick("utm_campaign", DEFAULT_CAMPAIGN),
            keyword: pick("keyword", DEFAULT_KEYWORD),
        }
    }

    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }
}

/// `origin + pathname` of the current page, reported to the CRM as the
/// landing page.
pub fn landing_page() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            format!(
                "{}{}",
                location.origin().unwrap_or_default(),
                location.pathname().unwrap_or_default()
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_query_uses_fallbacks() {
        let campaign = Campaign::from_query("");
        assert_eq!(campaign.source, "Google Lead");
        assert_eq!(campaign.campaign, "Campaign Name");
        assert_eq!(campaign.content, "Content");
        assert_eq!(campaign.keyword, "Keyword");
    }

    #[test]
    fn reads_tags_and_decodes_them() {
        let campaign = Campaign::from_query(
            "?utm_source=facebook&utm_campaign=Diwali%20Offer&keyword=ivf+clinic&utm_content=reel-2",
        );
        assert_eq!(campaign.source, "facebook");
        assert_eq!(campaign.campaign, "Diwali Offer");
        assert_eq!(campaign.keyword, "ivf clinic");
        assert_eq!(campaign.content, "reel-2");
    }

    #[test]
    fn empty_value_falls_back() {
        let campaign = Campaign::from_query("?utm_source=&keyword=x");
        assert_eq!(campaign.source, DEFAULT_SOURCE);
        assert_eq!(campaign.keyword, "x");
    }

    #[test]
    fn first_occurrence_wins() {
        let campaign = Campaign::from_query("utm_source=a&utm_source=b");
        assert_eq!(campaign.source, "a");
    }
}
