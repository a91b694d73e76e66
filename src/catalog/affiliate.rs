//! Affiliate tagging of product permalinks.

use url::Url;

use crate::config::AffiliateConfig;

/// Writes the partner-tracking parameter into product links.
///
/// Built once at startup from [`AffiliateConfig`]; the identifier never
/// changes for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AffiliateTagger {
    param: String,
    id: String,
}

impl AffiliateTagger {
    pub fn new(config: &AffiliateConfig) -> Self {
        Self {
            param: config.param.clone(),
            id: config.id.clone(),
        }
    }

    /// Tag a permalink with the affiliate identifier.
    ///
    /// A parseable URL gets the parameter set (first existing occurrence
    /// replaced, later duplicates dropped, otherwise appended). Anything
    /// else gets `?<param>=<id>` concatenated. An empty permalink stays empty.
    pub fn tag(&self, permalink: &str) -> String {
        if permalink.is_empty() {
            return String::new();
        }

        match Url::parse(permalink) {
            Ok(mut url) => {
                self.set_param(&mut url);
                url.into()
            }
            Err(_) => format!("{permalink}?{}={}", self.param, self.id),
        }
    }

    fn set_param(&self, url: &mut Url) {
        let mut replaced = false;
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter_map(|(key, value)| {
                if key != self.param.as_str() {
                    return Some((key.into_owned(), value.into_owned()));
                }
                if replaced {
                    return None;
                }
                replaced = true;
                Some((key.into_owned(), self.id.clone()))
            })
            .collect();

        if !replaced {
            pairs.push((self.param.clone(), self.id.clone()));
        }

        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }
}
