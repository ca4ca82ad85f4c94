//! Synchronization between the navigation query string and the search query.
//!
//! On mount the `query` parameter seeds the active query. On every submitted
//! search the parameter is rewritten (or removed when empty) and the stale
//! `type` parameter is dropped. Other parameters keep their order.

use url::form_urlencoded;

/// Name of the persisted query parameter.
pub const QUERY_PARAM: &str = "query";

/// Parameter removed on every submission.
pub const TYPE_PARAM: &str = "type";

/// Ordered `application/x-www-form-urlencoded` parameters of a location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a location search string, with or without the leading `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::app::QueryParams;
    ///
    /// let params = QueryParams::parse("?query=coffee+shop&type=vertical");
    /// assert_eq!(params.get("query"), Some("coffee shop"));
    /// assert_eq!(params.get("type"), Some("vertical"));
    /// ```
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes()).into_owned().collect(),
        }
    }

    /// First value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`: the first occurrence is updated in place and
    /// later duplicates are removed; a missing key is appended.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        let mut rebuilt = Vec::with_capacity(self.pairs.len() + 1);
        for (k, v) in self.pairs.drain(..) {
            if k == key {
                if !seen {
                    rebuilt.push((k, value.to_string()));
                    seen = true;
                }
            } else {
                rebuilt.push((k, v));
            }
        }
        if !seen {
            rebuilt.push((key.to_string(), value.to_string()));
        }
        self.pairs = rebuilt;
    }

    /// Removes every occurrence of `key`.
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes back to a search string with a leading `?`.
    ///
    /// An empty parameter list serializes to a bare `?`.
    #[must_use]
    pub fn to_search_string(&self) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        format!("?{encoded}")
    }
}

/// Reconciles the navigation state with the active query.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySync;

impl QuerySync {
    /// Query to seed on mount. Empty values are ignored.
    #[must_use]
    pub fn initial_query(params: &QueryParams) -> Option<String> {
        params
            .get(QUERY_PARAM)
            .filter(|q| !q.is_empty())
            .map(ToString::to_string)
    }

    /// Parameters to push after a search submission.
    #[must_use]
    pub fn on_submit(params: &QueryParams, query: &str) -> QueryParams {
        let mut next = params.clone();
        next.delete(TYPE_PARAM);
        if query.is_empty() {
            next.delete(QUERY_PARAM);
        } else {
            next.set(QUERY_PARAM, query);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_same_query_leaves_parameter_unchanged() {
        let params = QueryParams::parse("?query=coffee");
        let seeded = QuerySync::initial_query(&params).unwrap();

        let next = QuerySync::on_submit(&params, &seeded);

        assert_eq!(next, params);
        assert_eq!(next.to_search_string(), "?query=coffee");
    }

    #[test]
    fn submission_drops_type_and_keeps_other_params_in_place() {
        let params = QueryParams::parse("lang=it&type=locations&query=old&page=2");
        let next = QuerySync::on_submit(&params, "milano centrale");
        assert_eq!(next.to_search_string(), "?lang=it&query=milano+centrale&page=2");
    }

    #[test]
    fn empty_submission_removes_query() {
        let params = QueryParams::parse("?query=coffee&type=x");
        let next = QuerySync::on_submit(&params, "");
        assert!(next.is_empty());
        assert_eq!(next.to_search_string(), "?");
    }

    #[test]
    fn empty_query_param_is_not_seeded() {
        assert_eq!(QuerySync::initial_query(&QueryParams::parse("?query=")), None);
        assert_eq!(QuerySync::initial_query(&QueryParams::parse("")), None);
    }

    #[test]
    fn set_collapses_duplicates() {
        let mut params = QueryParams::parse("query=a&x=1&query=b");
        params.set("query", "c");
        assert_eq!(params.to_search_string(), "?query=c&x=1");
    }
}
