//! Query parameter construction.
//!
//! The version-specific addressing parameters always come first, in a fixed
//! order; the query text (`q`) is appended after them for read and command
//! requests.

use crate::connection::Addressing;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in query keys and values.
///
/// Everything but ASCII alphanumerics and `- _ . ~ *`. Spaces become `%20`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*');

/// Ordered `(key, value)` pairs of a request's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    pairs: Vec<(String, String)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append the query text as `q`.
    pub fn with_query(mut self, text: &str) -> Self {
        self.add("q", text);
        self
    }

    /// Value of the first pair named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded `k=v&k=v` form, without the leading `?`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_COMPONENT),
                    utf8_percent_encode(v, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Addressing parameters for an endpoint.
///
/// v1 yields `db` and, when set, `rp`; v2 yields `org` then `bucket`.
pub fn build_parameters(addressing: &Addressing) -> QueryParameters {
    let mut parameters = QueryParameters::new();

    match addressing {
        Addressing::V1 {
            database,
            retention_policy,
        } => {
            parameters.add("db", database.as_str());
            if let Some(rp) = retention_policy {
                parameters.add("rp", rp.as_str());
            }
        }
        Addressing::V2 {
            organization,
            bucket,
        } => {
            parameters.add("org", organization.as_str());
            parameters.add("bucket", bucket.as_str());
        }
    }

    parameters
}
