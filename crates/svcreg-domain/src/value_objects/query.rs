//! Query Parameter Value Object
//!
//! String-valued keyword arguments carried by a service identifier.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::str::FromStr;

/// Value Object: Identifier Query Parameters
///
/// Every value is a string, whatever it looks like; the core performs no
/// coercion. Constructors that need typed values use [`QueryParams::parse`]
/// or [`QueryParams::flag`] themselves.
///
/// ## Business Rules
///
/// - Duplicate keys: the last occurrence wins
/// - Blank values are kept (`k=` yields `""`)
///
/// ## Example
///
/// ```rust
/// use svcreg_domain::value_objects::QueryParams;
///
/// let params = QueryParams::from_query("ttl=300&ttl=600&name=");
/// assert_eq!(params.get("ttl"), Some("600"));
/// assert_eq!(params.get("name"), Some(""));
/// assert_eq!(params.parse::<u64>("ttl").unwrap(), Some(600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a form-encoded query string (without the leading `?`)
    pub fn from_query(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Insert a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a raw string value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get a value or fail with an invalid argument error
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::invalid_argument(format!("missing required argument '{key}'")))
    }

    /// Parse a value with `FromStr`; absent keys yield `Ok(None)`
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    Error::invalid_argument(format!("argument '{key}' = '{raw}': {e}"))
                })
            })
            .transpose()
    }

    /// Interpret a value as a boolean flag; absent keys are `false`
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.get(key).map(str::to_ascii_lowercase).as_deref() {
            None => Ok(false),
            Some("" | "1" | "true" | "yes" | "on") => Ok(true),
            Some("0" | "false" | "no" | "off") => Ok(false),
            Some(other) => Err(Error::invalid_argument(format!(
                "argument '{key}' = '{other}' is not a boolean"
            ))),
        }
    }

    /// Reject keyword arguments the callee does not accept
    pub fn ensure_only(&self, accepted: &[&str]) -> Result<()> {
        let unexpected: Vec<&str> = self
            .0
            .keys()
            .map(String::as_str)
            .filter(|key| !accepted.contains(key))
            .collect();
        if unexpected.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "unexpected keyword arguments: {}",
                unexpected.join(", ")
            )))
        }
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<QueryParams> for BTreeMap<String, String> {
    fn from(params: QueryParams) -> Self {
        params.0
    }
}
