//! Service Identifier Value Objects
//!
//! Parses configuration strings of the forms
//!
//! ```text
//! url-form    := scheme "://" authority [ "/" path ] [ "?" query ]   (or "scheme:")
//! python-form := "python:" modulePath [ ":" attributeName ] [ "?" query ]
//! ```
//!
//! into a [`ParsedDescriptor`]. Only syntax is checked here: whether the scheme
//! is known is decided by the resolver.

use crate::constants::{DYNAMIC_IMPORT_SCHEME, IMPORT_ATTRIBUTE_SEPARATOR, MODULE_PATH_SEPARATOR};
use crate::error::{Error, Result};
use crate::value_objects::QueryParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value Object: Parsed Service Identifier
///
/// Short-lived structured form of an identifier, handed to constructors.
///
/// ## Example
///
/// ```rust
/// use svcreg_domain::value_objects::ParsedDescriptor;
///
/// let parsed = ParsedDescriptor::parse("redis://localhost:6379/0?ttl=300").unwrap();
/// assert_eq!(parsed.scheme, "redis");
/// assert_eq!(parsed.authority, "localhost:6379");
/// assert_eq!(parsed.path, "/0");
/// assert_eq!(parsed.query.get("ttl"), Some("300"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDescriptor {
    /// Lowercased scheme token
    pub scheme: String,
    /// `[user[:password]@]host[:port]`, empty when the identifier has none
    pub authority: String,
    /// Path as written, including its leading `/` for URL forms;
    /// `module[:attribute]` for the dynamic-import form
    pub path: String,
    /// Decoded query parameters
    pub query: QueryParams,
    /// The identifier exactly as supplied (trimmed)
    pub raw: String,
}

impl ParsedDescriptor {
    /// Parse a raw identifier
    ///
    /// Only the scheme token is validated. Authority and path are kept as
    /// written: hosts are not lowercased, ports are not range-checked and
    /// percent-escapes are left in place for the constructor to interpret.
    pub fn parse(identifier: &str) -> Result<Self> {
        let raw = identifier.trim();
        if raw.is_empty() {
            return Err(Error::malformed_identifier(identifier, "identifier is empty"));
        }

        let (scheme, rest) = split_scheme(raw)?;

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (hier, query) = match rest.split_once('?') {
            Some((hier, query)) => (hier, Some(query)),
            None => (rest, None),
        };

        let (authority, path, has_authority) = match hier.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (&after[..end], &after[end..], true)
            }
            None => ("", hier, false),
        };

        let descriptor = Self {
            scheme,
            authority: authority.to_string(),
            path: path.to_string(),
            query: query.map(QueryParams::from_query).unwrap_or_default(),
            raw: raw.to_string(),
        };

        if descriptor.is_dynamic_import() {
            if has_authority {
                return Err(Error::malformed_identifier(
                    raw,
                    "dynamic-import targets take the form python:module[:attribute]",
                ));
            }
            descriptor.import_target()?;
        }

        Ok(descriptor)
    }

    /// Whether this descriptor uses the dynamic-import scheme
    pub fn is_dynamic_import(&self) -> bool {
        self.scheme == DYNAMIC_IMPORT_SCHEME
    }

    /// Split the path of a dynamic-import descriptor into module and attribute
    pub fn import_target(&self) -> Result<ImportTarget> {
        if !self.is_dynamic_import() {
            return Err(Error::malformed_identifier(
                &self.raw,
                format!("scheme '{}' is not a dynamic-import scheme", self.scheme),
            ));
        }
        ImportTarget::parse(&self.path).map_err(|reason| Error::malformed_identifier(&self.raw, reason))
    }

    /// Path with its leading `/` removed
    pub fn path_segment(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

impl FromStr for ParsedDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split `scheme:rest`, returning the lowercased scheme.
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`.
fn split_scheme(raw: &str) -> Result<(String, &str)> {
    let Some((scheme, rest)) = raw.split_once(':') else {
        return Err(Error::malformed_identifier(raw, "missing scheme"));
    };

    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return Err(Error::malformed_identifier(raw, format!("invalid scheme '{scheme}'")));
    }

    Ok((scheme.to_ascii_lowercase(), rest))
}

/// Value Object: Dynamic-Import Target
///
/// `module` is a dotted path (`pkg.module`); `attribute` is the optional
/// name following the first `:`. Attribute names may themselves be dotted
/// (`Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportTarget {
    /// Dotted module path
    pub module: String,
    /// Attribute to retrieve from the module; `None` selects the default export
    pub attribute: Option<String>,
}

impl ImportTarget {
    fn parse(path: &str) -> std::result::Result<Self, String> {
        let (module, attribute) = match path.split_once(IMPORT_ATTRIBUTE_SEPARATOR) {
            Some((module, attribute)) => (module, Some(attribute)),
            None => (path, None),
        };

        if module.is_empty() {
            return Err("missing module path after 'python:'".to_string());
        }
        if module.split(MODULE_PATH_SEPARATOR).any(str::is_empty) {
            return Err(format!("invalid module path '{module}'"));
        }
        if attribute.is_some_and(str::is_empty) {
            return Err("empty attribute name after ':'".to_string());
        }

        Ok(Self {
            module: module.to_string(),
            attribute: attribute.map(str::to_string),
        })
    }

    /// `module:attribute` display form used in error messages
    pub fn qualified_name(&self) -> String {
        match &self.attribute {
            Some(attribute) => format!("{}{IMPORT_ATTRIBUTE_SEPARATOR}{attribute}", self.module),
            None => self.module.clone(),
        }
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}
