//! Filesystem paths carried in identifier paths

use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use svcreg_domain::error::{Error, Result};

/// Percent-decode an identifier path into a filesystem path
///
/// Identifiers keep their path as written, so `file:///tmp/my%20dir` and
/// `file:///tmp/my dir` both name `/tmp/my dir`.
pub fn decode_path(path: &str) -> Result<PathBuf> {
    percent_decode_str(path)
        .decode_utf8()
        .map(|decoded| PathBuf::from(decoded.as_ref()))
        .map_err(|e| Error::invalid_argument(format!("path '{path}' is not valid UTF-8: {e}")))
}
