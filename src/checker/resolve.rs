// src/checker/resolve.rs
// =============================================================================
// Turns relative references into absolute URIs.
//
// The base is the configured base URI when set, otherwise the path of the
// file being linted (as a file:// URL). Resolution follows RFC 3986 via
// Url::join. With no base at all there is nothing to resolve against and the
// caller reports RESOLVE_ERROR_MESSAGE instead of probing.
// =============================================================================

use std::path::Path;
use url::Url;

pub const RESOLVE_ERROR_MESSAGE: &str =
    "Unable to resolve the relative URI. Please check if the base URI is correctly specified.";

/// Resolves `uri` against the configured base URI or the linted file's path.
/// `None` means resolution failed and the occurrence must be reported, not
/// probed.
pub fn resolve(uri: &str, base_uri: Option<&str>, file_path: Option<&Path>) -> Option<Url> {
    if let Some(base) = base_uri {
        return Url::parse(base).ok()?.join(uri).ok();
    }

    let path = file_path?;
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    Url::from_file_path(&absolute).ok()?.join(uri).ok()
}
