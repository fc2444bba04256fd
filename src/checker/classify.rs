// src/checker/classify.rs
// =============================================================================
// Pure predicates that decide how a URI gets probed: relative references are
// resolved first, local ones hit the filesystem, everything else goes over
// HTTP. Ignored URIs are dropped before any of that.
// =============================================================================

use std::path::Path;
use url::Url;

/// True when the URI has no host component: path-only references, bare
/// `www`-less fragments, `file:` URIs and anything that does not parse as an
/// absolute URL.
pub fn is_relative(uri: &str) -> bool {
    match Url::parse(uri) {
        Ok(parsed) => parsed.host_str().map_or(true, str::is_empty),
        Err(_) => true,
    }
}

/// True when the URI names something on the local filesystem: an absolute
/// path, or any relative reference.
pub fn is_local(uri: &str) -> bool {
    Path::new(uri).is_absolute() || is_relative(uri)
}

/// True when any glob pattern matches the URI string. Patterns that fail to
/// parse never match; a config typo must not abort the run.
pub fn is_ignored(uri: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .filter_map(|pattern| glob::Pattern::new(pattern).ok())
        .any(|pattern| pattern.matches(uri))
}
