// src/checker/extract.rs
// =============================================================================
// Finds URI occurrences in a parsed document.
//
// Two sources: plain-text nodes are scanned with a permissive URI pattern,
// and link nodes contribute their destination URL directly. Each occurrence
// records the node it came from and the URI's offset inside that node, so
// the reporter can place diagnostics and fixes.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

use crate::document::{Document, NodeId, NodeKind, NodeTag};

// Scheme-optional, www-optional host with a 2-6 letter TLD, then a
// permissive path/query/fragment tail.
static URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://|www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z]{2,6}\b[-a-zA-Z0-9@:%_+.~#?&/=]*",
    )
    .expect("URI pattern must compile")
});

/// One link candidate found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriOccurrence {
    pub node: NodeId,
    pub uri: String,
    /// Byte offset of the URI within the node's raw source, so that
    /// `node.span.start + offset` always lands on the URI in the document.
    pub offset: usize,
}

/// Scans plain text for URI-looking substrings, returning each match with
/// its byte offset in the text.
pub fn scan_text(text: &str) -> Vec<(String, usize)> {
    URI_PATTERN
        .find_iter(text)
        .map(|m| (m.as_str().to_string(), m.start()))
        .collect()
}

/// Collects every URI occurrence in the document, in document order.
///
/// Skip rules:
/// - anything nested inside a block quote (quoted content is not checked)
/// - text nested inside a link (the link node already covers that URI)
/// - link nodes with an empty target (placeholder anchors)
pub fn extract_occurrences(document: &Document) -> Vec<UriOccurrence> {
    let mut occurrences = Vec::new();

    for (id, node) in document.iter() {
        if document.is_nested_in(id, NodeTag::BlockQuote) {
            continue;
        }
        match &node.kind {
            NodeKind::Text => {
                if document.is_nested_in(id, NodeTag::Link) {
                    continue;
                }
                // Scan the raw source slice, not the decoded event text:
                // raw offsets stay valid as source indices even around
                // escapes and entity references.
                for (uri, offset) in scan_text(document.raw(id)) {
                    occurrences.push(UriOccurrence {
                        node: id,
                        uri,
                        offset,
                    });
                }
            }
            NodeKind::Link { url } => {
                if url.is_empty() {
                    continue;
                }
                // Offset of the URL inside the link's raw source; 0 when the
                // raw source does not contain it (e.g. collapsed reference
                // links).
                let offset = document.raw(id).find(url.as_str()).unwrap_or(0);
                occurrences.push(UriOccurrence {
                    node: id,
                    uri: url.clone(),
                    offset,
                });
            }
            _ => {}
        }
    }

    occurrences
}
