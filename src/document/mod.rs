// src/document/mod.rs
// =============================================================================
// The host document model: a tree of typed nodes with byte spans into the
// original source, plus the diagnostic types the lint core emits against it.
//
// Submodules:
// - markdown: builds a Document from markdown text via pulldown-cmark
// =============================================================================

pub mod markdown;

use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Index of a node inside its [`Document`].
pub type NodeId = usize;

/// What a node is. Containers the linter does not care about (headings,
/// lists, emphasis, ...) all collapse into `Container`. Text nodes carry no
/// decoded value: their content is the raw source slice under their span,
/// which keeps every extraction offset an exact index into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    BlockQuote,
    Container,
    Link { url: String },
    Text,
}

/// Coarse node type used for ancestor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Document,
    BlockQuote,
    Container,
    Link,
    Text,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Document => NodeTag::Document,
            NodeKind::BlockQuote => NodeTag::BlockQuote,
            NodeKind::Container => NodeTag::Container,
            NodeKind::Link { .. } => NodeTag::Link,
            NodeKind::Text => NodeTag::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte range of this node in the document source.
    pub span: Range<usize>,
    pub parent: Option<NodeId>,
}

/// A parsed document: the source text, the node arena (in document order)
/// and, when the document came from disk, the path it was read from.
#[derive(Debug)]
pub struct Document {
    source: String,
    file_path: Option<PathBuf>,
    nodes: Vec<Node>,
}

impl Document {
    pub(crate) fn new(source: String, file_path: Option<PathBuf>) -> Self {
        let root = Node {
            kind: NodeKind::Document,
            span: 0..source.len(),
            parent: None,
        };
        Document {
            source,
            file_path,
            nodes: vec![root],
        }
    }

    pub(crate) fn push_node(&mut self, kind: NodeKind, span: Range<usize>, parent: NodeId) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Iterates over all nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// The raw source slice covered by a node.
    pub fn raw(&self, id: NodeId) -> &str {
        let span = &self.nodes[id].span;
        &self.source[span.clone()]
    }

    /// Path of the file this document was read from, if any. Used as the
    /// resolution base for relative URIs when no base URI is configured.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// True when `id` has an ancestor of the given node type.
    pub fn is_nested_in(&self, id: NodeId, tag: NodeTag) -> bool {
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            if self.nodes[parent].kind.tag() == tag {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    /// 1-based (line, column) of a byte offset in the source.
    pub fn line_col(&self, byte: usize) -> (usize, usize) {
        let byte = byte.min(self.source.len());
        let before = &self.source[..byte];
        let line = before.matches('\n').count() + 1;
        let col = byte - before.rfind('\n').map_or(0, |i| i + 1) + 1;
        (line, col)
    }
}

/// A suggested text replacement, as a half-open node-relative byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Fix {
    pub fn replace_range(start: usize, end: usize, text: impl Into<String>) -> Self {
        Fix {
            start,
            end,
            text: text.into(),
        }
    }
}

/// A problem reported against a document position. `offset` is relative to
/// the start of the anchor node's source.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub node: NodeId,
    pub message: String,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

/// Where diagnostics go. The CLI supplies a collecting implementation; tests
/// supply their own.
pub trait ReportSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Simple sink that keeps every diagnostic in order of emission.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
}

impl ReportSink for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_in_walks_all_ancestors() {
        let mut doc = Document::new("> [a](b)".to_string(), None);
        let quote = doc.push_node(NodeKind::BlockQuote, 0..8, 0);
        let link = doc.push_node(
            NodeKind::Link { url: "b".to_string() },
            2..8,
            quote,
        );
        let text = doc.push_node(NodeKind::Text, 3..4, link);

        assert!(doc.is_nested_in(text, NodeTag::Link));
        assert!(doc.is_nested_in(text, NodeTag::BlockQuote));
        assert!(doc.is_nested_in(link, NodeTag::BlockQuote));
        assert!(!doc.is_nested_in(link, NodeTag::Link));
        assert!(!doc.is_nested_in(quote, NodeTag::BlockQuote));
    }

    #[test]
    fn test_line_col() {
        let doc = Document::new("one\ntwo\nthree".to_string(), None);
        assert_eq!(doc.line_col(0), (1, 1));
        assert_eq!(doc.line_col(4), (2, 1));
        assert_eq!(doc.line_col(6), (2, 3));
        assert_eq!(doc.line_col(8), (3, 1));
    }
}
