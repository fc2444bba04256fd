// src/document/markdown.rs
// =============================================================================
// Builds a Document tree from markdown text.
//
// pulldown-cmark emits a flat stream of Start/End/Text events with byte
// ranges; we fold that stream into the node tree with a parent stack. Only
// block quotes, links and text keep their identity — everything else becomes
// a generic container.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};
use std::path::PathBuf;

use super::{Document, NodeKind};

/// Parses markdown into a [`Document`]. `file_path` is the on-disk origin of
/// the text, when there is one.
pub fn parse(source: &str, file_path: Option<PathBuf>) -> Document {
    let mut doc = Document::new(source.to_string(), file_path);
    let mut stack: Vec<usize> = vec![0];

    // Text inside code blocks is literal content, not prose; it never
    // produces link occurrences.
    let mut code_depth = 0usize;

    for (event, range) in Parser::new(source).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                let kind = match &tag {
                    Tag::BlockQuote => NodeKind::BlockQuote,
                    Tag::Link(_link_type, dest_url, _title) => NodeKind::Link {
                        url: dest_url.to_string(),
                    },
                    Tag::CodeBlock(_) => {
                        code_depth += 1;
                        NodeKind::Container
                    }
                    _ => NodeKind::Container,
                };
                let parent = stack.last().copied().unwrap_or(0);
                let id = doc.push_node(kind, range, parent);
                stack.push(id);
            }
            Event::End(tag) => {
                if matches!(tag, Tag::CodeBlock(_)) {
                    code_depth = code_depth.saturating_sub(1);
                }
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(_) => {
                if code_depth == 0 {
                    let parent = stack.last().copied().unwrap_or(0);
                    doc.push_node(NodeKind::Text, range, parent);
                }
            }
            // Inline code, HTML, breaks, rules: nothing to check.
            _ => {}
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeTag;

    fn links(doc: &Document) -> Vec<(usize, String)> {
        doc.iter()
            .filter_map(|(id, node)| match &node.kind {
                NodeKind::Link { url } => Some((id, url.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_link_node_keeps_url_and_raw_source() {
        let doc = parse("Check out [Rust](https://www.rust-lang.org)!", None);
        let found = links(&doc);
        assert_eq!(found.len(), 1);
        let (id, url) = &found[0];
        assert_eq!(url, "https://www.rust-lang.org");
        assert_eq!(doc.raw(*id), "[Rust](https://www.rust-lang.org)");
    }

    #[test]
    fn test_link_text_is_nested_in_link() {
        let doc = parse("[Rust](https://www.rust-lang.org)", None);
        let text = doc
            .iter()
            .find(|&(id, node)| matches!(node.kind, NodeKind::Text) && doc.raw(id) == "Rust")
            .map(|(id, _)| id)
            .unwrap();
        assert!(doc.is_nested_in(text, NodeTag::Link));
    }

    #[test]
    fn test_blockquote_nesting() {
        let doc = parse("> quoted [a](https://example.com)\n\nplain", None);
        let link = links(&doc)[0].0;
        assert!(doc.is_nested_in(link, NodeTag::BlockQuote));

        let plain = doc
            .iter()
            .find(|&(id, node)| matches!(node.kind, NodeKind::Text) && doc.raw(id) == "plain")
            .map(|(id, _)| id)
            .unwrap();
        assert!(!doc.is_nested_in(plain, NodeTag::BlockQuote));
    }

    #[test]
    fn test_code_block_text_is_not_a_text_node() {
        let doc = parse("```\nhttps://example.com\n```\n", None);
        let text_nodes = doc
            .iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Text))
            .count();
        assert_eq!(text_nodes, 0);
    }
}
