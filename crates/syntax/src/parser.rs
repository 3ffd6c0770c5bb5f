// Chunk: docs/chunks/markdown_syntax_tree - Tree-sitter Markdown parsing into typed nodes

//! Markup parsing.
//!
//! [`SyntaxParser`] is the contract the engine consumes: a pure function from
//! text to an optional [`Document`]. [`MarkdownParser`] implements it with the
//! tree-sitter-md block and inline grammars.
//!
//! ## Two-pass parsing
//!
//! tree-sitter-md splits Markdown into a block grammar (headings, lists, code
//! blocks) and an inline grammar (emphasis, code spans, links). The block tree
//! marks inline content with `inline` nodes; each one is re-parsed with the
//! inline grammar restricted to that node's bytes via included ranges, so the
//! inline tree reports offsets in source coordinates and can be grafted in
//! place.

use markstore_buffer::TextRange;
use tree_sitter::{Node as TsNode, Parser, Range};

use crate::node::{Document, Node, NodeKind};

/// Turns source text into a [`Document`].
///
/// Implementations must be pure: the result depends only on `text`, and no
/// state carries over between calls. Returning `None` means the text has no
/// usable structure; callers treat that as a normal outcome.
pub trait SyntaxParser {
    fn parse(&self, text: &str) -> Option<Document>;
}

impl<F> SyntaxParser for F
where
    F: Fn(&str) -> Option<Document>,
{
    fn parse(&self, text: &str) -> Option<Document> {
        self(text)
    }
}

/// A Markdown parser backed by tree-sitter-md.
///
/// Fresh tree-sitter parsers are created for every call so that parsing has
/// no shared mutable state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxParser for MarkdownParser {
    fn parse(&self, text: &str) -> Option<Document> {
        let mut block = Parser::new();
        if let Err(err) = block.set_language(&tree_sitter_md::LANGUAGE.into()) {
            tracing::warn!("markdown block grammar unavailable: {err}");
            return None;
        }
        let mut inline = Parser::new();
        if let Err(err) = inline.set_language(&tree_sitter_md::INLINE_LANGUAGE.into()) {
            tracing::warn!("markdown inline grammar unavailable: {err}");
            return None;
        }

        let tree = block.parse(text, None)?;
        let mut converter = Converter {
            source: text,
            inline,
        };
        let root = converter.convert_block(tree.root_node())?;
        let document = Document::new(root);
        tracing::trace!(nodes = document.node_count(), "converted markdown tree");
        Some(document)
    }
}

/// Converts tree-sitter nodes into [`Node`]s.
struct Converter<'s> {
    source: &'s str,
    inline: Parser,
}

impl Converter<'_> {
    fn convert_block(&mut self, node: TsNode<'_>) -> Option<Node> {
        if !node.is_named() || node.kind() == "block_continuation" {
            return None;
        }
        let range = TextRange::new(node.start_byte(), node.end_byte());
        if node.kind() == "inline" {
            return Some(self.convert_inline_content(node, range));
        }

        let kind = block_kind(node);
        let mut cursor = node.walk();
        let named: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();
        let children = named
            .into_iter()
            .filter_map(|child| self.convert_block(child))
            .collect();

        Some(Node::new(kind, range).with_children(children))
    }

    /// Re-parses a block-level `inline` node with the inline grammar.
    fn convert_inline_content(&mut self, node: TsNode<'_>, range: TextRange) -> Node {
        let mut children = Vec::new();
        let ranges = included_ranges(node);

        if !ranges.is_empty() && self.inline.set_included_ranges(&ranges).is_ok() {
            if let Some(tree) = self.inline.parse(self.source, None) {
                let root = tree.root_node();
                let mut cursor = root.walk();
                for child in root.named_children(&mut cursor) {
                    if let Some(converted) = convert_inline(child) {
                        if converted.range.is_some_and(|r| range.contains_range(r)) {
                            children.push(converted);
                        }
                    }
                }
            }
        }

        Node::new(NodeKind::Inline, range).with_children(fill_gaps(range, children))
    }
}

fn convert_inline(node: TsNode<'_>) -> Option<Node> {
    if !node.is_named() {
        return None;
    }
    let range = TextRange::new(node.start_byte(), node.end_byte());
    let kind = inline_kind(node.kind());

    let mut cursor = node.walk();
    let mut children: Vec<Node> = node
        .named_children(&mut cursor)
        .filter_map(convert_inline)
        .collect();
    if kind.is_prose() {
        children = fill_gaps(range, children);
    }

    Some(Node::new(kind, range).with_children(children))
}

/// Returns the byte ranges of `node` not covered by block continuations.
///
/// Continuation markers (such as the `>` of a multi-line quote) must not reach
/// the inline grammar. The block grammar's anonymous delimiter tokens under
/// `inline` stay in, the inline grammar needs them to find emphasis.
fn included_ranges(node: TsNode<'_>) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut start_byte = node.start_byte();
    let mut start_point = node.start_position();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "block_continuation" {
            continue;
        }
        if child.start_byte() > start_byte {
            ranges.push(Range {
                start_byte,
                end_byte: child.start_byte(),
                start_point,
                end_point: child.start_position(),
            });
        }
        if child.end_byte() > start_byte {
            start_byte = child.end_byte();
            start_point = child.end_position();
        }
    }

    if node.end_byte() > start_byte {
        ranges.push(Range {
            start_byte,
            end_byte: node.end_byte(),
            start_point,
            end_point: node.end_position(),
        });
    }
    ranges
}

/// Inserts [`NodeKind::Text`] nodes for the bytes of `range` no child covers.
fn fill_gaps(range: TextRange, children: Vec<Node>) -> Vec<Node> {
    let mut filled = Vec::with_capacity(children.len() * 2 + 1);
    let mut covered_until = range.start;

    for child in children {
        if let Some(child_range) = child.range {
            if child_range.start > covered_until {
                filled.push(Node::new(
                    NodeKind::Text,
                    TextRange::new(covered_until, child_range.start),
                ));
            }
            covered_until = covered_until.max(child_range.end);
        }
        filled.push(child);
    }

    if range.end > covered_until {
        filled.push(Node::new(
            NodeKind::Text,
            TextRange::new(covered_until, range.end),
        ));
    }
    filled
}

fn block_kind(node: TsNode<'_>) -> NodeKind {
    match node.kind() {
        "document" => NodeKind::Document,
        "section" => NodeKind::Section,
        "paragraph" => NodeKind::Paragraph,
        "atx_heading" | "setext_heading" => NodeKind::Heading {
            level: heading_level(node),
        },
        "atx_h1_marker" | "atx_h2_marker" | "atx_h3_marker" | "atx_h4_marker"
        | "atx_h5_marker" | "atx_h6_marker" | "setext_h1_underline" | "setext_h2_underline" => {
            NodeKind::HeadingMarker
        }
        "block_quote" => NodeKind::BlockQuote,
        "block_quote_marker" => NodeKind::Delimiter,
        "list" => NodeKind::List,
        "list_item" => NodeKind::ListItem,
        "task_list_marker_checked" | "task_list_marker_unchecked" => NodeKind::ListMarker,
        kind if kind.starts_with("list_marker") => NodeKind::ListMarker,
        "fenced_code_block" | "indented_code_block" => NodeKind::CodeBlock,
        "fenced_code_block_delimiter" => NodeKind::CodeFence,
        "thematic_break" => NodeKind::ThematicBreak,
        "html_block" => NodeKind::HtmlBlock,
        "link_reference_definition" => NodeKind::Link,
        "link_label" => NodeKind::LinkText,
        "link_destination" => NodeKind::LinkDestination,
        _ => NodeKind::Other,
    }
}

fn heading_level(node: TsNode<'_>) -> u8 {
    let mut cursor = node.walk();
    let level = node
        .named_children(&mut cursor)
        .find_map(|child| match child.kind() {
            "atx_h1_marker" | "setext_h1_underline" => Some(1),
            "atx_h2_marker" | "setext_h2_underline" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
    level.unwrap_or(1)
}

fn inline_kind(kind: &str) -> NodeKind {
    match kind {
        "emphasis" => NodeKind::Emphasis,
        "strong_emphasis" => NodeKind::Strong,
        "strikethrough" => NodeKind::Strikethrough,
        "emphasis_delimiter" | "code_span_delimiter" => NodeKind::Delimiter,
        "code_span" => NodeKind::CodeSpan,
        "inline_link" | "full_reference_link" | "collapsed_reference_link"
        | "shortcut_link" => NodeKind::Link,
        "image" => NodeKind::Image,
        "link_text" | "link_label" | "image_description" => NodeKind::LinkText,
        "link_destination" => NodeKind::LinkDestination,
        "uri_autolink" | "email_autolink" => NodeKind::Autolink,
        "backslash_escape" | "entity_reference" | "numeric_character_reference" => {
            NodeKind::Escape
        }
        _ => NodeKind::Other,
    }
}
