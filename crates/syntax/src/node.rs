// Chunk: docs/chunks/markdown_syntax_tree - Typed syntax tree for projection

//! The syntax tree handed from the parser to the projector.
//!
//! A [`Document`] is built fresh on every parse and never mutated afterwards.
//! Each [`Node`] carries a closed [`NodeKind`], an optional byte range and its
//! ordered children.

use markstore_buffer::TextRange;

/// The kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Section,
    Paragraph,
    /// ATX (`#`) or setext (underlined) heading, level 1-6.
    Heading { level: u8 },
    /// `#` markers and setext underlines.
    HeadingMarker,
    BlockQuote,
    List,
    ListItem,
    ListMarker,
    /// Fenced or indented code block.
    CodeBlock,
    /// The ``` or ~~~ line of a fenced code block.
    CodeFence,
    CodeSpan,
    Emphasis,
    Strong,
    Strikethrough,
    /// Inline, reference or definition link.
    Link,
    LinkText,
    LinkDestination,
    Image,
    Autolink,
    ThematicBreak,
    HtmlBlock,
    /// A run of inline content inside a block.
    Inline,
    /// Emphasis, code span and quote markers.
    Delimiter,
    /// Backslash escapes and character references.
    Escape,
    /// Plain text with no markup.
    Text,
    /// Any construct without dedicated treatment.
    Other,
}

impl NodeKind {
    /// Returns the style class this kind is drawn with, or `None` for
    /// structural kinds that only inherit.
    ///
    /// Class names are dotted so themes can fall back to a shorter prefix
    /// (`text.title.4` falls back to `text.title`).
    pub fn style_name(&self) -> Option<&'static str> {
        let name = match self {
            NodeKind::Heading { level } => match level {
                1 => "text.title.1",
                2 => "text.title.2",
                3 => "text.title.3",
                4 => "text.title.4",
                5 => "text.title.5",
                _ => "text.title.6",
            },
            NodeKind::HeadingMarker
            | NodeKind::ListMarker
            | NodeKind::CodeFence
            | NodeKind::Delimiter
            | NodeKind::ThematicBreak => "punctuation.special",
            NodeKind::BlockQuote => "text.quote",
            NodeKind::CodeBlock => "text.literal.block",
            NodeKind::CodeSpan => "text.literal",
            NodeKind::Emphasis => "text.emphasis",
            NodeKind::Strong => "text.strong",
            NodeKind::Strikethrough => "text.strike",
            NodeKind::Link => "text.reference",
            NodeKind::Image => "text.reference.image",
            NodeKind::LinkDestination | NodeKind::Autolink => "text.uri",
            NodeKind::HtmlBlock => "text.html",
            NodeKind::Escape => "escape",
            NodeKind::Document
            | NodeKind::Section
            | NodeKind::Paragraph
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::LinkText
            | NodeKind::Inline
            | NodeKind::Text
            | NodeKind::Other => return None,
        };
        Some(name)
    }

    /// Returns true for kinds whose uncovered bytes are plain prose.
    pub fn is_prose(&self) -> bool {
        matches!(
            self,
            NodeKind::Inline
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Strikethrough
                | NodeKind::LinkText
        )
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Source span, absent for purely structural nodes.
    pub range: Option<TextRange>,
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node covering `range`.
    pub fn new(kind: NodeKind, range: TextRange) -> Self {
        Self {
            kind,
            range: Some(range),
            children: Vec::new(),
        }
    }

    /// Creates a node with no source span.
    pub fn structural(kind: NodeKind) -> Self {
        Self {
            kind,
            range: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Returns the source text this node covers.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        let range = self.range?;
        source.get(range.start..range.end)
    }

    /// Checks that every ranged descendant lies within its nearest ranged
    /// ancestor.
    pub fn is_well_nested(&self) -> bool {
        fn check(node: &Node, bound: Option<TextRange>) -> bool {
            let bound = match (bound, node.range) {
                (Some(outer), Some(inner)) if !outer.contains_range(inner) => return false,
                (_, Some(inner)) => Some(inner),
                (outer, None) => outer,
            };
            node.children.iter().all(|child| check(child, bound))
        }
        check(self, None)
    }

    /// Iterates over this node and its descendants in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Returns the first node (pre-order) of the given kind.
    pub fn find(&self, kind: NodeKind) -> Option<&Node> {
        self.walk().find(|node| node.kind == kind)
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// The root of one completed parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    pub fn find(&self, kind: NodeKind) -> Option<&Node> {
        self.root.find(kind)
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        // "a *b* c"
        Node::new(NodeKind::Paragraph, TextRange::new(0, 7)).with_children(vec![
            Node::new(NodeKind::Text, TextRange::new(0, 2)),
            Node::new(NodeKind::Emphasis, TextRange::new(2, 5)).with_children(vec![
                Node::new(NodeKind::Delimiter, TextRange::new(2, 3)),
                Node::new(NodeKind::Text, TextRange::new(3, 4)),
                Node::new(NodeKind::Delimiter, TextRange::new(4, 5)),
            ]),
            Node::new(NodeKind::Text, TextRange::new(5, 7)),
        ])
    }

    #[test]
    fn test_walk_is_pre_order() {
        let root = sample();
        let kinds: Vec<NodeKind> = root.walk().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Paragraph,
                NodeKind::Text,
                NodeKind::Emphasis,
                NodeKind::Delimiter,
                NodeKind::Text,
                NodeKind::Delimiter,
                NodeKind::Text,
            ]
        );
    }

    #[test]
    fn test_find_and_text() {
        let root = sample();
        let emphasis = root.find(NodeKind::Emphasis).unwrap();
        assert_eq!(emphasis.text("a *b* c"), Some("*b*"));
        assert!(root.find(NodeKind::Strong).is_none());
    }

    #[test]
    fn test_well_nested() {
        assert!(sample().is_well_nested());
    }

    #[test]
    fn test_escaping_child_is_not_well_nested() {
        let root = Node::new(NodeKind::Emphasis, TextRange::new(2, 5))
            .with_children(vec![Node::new(NodeKind::Text, TextRange::new(4, 9))]);
        assert!(!root.is_well_nested());
    }

    #[test]
    fn test_structural_nodes_pass_bound_through() {
        let root = Node::new(NodeKind::Paragraph, TextRange::new(0, 4)).with_children(vec![
            Node::structural(NodeKind::Other)
                .with_children(vec![Node::new(NodeKind::Text, TextRange::new(3, 6))]),
        ]);
        assert!(!root.is_well_nested());

        let unbounded = Node::structural(NodeKind::Document)
            .with_children(vec![Node::new(NodeKind::Text, TextRange::new(3, 6))]);
        assert!(unbounded.is_well_nested());
    }

    #[test]
    fn test_heading_levels_have_distinct_classes() {
        assert_eq!(NodeKind::Heading { level: 1 }.style_name(), Some("text.title.1"));
        assert_eq!(NodeKind::Heading { level: 9 }.style_name(), Some("text.title.6"));
        assert_eq!(NodeKind::Text.style_name(), None);
    }

    #[test]
    fn test_document_counts_nodes() {
        let document = Document::new(sample());
        assert_eq!(document.node_count(), 7);
        assert_eq!(document.root().kind, NodeKind::Paragraph);
    }
}
