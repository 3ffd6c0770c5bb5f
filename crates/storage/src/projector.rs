// Chunk: docs/chunks/attribute_projection - Cascading attribute projection

//! Projection of a syntax tree onto attribute ranges.
//!
//! The projector walks a [`Document`] depth-first, parents before children,
//! and overlay-writes each styled node's attributes on exactly that node's
//! range. Because deeper nodes are written later, narrower ranges win for the
//! keys they set while keys they leave alone show the parent's values.
//!
//! Fonts cascade: a node's font traits directive is merged into the font
//! resolved for its parent, and the merged font is what its children inherit.
//! Bold inside a heading therefore stays at heading size, and italic inside
//! bold yields bold italic.

use markstore_buffer::{AttributeSet, Font, TextRange, TextSurface};
use markstore_syntax::{Document, Node, StyleTheme};

/// One projected write: a range and the attributes overlaid on it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRange {
    pub range: TextRange,
    pub attributes: AttributeSet,
}

/// Resolves node attributes through a theme and writes them to a surface.
pub struct AttributeProjector<'a> {
    theme: &'a dyn StyleTheme,
}

impl<'a> AttributeProjector<'a> {
    pub fn new(theme: &'a dyn StyleTheme) -> Self {
        Self { theme }
    }

    /// Overlays every styled node of `document` onto `surface`.
    ///
    /// The surface is expected to already carry the base attributes; this
    /// only layers node attributes on top.
    pub fn project<S>(&self, document: &Document, base_font: &Font, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        self.visit(document.root(), base_font, None, &mut |styled| {
            surface.add_attributes(styled.range, &styled.attributes);
        });
    }

    /// Returns the writes [`project`](Self::project) would perform, in order.
    pub fn resolve(&self, document: &Document, base_font: &Font) -> Vec<StyledRange> {
        let mut writes = Vec::new();
        self.visit(document.root(), base_font, None, &mut |styled| {
            writes.push(styled)
        });
        writes
    }

    fn visit(
        &self,
        node: &Node,
        inherited: &Font,
        bound: Option<TextRange>,
        emit: &mut dyn FnMut(StyledRange),
    ) {
        debug_assert!(
            match (bound, node.range) {
                (Some(outer), Some(inner)) => outer.contains_range(inner),
                _ => true,
            },
            "{:?} at {:?} escapes its parent range {:?}",
            node.kind,
            node.range,
            bound
        );

        let mut current_font = inherited.clone();

        if let (Some(mut attributes), Some(range)) = (self.theme.attributes_for(node), node.range) {
            // Only a traits directive amends the font. Sets without one are
            // written as given and the inherited font passes through.
            if let Some(traits) = attributes.take_font_traits() {
                let merged = match attributes.font() {
                    // Family and size from the set, traits accumulated
                    Some(font) => Font {
                        family: font.family.clone(),
                        size: font.size,
                        traits: current_font.traits | font.traits | traits,
                    },
                    None => current_font.adding_traits(traits),
                };
                attributes.set_font(merged.clone());
                current_font = merged;
            }

            tracing::trace!(kind = ?node.kind, ?range, traits = %current_font.traits, "project node");
            emit(StyledRange { range, attributes });
        }

        let bound = node.range.or(bound);
        for child in &node.children {
            self.visit(child, &current_font, bound, emit);
        }
    }
}
