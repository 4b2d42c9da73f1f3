//! Typed view over track-bearing BML elements

use kart_bml::Node;

use crate::layout::ElementTags;

/// Kind of a BML element, decided once by tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Primary,
    CrzVariant,
    ReverseVariant,
    Other,
}

impl ElementTags {
    /// Classify an element name
    pub fn classify(&self, name: &str) -> ElementKind {
        if name == self.primary {
            ElementKind::Primary
        } else if name == self.crz_variant {
            ElementKind::CrzVariant
        } else if name == self.reverse_variant {
            ElementKind::ReverseVariant
        } else {
            ElementKind::Other
        }
    }
}

/// A classified element with typed attribute access
#[derive(Debug, Clone, Copy)]
pub struct TrackElement<'a> {
    pub kind: ElementKind,
    node: &'a Node,
}

/// Trimmed attribute value, absent when missing or blank
fn trimmed<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    node.attr(key).map(str::trim).filter(|v| !v.is_empty())
}

impl<'a> TrackElement<'a> {
    pub fn new(kind: ElementKind, node: &'a Node) -> Self {
        Self { kind, node }
    }

    /// Trimmed `id` attribute
    pub fn id(&self) -> Option<&'a str> {
        trimmed(self.node, "id")
    }

    /// Trimmed `refId` attribute
    pub fn ref_id(&self) -> Option<&'a str> {
        trimmed(self.node, "refId")
    }

    /// Track identifier: `id`, falling back to `refId`
    ///
    /// The fallback applies when `id` is missing or empty. A whitespace-only
    /// `id` is still chosen over `refId` and then trims to nothing.
    pub fn identifier(&self) -> Option<&'a str> {
        let raw = self
            .node
            .attr("id")
            .filter(|v| !v.is_empty())
            .or_else(|| self.node.attr("refId"))?;
        Some(raw.trim()).filter(|v| !v.is_empty())
    }

    /// Trimmed display name
    pub fn name(&self) -> Option<&'a str> {
        trimmed(self.node, "name")
    }

    /// Raw `gameType` annotation
    pub fn game_type(&self) -> Option<&'a str> {
        self.node.attr("gameType").filter(|v| !v.is_empty())
    }

    /// `difficulty` attribute, when it parses as a small integer
    pub fn difficulty(&self) -> Option<u8> {
        trimmed(self.node, "difficulty").and_then(|v| v.parse().ok())
    }
}

/// Track elements of one document, grouped by kind in document order
#[derive(Debug, Default)]
pub struct ElementScan<'a> {
    pub primary: Vec<TrackElement<'a>>,
    pub crz_variant: Vec<TrackElement<'a>>,
    pub reverse_variant: Vec<TrackElement<'a>>,
}

impl<'a> ElementScan<'a> {
    /// Collect track elements among the descendants of `root`
    pub fn collect(root: &'a Node, tags: &ElementTags) -> Self {
        let mut scan = Self::default();
        for node in root.descendants() {
            let kind = tags.classify(&node.name);
            let bucket = match kind {
                ElementKind::Primary => &mut scan.primary,
                ElementKind::CrzVariant => &mut scan.crz_variant,
                ElementKind::ReverseVariant => &mut scan.reverse_variant,
                ElementKind::Other => continue,
            };
            bucket.push(TrackElement::new(kind, node));
        }
        scan
    }

    /// Primary and crz-variant elements, primary first
    pub fn named(&self) -> impl Iterator<Item = &TrackElement<'a>> {
        self.primary.iter().chain(&self.crz_variant)
    }

    /// Every track element, kind by kind
    pub fn all(&self) -> impl Iterator<Item = &TrackElement<'a>> {
        self.named().chain(&self.reverse_variant)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.crz_variant.is_empty() && self.reverse_variant.is_empty()
    }
}
