/// Element filter and normalizer.
///
/// Walks every node of the dump once, in document order, and keeps the ones an
/// agent could act on or read:
///
/// - interactive: `clickable`, `checkable`, `long-clickable` or `focusable`;
/// - or carrying content: non-empty `text` or `content-desc`;
/// - and in both cases with a parseable, non-degenerate `bounds`.
///
/// Filtering is per node. Children of a discarded node are still visited.
///
/// `focusable` stands in for "editable". It flags every focusable widget, not
/// only text fields, and misses editable widgets that are not marked focusable.
/// The dump exposes no better signal.
use crate::perception::hierarchy::RawNode;
use crate::perception::types::{Bounds, UiElement};

/// Typed view over the attributes the filter reads. Missing attributes become
/// empty strings or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttributes {
    pub resource_id: String,
    pub text: String,
    pub content_desc: String,
    pub class: String,
    pub bounds: Option<String>,
    pub clickable: bool,
    pub checkable: bool,
    pub long_clickable: bool,
    pub focusable: bool,
}

impl NodeAttributes {
    pub fn from_node(node: &RawNode) -> Self {
        let string = |name: &str| node.attr(name).unwrap_or_default().to_string();
        Self {
            resource_id: string("resource-id"),
            text: string("text"),
            content_desc: string("content-desc"),
            class: string("class"),
            bounds: node.attr("bounds").map(str::to_string),
            clickable: attr_flag(node.attr("clickable")),
            checkable: attr_flag(node.attr("checkable")),
            long_clickable: attr_flag(node.attr("long-clickable")),
            focusable: attr_flag(node.attr("focusable")),
        }
    }

    /// Heuristic: see module docs.
    pub fn is_editable(&self) -> bool {
        self.focusable
    }

    pub fn is_interactive(&self) -> bool {
        self.clickable || self.checkable || self.long_clickable || self.is_editable()
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty() || !self.content_desc.is_empty()
    }
}

/// The one place a boolean attribute is interpreted. Only the exact string
/// `"true"` counts.
pub fn attr_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Outcome of running one node through the retention heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retention {
    Keep(Bounds),
    /// Neither interactive nor carrying text.
    NotRelevant,
    /// Relevant, but `bounds` is missing, malformed or zero-area.
    InvalidGeometry,
}

pub fn evaluate(attrs: &NodeAttributes) -> Retention {
    if !attrs.is_interactive() && !attrs.has_content() {
        return Retention::NotRelevant;
    }
    match attrs.bounds.as_deref().and_then(Bounds::parse) {
        Some(bounds) if bounds.is_valid() => Retention::Keep(bounds),
        _ => Retention::InvalidGeometry,
    }
}

/// `android.widget.Button` -> `Button`. Names without a dot are returned as is.
pub fn short_class_name(class: &str) -> &str {
    class.rsplit('.').next().unwrap_or(class)
}

/// Extracts the retained elements of a dump, in document order, with ids
/// `1..=n`.
pub fn extract_elements(root: &RawNode) -> Vec<UiElement> {
    let mut elements = Vec::new();
    let mut not_relevant = 0usize;
    let mut bad_geometry = 0usize;

    for node in root.descendants() {
        let attrs = NodeAttributes::from_node(node);
        let bounds = match evaluate(&attrs) {
            Retention::Keep(bounds) => bounds,
            Retention::NotRelevant => {
                not_relevant += 1;
                continue;
            }
            Retention::InvalidGeometry => {
                tracing::trace!(
                    class = %attrs.class,
                    bounds = ?attrs.bounds,
                    "discarding node with unusable bounds"
                );
                bad_geometry += 1;
                continue;
            }
        };

        let is_editable = attrs.is_editable();
        elements.push(UiElement {
            id: elements.len() as u32 + 1,
            element_type: short_class_name(&attrs.class).to_string(),
            text: attrs.text,
            description: attrs.content_desc,
            resource_id: attrs.resource_id,
            center: bounds.center(),
            bounds,
            is_clickable: attrs.clickable,
            is_editable,
        });
    }

    tracing::debug!(
        kept = elements.len(),
        not_relevant,
        bad_geometry,
        "UI elements extracted"
    );
    elements
}
