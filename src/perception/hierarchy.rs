/// Tree parser for `uiautomator dump` XML.
///
/// Produces an owned node tree with raw string attributes. No coercion happens
/// here; the filter decides what an attribute means.
use std::collections::HashMap;

use crate::errors::{DroidScopeError, DroidScopeResult};

/// One element of the dump, e.g. `<node class="android.widget.Button" ...>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Pre-order, depth-first walk starting at (and including) `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a RawNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a RawNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Parses raw dump bytes into the root element.
///
/// Any byte stream that is not well-formed UTF-8 XML is a
/// [`DroidScopeError::MalformedDocument`]; no partial tree is returned.
pub fn parse_dump(bytes: &[u8]) -> DroidScopeResult<RawNode> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DroidScopeError::MalformedDocument(format!("invalid UTF-8: {e}")))?;
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| DroidScopeError::MalformedDocument(e.to_string()))?;
    let root = build_node(doc.root_element());
    tracing::trace!(tag = %root.tag, "dump parsed");
    Ok(root)
}

fn build_node(node: roxmltree::Node<'_, '_>) -> RawNode {
    let attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    let children = node
        .children()
        .filter(|c| c.is_element())
        .map(build_node)
        .collect();
    RawNode {
        tag: node.tag_name().name().to_string(),
        attributes,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="a">
    <node index="0" text="b">
      <node index="0" text="c" />
    </node>
    <node index="1" text="d" />
  </node>
  <node index="1" text="e" />
</hierarchy>"#;

    #[test]
    fn walks_in_document_order() {
        let root = parse_dump(DUMP.as_bytes()).unwrap();
        assert_eq!(root.tag, "hierarchy");
        let texts: Vec<_> = root.descendants().filter_map(|n| n.attr("text")).collect();
        assert_eq!(texts, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn keeps_attribute_values_raw() {
        let root = parse_dump(
            br#"<hierarchy><node clickable="TRUE" bounds="[0,0][1,1]" text="&amp; more" /></hierarchy>"#,
        )
        .unwrap();
        let node = &root.children[0];
        assert_eq!(node.attr("clickable"), Some("TRUE"));
        assert_eq!(node.attr("text"), Some("& more"));
        assert_eq!(node.attr("checkable"), None);
    }

    #[test]
    fn truncated_markup_is_malformed() {
        let err = parse_dump(b"<hierarchy><node text=\"a\"").unwrap_err();
        assert!(matches!(err, DroidScopeError::MalformedDocument(_)));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = parse_dump(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(matches!(err, DroidScopeError::MalformedDocument(_)));
    }

    #[test]
    fn empty_input_is_malformed_at_this_layer() {
        assert!(parse_dump(b"").is_err());
    }
}
