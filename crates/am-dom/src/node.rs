//! DOM Node
//!
//! Compact node representation: sibling/child links are `NodeId` handles
//! into the arena, never pointers.

use crate::token_list::TokenList;
use crate::NodeId;

/// DOM Node - core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn detached(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::detached(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::detached(NodeData::Text(TextData { content }))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::detached(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Short node-kind name, used in validation messages
    pub fn kind_name(&self) -> &'static str {
        match &self.data {
            NodeData::Document => "document",
            NodeData::Element(_) => "element",
            NodeData::Text(_) => "text",
            NodeData::Comment(_) => "comment",
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase)
    pub tag: String,
    /// Attributes in document order
    attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Cached class list
    classes: TokenList,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: TokenList::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check whether an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, keeping the id/class caches coherent
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.classes = TokenList::from_string(value),
            _ => {}
        }
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) {
        match name {
            "id" => self.id = None,
            "class" => self.classes = TokenList::new(),
            _ => {}
        }
        self.attrs.retain(|a| a.name != name);
    }

    /// Iterate over attributes
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// The element's class list
    pub fn classes(&self) -> &TokenList {
        &self.classes
    }

    /// Check for a single class token
    pub fn has_class(&self, token: &str) -> bool {
        self.classes.contains(token)
    }

    /// Add class tokens, mirroring into the `class` attribute
    pub fn add_classes(&mut self, tokens: &[&str]) {
        self.classes.add(tokens);
        self.sync_class_attr();
    }

    /// Remove class tokens, mirroring into the `class` attribute
    pub fn remove_classes(&mut self, tokens: &[&str]) {
        self.classes.remove(tokens);
        self.sync_class_attr();
    }

    fn sync_class_attr(&mut self) {
        let value = self.classes.value();
        if value.is_empty() {
            self.attrs.retain(|a| a.name != "class");
        } else {
            for attr in self.attrs.iter_mut() {
                if attr.name == "class" {
                    attr.value = value;
                    return;
                }
            }
            self.attrs.push(Attribute {
                name: "class".to_string(),
                value,
            });
        }
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_caches() {
        let mut elem = ElementData::new("UL");
        assert_eq!(elem.tag, "ul");

        elem.set_attr("id", "main-nav");
        assert_eq!(elem.id.as_deref(), Some("main-nav"));
        assert_eq!(elem.get_attr("id"), Some("main-nav"));

        elem.set_attr("class", "show wide");
        assert!(elem.has_class("show"));
        assert!(elem.has_class("wide"));

        elem.remove_attr("class");
        assert!(!elem.has_class("show"));
    }

    #[test]
    fn test_class_mutation_syncs_attr() {
        let mut elem = ElementData::new("ul");
        elem.add_classes(&["show"]);
        assert_eq!(elem.get_attr("class"), Some("show"));

        elem.add_classes(&["transitioning"]);
        assert_eq!(elem.get_attr("class"), Some("show transitioning"));

        elem.remove_classes(&["show", "transitioning"]);
        assert_eq!(elem.get_attr("class"), None);
    }
}
