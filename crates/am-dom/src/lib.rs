//! am-dom - Minimal DOM subtree
//!
//! Arena-based DOM the menu engine operates on. Covers exactly the surface
//! the engine's DOM contract needs: element nodes with attributes, cached
//! ids and class token lists, scoped selector queries, a document-level
//! focus slot, and input events with suppression flags.

mod node;
mod tree;
mod token_list;
mod selector;
mod document;
mod events;

pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use tree::DomTree;
pub use token_list::TokenList;
pub use selector::{query_direct_children, Selector};
pub use document::{Document, DomError};
pub use events::{FocusEvent, KeyboardEvent, PointerEvent, PointerKind, PointerType};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check that this ID refers to a real node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
