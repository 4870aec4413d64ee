//! Shading node graph: nodes, links, and the read-only [`ShadingGraph`] view
//! the slot resolver walks.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Handle of a node, unique within one [`NodeTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

// ---------------------------------------------------------------------------
// Nodes and links
// ---------------------------------------------------------------------------

/// Image referenced by an image texture node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Path as stored by the host. May be host-relative (`//tex/a.png`) or
    /// use Windows separators.
    pub filepath: String,
}

/// What a node computes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The multi-input physically based shader whose inputs map to slots.
    PrincipledBsdf,
    /// Samples an image file. `image` is `None` when no image is assigned.
    ImageTexture {
        /// Assigned image, if any.
        #[serde(default)]
        image: Option<ImageSource>,
    },
    /// Any other producer (procedural textures, math, mix nodes, ...).
    Other {
        /// Host type identifier, kept for logging.
        type_name: String,
    },
}

/// A node of a material's shading graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Handle referenced by links.
    pub id: NodeId,
    /// Display name, informational only.
    #[serde(default)]
    pub name: String,
    /// Node type and payload.
    pub kind: NodeKind,
}

/// A directed connection from an output socket to an input socket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Producing node.
    pub from_node: NodeId,
    /// Output socket on the producer.
    #[serde(default)]
    pub from_socket: String,
    /// Consuming node.
    pub to_node: NodeId,
    /// Input socket on the consumer (e.g. `"Base Color"`).
    pub to_socket: String,
}

// ---------------------------------------------------------------------------
// ShadingGraph
// ---------------------------------------------------------------------------

/// Read-only view of a shading graph.
pub trait ShadingGraph {
    /// The first principled shader node in enumeration order.
    fn principal_node(&self) -> Option<NodeId>;

    /// The node feeding `input` of `node`, if that input is linked.
    ///
    /// Only the first link into an input is considered.
    fn incoming_producer(&self, node: NodeId, input: &str) -> Option<&Node>;
}

// ---------------------------------------------------------------------------
// NodeTree
// ---------------------------------------------------------------------------

/// Plain adjacency representation of a material's node tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTree {
    /// Nodes in host enumeration order.
    pub nodes: Vec<Node>,
    /// Links in host enumeration order.
    pub links: Vec<Link>,
}

impl NodeTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its handle.
    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(
            self.nodes
                .iter()
                .map(|node| node.id.0 + 1)
                .max()
                .unwrap_or(0),
        );
        self.nodes.push(Node {
            id,
            name: name.into(),
            kind,
        });
        id
    }

    /// Links `from`'s output socket to `to`'s input socket.
    pub fn link(
        &mut self,
        from: NodeId,
        from_socket: impl Into<String>,
        to: NodeId,
        to_socket: impl Into<String>,
    ) {
        self.links.push(Link {
            from_node: from,
            from_socket: from_socket.into(),
            to_node: to,
            to_socket: to_socket.into(),
        });
    }

    /// Looks a node up by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl ShadingGraph for NodeTree {
    fn principal_node(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.kind == NodeKind::PrincipledBsdf)
            .map(|node| node.id)
    }

    fn incoming_producer(&self, node: NodeId, input: &str) -> Option<&Node> {
        let link = self
            .links
            .iter()
            .find(|link| link.to_node == node && link.to_socket == input)?;
        self.node(link.from_node)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
