// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader graph containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::kind::ShaderNodeKind;
use crate::node::{NodeId, ShaderNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// ID of the output node every graph starts with
pub const OUTPUT_NODE: NodeId = NodeId(0);

/// A shader node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderGraph {
    /// Graph name
    pub name: String,
    /// Nodes in creation order
    nodes: IndexMap<NodeId, ShaderNode>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
    /// Next node ID to hand out
    next_id: u32,
}

impl ShaderGraph {
    /// Create a graph holding only its output node
    pub fn new(name: impl Into<String>) -> Self {
        let mut graph = Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            next_id: 0,
        };
        graph.add(ShaderNodeKind::Output);
        graph
    }

    /// Add a node of `kind`, returning its graph-scoped ID
    pub fn add(&mut self, kind: ShaderNodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ShaderNode::new(id, kind));
        id
    }

    /// The output node ID
    pub fn output(&self) -> NodeId {
        OUTPUT_NODE
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&ShaderNode> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut ShaderNode> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &ShaderNode> {
        self.nodes.values()
    }

    /// Get the number of nodes, including the output
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Link an output socket to an input socket, both addressed by name
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: &str,
        to_node: NodeId,
        to_socket: &str,
    ) -> Result<ConnectionId, ConnectionError> {
        // Validate nodes exist
        let source = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        // Validate sockets exist
        let output = source
            .output(from_socket)
            .ok_or_else(|| ConnectionError::SocketNotFound {
                node: from_node,
                socket: from_socket.to_string(),
            })?;
        let input = target
            .input(to_socket)
            .ok_or_else(|| ConnectionError::SocketNotFound {
                node: to_node,
                socket: to_socket.to_string(),
            })?;

        if !output.can_connect(input) {
            return Err(ConnectionError::IncompatibleSockets {
                from: output.socket_type,
                to: input.socket_type,
            });
        }

        // Inputs take a single link
        if self.link_to(to_node, to_socket).is_some() {
            return Err(ConnectionError::InputAlreadyConnected {
                node: to_node,
                socket: to_socket.to_string(),
            });
        }

        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        // The new edge closes a cycle if `from_node` already depends on `to_node`
        if self.depends_on(from_node, to_node) {
            return Err(ConnectionError::Cycle);
        }

        let connection = Connection::new(from_node, from_socket, to_node, to_socket);
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// The link feeding an input, if any
    pub fn link_to(&self, node_id: NodeId, socket: &str) -> Option<&Connection> {
        self.connections.values().find(|c| c.feeds(node_id, socket))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether `node_id` reads, directly or transitively, from `upstream`
    pub fn depends_on(&self, node_id: NodeId, upstream: NodeId) -> bool {
        let mut stack = vec![node_id];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == upstream {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            stack.extend(
                self.connections
                    .values()
                    .filter(|c| c.to_node == current)
                    .map(|c| c.from_node),
            );
        }
        false
    }

    /// Serialize the graph as RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Load a graph from RON
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

impl Default for ShaderGraph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a connection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Socket not found on the node
    #[error("node {node} has no socket `{socket}`")]
    SocketNotFound {
        /// Node searched
        node: NodeId,
        /// Socket name as given
        socket: String,
    },

    /// Incompatible socket types
    #[error("cannot connect {from} output to {to} input")]
    IncompatibleSockets {
        /// Output type
        from: crate::socket::SocketType,
        /// Input type
        to: crate::socket::SocketType,
    },

    /// Input is already linked
    #[error("input `{socket}` of node {node} is already connected")]
    InputAlreadyConnected {
        /// Target node
        node: NodeId,
        /// Target socket
        socket: String,
    },

    /// Self-loop not allowed
    #[error("self-loop not allowed")]
    SelfLoop,

    /// Connection would create a cycle
    #[error("connection would create a cycle")]
    Cycle,
}
