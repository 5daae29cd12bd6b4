// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A link from a node output to a node input, both addressed by socket name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub from_node: NodeId,
    /// Source output socket name
    pub from_socket: String,
    /// Target node ID
    pub to_node: NodeId,
    /// Target input socket name
    pub to_socket: String,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }

    /// Check if this connection feeds the given input
    pub fn feeds(&self, node_id: NodeId, socket: &str) -> bool {
        self.to_node == node_id && self.to_socket == socket
    }
}
