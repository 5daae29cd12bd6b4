// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node graph model for `shadebind`.
//!
//! This crate holds the engine-side graph the binding layer drives:
//! - A catalog of builtin node kinds with named sockets
//! - Typed per-kind members (enums, flags, vectors, tables)
//! - Connections addressed by socket name
//! - Cycle and type validation on connect
//!
//! ## Architecture
//!
//! Nodes are identified by a graph-scoped [`NodeId`]; the graph output
//! node always exists with ID 0. Host-facing numeric type tags map to
//! [`ShaderNodeKind`] through [`ShaderNodeKind::from_tag`].

pub mod socket;
pub mod kind;
pub mod node;
pub mod connection;
pub mod graph;
pub mod nodes;

pub use socket::{AttributeValue, Socket, SocketDirection, SocketType};
pub use kind::ShaderNodeKind;
pub use node::{NodeCatalog, NodeCategory, NodeId, NodeTemplate, ShaderNode};
pub use connection::{Connection, ConnectionId};
pub use graph::{ConnectionError, ShaderGraph, OUTPUT_NODE};
pub use nodes::{ImageBinding, MemberAccess, MemberError, NodeData};
