// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the binding layer.

use crate::handle::HandleError;
use crate::image::ImageError;
use shadebind_graph::{ConnectionError, MemberError, NodeId};
use thiserror::Error;

/// Error returned by [`crate::Registry`] operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    /// Unknown or stale handle
    #[error(transparent)]
    Handle(#[from] HandleError),

    /// Node id not present in the shader's graph
    #[error("shader {shader} has no node {node}")]
    NodeNotFound {
        /// Shader index
        shader: u32,
        /// Node id as given
        node: NodeId,
    },

    /// Type tag outside the node catalog
    #[error("unknown shader node type tag {0}")]
    UnknownNodeType(u32),

    /// Shader was never added to the scene
    #[error("shader {shader} is not in scene {scene}")]
    NotInScene {
        /// Shader index
        shader: u32,
        /// Scene index
        scene: u32,
    },

    /// Null pointer or non UTF-8 string from the host
    #[error("invalid {0} argument")]
    InvalidArgument(&'static str),

    /// Graph rejected the link
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Node rejected the write
    #[error(transparent)]
    Member(#[from] MemberError),

    /// Image cache rejected the pixels
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Result alias for binding operations
pub type Result<T> = std::result::Result<T, BindingError>;
