// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shader graph.

use crate::kind::ShaderNodeKind;
use crate::nodes::catalog;
use crate::nodes::members::{MemberError, NodeData};
use crate::socket::{AttributeValue, Socket};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Identifier of a node, unique within one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Graph output
    Output,
    /// Closures (BSDFs, emission, volumes)
    Shader,
    /// Inputs (values, geometry, light paths)
    Input,
    /// Procedural and image textures
    Texture,
    /// Color operations
    Color,
    /// Vector operations
    Vector,
    /// Type conversions and math
    Converter,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Kind this template builds
    pub kind: ShaderNodeKind,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

/// A node instance in a shader graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderNode {
    /// Graph-scoped ID
    pub id: NodeId,
    /// Node kind
    pub kind: ShaderNodeKind,
    /// Display name
    pub name: String,
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Typed members
    pub data: NodeData,
}

impl ShaderNode {
    /// Create a node of `kind` from the builtin catalog
    pub fn new(id: NodeId, kind: ShaderNodeKind) -> Self {
        NodeCatalog::builtin().create_node(id, kind)
    }

    /// Create a node from a template
    pub fn from_template(id: NodeId, template: &NodeTemplate) -> Self {
        Self {
            id,
            kind: template.kind,
            name: template.name.clone(),
            inputs: template.inputs.clone(),
            outputs: template.outputs.clone(),
            data: NodeData::for_kind(template.kind),
        }
    }

    /// Get an input socket by exact name
    pub fn input(&self, name: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// Get an output socket by exact name
    pub fn output(&self, name: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.name == name)
    }

    /// Check the node against a caller-supplied kind
    pub fn expect_kind(&self, expected: ShaderNodeKind) -> Result<(), MemberError> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(MemberError::KindMismatch {
                expected,
                actual: self.kind,
            })
        }
    }

    /// Write an attribute into the first input whose name matches, ignoring case
    pub fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<(), MemberError> {
        let kind = self.kind;
        let socket = self
            .inputs
            .iter_mut()
            .find(|s| s.matches_name(name))
            .ok_or_else(|| MemberError::UnknownInput {
                kind,
                name: name.to_string(),
            })?;
        socket.assign(value);
        Ok(())
    }
}

/// Registry of node templates
pub struct NodeCatalog {
    /// Registered templates by kind
    templates: indexmap::IndexMap<ShaderNodeKind, NodeTemplate>,
}

impl NodeCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            templates: indexmap::IndexMap::new(),
        }
    }

    /// The catalog of every builtin kind, built once
    pub fn builtin() -> &'static NodeCatalog {
        static BUILTIN: OnceLock<NodeCatalog> = OnceLock::new();
        BUILTIN.get_or_init(catalog::create_shader_catalog)
    }

    /// Register a template
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates.insert(template.kind, template);
    }

    /// Get a template by kind
    pub fn get(&self, kind: ShaderNodeKind) -> Option<&NodeTemplate> {
        self.templates.get(&kind)
    }

    /// Get all registered templates
    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Create a node from a kind.
    ///
    /// Kinds missing from the catalog get a node with no sockets.
    pub fn create_node(&self, id: NodeId, kind: ShaderNodeKind) -> ShaderNode {
        match self.get(kind) {
            Some(template) => ShaderNode::from_template(id, template),
            None => ShaderNode {
                id,
                kind,
                name: kind.id().to_string(),
                inputs: Vec::new(),
                outputs: Vec::new(),
                data: NodeData::for_kind(kind),
            },
        }
    }
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_case_insensitive() {
        let mut node = ShaderNode::new(NodeId(3), ShaderNodeKind::Diffuse);
        node.set_attribute("color", &AttributeValue::Vector([0.1, 0.5, 0.9]))
            .unwrap();
        node.set_attribute("ROUGHNESS", &AttributeValue::Float(0.4))
            .unwrap();

        assert_eq!(node.input("Color").unwrap().value, [0.1, 0.5, 0.9]);
        assert_eq!(node.input("Roughness").unwrap().value[0], 0.4);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let mut node = ShaderNode::new(NodeId(3), ShaderNodeKind::Emission);
        let before = node.clone();
        let err = node.set_attribute("Roughness", &AttributeValue::Float(1.0));
        assert!(matches!(err, Err(MemberError::UnknownInput { .. })));
        assert_eq!(node, before);
    }

    #[test]
    fn test_expect_kind() {
        let node = ShaderNode::new(NodeId(0), ShaderNodeKind::Math);
        assert!(node.expect_kind(ShaderNodeKind::Math).is_ok());
        assert!(matches!(
            node.expect_kind(ShaderNodeKind::Mix),
            Err(MemberError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_still_builds_nodes() {
        let catalog = NodeCatalog::new();
        let node = catalog.create_node(NodeId(9), ShaderNodeKind::Value);
        assert!(node.outputs.is_empty());
        assert_eq!(node.name, "value");
    }
}
