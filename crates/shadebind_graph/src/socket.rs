// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// Data type that flows through a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    /// Scalar value
    Float,
    /// Integer value
    Int,
    /// RGB color
    Color,
    /// Direction vector
    Vector,
    /// Position
    Point,
    /// Surface normal
    Normal,
    /// BSDF/emission/volume closure
    Closure,
    /// String value
    String,
}

impl SocketType {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Color => "color",
            Self::Vector => "vector",
            Self::Point => "point",
            Self::Normal => "normal",
            Self::Closure => "closure",
            Self::String => "string",
        }
    }

    /// Check if an output of this type can feed an input of `other`
    pub fn can_connect_to(&self, other: SocketType) -> bool {
        match (self, other) {
            // Closures only mix with closures
            (Self::Closure, Self::Closure) | (Self::String, Self::String) => true,
            (Self::Closure | Self::String, _) | (_, Self::Closure | Self::String) => false,
            // Numeric types convert implicitly
            _ => true,
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value written into an input socket by the attribute setters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Integer, stored as the first component
    Int(i32),
    /// Float, stored as the first component
    Float(f32),
    /// Three component vector or color
    Vector([f32; 3]),
    /// String value
    String(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Vector([x, y, z]) => write!(f, "{x},{y},{z}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// A socket on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    /// Socket name, unique per direction on a node
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Unlinked value (inputs only)
    pub value: [f32; 3],
    /// Unlinked string value (inputs only)
    pub value_string: String,
}

impl Socket {
    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self::new(name, socket_type, SocketDirection::Input)
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self::new(name, socket_type, SocketDirection::Output)
    }

    fn new(name: impl Into<String>, socket_type: SocketType, direction: SocketDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            socket_type,
            value: [0.0; 3],
            value_string: String::new(),
        }
    }

    /// Set a scalar default
    pub fn with_float(mut self, value: f32) -> Self {
        self.value = [value, 0.0, 0.0];
        self
    }

    /// Set a vector/color default
    pub fn with_vector(mut self, value: [f32; 3]) -> Self {
        self.value = value;
        self
    }

    /// Whether this socket answers to `name`, ignoring ASCII case
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Write an attribute value into the unlinked value slots
    pub fn assign(&mut self, value: &AttributeValue) {
        match value {
            AttributeValue::Int(v) => self.value[0] = *v as f32,
            AttributeValue::Float(v) => self.value[0] = *v,
            AttributeValue::Vector(v) => self.value = *v,
            AttributeValue::String(v) => self.value_string.clone_from(v),
        }
    }

    /// Check if this output can be linked to `other`
    pub fn can_connect(&self, other: &Socket) -> bool {
        self.direction == SocketDirection::Output
            && other.direction == SocketDirection::Input
            && self.socket_type.can_connect_to(other.socket_type)
    }
}
