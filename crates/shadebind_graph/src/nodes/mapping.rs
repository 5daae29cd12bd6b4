// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture coordinate mapping carried by the mapping node.

use super::enums::{MappingAxis, MappingProjection, MappingType, TransformComponent};
use serde::{Deserialize, Serialize};

/// Texture space transform plus clamping and axis remapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureMapping {
    /// Translation
    pub translation: [f32; 3],
    /// Euler rotation in radians
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
    /// Lower clamp bound
    pub min: [f32; 3],
    /// Upper clamp bound
    pub max: [f32; 3],
    /// Whether `min`/`max` clamping applies
    pub use_minmax: bool,
    /// Source axis for X
    pub x_mapping: MappingAxis,
    /// Source axis for Y
    pub y_mapping: MappingAxis,
    /// Source axis for Z
    pub z_mapping: MappingAxis,
    /// Projection
    pub projection: MappingProjection,
    /// Transform interpretation
    pub mapping_type: MappingType,
}

impl TextureMapping {
    /// Set translation, rotation or scale
    pub fn set_transformation(&mut self, component: TransformComponent, value: [f32; 3]) {
        match component {
            TransformComponent::Translation => self.translation = value,
            TransformComponent::Rotation => self.rotation = value,
            TransformComponent::Scale => self.scale = value,
        }
    }

    /// Set the source axis for each output component
    pub fn set_axes(&mut self, x: MappingAxis, y: MappingAxis, z: MappingAxis) {
        self.x_mapping = x;
        self.y_mapping = y;
        self.z_mapping = z;
    }
}

impl Default for TextureMapping {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            min: [f32::MIN; 3],
            max: [f32::MAX; 3],
            use_minmax: false,
            x_mapping: MappingAxis::X,
            y_mapping: MappingAxis::Y,
            z_mapping: MappingAxis::Z,
            projection: MappingProjection::Flat,
            mapping_type: MappingType::Texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_components() {
        let mut mapping = TextureMapping::default();
        assert_eq!(mapping.scale, [1.0; 3]);

        mapping.set_transformation(TransformComponent::Rotation, [0.0, 0.0, 1.5]);
        mapping.set_transformation(TransformComponent::Scale, [2.0, 2.0, 2.0]);

        assert_eq!(mapping.translation, [0.0; 3]);
        assert_eq!(mapping.rotation, [0.0, 0.0, 1.5]);
        assert_eq!(mapping.scale, [2.0; 3]);
    }
}
