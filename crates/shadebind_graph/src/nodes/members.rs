// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed per-node members and the setters that reach them.
//!
//! Members are addressed by name, the way a host API addresses them, but the
//! dispatch is a `match` over [`NodeData`] so every (kind, member) pair is
//! checked at compile time. Anything not listed is rejected with
//! [`MemberError::UnknownMember`] and the node is left untouched.

use super::enums::{
    AnisotropicDistribution, ColorSpace, EnvironmentProjection, GlassDistribution,
    GlossyDistribution, GradientType, ImageProjection, Interpolation, MathType, MatrixMathType,
    MixType, NamedEnum, RefractionDistribution, SkyType, VectorMathType, VoronoiColoring, WaveType,
};
use super::mapping::TextureMapping;
use crate::kind::ShaderNodeKind;
use crate::node::ShaderNode;
use serde::{Deserialize, Serialize};

/// Number of entries in a color ramp lookup table
pub const RAMP_TABLE_SIZE: usize = 256;

/// Row-major 4x4 transform
pub type Transform = [[f32; 4]; 4];

/// Identity transform
pub const IDENTITY: Transform = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Pixel data bound to an image or environment texture node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBinding {
    /// Index of the image in the owning image cache
    pub image: u32,
    /// Image name, mirrored into the node's filename
    pub filename: String,
    /// Whether the pixels are floats
    pub is_float: bool,
}

/// Scalar math members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathNode {
    /// Operation
    pub math_type: MathType,
    /// Clamp result to 0..1
    pub use_clamp: bool,
}

/// Vector math members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorMathNode {
    /// Operation
    pub math_type: VectorMathType,
}

/// Matrix math members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixMathNode {
    /// How the vector is transformed
    pub math_type: MatrixMathType,
    /// Transform
    pub tfm: Transform,
}

impl Default for MatrixMathNode {
    fn default() -> Self {
        Self {
            math_type: MatrixMathType::default(),
            tfm: IDENTITY,
        }
    }
}

/// Color mix members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixNode {
    /// Blend mode
    pub mix_type: MixType,
    /// Clamp result to 0..1
    pub use_clamp: bool,
}

/// Image texture members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTextureNode {
    /// Image name
    pub filename: String,
    /// In-memory pixels, if any were supplied
    pub builtin: Option<ImageBinding>,
    /// Color management
    pub color_space: ColorSpace,
    /// Projection
    pub projection: ImageProjection,
    /// Blend width for box projection
    pub projection_blend: f32,
    /// Filtering
    pub interpolation: Interpolation,
    /// Use the alpha channel
    pub use_alpha: bool,
    /// Pixels are already linear
    pub is_linear: bool,
}

impl Default for ImageTextureNode {
    fn default() -> Self {
        Self {
            filename: String::new(),
            builtin: None,
            color_space: ColorSpace::default(),
            projection: ImageProjection::default(),
            projection_blend: 0.0,
            interpolation: Interpolation::default(),
            use_alpha: true,
            is_linear: false,
        }
    }
}

/// Environment texture members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTextureNode {
    /// Image name
    pub filename: String,
    /// In-memory pixels, if any were supplied
    pub builtin: Option<ImageBinding>,
    /// Color management
    pub color_space: ColorSpace,
    /// Projection
    pub projection: EnvironmentProjection,
    /// Filtering
    pub interpolation: Interpolation,
    /// Pixels are already linear
    pub is_linear: bool,
}

/// Brick texture members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickTextureNode {
    /// Row offset
    pub offset: f32,
    /// Brick squash
    pub squash: f32,
    /// Rows between offsets
    pub offset_frequency: i32,
    /// Rows between squashes
    pub squash_frequency: i32,
}

impl Default for BrickTextureNode {
    fn default() -> Self {
        Self {
            offset: 0.5,
            squash: 1.0,
            offset_frequency: 2,
            squash_frequency: 2,
        }
    }
}

/// Sky texture members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyTextureNode {
    /// Sky model
    pub sky_type: SkyType,
    /// Direction towards the sun
    pub sun_direction: [f32; 3],
    /// Atmospheric turbidity
    pub turbidity: f32,
    /// Ground color reflectance
    pub ground_albedo: f32,
}

impl Default for SkyTextureNode {
    fn default() -> Self {
        Self {
            sky_type: SkyType::default(),
            sun_direction: [0.0, 0.0, 1.0],
            turbidity: 2.2,
            ground_albedo: 0.3,
        }
    }
}

/// Color ramp members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRampNode {
    /// Lookup table, `RAMP_TABLE_SIZE` RGBA entries
    pub ramp: Vec<[f32; 4]>,
    /// Interpolate between entries
    pub interpolate: bool,
}

impl Default for ColorRampNode {
    fn default() -> Self {
        Self {
            ramp: vec![[0.0; 4]; RAMP_TABLE_SIZE],
            interpolate: true,
        }
    }
}

/// Texture coordinate members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureCoordinateNode {
    /// Use `ob_tfm` for object coordinates
    pub use_transform: bool,
    /// Object transform
    pub ob_tfm: Transform,
}

impl Default for TextureCoordinateNode {
    fn default() -> Self {
        Self {
            use_transform: false,
            ob_tfm: IDENTITY,
        }
    }
}

/// Typed members of a node, one variant per kind that has any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum NodeData {
    /// Kind has sockets only
    Plain,
    Math(MathNode),
    VectorMath(VectorMathNode),
    MatrixMath(MatrixMathNode),
    Mix(MixNode),
    Refraction { distribution: RefractionDistribution },
    Glossy { distribution: GlossyDistribution },
    Glass { distribution: GlassDistribution },
    Anisotropic { distribution: AnisotropicDistribution },
    WaveTexture { wave_type: WaveType },
    VoronoiTexture { coloring: VoronoiColoring },
    GradientTexture { gradient_type: GradientType },
    SkyTexture(SkyTextureNode),
    ImageTexture(ImageTextureNode),
    EnvironmentTexture(EnvironmentTextureNode),
    BrickTexture(BrickTextureNode),
    MagicTexture { depth: i32 },
    Value { value: f32 },
    Color { value: [f32; 3] },
    Mapping(TextureMapping),
    ColorRamp(ColorRampNode),
    Bump { invert: bool },
    TextureCoordinate(TextureCoordinateNode),
}

impl NodeData {
    /// Default members for a freshly created node
    pub fn for_kind(kind: ShaderNodeKind) -> Self {
        match kind {
            ShaderNodeKind::Math => Self::Math(MathNode::default()),
            ShaderNodeKind::VectorMath => Self::VectorMath(VectorMathNode::default()),
            ShaderNodeKind::MatrixMath => Self::MatrixMath(MatrixMathNode::default()),
            ShaderNodeKind::Mix => Self::Mix(MixNode::default()),
            // Hosts expect a rough refraction out of the box
            ShaderNodeKind::Refraction => Self::Refraction {
                distribution: RefractionDistribution::Beckmann,
            },
            ShaderNodeKind::Glossy => Self::Glossy {
                distribution: GlossyDistribution::default(),
            },
            ShaderNodeKind::Glass => Self::Glass {
                distribution: GlassDistribution::default(),
            },
            ShaderNodeKind::Anisotropic => Self::Anisotropic {
                distribution: AnisotropicDistribution::default(),
            },
            ShaderNodeKind::WaveTexture => Self::WaveTexture {
                wave_type: WaveType::default(),
            },
            ShaderNodeKind::VoronoiTexture => Self::VoronoiTexture {
                coloring: VoronoiColoring::default(),
            },
            ShaderNodeKind::GradientTexture => Self::GradientTexture {
                gradient_type: GradientType::default(),
            },
            ShaderNodeKind::SkyTexture => Self::SkyTexture(SkyTextureNode::default()),
            ShaderNodeKind::ImageTexture => Self::ImageTexture(ImageTextureNode::default()),
            ShaderNodeKind::EnvironmentTexture => {
                Self::EnvironmentTexture(EnvironmentTextureNode::default())
            }
            ShaderNodeKind::BrickTexture => Self::BrickTexture(BrickTextureNode::default()),
            ShaderNodeKind::MagicTexture => Self::MagicTexture { depth: 2 },
            ShaderNodeKind::Value => Self::Value { value: 0.0 },
            ShaderNodeKind::Color => Self::Color { value: [0.0; 3] },
            ShaderNodeKind::Mapping => Self::Mapping(TextureMapping::default()),
            ShaderNodeKind::ColorRamp => Self::ColorRamp(ColorRampNode::default()),
            ShaderNodeKind::Bump => Self::Bump { invert: false },
            ShaderNodeKind::TextureCoordinate => {
                Self::TextureCoordinate(TextureCoordinateNode::default())
            }
            _ => Self::Plain,
        }
    }
}

/// Error when writing a node member
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberError {
    /// The caller's type tag does not match the node
    #[error("node is {actual}, not {expected}")]
    KindMismatch {
        /// Kind the caller assumed
        expected: ShaderNodeKind,
        /// Kind of the node
        actual: ShaderNodeKind,
    },

    /// No member of this name and value type on this kind
    #[error("{kind} has no {value_kind} member `{member}`")]
    UnknownMember {
        /// Node kind
        kind: ShaderNodeKind,
        /// Member name as given
        member: String,
        /// Value type the caller tried to write
        value_kind: &'static str,
    },

    /// No input socket of this name
    #[error("{kind} has no input `{name}`")]
    UnknownInput {
        /// Node kind
        kind: ShaderNodeKind,
        /// Socket name as given
        name: String,
    },

    /// Enum value not accepted
    #[error("unknown value `{value}` for {enum_name}")]
    UnknownValue {
        /// Enum name
        enum_name: &'static str,
        /// Value as given
        value: String,
    },

    /// Integer code outside an enum's range
    #[error("invalid code {code} for `{member}`")]
    InvalidCode {
        /// Member name
        member: String,
        /// Code as given
        code: i32,
    },

    /// Row or entry index out of range
    #[error("index {index} out of range for `{member}` (len {len})")]
    IndexOutOfRange {
        /// Member name
        member: String,
        /// Index as given
        index: i32,
        /// Number of rows/entries
        len: usize,
    },

    /// Kind lacks a whole capability (image binding, texture mapping)
    #[error("{kind} does not support {capability}")]
    Unsupported {
        /// Node kind
        kind: ShaderNodeKind,
        /// Capability name
        capability: &'static str,
    },
}

impl MemberError {
    fn unknown(kind: ShaderNodeKind, member: &str, value_kind: &'static str) -> Self {
        Self::UnknownMember {
            kind,
            member: member.to_string(),
            value_kind,
        }
    }
}

/// Capability set for writing typed node members by name
pub trait MemberAccess {
    /// Write a bool member
    fn set_bool_member(&mut self, member: &str, value: bool) -> Result<(), MemberError>;
    /// Write an int member
    fn set_int_member(&mut self, member: &str, value: i32) -> Result<(), MemberError>;
    /// Write a float member
    fn set_float_member(&mut self, member: &str, value: f32) -> Result<(), MemberError>;
    /// Write a three component member
    fn set_vec_member(&mut self, member: &str, value: [f32; 3]) -> Result<(), MemberError>;
    /// Write one row/entry of a four component array member
    fn set_vec4_member(
        &mut self,
        member: &str,
        index: i32,
        value: [f32; 4],
    ) -> Result<(), MemberError>;
    /// Write an enum member by value name
    fn set_enum_member(&mut self, member: &str, value: &str) -> Result<(), MemberError>;
}

impl MemberAccess for ShaderNode {
    fn set_bool_member(&mut self, member: &str, value: bool) -> Result<(), MemberError> {
        let kind = self.kind;
        let slot = match (&mut self.data, member) {
            (NodeData::Math(n), "use_clamp") => &mut n.use_clamp,
            (NodeData::Mix(n), "use_clamp") => &mut n.use_clamp,
            (NodeData::Mapping(m), "useminmax") => &mut m.use_minmax,
            (NodeData::ColorRamp(n), "interpolate") => &mut n.interpolate,
            (NodeData::Bump { invert }, "invert") => invert,
            (NodeData::ImageTexture(n), "use_alpha") => &mut n.use_alpha,
            (NodeData::ImageTexture(n), "is_linear") => &mut n.is_linear,
            (NodeData::EnvironmentTexture(n), "is_linear") => &mut n.is_linear,
            (NodeData::TextureCoordinate(n), "use_transform") => &mut n.use_transform,
            _ => return Err(MemberError::unknown(kind, member, "bool")),
        };
        *slot = value;
        Ok(())
    }

    fn set_int_member(&mut self, member: &str, value: i32) -> Result<(), MemberError> {
        let kind = self.kind;
        match (&mut self.data, member) {
            (NodeData::BrickTexture(n), "offset_frequency") => n.offset_frequency = value,
            (NodeData::BrickTexture(n), "squash_frequency") => n.squash_frequency = value,
            (NodeData::ImageTexture(n), "interpolation") => {
                n.interpolation = decode_interpolation(member, value)?;
            }
            (NodeData::EnvironmentTexture(n), "interpolation") => {
                n.interpolation = decode_interpolation(member, value)?;
            }
            (NodeData::MagicTexture { depth }, "depth") => *depth = value,
            _ => return Err(MemberError::unknown(kind, member, "int")),
        }
        Ok(())
    }

    fn set_float_member(&mut self, member: &str, value: f32) -> Result<(), MemberError> {
        let kind = self.kind;
        let slot = match (&mut self.data, member) {
            (NodeData::Value { value: slot }, "value") => slot,
            (NodeData::ImageTexture(n), "projection_blend") => &mut n.projection_blend,
            (NodeData::BrickTexture(n), "offset") => &mut n.offset,
            (NodeData::BrickTexture(n), "squash") => &mut n.squash,
            (NodeData::SkyTexture(n), "turbidity") => &mut n.turbidity,
            (NodeData::SkyTexture(n), "ground_albedo") => &mut n.ground_albedo,
            _ => return Err(MemberError::unknown(kind, member, "float")),
        };
        *slot = value;
        Ok(())
    }

    fn set_vec_member(&mut self, member: &str, value: [f32; 3]) -> Result<(), MemberError> {
        let kind = self.kind;
        let slot = match (&mut self.data, member) {
            (NodeData::Color { value: slot }, "value") => slot,
            (NodeData::SkyTexture(n), "sun_direction") => &mut n.sun_direction,
            (NodeData::Mapping(m), "min") => &mut m.min,
            (NodeData::Mapping(m), "max") => &mut m.max,
            _ => return Err(MemberError::unknown(kind, member, "vector")),
        };
        *slot = value;
        Ok(())
    }

    fn set_vec4_member(
        &mut self,
        member: &str,
        index: i32,
        value: [f32; 4],
    ) -> Result<(), MemberError> {
        let kind = self.kind;
        let rows: &mut [[f32; 4]] = match (&mut self.data, member) {
            (NodeData::ColorRamp(n), "ramp") => n.ramp.as_mut_slice(),
            (NodeData::TextureCoordinate(n), "ob_tfm") => &mut n.ob_tfm[..],
            (NodeData::MatrixMath(n), "tfm") => &mut n.tfm[..],
            _ => return Err(MemberError::unknown(kind, member, "vector4")),
        };
        let len = rows.len();
        let row = usize::try_from(index)
            .ok()
            .and_then(|i| rows.get_mut(i))
            .ok_or_else(|| MemberError::IndexOutOfRange {
                member: member.to_string(),
                index,
                len,
            })?;
        *row = value;
        Ok(())
    }

    fn set_enum_member(&mut self, member: &str, value: &str) -> Result<(), MemberError> {
        let kind = self.kind;
        match (&mut self.data, member) {
            (NodeData::Math(n), "type") => set_named(&mut n.math_type, value),
            (NodeData::VectorMath(n), "type") => set_named(&mut n.math_type, value),
            (NodeData::MatrixMath(n), "type") => set_named(&mut n.math_type, value),
            (NodeData::Mix(n), "type") => set_named(&mut n.mix_type, value),
            (NodeData::Refraction { distribution }, "distribution") => {
                set_named(distribution, value)
            }
            (NodeData::Glossy { distribution }, "distribution") => set_named(distribution, value),
            (NodeData::Glass { distribution }, "distribution") => set_named(distribution, value),
            (NodeData::Anisotropic { distribution }, "distribution") => {
                set_named(distribution, value)
            }
            (NodeData::WaveTexture { wave_type }, "type") => set_named(wave_type, value),
            (NodeData::VoronoiTexture { coloring }, "coloring") => set_named(coloring, value),
            (NodeData::SkyTexture(n), "type") => set_named(&mut n.sky_type, value),
            (NodeData::GradientTexture { gradient_type }, "type") => {
                set_named(gradient_type, value)
            }
            (NodeData::EnvironmentTexture(n), "color_space") => {
                set_named(&mut n.color_space, value)
            }
            (NodeData::EnvironmentTexture(n), "projection") => set_named(&mut n.projection, value),
            (NodeData::ImageTexture(n), "color_space") => set_named(&mut n.color_space, value),
            (NodeData::ImageTexture(n), "projection") => set_named(&mut n.projection, value),
            _ => Err(MemberError::unknown(kind, member, "enum")),
        }
    }
}

impl ShaderNode {
    /// Whether pixel data can be bound to this node
    pub fn accepts_image(&self) -> bool {
        matches!(self.data, NodeData::ImageTexture(_) | NodeData::EnvironmentTexture(_))
    }

    /// Bind in-memory pixels to an image or environment texture.
    ///
    /// Float pixels on an image texture switch it to linear filtering.
    pub fn bind_image(&mut self, binding: ImageBinding) -> Result<(), MemberError> {
        match &mut self.data {
            NodeData::ImageTexture(n) => {
                if binding.is_float {
                    n.interpolation = Interpolation::Linear;
                }
                n.filename.clone_from(&binding.filename);
                n.builtin = Some(binding);
            }
            NodeData::EnvironmentTexture(n) => {
                n.filename.clone_from(&binding.filename);
                n.builtin = Some(binding);
            }
            _ => {
                return Err(MemberError::Unsupported {
                    kind: self.kind,
                    capability: "image binding",
                })
            }
        }
        Ok(())
    }

    /// The node's texture mapping, if it has one
    pub fn texture_mapping_mut(&mut self) -> Result<&mut TextureMapping, MemberError> {
        match &mut self.data {
            NodeData::Mapping(mapping) => Ok(mapping),
            _ => Err(MemberError::Unsupported {
                kind: self.kind,
                capability: "texture mapping",
            }),
        }
    }
}

fn set_named<E: NamedEnum>(slot: &mut E, value: &str) -> Result<(), MemberError> {
    *slot = E::from_name(value).ok_or_else(|| MemberError::UnknownValue {
        enum_name: E::ENUM_NAME,
        value: value.to_string(),
    })?;
    Ok(())
}

fn decode_interpolation(member: &str, code: i32) -> Result<Interpolation, MemberError> {
    Interpolation::try_from(code).map_err(|code| MemberError::InvalidCode {
        member: member.to_string(),
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    fn node(kind: ShaderNodeKind) -> ShaderNode {
        ShaderNode::new(NodeId(1), kind)
    }

    #[test]
    fn test_refraction_starts_beckmann() {
        let n = node(ShaderNodeKind::Refraction);
        assert_eq!(
            n.data,
            NodeData::Refraction {
                distribution: RefractionDistribution::Beckmann
            }
        );
    }

    #[test]
    fn test_unknown_member_leaves_node_unchanged() {
        let mut n = node(ShaderNodeKind::BrickTexture);
        let before = n.clone();

        assert!(n.set_float_member("mortar", 4.0).is_err());
        assert!(n.set_bool_member("offset", true).is_err());
        assert!(n.set_vec_member("offset", [1.0; 3]).is_err());
        assert!(n.set_enum_member("type", "Bands").is_err());
        assert_eq!(n, before);

        n.set_float_member("squash", 0.25).unwrap();
        n.set_int_member("squash_frequency", 5).unwrap();
        let NodeData::BrickTexture(brick) = &n.data else {
            panic!("expected brick data");
        };
        assert_eq!(brick.squash, 0.25);
        assert_eq!(brick.squash_frequency, 5);
    }

    #[test]
    fn test_enum_validation() {
        let mut n = node(ShaderNodeKind::Math);
        n.set_enum_member("type", "Power").unwrap();

        let err = n.set_enum_member("type", "Exponent").unwrap_err();
        assert!(matches!(err, MemberError::UnknownValue { enum_name: "math type", .. }));

        let NodeData::Math(math) = &n.data else {
            panic!("expected math data");
        };
        assert_eq!(math.math_type, MathType::Power);
    }

    #[test]
    fn test_image_texture_enums_by_member() {
        let mut n = node(ShaderNodeKind::ImageTexture);
        n.set_enum_member("color_space", "None").unwrap();
        n.set_enum_member("projection", "Box").unwrap();
        assert!(n.set_enum_member("projection", "Mirror Ball").is_err());

        let NodeData::ImageTexture(tex) = &n.data else {
            panic!("expected image texture data");
        };
        assert_eq!(tex.color_space, ColorSpace::None);
        assert_eq!(tex.projection, ImageProjection::Box);
    }

    #[test]
    fn test_vec4_rows() {
        let mut n = node(ShaderNodeKind::MatrixMath);
        n.set_vec4_member("tfm", 3, [5.0, 6.0, 7.0, 1.0]).unwrap();
        assert!(matches!(
            n.set_vec4_member("tfm", 4, [0.0; 4]),
            Err(MemberError::IndexOutOfRange { len: 4, .. })
        ));
        assert!(n.set_vec4_member("tfm", -1, [0.0; 4]).is_err());

        let NodeData::MatrixMath(math) = &n.data else {
            panic!("expected matrix math data");
        };
        assert_eq!(math.tfm[3], [5.0, 6.0, 7.0, 1.0]);
        assert_eq!(math.tfm[0], IDENTITY[0]);

        let mut ramp = node(ShaderNodeKind::ColorRamp);
        ramp.set_vec4_member("ramp", 255, [1.0; 4]).unwrap();
        assert!(ramp.set_vec4_member("ramp", 256, [1.0; 4]).is_err());
    }

    #[test]
    fn test_interpolation_code() {
        let mut n = node(ShaderNodeKind::EnvironmentTexture);
        n.set_int_member("interpolation", 1).unwrap();
        assert!(matches!(
            n.set_int_member("interpolation", 9),
            Err(MemberError::InvalidCode { code: 9, .. })
        ));
        let NodeData::EnvironmentTexture(env) = &n.data else {
            panic!("expected environment data");
        };
        assert_eq!(env.interpolation, Interpolation::Closest);
    }

    #[test]
    fn test_bind_float_image_forces_linear() {
        let mut n = node(ShaderNodeKind::ImageTexture);
        n.set_int_member("interpolation", 2).unwrap();
        n.bind_image(ImageBinding {
            image: 0,
            filename: "bake".to_string(),
            is_float: true,
        })
        .unwrap();

        let NodeData::ImageTexture(tex) = &n.data else {
            panic!("expected image texture data");
        };
        assert_eq!(tex.interpolation, Interpolation::Linear);
        assert_eq!(tex.filename, "bake");

        let mut value = node(ShaderNodeKind::Value);
        assert!(!value.accepts_image());
        assert!(value
            .bind_image(ImageBinding {
                image: 0,
                filename: "bake".to_string(),
                is_float: false,
            })
            .is_err());
    }
}
