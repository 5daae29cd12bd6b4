// SPDX-License-Identifier: MIT OR Apache-2.0
//! Enumerated node members.
//!
//! Named enums are set from strings by the host and validated against the
//! accepted names. Coded enums arrive as integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An enum member settable by name
pub trait NamedEnum: Copy + Sized + 'static {
    /// Enum name used in diagnostics
    const ENUM_NAME: &'static str;

    /// Every accepted value, in declaration order
    fn all() -> &'static [Self];

    /// Host-facing name of this value
    fn name(&self) -> &'static str;

    /// Look a value up by its exact name
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.name() == name)
    }

    /// Whether `name` is an accepted value
    fn exists(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $ty:ident ($enum_name:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $ty {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl NamedEnum for $ty {
            const ENUM_NAME: &'static str = $enum_name;

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $ty:ident {
            $($variant:ident = $code:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $ty {
            $(
                #[allow(missing_docs)]
                $variant = $code,
            )+
        }

        impl TryFrom<i32> for $ty {
            type Error = i32;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

named_enum! {
    /// Scalar math operation
    MathType("math type") {
        Add => "Add",
        Subtract => "Subtract",
        Multiply => "Multiply",
        Divide => "Divide",
        Sine => "Sine",
        Cosine => "Cosine",
        Tangent => "Tangent",
        Arcsine => "Arcsine",
        Arccosine => "Arccosine",
        Arctangent => "Arctangent",
        Power => "Power",
        Logarithm => "Logarithm",
        Minimum => "Minimum",
        Maximum => "Maximum",
        Round => "Round",
        LessThan => "Less Than",
        GreaterThan => "Greater Than",
        Modulo => "Modulo",
        Absolute => "Absolute",
    }
    default Add
}

named_enum! {
    /// Vector math operation
    VectorMathType("vector math type") {
        Add => "Add",
        Subtract => "Subtract",
        Average => "Average",
        DotProduct => "Dot Product",
        CrossProduct => "Cross Product",
        Normalize => "Normalize",
    }
    default Add
}

named_enum! {
    /// How the matrix math node applies its transform
    MatrixMathType("matrix math type") {
        Point => "Point",
        Vector => "Vector",
        Normal => "Normal",
    }
    default Point
}

named_enum! {
    /// Color blend mode
    MixType("mix type") {
        Mix => "Mix",
        Add => "Add",
        Multiply => "Multiply",
        Screen => "Screen",
        Overlay => "Overlay",
        Subtract => "Subtract",
        Divide => "Divide",
        Difference => "Difference",
        Darken => "Darken",
        Lighten => "Lighten",
        Dodge => "Dodge",
        Burn => "Burn",
        Hue => "Hue",
        Saturation => "Saturation",
        Value => "Value",
        Color => "Color",
        SoftLight => "Soft Light",
        LinearLight => "Linear Light",
    }
    default Mix
}

named_enum! {
    /// Microfacet distribution of the refraction BSDF
    RefractionDistribution("refraction distribution") {
        Sharp => "Sharp",
        Beckmann => "Beckmann",
        Ggx => "GGX",
    }
    default Sharp
}

named_enum! {
    /// Microfacet distribution of the glossy BSDF
    GlossyDistribution("glossy distribution") {
        Sharp => "Sharp",
        Beckmann => "Beckmann",
        Ggx => "GGX",
        AshikhminShirley => "Ashikhmin-Shirley",
    }
    default Beckmann
}

named_enum! {
    /// Microfacet distribution of the glass BSDF
    GlassDistribution("glass distribution") {
        Sharp => "Sharp",
        Beckmann => "Beckmann",
        Ggx => "GGX",
    }
    default Sharp
}

named_enum! {
    /// Microfacet distribution of the anisotropic BSDF
    AnisotropicDistribution("anisotropic distribution") {
        Beckmann => "Beckmann",
        Ggx => "GGX",
        AshikhminShirley => "Ashikhmin-Shirley",
    }
    default Ggx
}

named_enum! {
    /// Wave texture pattern
    WaveType("wave type") {
        Bands => "Bands",
        Rings => "Rings",
    }
    default Bands
}

named_enum! {
    /// Voronoi texture coloring
    VoronoiColoring("voronoi coloring") {
        Intensity => "Intensity",
        Cells => "Cells",
    }
    default Intensity
}

named_enum! {
    /// Sky model
    SkyType("sky type") {
        Preetham => "Preetham",
        HosekWilkie => "Hosek / Wilkie",
    }
    default HosekWilkie
}

named_enum! {
    /// Whether image data is color managed
    ColorSpace("color space") {
        Color => "Color",
        None => "None",
    }
    default Color
}

named_enum! {
    /// Image texture projection
    ImageProjection("image projection") {
        Flat => "Flat",
        Box => "Box",
        Sphere => "Sphere",
        Tube => "Tube",
    }
    default Flat
}

named_enum! {
    /// Environment texture projection
    EnvironmentProjection("environment projection") {
        Equirectangular => "Equirectangular",
        MirrorBall => "Mirror Ball",
    }
    default Equirectangular
}

named_enum! {
    /// Gradient texture falloff
    GradientType("gradient type") {
        Linear => "Linear",
        Quadratic => "Quadratic",
        Easing => "Easing",
        Diagonal => "Diagonal",
        Radial => "Radial",
        QuadraticSphere => "Quadratic Sphere",
        Spherical => "Spherical",
    }
    default Linear
}

coded_enum! {
    /// Texture filtering
    Interpolation {
        Linear = 0,
        Closest = 1,
        Cubic = 2,
        Smart = 3,
    }
    default Linear
}

coded_enum! {
    /// Source axis for one output component of a texture mapping
    MappingAxis {
        None = 0,
        X = 1,
        Y = 2,
        Z = 3,
    }
    default X
}

coded_enum! {
    /// Texture mapping projection
    MappingProjection {
        Flat = 0,
        Cube = 1,
        Tube = 2,
        Sphere = 3,
    }
    default Flat
}

coded_enum! {
    /// What a texture mapping transforms
    MappingType {
        Point = 0,
        Texture = 1,
        Vector = 2,
        Normal = 3,
    }
    default Texture
}

coded_enum! {
    /// Which part of a texture mapping transform to set
    TransformComponent {
        Translation = 0,
        Rotation = 1,
        Scale = 2,
    }
    default Translation
}

impl fmt::Display for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Translation => "TRANSLATION",
            Self::Rotation => "ROTATION",
            Self::Scale => "SCALE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(MathType::from_name("Less Than"), Some(MathType::LessThan));
        assert_eq!(GlossyDistribution::from_name("GGX"), Some(GlossyDistribution::Ggx));
        assert!(SkyType::exists("Hosek / Wilkie"));
        assert!(!MixType::exists("mix"));
        assert_eq!(EnvironmentProjection::MirrorBall.to_string(), "Mirror Ball");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Interpolation::try_from(2), Ok(Interpolation::Cubic));
        assert_eq!(Interpolation::try_from(7), Err(7));
        assert_eq!(MappingAxis::try_from(0), Ok(MappingAxis::None));
        assert_eq!(TransformComponent::try_from(2), Ok(TransformComponent::Scale));
    }
}
