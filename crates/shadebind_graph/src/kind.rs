// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node kinds and their host-facing type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every node kind the graph knows about.
///
/// All kinds except [`ShaderNodeKind::Output`] have a numeric tag used by the
/// C surface; tags follow the order of [`ShaderNodeKind::TAGGED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ShaderNodeKind {
    Background,
    Diffuse,
    Anisotropic,
    Translucent,
    Transparent,
    Velvet,
    Toon,
    Glossy,
    Glass,
    Refraction,
    Hair,
    Emission,
    AmbientOcclusion,
    AbsorptionVolume,
    ScatterVolume,
    SubsurfaceScattering,
    Value,
    Color,
    MixClosure,
    AddClosure,
    Invert,
    Mix,
    Gamma,
    Wavelength,
    Blackbody,
    Camera,
    Fresnel,
    Math,
    ImageTexture,
    EnvironmentTexture,
    BrickTexture,
    SkyTexture,
    CheckerTexture,
    NoiseTexture,
    WaveTexture,
    MagicTexture,
    MusgraveTexture,
    TextureCoordinate,
    Bump,
    RgbToBw,
    RgbToLuminance,
    LightPath,
    LightFalloff,
    VoronoiTexture,
    LayerWeight,
    CombineXyz,
    SeparateXyz,
    SeparateHsv,
    CombineHsv,
    SeparateRgb,
    CombineRgb,
    Mapping,
    Holdout,
    HueSaturation,
    GradientTexture,
    ColorRamp,
    VectorMath,
    MatrixMath,
    /// Graph output; every graph owns exactly one
    Output,
}

impl ShaderNodeKind {
    /// Kinds a host may create, indexed by type tag
    pub const TAGGED: [ShaderNodeKind; 58] = [
        Self::Background,
        Self::Diffuse,
        Self::Anisotropic,
        Self::Translucent,
        Self::Transparent,
        Self::Velvet,
        Self::Toon,
        Self::Glossy,
        Self::Glass,
        Self::Refraction,
        Self::Hair,
        Self::Emission,
        Self::AmbientOcclusion,
        Self::AbsorptionVolume,
        Self::ScatterVolume,
        Self::SubsurfaceScattering,
        Self::Value,
        Self::Color,
        Self::MixClosure,
        Self::AddClosure,
        Self::Invert,
        Self::Mix,
        Self::Gamma,
        Self::Wavelength,
        Self::Blackbody,
        Self::Camera,
        Self::Fresnel,
        Self::Math,
        Self::ImageTexture,
        Self::EnvironmentTexture,
        Self::BrickTexture,
        Self::SkyTexture,
        Self::CheckerTexture,
        Self::NoiseTexture,
        Self::WaveTexture,
        Self::MagicTexture,
        Self::MusgraveTexture,
        Self::TextureCoordinate,
        Self::Bump,
        Self::RgbToBw,
        Self::RgbToLuminance,
        Self::LightPath,
        Self::LightFalloff,
        Self::VoronoiTexture,
        Self::LayerWeight,
        Self::CombineXyz,
        Self::SeparateXyz,
        Self::SeparateHsv,
        Self::CombineHsv,
        Self::SeparateRgb,
        Self::CombineRgb,
        Self::Mapping,
        Self::Holdout,
        Self::HueSaturation,
        Self::GradientTexture,
        Self::ColorRamp,
        Self::VectorMath,
        Self::MatrixMath,
    ];

    /// Resolve a host type tag
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::TAGGED.get(tag as usize).copied()
    }

    /// The host type tag, `None` for the output node
    pub fn tag(&self) -> Option<u32> {
        Self::TAGGED.iter().position(|k| k == self).map(|i| i as u32)
    }

    /// Stable snake_case identifier, used in logs and catalogs
    pub fn id(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Diffuse => "diffuse_bsdf",
            Self::Anisotropic => "anisotropic_bsdf",
            Self::Translucent => "translucent_bsdf",
            Self::Transparent => "transparent_bsdf",
            Self::Velvet => "velvet_bsdf",
            Self::Toon => "toon_bsdf",
            Self::Glossy => "glossy_bsdf",
            Self::Glass => "glass_bsdf",
            Self::Refraction => "refraction_bsdf",
            Self::Hair => "hair_bsdf",
            Self::Emission => "emission",
            Self::AmbientOcclusion => "ambient_occlusion",
            Self::AbsorptionVolume => "absorption_volume",
            Self::ScatterVolume => "scatter_volume",
            Self::SubsurfaceScattering => "subsurface_scattering",
            Self::Value => "value",
            Self::Color => "color",
            Self::MixClosure => "mix_closure",
            Self::AddClosure => "add_closure",
            Self::Invert => "invert",
            Self::Mix => "mix",
            Self::Gamma => "gamma",
            Self::Wavelength => "wavelength",
            Self::Blackbody => "blackbody",
            Self::Camera => "camera",
            Self::Fresnel => "fresnel",
            Self::Math => "math",
            Self::ImageTexture => "image_texture",
            Self::EnvironmentTexture => "environment_texture",
            Self::BrickTexture => "brick_texture",
            Self::SkyTexture => "sky_texture",
            Self::CheckerTexture => "checker_texture",
            Self::NoiseTexture => "noise_texture",
            Self::WaveTexture => "wave_texture",
            Self::MagicTexture => "magic_texture",
            Self::MusgraveTexture => "musgrave_texture",
            Self::TextureCoordinate => "texture_coordinate",
            Self::Bump => "bump",
            Self::RgbToBw => "rgb_to_bw",
            Self::RgbToLuminance => "rgb_to_luminance",
            Self::LightPath => "light_path",
            Self::LightFalloff => "light_falloff",
            Self::VoronoiTexture => "voronoi_texture",
            Self::LayerWeight => "layer_weight",
            Self::CombineXyz => "combine_xyz",
            Self::SeparateXyz => "separate_xyz",
            Self::SeparateHsv => "separate_hsv",
            Self::CombineHsv => "combine_hsv",
            Self::SeparateRgb => "separate_rgb",
            Self::CombineRgb => "combine_rgb",
            Self::Mapping => "mapping",
            Self::Holdout => "holdout",
            Self::HueSaturation => "hue_saturation",
            Self::GradientTexture => "gradient_texture",
            Self::ColorRamp => "color_ramp",
            Self::VectorMath => "vector_math",
            Self::MatrixMath => "matrix_math",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for ShaderNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_dense() {
        for (tag, kind) in ShaderNodeKind::TAGGED.iter().enumerate() {
            assert_eq!(kind.tag(), Some(tag as u32));
            assert_eq!(ShaderNodeKind::from_tag(tag as u32), Some(*kind));
        }
        assert_eq!(ShaderNodeKind::from_tag(58), None);
        assert_eq!(ShaderNodeKind::Output.tag(), None);
    }

    #[test]
    fn test_known_tags() {
        assert_eq!(ShaderNodeKind::from_tag(0), Some(ShaderNodeKind::Background));
        assert_eq!(ShaderNodeKind::from_tag(27), Some(ShaderNodeKind::Math));
        assert_eq!(ShaderNodeKind::from_tag(57), Some(ShaderNodeKind::MatrixMath));
    }
}
