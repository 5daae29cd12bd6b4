// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builtin shader node catalog.
//!
//! One template per [`ShaderNodeKind`], with the input sockets (and their
//! unlinked defaults) and output sockets a host can address by name.

use crate::kind::ShaderNodeKind as K;
use crate::node::{NodeCategory, NodeCatalog, NodeTemplate};
use crate::socket::{Socket, SocketType};

const GREY: [f32; 3] = [0.8, 0.8, 0.8];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

fn def(
    kind: K,
    name: &str,
    category: NodeCategory,
    description: &str,
    inputs: Vec<Socket>,
    outputs: Vec<Socket>,
) -> NodeTemplate {
    NodeTemplate {
        kind,
        name: name.to_string(),
        category,
        description: description.to_string(),
        inputs,
        outputs,
    }
}

fn color(name: &str, value: [f32; 3]) -> Socket {
    Socket::input(name, SocketType::Color).with_vector(value)
}

fn float(name: &str, value: f32) -> Socket {
    Socket::input(name, SocketType::Float).with_float(value)
}

fn vector(name: &str) -> Socket {
    Socket::input(name, SocketType::Vector)
}

fn normal() -> Socket {
    Socket::input("Normal", SocketType::Normal)
}

fn closure(name: &str) -> Socket {
    Socket::input(name, SocketType::Closure)
}

fn out(name: &str, socket_type: SocketType) -> Socket {
    Socket::output(name, socket_type)
}

fn bsdf(kind: K, name: &str, description: &str, mut extra: Vec<Socket>) -> NodeTemplate {
    let mut inputs = vec![color("Color", GREY), normal()];
    inputs.append(&mut extra);
    def(
        kind,
        name,
        NodeCategory::Shader,
        description,
        inputs,
        vec![out("BSDF", SocketType::Closure)],
    )
}

fn texture(kind: K, name: &str, description: &str, mut extra: Vec<Socket>) -> NodeTemplate {
    let mut inputs = vec![vector("Vector")];
    inputs.append(&mut extra);
    def(
        kind,
        name,
        NodeCategory::Texture,
        description,
        inputs,
        vec![out("Color", SocketType::Color), out("Fac", SocketType::Float)],
    )
}

/// Create the catalog with every builtin node kind
pub fn create_shader_catalog() -> NodeCatalog {
    let mut catalog = NodeCatalog::new();

    // ========================================================================
    // Output
    // ========================================================================

    catalog.register(def(
        K::Output,
        "Output",
        NodeCategory::Output,
        "Graph output",
        vec![
            closure("Surface"),
            closure("Volume"),
            float("Displacement", 0.0),
            normal(),
        ],
        vec![],
    ));

    // ========================================================================
    // Shaders
    // ========================================================================

    catalog.register(def(
        K::Background,
        "Background",
        NodeCategory::Shader,
        "World background light",
        vec![color("Color", GREY), float("Strength", 1.0)],
        vec![out("Background", SocketType::Closure)],
    ));
    catalog.register(bsdf(
        K::Diffuse,
        "Diffuse BSDF",
        "Lambertian and Oren-Nayar diffuse reflection",
        vec![float("Roughness", 0.0)],
    ));
    catalog.register(bsdf(
        K::Anisotropic,
        "Anisotropic BSDF",
        "Glossy reflection with separate U/V roughness",
        vec![
            vector("Tangent"),
            float("Roughness", 0.2),
            float("Anisotropy", 0.5),
            float("Rotation", 0.0),
        ],
    ));
    catalog.register(bsdf(
        K::Translucent,
        "Translucent BSDF",
        "Diffuse transmission",
        vec![],
    ));
    catalog.register(def(
        K::Transparent,
        "Transparent BSDF",
        NodeCategory::Shader,
        "Straight-through transparency",
        vec![color("Color", WHITE)],
        vec![out("BSDF", SocketType::Closure)],
    ));
    catalog.register(bsdf(
        K::Velvet,
        "Velvet BSDF",
        "Cloth-like reflection",
        vec![float("Sigma", 1.0)],
    ));
    catalog.register(bsdf(
        K::Toon,
        "Toon BSDF",
        "Banded cartoon shading",
        vec![float("Size", 0.5), float("Smooth", 0.0)],
    ));
    catalog.register(bsdf(
        K::Glossy,
        "Glossy BSDF",
        "Microfacet reflection",
        vec![float("Roughness", 0.2)],
    ));
    catalog.register(bsdf(
        K::Glass,
        "Glass BSDF",
        "Microfacet reflection and refraction",
        vec![float("Roughness", 0.0), float("IOR", 1.45)],
    ));
    catalog.register(bsdf(
        K::Refraction,
        "Refraction BSDF",
        "Microfacet refraction",
        vec![float("Roughness", 0.0), float("IOR", 1.45)],
    ));
    catalog.register(def(
        K::Hair,
        "Hair BSDF",
        NodeCategory::Shader,
        "Strand reflection and transmission",
        vec![
            color("Color", GREY),
            float("Offset", 0.0),
            float("RoughnessU", 0.2),
            float("RoughnessV", 1.0),
            vector("Tangent"),
        ],
        vec![out("BSDF", SocketType::Closure)],
    ));
    catalog.register(def(
        K::Emission,
        "Emission",
        NodeCategory::Shader,
        "Light emitting surface",
        vec![color("Color", GREY), float("Strength", 10.0)],
        vec![out("Emission", SocketType::Closure)],
    ));
    catalog.register(def(
        K::AmbientOcclusion,
        "Ambient Occlusion",
        NodeCategory::Shader,
        "Ambient occlusion closure",
        vec![color("Color", GREY)],
        vec![out("AO", SocketType::Closure)],
    ));
    catalog.register(def(
        K::AbsorptionVolume,
        "Absorption Volume",
        NodeCategory::Shader,
        "Light absorbing volume",
        vec![color("Color", GREY), float("Density", 1.0)],
        vec![out("Volume", SocketType::Closure)],
    ));
    catalog.register(def(
        K::ScatterVolume,
        "Scatter Volume",
        NodeCategory::Shader,
        "Light scattering volume",
        vec![
            color("Color", GREY),
            float("Density", 1.0),
            float("Anisotropy", 0.0),
        ],
        vec![out("Volume", SocketType::Closure)],
    ));
    catalog.register(def(
        K::SubsurfaceScattering,
        "Subsurface Scattering",
        NodeCategory::Shader,
        "Subsurface multiple scattering",
        vec![
            color("Color", GREY),
            normal(),
            float("Scale", 0.01),
            vector("Radius").with_vector([0.1, 0.1, 0.1]),
            float("Sharpness", 0.0),
            float("Texture Blur", 0.0),
        ],
        vec![out("BSSRDF", SocketType::Closure)],
    ));
    catalog.register(def(
        K::MixClosure,
        "Mix Shader",
        NodeCategory::Shader,
        "Blend two closures",
        vec![float("Fac", 0.5), closure("Closure1"), closure("Closure2")],
        vec![out("Closure", SocketType::Closure)],
    ));
    catalog.register(def(
        K::AddClosure,
        "Add Shader",
        NodeCategory::Shader,
        "Sum two closures",
        vec![closure("Closure1"), closure("Closure2")],
        vec![out("Closure", SocketType::Closure)],
    ));
    catalog.register(def(
        K::Holdout,
        "Holdout",
        NodeCategory::Shader,
        "Cut a hole in the render alpha",
        vec![],
        vec![out("Holdout", SocketType::Closure)],
    ));

    // ========================================================================
    // Inputs
    // ========================================================================

    catalog.register(def(
        K::Value,
        "Value",
        NodeCategory::Input,
        "Constant scalar",
        vec![],
        vec![out("Value", SocketType::Float)],
    ));
    catalog.register(def(
        K::Color,
        "RGB",
        NodeCategory::Input,
        "Constant color",
        vec![],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::Camera,
        "Camera Data",
        NodeCategory::Input,
        "View vector and depth",
        vec![],
        vec![
            out("View Vector", SocketType::Vector),
            out("View Z Depth", SocketType::Float),
            out("View Distance", SocketType::Float),
        ],
    ));
    catalog.register(def(
        K::Fresnel,
        "Fresnel",
        NodeCategory::Input,
        "Dielectric fresnel weight",
        vec![normal(), float("IOR", 1.45)],
        vec![out("Fac", SocketType::Float)],
    ));
    catalog.register(def(
        K::LayerWeight,
        "Layer Weight",
        NodeCategory::Input,
        "Facing and fresnel blend weights",
        vec![normal(), float("Blend", 0.5)],
        vec![out("Fresnel", SocketType::Float), out("Facing", SocketType::Float)],
    ));
    catalog.register(def(
        K::TextureCoordinate,
        "Texture Coordinate",
        NodeCategory::Input,
        "Coordinate systems for texturing",
        vec![normal()],
        vec![
            out("Generated", SocketType::Point),
            out("Normal", SocketType::Normal),
            out("UV", SocketType::Point),
            out("Object", SocketType::Point),
            out("Camera", SocketType::Point),
            out("Window", SocketType::Point),
            out("Reflection", SocketType::Normal),
        ],
    ));
    catalog.register(def(
        K::LightPath,
        "Light Path",
        NodeCategory::Input,
        "Ray type and depth of the current path",
        vec![],
        [
            "Is Camera Ray",
            "Is Shadow Ray",
            "Is Diffuse Ray",
            "Is Glossy Ray",
            "Is Singular Ray",
            "Is Reflection Ray",
            "Is Transmission Ray",
            "Is Volume Scatter Ray",
            "Ray Length",
            "Ray Depth",
            "Transparent Depth",
        ]
        .into_iter()
        .map(|name| out(name, SocketType::Float))
        .collect(),
    ));
    catalog.register(def(
        K::LightFalloff,
        "Light Falloff",
        NodeCategory::Input,
        "Physically based light falloff",
        vec![float("Strength", 100.0), float("Smooth", 0.0)],
        vec![
            out("Quadratic", SocketType::Float),
            out("Linear", SocketType::Float),
            out("Constant", SocketType::Float),
        ],
    ));
    catalog.register(def(
        K::Wavelength,
        "Wavelength",
        NodeCategory::Converter,
        "Color of a visible wavelength in nanometers",
        vec![float("Wavelength", 500.0)],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::Blackbody,
        "Blackbody",
        NodeCategory::Converter,
        "Color of a black body at a temperature in Kelvin",
        vec![float("Temperature", 1200.0)],
        vec![out("Color", SocketType::Color)],
    ));

    // ========================================================================
    // Textures
    // ========================================================================

    catalog.register(def(
        K::ImageTexture,
        "Image Texture",
        NodeCategory::Texture,
        "Sample an image",
        vec![vector("Vector")],
        vec![out("Color", SocketType::Color), out("Alpha", SocketType::Float)],
    ));
    catalog.register(def(
        K::EnvironmentTexture,
        "Environment Texture",
        NodeCategory::Texture,
        "Sample an environment map by direction",
        vec![vector("Vector")],
        vec![out("Color", SocketType::Color), out("Alpha", SocketType::Float)],
    ));
    catalog.register(texture(
        K::BrickTexture,
        "Brick Texture",
        "Procedural bricks",
        vec![
            color("Color1", GREY),
            color("Color2", [0.2, 0.2, 0.2]),
            color("Mortar", BLACK),
            float("Scale", 5.0),
            float("Mortar Size", 0.02),
            float("Bias", 0.0),
            float("Brick Width", 0.5),
            float("Row Height", 0.25),
        ],
    ));
    catalog.register(def(
        K::SkyTexture,
        "Sky Texture",
        NodeCategory::Texture,
        "Analytic daylight sky",
        vec![vector("Vector")],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(texture(
        K::CheckerTexture,
        "Checker Texture",
        "Checkerboard",
        vec![
            color("Color1", GREY),
            color("Color2", [0.2, 0.2, 0.2]),
            float("Scale", 5.0),
        ],
    ));
    catalog.register(texture(
        K::NoiseTexture,
        "Noise Texture",
        "Perlin noise",
        vec![
            float("Scale", 5.0),
            float("Detail", 2.0),
            float("Distortion", 0.0),
        ],
    ));
    catalog.register(texture(
        K::WaveTexture,
        "Wave Texture",
        "Bands or rings with noise distortion",
        vec![
            float("Scale", 5.0),
            float("Distortion", 0.0),
            float("Detail", 2.0),
            float("Detail Scale", 1.0),
        ],
    ));
    catalog.register(texture(
        K::MagicTexture,
        "Magic Texture",
        "Psychedelic interference pattern",
        vec![float("Scale", 5.0), float("Distortion", 1.0)],
    ));
    catalog.register(texture(
        K::MusgraveTexture,
        "Musgrave Texture",
        "Fractal noise",
        vec![
            float("Scale", 1.0),
            float("Detail", 2.0),
            float("Dimension", 2.0),
            float("Lacunarity", 1.0),
            float("Offset", 0.0),
            float("Gain", 1.0),
        ],
    ));
    catalog.register(texture(
        K::VoronoiTexture,
        "Voronoi Texture",
        "Worley cells",
        vec![float("Scale", 5.0)],
    ));
    catalog.register(texture(
        K::GradientTexture,
        "Gradient Texture",
        "Linear, radial and spherical gradients",
        vec![],
    ));

    // ========================================================================
    // Color
    // ========================================================================

    catalog.register(def(
        K::Invert,
        "Invert",
        NodeCategory::Color,
        "Invert a color",
        vec![float("Fac", 1.0), color("Color", BLACK)],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::Mix,
        "Mix RGB",
        NodeCategory::Color,
        "Blend two colors",
        vec![
            float("Fac", 0.5),
            color("Color1", BLACK),
            color("Color2", BLACK),
        ],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::Gamma,
        "Gamma",
        NodeCategory::Color,
        "Apply a gamma curve",
        vec![color("Color", BLACK), float("Gamma", 1.0)],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::HueSaturation,
        "Hue/Saturation",
        NodeCategory::Color,
        "Shift hue, saturation and value",
        vec![
            float("Hue", 0.5),
            float("Saturation", 1.0),
            float("Value", 1.0),
            float("Fac", 1.0),
            color("Color", BLACK),
        ],
        vec![out("Color", SocketType::Color)],
    ));

    // ========================================================================
    // Vector
    // ========================================================================

    catalog.register(def(
        K::Bump,
        "Bump",
        NodeCategory::Vector,
        "Perturb the normal from a height value",
        vec![
            float("Strength", 1.0),
            float("Distance", 0.1),
            float("Height", 1.0),
            normal(),
        ],
        vec![out("Normal", SocketType::Normal)],
    ));
    catalog.register(def(
        K::Mapping,
        "Mapping",
        NodeCategory::Vector,
        "Transform texture coordinates",
        vec![Socket::input("Vector", SocketType::Point)],
        vec![out("Vector", SocketType::Point)],
    ));
    catalog.register(def(
        K::VectorMath,
        "Vector Math",
        NodeCategory::Vector,
        "Per-component vector operations",
        vec![vector("Vector1"), vector("Vector2")],
        vec![out("Value", SocketType::Float), out("Vector", SocketType::Vector)],
    ));
    catalog.register(def(
        K::MatrixMath,
        "Matrix Math",
        NodeCategory::Vector,
        "Transform a vector by a 4x4 matrix",
        vec![vector("Vector")],
        vec![out("Vector", SocketType::Vector)],
    ));

    // ========================================================================
    // Converters
    // ========================================================================

    catalog.register(def(
        K::Math,
        "Math",
        NodeCategory::Converter,
        "Scalar math",
        vec![float("Value1", 0.0), float("Value2", 0.0)],
        vec![out("Value", SocketType::Float)],
    ));
    catalog.register(def(
        K::ColorRamp,
        "Color Ramp",
        NodeCategory::Converter,
        "Map a factor through a color lookup table",
        vec![float("Fac", 0.0)],
        vec![out("Color", SocketType::Color), out("Alpha", SocketType::Float)],
    ));
    catalog.register(def(
        K::RgbToBw,
        "RGB to BW",
        NodeCategory::Converter,
        "Average of a color",
        vec![color("Color", BLACK)],
        vec![out("Val", SocketType::Float)],
    ));
    catalog.register(def(
        K::RgbToLuminance,
        "RGB to Luminance",
        NodeCategory::Converter,
        "Perceptual luminance of a color",
        vec![color("Color", BLACK)],
        vec![out("Val", SocketType::Float)],
    ));
    catalog.register(def(
        K::CombineXyz,
        "Combine XYZ",
        NodeCategory::Converter,
        "Build a vector from components",
        vec![float("X", 0.0), float("Y", 0.0), float("Z", 0.0)],
        vec![out("Vector", SocketType::Vector)],
    ));
    catalog.register(def(
        K::SeparateXyz,
        "Separate XYZ",
        NodeCategory::Converter,
        "Split a vector into components",
        vec![vector("Vector")],
        vec![
            out("X", SocketType::Float),
            out("Y", SocketType::Float),
            out("Z", SocketType::Float),
        ],
    ));
    catalog.register(def(
        K::SeparateHsv,
        "Separate HSV",
        NodeCategory::Converter,
        "Split a color into hue, saturation and value",
        vec![color("Color", GREY)],
        vec![
            out("H", SocketType::Float),
            out("S", SocketType::Float),
            out("V", SocketType::Float),
        ],
    ));
    catalog.register(def(
        K::CombineHsv,
        "Combine HSV",
        NodeCategory::Converter,
        "Build a color from hue, saturation and value",
        vec![float("H", 0.0), float("S", 0.0), float("V", 0.0)],
        vec![out("Color", SocketType::Color)],
    ));
    catalog.register(def(
        K::SeparateRgb,
        "Separate RGB",
        NodeCategory::Converter,
        "Split a color into channels",
        vec![color("Image", GREY)],
        vec![
            out("R", SocketType::Float),
            out("G", SocketType::Float),
            out("B", SocketType::Float),
        ],
    ));
    catalog.register(def(
        K::CombineRgb,
        "Combine RGB",
        NodeCategory::Converter,
        "Build a color from channels",
        vec![float("R", 0.0), float("G", 0.0), float("B", 0.0)],
        vec![out("Image", SocketType::Color)],
    ));

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_template() {
        let catalog = create_shader_catalog();
        for kind in K::TAGGED {
            assert!(catalog.get(kind).is_some(), "missing template for {kind}");
        }
        assert!(catalog.get(K::Output).is_some());
        assert_eq!(catalog.len(), K::TAGGED.len() + 1);
    }

    #[test]
    fn test_bsdf_sockets() {
        let catalog = create_shader_catalog();
        let glass = catalog.get(K::Glass).unwrap();
        let names: Vec<_> = glass.inputs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Color", "Normal", "Roughness", "IOR"]);
        assert_eq!(glass.outputs[0].socket_type, SocketType::Closure);
        assert_eq!(glass.inputs[3].value[0], 1.45);
    }

    #[test]
    fn test_categories() {
        let catalog = create_shader_catalog();
        assert_eq!(catalog.get(K::Output).unwrap().category, NodeCategory::Output);
        assert!(catalog
            .templates()
            .filter(|t| t.category == NodeCategory::Texture)
            .all(|t| t.outputs.iter().any(|s| s.name == "Color")));
    }
}
