// SPDX-License-Identifier: MIT OR Apache-2.0
//! Owner of every shader, scene and image, and the dispatch point for all
//! node edits.
//!
//! Each operation resolves a shader handle, finds a node by id, checks the
//! caller's idea of the node kind and writes one field. Failures are typed;
//! the C surface decides what to do with them.

use crate::error::{BindingError, Result};
use crate::handle::HandleTable;
use crate::image::{ImageCache, ImageHandle, PixelData};
use crate::scene::{Scene, SceneHandle};
use crate::shader::{Shader, ShaderHandle};
use shadebind_graph::nodes::enums::{
    MappingAxis, MappingProjection, MappingType, TransformComponent,
};
use shadebind_graph::{
    AttributeValue, ConnectionId, ImageBinding, MemberAccess, MemberError, NodeId, ShaderNode,
    ShaderNodeKind,
};

/// Names given to the shaders created by [`Registry::create_default_shaders`]
pub const DEFAULT_SHADER_NAMES: [&str; 4] = [
    "default_surface",
    "default_light",
    "default_background",
    "default_empty",
];

/// Map a host type tag to a node kind
pub fn kind_for_tag(tag: u32) -> Result<ShaderNodeKind> {
    ShaderNodeKind::from_tag(tag).ok_or(BindingError::UnknownNodeType(tag))
}

/// Tables of shaders, scenes and images
#[derive(Debug)]
pub struct Registry {
    shaders: HandleTable<Shader>,
    scenes: HandleTable<Scene>,
    images: ImageCache,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            shaders: HandleTable::new("shader"),
            scenes: HandleTable::new("scene"),
            images: ImageCache::new(),
        }
    }

    // ========================================================================
    // Shaders
    // ========================================================================

    /// Create a shader with an empty graph
    pub fn create_shader(&mut self, client_id: u32) -> Result<ShaderHandle> {
        let handle = self.shaders.push(Shader::new(client_id))?;
        tracing::debug!(client_id, shader_id = %handle, "Created shader");
        Ok(handle)
    }

    /// Create the surface, light, background and empty shaders, in that order
    pub fn create_default_shaders(&mut self, client_id: u32) -> Result<Vec<ShaderHandle>> {
        DEFAULT_SHADER_NAMES
            .iter()
            .map(|name| {
                let handle = self.create_shader(client_id)?;
                let shader = self.shader_mut(handle)?;
                shader.name = name.to_string();
                shader.reset_graph();
                Ok(handle)
            })
            .collect()
    }

    /// Turn a raw C index into a shader handle
    pub fn resolve_shader(&self, index: u32) -> Result<ShaderHandle> {
        Ok(self.shaders.resolve(index)?)
    }

    /// Get a shader
    pub fn shader(&self, handle: ShaderHandle) -> Result<&Shader> {
        Ok(self.shaders.get(handle)?)
    }

    /// Get a mutable shader
    pub fn shader_mut(&mut self, handle: ShaderHandle) -> Result<&mut Shader> {
        Ok(self.shaders.get_mut(handle)?)
    }

    /// Number of shaders
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Replace a shader's graph with a fresh one
    pub fn new_graph(&mut self, shader: ShaderHandle) -> Result<()> {
        let sh = self.shader_mut(shader)?;
        sh.reset_graph();
        tracing::debug!(client_id = sh.client_id, shader_id = %shader, "Reset shader graph");
        Ok(())
    }

    /// Set a shader's name
    pub fn set_shader_name(&mut self, shader: ShaderHandle, name: &str) -> Result<()> {
        let sh = self.shader_mut(shader)?;
        sh.name = name.to_string();
        sh.graph.name = name.to_string();
        tracing::trace!(client_id = sh.client_id, shader_id = %shader, name, "Set shader name");
        Ok(())
    }

    /// Toggle multiple importance sampling
    pub fn set_use_mis(&mut self, shader: ShaderHandle, value: bool) -> Result<()> {
        self.shader_mut(shader)?.use_mis = value;
        Ok(())
    }

    /// Toggle transparent shadows
    pub fn set_use_transparent_shadow(&mut self, shader: ShaderHandle, value: bool) -> Result<()> {
        self.shader_mut(shader)?.use_transparent_shadow = value;
        Ok(())
    }

    /// Toggle heterogeneous volume sampling
    pub fn set_heterogeneous_volume(&mut self, shader: ShaderHandle, value: bool) -> Result<()> {
        self.shader_mut(shader)?.heterogeneous_volume = value;
        Ok(())
    }

    // ========================================================================
    // Scenes
    // ========================================================================

    /// Create an empty scene
    pub fn create_scene(&mut self, client_id: u32) -> Result<SceneHandle> {
        let handle = self.scenes.push(Scene::new(client_id))?;
        tracing::debug!(client_id, scene_id = %handle, "Created scene");
        Ok(handle)
    }

    /// Turn a raw C index into a scene handle
    pub fn resolve_scene(&self, index: u32) -> Result<SceneHandle> {
        Ok(self.scenes.resolve(index)?)
    }

    /// Get a scene
    pub fn scene(&self, handle: SceneHandle) -> Result<&Scene> {
        Ok(self.scenes.get(handle)?)
    }

    /// Number of scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Append a shader to a scene's shader list and return its slot
    pub fn scene_add_shader(&mut self, scene: SceneHandle, shader: ShaderHandle) -> Result<u32> {
        // Check the shader first so a bad handle leaves the scene untouched
        self.shaders.get(shader)?;
        let sc = self.scenes.get_mut(scene)?;
        let slot = sc.add_shader(shader);
        let client_id = sc.client_id;

        self.shaders.get_mut(shader)?.map_scene(scene, slot);
        tracing::debug!(
            client_id,
            scene_id = %scene,
            shader_id = %shader,
            slot,
            "Added shader to scene"
        );
        Ok(slot)
    }

    /// Mark a shader as needing an update in a scene
    pub fn scene_tag_shader(&mut self, scene: SceneHandle, shader: ShaderHandle) -> Result<()> {
        let slot = self.scene_shader_id(scene, shader)?;
        let sc = self.scenes.get_mut(scene)?;
        sc.tag_slot(slot);
        tracing::trace!(
            client_id = sc.client_id,
            scene_id = %scene,
            shader_id = %shader,
            slot,
            "Tagged shader"
        );
        Ok(())
    }

    /// Slot a shader occupies in a scene
    pub fn scene_shader_id(&self, scene: SceneHandle, shader: ShaderHandle) -> Result<u32> {
        self.scenes.get(scene)?;
        self.shader(shader)?
            .slot_in(scene)
            .ok_or(BindingError::NotInScene {
                shader: shader.index(),
                scene: scene.index(),
            })
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Add a node to a shader's graph
    pub fn add_shader_node(
        &mut self,
        shader: ShaderHandle,
        kind: ShaderNodeKind,
    ) -> Result<NodeId> {
        let sh = self.shader_mut(shader)?;
        let node = sh.graph.add(kind);
        tracing::debug!(
            client_id = sh.client_id,
            shader_id = %shader,
            node_id = %node,
            %kind,
            "Added node"
        );
        Ok(node)
    }

    /// Get a node
    pub fn node(&self, shader: ShaderHandle, node: NodeId) -> Result<&ShaderNode> {
        self.shader(shader)?
            .graph
            .node(node)
            .ok_or(BindingError::NodeNotFound {
                shader: shader.index(),
                node,
            })
    }

    /// Run one edit against a node, checking its kind when one is given
    fn edit_node<R>(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: Option<ShaderNodeKind>,
        member: &str,
        edit: impl FnOnce(&mut ShaderNode) -> std::result::Result<R, MemberError>,
    ) -> Result<R> {
        let sh = self.shaders.get_mut(shader)?;
        let client_id = sh.client_id;
        let target = sh.graph.node_mut(node).ok_or(BindingError::NodeNotFound {
            shader: shader.index(),
            node,
        })?;
        if let Some(kind) = kind {
            target.expect_kind(kind)?;
        }
        let out = edit(target)?;
        tracing::trace!(client_id, shader_id = %shader, node_id = %node, member, "Set node member");
        Ok(out)
    }

    /// Write an input socket's unlinked value, matching its name without case
    pub fn set_attribute(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        name: &str,
        value: &AttributeValue,
    ) -> Result<()> {
        self.edit_node(shader, node, None, name, |n| n.set_attribute(name, value))
    }

    /// Write a bool member
    pub fn set_member_bool(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: bool,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| n.set_bool_member(member, value))
    }

    /// Write an int member
    pub fn set_member_int(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: i32,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| n.set_int_member(member, value))
    }

    /// Write a float member
    pub fn set_member_float(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: f32,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| n.set_float_member(member, value))
    }

    /// Write a three component member
    pub fn set_member_vec(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: [f32; 3],
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| n.set_vec_member(member, value))
    }

    /// Write one row of a four component array member
    pub fn set_member_vec4_at_index(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: [f32; 4],
        index: i32,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| {
            n.set_vec4_member(member, index, value)
        })
    }

    /// Set an enum member from its value name
    pub fn set_enum(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        member: &str,
        value: &str,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), member, |n| n.set_enum_member(member, value))
    }

    /// Set translation, rotation or scale of a mapping node
    pub fn texmapping_set_transformation(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        component: TransformComponent,
        value: [f32; 3],
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), "texture_mapping", |n| {
            n.texture_mapping_mut()?.set_transformation(component, value);
            Ok(())
        })
    }

    /// Set the source axis of each output component of a mapping node
    pub fn texmapping_set_mapping(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        axes: [MappingAxis; 3],
    ) -> Result<()> {
        let [x, y, z] = axes;
        self.edit_node(shader, node, Some(kind), "texture_mapping", |n| {
            n.texture_mapping_mut()?.set_axes(x, y, z);
            Ok(())
        })
    }

    /// Set the projection of a mapping node
    pub fn texmapping_set_projection(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        projection: MappingProjection,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), "texture_mapping", |n| {
            n.texture_mapping_mut()?.projection = projection;
            Ok(())
        })
    }

    /// Set what a mapping node transforms
    pub fn texmapping_set_type(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        mapping_type: MappingType,
    ) -> Result<()> {
        self.edit_node(shader, node, Some(kind), "texture_mapping", |n| {
            n.texture_mapping_mut()?.mapping_type = mapping_type;
            Ok(())
        })
    }

    /// Store pixels in the image cache and bind them to a texture node.
    ///
    /// The node is checked before the cache is touched, so a rejected call
    /// adds no image.
    pub fn set_member_image(
        &mut self,
        shader: ShaderHandle,
        node: NodeId,
        kind: ShaderNodeKind,
        image_name: &str,
        data: PixelData<'_>,
        width: u32,
        height: u32,
        depth: u32,
        channels: u32,
    ) -> Result<ImageHandle> {
        let target = self.node(shader, node)?;
        target.expect_kind(kind)?;
        if !target.accepts_image() {
            return Err(MemberError::Unsupported {
                kind,
                capability: "image binding",
            }
            .into());
        }

        let image = self
            .images
            .get_or_create(image_name, data, width, height, depth, channels)?;
        let binding = ImageBinding {
            image: image.index(),
            filename: image_name.to_string(),
            is_float: data.is_float(),
        };
        self.edit_node(shader, node, Some(kind), "image", |n| n.bind_image(binding))?;
        Ok(image)
    }

    /// Link an output socket to an input socket by name
    pub fn connect(
        &mut self,
        shader: ShaderHandle,
        from: NodeId,
        from_socket: &str,
        to: NodeId,
        to_socket: &str,
    ) -> Result<ConnectionId> {
        let sh = self.shader_mut(shader)?;
        let connection = sh.graph.connect(from, from_socket, to, to_socket)?;
        tracing::debug!(
            client_id = sh.client_id,
            shader_id = %shader,
            "Connected {from}.{from_socket} -> {to}.{to_socket}"
        );
        Ok(connection)
    }

    // ========================================================================
    // Images and teardown
    // ========================================================================

    /// The image cache
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Drop everything; outstanding handles become stale
    pub fn clear(&mut self) {
        tracing::debug!(
            shaders = self.shaders.len(),
            scenes = self.scenes.len(),
            images = self.images.len(),
            "Clearing registry"
        );
        self.shaders.clear();
        self.scenes.clear();
        self.images.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleError;
    use shadebind_graph::nodes::enums::{Interpolation, MathType, RefractionDistribution};
    use shadebind_graph::{ConnectionError, NodeData, OUTPUT_NODE};

    fn shader_with(kind: ShaderNodeKind) -> (Registry, ShaderHandle, NodeId) {
        let mut registry = Registry::new();
        let shader = registry.create_shader(0).unwrap();
        let node = registry.add_shader_node(shader, kind).unwrap();
        (registry, shader, node)
    }

    #[test]
    fn test_shader_handles_follow_creation_order() {
        let mut registry = Registry::new();
        let handles: Vec<_> = (0..5).map(|_| registry.create_shader(1).unwrap()).collect();
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.index(), i as u32);
        }
        assert_eq!(registry.shader_count(), 5);
    }

    #[test]
    fn test_default_shaders() {
        let mut registry = Registry::new();
        let defaults = registry.create_default_shaders(0).unwrap();
        let names: Vec<_> = defaults
            .iter()
            .map(|h| registry.shader(*h).unwrap().name.clone())
            .collect();
        assert_eq!(names, DEFAULT_SHADER_NAMES);
        assert_eq!(defaults[3].index(), 3);
    }

    #[test]
    fn test_shader_flags_and_new_graph() {
        let (mut registry, shader, _) = shader_with(ShaderNodeKind::Diffuse);
        registry.set_use_mis(shader, false).unwrap();
        registry.set_shader_name(shader, "floor").unwrap();
        registry.new_graph(shader).unwrap();

        let sh = registry.shader(shader).unwrap();
        assert!(!sh.use_mis);
        assert!(sh.use_transparent_shadow);
        assert_eq!(sh.graph.node_count(), 1);
        assert_eq!(sh.graph.name, "floor");
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(kind_for_tag(1), Ok(ShaderNodeKind::Diffuse));
        assert_eq!(kind_for_tag(999), Err(BindingError::UnknownNodeType(999)));
    }

    #[test]
    fn test_refraction_starts_beckmann() {
        let (registry, shader, node) = shader_with(ShaderNodeKind::Refraction);
        assert_eq!(
            registry.node(shader, node).unwrap().data,
            NodeData::Refraction { distribution: RefractionDistribution::Beckmann }
        );
    }

    #[test]
    fn test_set_member_and_enum() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::Math);
        registry
            .set_member_bool(shader, node, ShaderNodeKind::Math, "use_clamp", true)
            .unwrap();
        registry
            .set_enum(shader, node, ShaderNodeKind::Math, "type", "Less Than")
            .unwrap();

        let NodeData::Math(math) = &registry.node(shader, node).unwrap().data else {
            panic!("expected math data");
        };
        assert!(math.use_clamp);
        assert_eq!(math.math_type, MathType::LessThan);
    }

    #[test]
    fn test_unrecognized_member_changes_nothing() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::Math);
        let before = registry.node(shader, node).unwrap().clone();

        let err = registry.set_member_float(shader, node, ShaderNodeKind::Math, "turbidity", 1.0);
        assert!(matches!(err, Err(BindingError::Member(MemberError::UnknownMember { .. }))));
        let err = registry.set_enum(shader, node, ShaderNodeKind::Math, "type", "Teleport");
        assert!(matches!(err, Err(BindingError::Member(MemberError::UnknownValue { .. }))));
        let err = registry.set_member_bool(shader, node, ShaderNodeKind::Mix, "use_clamp", true);
        assert!(matches!(err, Err(BindingError::Member(MemberError::KindMismatch { .. }))));

        assert_eq!(*registry.node(shader, node).unwrap(), before);
    }

    #[test]
    fn test_missing_node() {
        let (mut registry, shader, _) = shader_with(ShaderNodeKind::Value);
        let err =
            registry.set_member_float(shader, NodeId(77), ShaderNodeKind::Value, "value", 1.0);
        assert_eq!(
            err,
            Err(BindingError::NodeNotFound { shader: 0, node: NodeId(77) })
        );
    }

    #[test]
    fn test_set_attribute() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::Emission);
        registry
            .set_attribute(shader, node, "strength", &AttributeValue::Float(3.0))
            .unwrap();
        let strength = registry.node(shader, node).unwrap().input("Strength").unwrap().value[0];
        assert_eq!(strength, 3.0);
    }

    #[test]
    fn test_texture_mapping_ops() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::Mapping);
        let kind = ShaderNodeKind::Mapping;
        registry
            .texmapping_set_transformation(shader, node, kind, TransformComponent::Scale, [2.0; 3])
            .unwrap();
        registry
            .texmapping_set_mapping(
                shader,
                node,
                kind,
                [MappingAxis::Z, MappingAxis::Y, MappingAxis::X],
            )
            .unwrap();
        registry
            .texmapping_set_projection(shader, node, kind, MappingProjection::Sphere)
            .unwrap();
        registry
            .texmapping_set_type(shader, node, kind, MappingType::Vector)
            .unwrap();

        let NodeData::Mapping(mapping) = &registry.node(shader, node).unwrap().data else {
            panic!("expected mapping data");
        };
        assert_eq!(mapping.scale, [2.0; 3]);
        assert_eq!(mapping.x_mapping, MappingAxis::Z);
        assert_eq!(mapping.projection, MappingProjection::Sphere);
        assert_eq!(mapping.mapping_type, MappingType::Vector);
    }

    #[test]
    fn test_image_dedup_through_nodes() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::ImageTexture);
        let kind = ShaderNodeKind::ImageTexture;
        let pixels = [0u8; 16];

        let first = registry
            .set_member_image(shader, node, kind, "wood", PixelData::Byte(&pixels), 2, 2, 1, 4)
            .unwrap();
        let second = registry
            .set_member_image(shader, node, kind, "wood", PixelData::Byte(&pixels), 2, 2, 1, 4)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.images().len(), 1);

        registry
            .set_member_image(shader, node, kind, "wood", PixelData::Byte(&pixels), 4, 1, 1, 4)
            .unwrap();
        assert_eq!(registry.images().len(), 2);
    }

    #[test]
    fn test_float_image_forces_linear() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::ImageTexture);
        let kind = ShaderNodeKind::ImageTexture;
        registry
            .set_member_int(shader, node, kind, "interpolation", Interpolation::Closest as i32)
            .unwrap();
        registry
            .set_member_image(shader, node, kind, "hdr", PixelData::Float(&[0.5; 3]), 1, 1, 1, 3)
            .unwrap();

        let NodeData::ImageTexture(tex) = &registry.node(shader, node).unwrap().data else {
            panic!("expected image texture data");
        };
        assert_eq!(tex.interpolation, Interpolation::Linear);
        assert_eq!(tex.filename, "hdr");
        assert!(tex.builtin.as_ref().unwrap().is_float);
    }

    #[test]
    fn test_image_on_wrong_node_adds_nothing() {
        let (mut registry, shader, node) = shader_with(ShaderNodeKind::Diffuse);
        let err = registry.set_member_image(
            shader,
            node,
            ShaderNodeKind::Diffuse,
            "wood",
            PixelData::Byte(&[0; 4]),
            1,
            1,
            1,
            4,
        );
        assert!(matches!(err, Err(BindingError::Member(MemberError::Unsupported { .. }))));
        assert!(registry.images().is_empty());
    }

    #[test]
    fn test_connect() {
        let (mut registry, shader, diffuse) = shader_with(ShaderNodeKind::Diffuse);
        registry
            .connect(shader, diffuse, "BSDF", OUTPUT_NODE, "Surface")
            .unwrap();

        let err = registry.connect(shader, NodeId(9), "BSDF", OUTPUT_NODE, "Volume");
        assert_eq!(
            err,
            Err(BindingError::Connection(ConnectionError::NodeNotFound(NodeId(9))))
        );
        assert_eq!(registry.shader(shader).unwrap().graph.connection_count(), 1);
    }

    #[test]
    fn test_shader_in_two_scenes() {
        let mut registry = Registry::new();
        let filler = registry.create_shader(0).unwrap();
        let shader = registry.create_shader(0).unwrap();
        let first = registry.create_scene(0).unwrap();
        let second = registry.create_scene(0).unwrap();
        let unmapped = registry.create_scene(0).unwrap();

        registry.scene_add_shader(first, shader).unwrap();
        registry.scene_add_shader(second, filler).unwrap();
        registry.scene_add_shader(second, shader).unwrap();

        assert_eq!(registry.scene_shader_id(first, shader), Ok(0));
        assert_eq!(registry.scene_shader_id(second, shader), Ok(1));
        assert_eq!(
            registry.scene_shader_id(unmapped, shader),
            Err(BindingError::NotInScene { shader: 1, scene: 2 })
        );
        assert_eq!(registry.shader(shader).unwrap().scene_mapping().count(), 2);
    }

    #[test]
    fn test_re_adding_shader_keeps_first_slot() {
        let mut registry = Registry::new();
        let shader = registry.create_shader(0).unwrap();
        let scene = registry.create_scene(0).unwrap();

        assert_eq!(registry.scene_add_shader(scene, shader), Ok(0));
        assert_eq!(registry.scene_add_shader(scene, shader), Ok(1));

        assert_eq!(registry.scene_shader_id(scene, shader), Ok(0));
        assert_eq!(registry.scene(scene).unwrap().shaders(), [shader, shader]);
        assert_eq!(registry.shader(shader).unwrap().scene_mapping().count(), 1);
    }

    #[test]
    fn test_scene_tag_shader() {
        let mut registry = Registry::new();
        let shader = registry.create_shader(0).unwrap();
        let scene = registry.create_scene(0).unwrap();
        registry.scene_add_shader(scene, shader).unwrap();

        registry.scene_tag_shader(scene, shader).unwrap();
        assert!(registry.scene(scene).unwrap().is_pending(0));

        let other = registry.create_shader(0).unwrap();
        assert!(registry.scene_tag_shader(scene, other).is_err());
    }

    #[test]
    fn test_clear_makes_handles_stale() {
        let mut registry = Registry::new();
        let shader = registry.create_shader(0).unwrap();
        registry.clear();

        assert!(matches!(
            registry.shader(shader),
            Err(BindingError::Handle(HandleError::Stale { .. }))
        ));
        let fresh = registry.create_shader(0).unwrap();
        assert_eq!(fresh.index(), 0);
        assert_eq!(registry.resolve_shader(0), Ok(fresh));
    }
}
