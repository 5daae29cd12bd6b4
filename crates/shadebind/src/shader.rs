// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader wrapper: a graph plus host-visible flags and scene slots.

use crate::handle::Handle;
use crate::scene::SceneHandle;
use indexmap::IndexMap;
use shadebind_graph::ShaderGraph;

/// Handle to a shader
pub type ShaderHandle = Handle<Shader>;

/// A shader owned by the registry
#[derive(Debug)]
pub struct Shader {
    /// Host-side identifier used to route log output
    pub client_id: u32,
    /// Display name
    pub name: String,
    /// Node graph
    pub graph: ShaderGraph,
    /// Multiple importance sampling for emissive surfaces
    pub use_mis: bool,
    /// Transparent shadows
    pub use_transparent_shadow: bool,
    /// Volume density varies over space
    pub heterogeneous_volume: bool,
    scene_mapping: IndexMap<SceneHandle, u32>,
}

impl Shader {
    /// Create a shader with an empty graph
    pub fn new(client_id: u32) -> Self {
        Self {
            client_id,
            name: String::new(),
            graph: ShaderGraph::default(),
            use_mis: true,
            use_transparent_shadow: true,
            heterogeneous_volume: true,
            scene_mapping: IndexMap::new(),
        }
    }

    /// Replace the graph with a fresh one holding only the output node
    pub fn reset_graph(&mut self) {
        self.graph = ShaderGraph::new(self.name.clone());
    }

    /// Slot of this shader in `scene`
    pub fn slot_in(&self, scene: SceneHandle) -> Option<u32> {
        self.scene_mapping.get(&scene).copied()
    }

    /// Record the slot this shader occupies in `scene`.
    ///
    /// The first slot wins; adding the shader to the same scene again does
    /// not move its mapping.
    pub fn map_scene(&mut self, scene: SceneHandle, slot: u32) {
        self.scene_mapping.entry(scene).or_insert(slot);
    }

    /// Scenes this shader was added to, with slots
    pub fn scene_mapping(&self) -> impl Iterator<Item = (SceneHandle, u32)> + '_ {
        self.scene_mapping.iter().map(|(scene, slot)| (*scene, *slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleTable;
    use crate::scene::Scene;
    use shadebind_graph::ShaderNodeKind;

    #[test]
    fn test_defaults() {
        let shader = Shader::new(3);
        assert!(shader.use_mis);
        assert!(shader.use_transparent_shadow);
        assert!(shader.heterogeneous_volume);
        assert_eq!(shader.graph.node_count(), 1);
    }

    #[test]
    fn test_reset_graph_drops_nodes() {
        let mut shader = Shader::new(0);
        shader.name = "floor".into();
        shader.graph.add(ShaderNodeKind::Diffuse);
        shader.reset_graph();

        assert_eq!(shader.graph.node_count(), 1);
        assert_eq!(shader.graph.name, "floor");
    }

    #[test]
    fn test_first_scene_slot_wins() {
        let mut scenes = HandleTable::new("scene");
        let scene = scenes.push(Scene::new(0)).unwrap();

        let mut shader = Shader::new(0);
        shader.map_scene(scene, 0);
        shader.map_scene(scene, 1);
        assert_eq!(shader.slot_in(scene), Some(0));
        assert_eq!(shader.scene_mapping().count(), 1);
    }
}
