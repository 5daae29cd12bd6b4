// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-scene shader lists.

use crate::handle::Handle;
use crate::shader::ShaderHandle;
use indexmap::IndexSet;

/// Handle to a scene
pub type SceneHandle = Handle<Scene>;

/// The shaders one scene renders with, in slot order
#[derive(Debug, Default)]
pub struct Scene {
    /// Host-side identifier used to route log output
    pub client_id: u32,
    shaders: Vec<ShaderHandle>,
    pending: IndexSet<u32>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(client_id: u32) -> Self {
        Self {
            client_id,
            ..Self::default()
        }
    }

    /// Append a shader, tag it for update and return its slot
    pub fn add_shader(&mut self, shader: ShaderHandle) -> u32 {
        let slot = self.shaders.len() as u32;
        self.shaders.push(shader);
        self.tag_slot(slot);
        slot
    }

    /// Shaders in slot order
    pub fn shaders(&self) -> &[ShaderHandle] {
        &self.shaders
    }

    /// Mark a slot as needing an update; returns false for unknown slots
    pub fn tag_slot(&mut self, slot: u32) -> bool {
        if (slot as usize) < self.shaders.len() {
            self.pending.insert(slot);
            true
        } else {
            false
        }
    }

    /// Whether a slot is waiting for an update
    pub fn is_pending(&self, slot: u32) -> bool {
        self.pending.contains(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleTable;
    use crate::shader::Shader;

    #[test]
    fn test_add_tags_slot() {
        let mut shaders = HandleTable::new("shader");
        let a = shaders.push(Shader::new(0)).unwrap();
        let b = shaders.push(Shader::new(0)).unwrap();

        let mut scene = Scene::new(7);
        assert!(!scene.is_pending(0));
        assert_eq!(scene.add_shader(a), 0);
        assert_eq!(scene.add_shader(b), 1);
        assert_eq!(scene.shaders(), [a, b]);
        assert!(scene.is_pending(0));
        assert!(scene.is_pending(1));

        assert!(scene.tag_slot(1));
        assert!(!scene.tag_slot(5));
        assert!(!scene.is_pending(5));
    }
}
