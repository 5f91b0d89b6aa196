/// Scene node types.
///
/// A SceneNode is one object of the scene graph: a transform, links to its
/// parent and children (as arena keys), a set of components and flags.
/// Nodes live in the `Scene`'s SlotMap; structural changes go through the
/// Scene so parent and child links stay consistent.

use std::sync::Arc;
use bitflags::bitflags;
use slotmap::new_key_type;
use crate::resource::{Geometry, Material};
use super::transform::Transform;
use super::visibility::CameraKey;

new_key_type! {
    /// Stable handle to a node in a `Scene`.
    pub struct SceneNodeKey;
}

bitflags! {
    /// Per-node state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        /// Inactive nodes (and their subtrees) are skipped by indexing and culling
        const ACTIVE = 1 << 0;
        /// Hint for callers that the node does not move
        const STATIC = 1 << 1;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        ObjectFlags::ACTIVE
    }
}

// ===== COMPONENTS =====

/// Discriminant of a `Component`. A node holds at most one component per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Geometry,
    Material,
    Camera,
}

/// Data attached to a node.
#[derive(Debug, Clone)]
pub enum Component {
    /// Triangle data; gives the node world bounds and makes it pickable
    Geometry(Arc<Geometry>),
    /// Opaque surface description
    Material(Arc<Material>),
    /// Camera registered in the same Scene
    Camera(CameraKey),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Geometry(_) => ComponentKind::Geometry,
            Component::Material(_) => ComponentKind::Material,
            Component::Camera(_) => ComponentKind::Camera,
        }
    }
}

// ===== SCENE NODE =====

#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Random v4 UUID, stable for the node's lifetime
    uuid: String,
    name: String,
    parent: Option<SceneNodeKey>,
    children: Vec<SceneNodeKey>,
    transform: Transform,
    components: Vec<Component>,
    flags: ObjectFlags,
}

impl SceneNode {
    pub(crate) fn new(name: impl Into<String>, parent: Option<SceneNodeKey>) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            parent,
            children: Vec::new(),
            transform: Transform::new(),
            components: Vec::new(),
            flags: ObjectFlags::default(),
        }
    }

    // ===== GETTERS =====

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<SceneNodeKey> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[SceneNodeKey] {
        &self.children
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(ObjectFlags::ACTIVE)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(ObjectFlags::STATIC)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.component(kind).is_some()
    }

    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        match self.component(ComponentKind::Geometry) {
            Some(Component::Geometry(g)) => Some(g),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        match self.component(ComponentKind::Material) {
            Some(Component::Material(m)) => Some(m),
            _ => None,
        }
    }

    pub fn camera(&self) -> Option<CameraKey> {
        match self.component(ComponentKind::Camera) {
            Some(Component::Camera(c)) => Some(*c),
            _ => None,
        }
    }

    // ===== CRATE-INTERNAL MUTATORS (driven by Scene) =====

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_parent(&mut self, parent: Option<SceneNodeKey>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: SceneNodeKey) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: SceneNodeKey) {
        self.children.retain(|&c| c != child);
    }

    pub(crate) fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub(crate) fn set_flag(&mut self, flag: ObjectFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    /// Insert or replace the component of the same kind; returns the replaced one.
    pub(crate) fn insert_component(&mut self, component: Component) -> Option<Component> {
        let kind = component.kind();
        match self.components.iter().position(|c| c.kind() == kind) {
            Some(i) => Some(std::mem::replace(&mut self.components[i], component)),
            None => {
                self.components.push(component);
                None
            }
        }
    }

    pub(crate) fn take_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let i = self.components.iter().position(|c| c.kind() == kind)?;
        Some(self.components.remove(i))
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
