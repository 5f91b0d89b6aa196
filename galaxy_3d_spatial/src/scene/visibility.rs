/// Per-camera visibility bookkeeping.
///
/// Each registered camera owns one bit (`CameraSlot`) in the `u32` masks kept
/// by index nodes and indexed objects, so up to 32 cameras can cull the same
/// index independently. Culling one camera never disturbs the others' bits.

use rustc_hash::FxHashSet;
use slotmap::new_key_type;
use super::scene_node::SceneNodeKey;

new_key_type! {
    /// Stable handle to a camera registered in a `Scene`.
    pub struct CameraKey;
}

/// Number of cameras that can be culled against one index simultaneously
pub const MAX_CAMERA_SLOTS: u32 = 32;

/// Bit position of a camera in visibility masks (0..32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraSlot(u8);

impl CameraSlot {
    /// Returns `None` for `index >= MAX_CAMERA_SLOTS`.
    pub fn new(index: u32) -> Option<Self> {
        (index < MAX_CAMERA_SLOTS).then_some(Self(index as u8))
    }

    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// Single-bit mask for this slot.
    pub fn mask(self) -> u32 {
        1u32 << self.0
    }
}

/// Objects found visible by one `update_visibility` pass.
///
/// Each object appears once even if it is referenced by several index nodes.
#[derive(Debug, Clone)]
pub struct VisibilitySet {
    slot: CameraSlot,
    visible: FxHashSet<SceneNodeKey>,
}

impl VisibilitySet {
    pub(crate) fn new(slot: CameraSlot, visible: FxHashSet<SceneNodeKey>) -> Self {
        Self { slot, visible }
    }

    pub fn slot(&self) -> CameraSlot {
        self.slot
    }

    pub fn contains(&self, key: SceneNodeKey) -> bool {
        self.visible.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible objects in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = SceneNodeKey> + '_ {
        self.visible.iter().copied()
    }
}
