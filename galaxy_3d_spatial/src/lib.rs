/*!
# Galaxy 3D Spatial

Spatial-visibility core of the Galaxy 3D engine.

This crate owns everything that answers "where is it and can the camera see
it": bounding volumes, hierarchical transforms, the scene graph, an octree
index and per-camera frustum culling. It does no rendering; a frame
loop asks it for the set of visible scene nodes and for the nearest node
under a picking ray.

## Architecture

- **math**: `AABB`, `OBB`, `Ray` (slab and Möller–Trumbore tests)
- **resource**: `Geometry` (positions + triangle indices) and `Material`
- **camera**: `Camera`, `Frustum` (plane extraction and box tests), `RenderView`
- **scene**: `Transform`, `SceneNode`, `Scene` (arena graph) and the
  `SceneIndex` trait with its `Octree` and `BruteForceIndex` implementations
- **utils**: `SlotAllocator` used for per-camera visibility slots

Logging goes through `Engine` and the `engine_*!` macros; fallible operations
return `galaxy3d::Result`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod resource;
pub mod camera;
pub mod scene;
pub mod utils;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Geometry primitives
    pub mod math {
        pub use crate::math::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
