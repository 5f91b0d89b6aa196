/// Resource-level material type.
///
/// Pure data attached to scene nodes as a component. The spatial core never
/// reads it; it travels with the node so a renderer consuming `RenderView`
/// can find surface parameters next to the geometry.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;

// ===== PARAMETER VALUES =====

/// A typed parameter value for the material
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    Texture(String),
}

// ===== DESCRIPTOR =====

/// Material creation descriptor
pub struct MaterialDesc {
    pub name: String,
    pub params: Vec<(String, ParamValue)>,
}

// ===== MATERIAL =====

/// Named surface parameters
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    params: Vec<(String, ParamValue)>,
    param_names: FxHashMap<String, usize>,
}

impl Material {
    /// Create a material, rejecting duplicate parameter names
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        let mut param_names = FxHashMap::default();
        for (index, (param_name, _)) in desc.params.iter().enumerate() {
            if param_names.insert(param_name.clone(), index).is_some() {
                engine_bail!("galaxy3d::Material",
                    "'{}': duplicate parameter name '{}'", desc.name, param_name);
            }
        }

        Ok(Self {
            name: desc.name,
            params: desc.params,
            param_names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter value by name
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.param_names.get(name).map(|&i| &self.params[i].1)
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameters in declaration order
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
