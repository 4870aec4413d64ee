//! Scene description: the materials and objects handed over by the host.
//!
//! A scene is loaded from a RON file so any host (or a hand-written fixture)
//! can drive the exporter without linking against the host's object model.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::NodeTree;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned while reading or writing a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    /// I/O error on the scene file.
    #[error("failed to access scene {}: {source}", path.display())]
    Io {
        /// Scene file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// RON serialization error.
    #[error("ron serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

// ---------------------------------------------------------------------------
// Scene types
// ---------------------------------------------------------------------------

/// A material and its shading graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Material name, used as the output file stem.
    pub name: String,
    /// Whether the material is shaded with a node tree at all.
    #[serde(default = "default_use_nodes")]
    pub use_nodes: bool,
    /// The node tree, absent for legacy materials.
    #[serde(default)]
    pub node_tree: Option<NodeTree>,
}

fn default_use_nodes() -> bool {
    true
}

/// Object type, as far as material selection cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Mesh,
    Other,
}

/// An object of the scene with its material slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Whether the object is part of the host's current selection.
    #[serde(default)]
    pub selected: bool,
    /// Material names per slot; `None` for empty slots.
    #[serde(default)]
    pub material_slots: Vec<Option<String>>,
}

/// Everything the exporter reads from the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// All materials, in host enumeration order.
    pub materials: Vec<Material>,
    /// All objects, in host enumeration order.
    pub objects: Vec<SceneObject>,
}

impl Material {
    /// A node-based material with the given tree.
    pub fn with_nodes(name: impl Into<String>, node_tree: NodeTree) -> Self {
        Self {
            name: name.into(),
            use_nodes: true,
            node_tree: Some(node_tree),
        }
    }
}

impl Scene {
    /// Load a scene description from a RON file.
    pub fn from_ron(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Parse a scene description from a RON string.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(ron_str)?)
    }

    /// Write the scene description as pretty RON.
    pub fn save_ron(&self, path: &Path) -> Result<(), SceneError> {
        let serialized = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?;
        std::fs::write(path, serialized).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look a material up by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.name == name)
    }

    /// The materials an export run visits.
    ///
    /// With `only_selected`, only materials in the slots of selected mesh
    /// objects are returned, each once. Slots naming unknown materials are
    /// ignored.
    pub fn materials_to_convert(&self, only_selected: bool) -> Vec<&Material> {
        if !only_selected {
            return self.materials.iter().collect();
        }

        let mut seen = HashSet::new();
        self.objects
            .iter()
            .filter(|object| object.selected && object.kind == ObjectKind::Mesh)
            .flat_map(|object| object.material_slots.iter().flatten())
            .filter_map(|name| self.material(name))
            .filter(|&material| seen.insert(material.name.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
