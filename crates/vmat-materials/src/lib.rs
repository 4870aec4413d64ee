//! Material export: shading graph model, scene description, slot resolution,
//! and VMAT document generation.

mod defaults;
mod exporter;
mod graph;
mod scene;
mod slot;
mod vmat;

pub use defaults::{
    DEFAULT_AMBIENT_OCCLUSION, DEFAULT_COLOR, DEFAULT_HEIGHT, DEFAULT_METALNESS, DEFAULT_NORMAL,
    DEFAULT_ROUGHNESS, DEFAULT_TINT_MASK, DEFAULT_TRANSLUCENCY, TEXTURE_PREFIX, default_for,
};
pub use exporter::{
    ExportError, ExportReport, ExportSettings, convert_material, export_material, export_scene,
};
pub use graph::{ImageSource, Link, Node, NodeId, NodeKind, NodeTree, ShadingGraph};
pub use scene::{Material, ObjectKind, Scene, SceneError, SceneObject};
pub use slot::{Slot, linked_texture, resolve_slot, texture_basename, texture_reference};
pub use vmat::VmatDocument;
