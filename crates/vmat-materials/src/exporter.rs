//! Material exporter: turns each node-based material into a `.vmat` file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use vmat_config::{AlphaNaming, Config};

use crate::defaults::{DEFAULT_HEIGHT, DEFAULT_TINT_MASK, TEXTURE_PREFIX, default_for};
use crate::graph::{NodeId, ShadingGraph};
use crate::scene::{Material, Scene};
use crate::slot::{Slot, linked_texture, resolve_slot, texture_basename};
use crate::vmat::VmatDocument;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output folder could not be created.
    #[error("failed to create output folder {}: {source}", path.display())]
    CreateDir {
        /// Folder that could not be created.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A `.vmat` file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Settings and report
// ---------------------------------------------------------------------------

/// Everything an export run needs besides the scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSettings {
    /// Only convert materials of selected mesh objects.
    pub only_selected: bool,
    /// Folder receiving `<material>.vmat` files. Created when missing.
    pub output_folder: PathBuf,
    /// Sidecar naming used by `translucency_from_color_alpha`.
    pub alpha_naming: AlphaNaming,
    /// Use `<color stem><suffix>.<ext>` as translucency when the alpha slot
    /// is not linked to a texture but the base color is.
    pub translucency_from_color_alpha: bool,
}

impl ExportSettings {
    /// Settings writing into `output_folder`, everything else default.
    pub fn new(output_folder: impl Into<PathBuf>) -> Self {
        Self {
            only_selected: false,
            output_folder: output_folder.into(),
            alpha_naming: AlphaNaming::default(),
            translucency_from_color_alpha: false,
        }
    }
}

impl From<&Config> for ExportSettings {
    fn from(config: &Config) -> Self {
        Self {
            only_selected: config.export.only_selected,
            output_folder: config.export.output_folder.clone(),
            alpha_naming: config.alpha.naming.clone(),
            translucency_from_color_alpha: config.export.translucency_from_color_alpha,
        }
    }
}

/// Outcome of [`export_scene`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Files written, in visiting order.
    pub written: Vec<PathBuf>,
    /// Materials without node shading or without a principled shader.
    pub skipped: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Build the VMAT document for `material`.
///
/// Returns `None` for materials that do not use nodes, have no node tree, or
/// have no principled shader node. Height and tint mask are never read from
/// the graph.
pub fn convert_material(material: &Material, settings: &ExportSettings) -> Option<VmatDocument> {
    if !material.use_nodes {
        return None;
    }
    let tree = material.node_tree.as_ref()?;
    let principal = tree.principal_node()?;

    info!("Converting material: {}", material.name);
    let resolve = |slot| resolve_slot(tree, principal, slot, default_for(slot));

    let doc = VmatDocument {
        ambient_occlusion: resolve(Slot::AmbientOcclusion),
        color: resolve(Slot::BaseColor),
        height: DEFAULT_HEIGHT.to_string(),
        metalness: resolve(Slot::Metallic),
        normal: resolve(Slot::Normal),
        roughness: resolve(Slot::Roughness),
        tint_mask: DEFAULT_TINT_MASK.to_string(),
        translucency: resolve_translucency(tree, principal, settings),
    };
    debug!(?doc, "Resolved slots for {}", material.name);
    Some(doc)
}

fn resolve_translucency<G>(graph: &G, principal: NodeId, settings: &ExportSettings) -> String
where
    G: ShadingGraph + ?Sized,
{
    if settings.translucency_from_color_alpha
        && linked_texture(graph, principal, Slot::Alpha).is_none()
        && let Some(color) = linked_texture(graph, principal, Slot::BaseColor)
    {
        let basename = texture_basename(&color);
        let stem = Path::new(basename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(basename);
        let sidecar = format!("{TEXTURE_PREFIX}{}", settings.alpha_naming.derive(stem));
        debug!("Using color alpha sidecar as translucency: {}", sidecar);
        return sidecar;
    }
    resolve_slot(graph, principal, Slot::Alpha, default_for(Slot::Alpha))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn ensure_folder(folder: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(folder).map_err(|source| ExportError::CreateDir {
        path: folder.to_path_buf(),
        source,
    })
}

/// Convert `material` and write `<output_folder>/<name>.vmat`.
///
/// Separators in the name are flattened by [`VmatDocument::file_name`]. Any
/// existing file at that path is overwritten. Returns the written path,
/// or `None` when the material was skipped.
pub fn export_material(
    material: &Material,
    settings: &ExportSettings,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(doc) = convert_material(material, settings) else {
        debug!("Skipping material without principled shading: {}", material.name);
        return Ok(None);
    };

    ensure_folder(&settings.output_folder)?;
    let path = settings
        .output_folder
        .join(VmatDocument::file_name(&material.name));
    std::fs::write(&path, doc.render()).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!("Written VMAT file: {}", path.display());
    Ok(Some(path))
}

/// Export every material selected by `settings.only_selected`.
///
/// The output folder is created up front. The first I/O failure aborts the
/// run; files already written stay on disk.
pub fn export_scene(scene: &Scene, settings: &ExportSettings) -> Result<ExportReport, ExportError> {
    ensure_folder(&settings.output_folder)?;

    let mut report = ExportReport::default();
    for material in scene.materials_to_convert(settings.only_selected) {
        match export_material(material, settings)? {
            Some(path) => report.written.push(path),
            None => report.skipped.push(material.name.clone()),
        }
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Exported materials to {}",
        settings.output_folder.display()
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
