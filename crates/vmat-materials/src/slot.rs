//! Slot resolution: maps a principled shader input to the string written
//! into the VMAT file.

use tracing::debug;

use crate::defaults::TEXTURE_PREFIX;
use crate::graph::{NodeId, NodeKind, ShadingGraph};

/// A principled shader input exported to VMAT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    BaseColor,
    Normal,
    Roughness,
    Metallic,
    AmbientOcclusion,
    Alpha,
}

impl Slot {
    /// Every slot read from the graph.
    pub const ALL: [Slot; 6] = [
        Slot::BaseColor,
        Slot::Normal,
        Slot::Roughness,
        Slot::Metallic,
        Slot::AmbientOcclusion,
        Slot::Alpha,
    ];

    /// Name of the shader input socket this slot reads.
    pub fn input_name(self) -> &'static str {
        match self {
            Slot::BaseColor => "Base Color",
            Slot::Normal => "Normal",
            Slot::Roughness => "Roughness",
            Slot::Metallic => "Metallic",
            Slot::AmbientOcclusion => "Ambient Occlusion",
            Slot::Alpha => "Alpha",
        }
    }
}

/// The file name part of a host image path.
///
/// Both `/` and `\` separate directories, so Windows paths and host-relative
/// `//` paths strip the same way on every platform.
pub fn texture_basename(filepath: &str) -> &str {
    filepath.rsplit(['/', '\\']).next().unwrap_or(filepath)
}

/// `materials/<basename>` for a host image path, or `None` if the path has
/// no file name.
pub fn texture_reference(filepath: &str) -> Option<String> {
    let basename = texture_basename(filepath);
    (!basename.is_empty()).then(|| format!("{TEXTURE_PREFIX}{basename}"))
}

/// The texture reference feeding `slot`, if the slot is linked straight to an
/// image texture node with a usable image.
///
/// Links are not followed past the first hop: a texture behind a normal map
/// or mix node does not count.
pub fn linked_texture<G>(graph: &G, principal: NodeId, slot: Slot) -> Option<String>
where
    G: ShadingGraph + ?Sized,
{
    let producer = graph.incoming_producer(principal, slot.input_name())?;
    match &producer.kind {
        NodeKind::ImageTexture { image: Some(image) } => texture_reference(&image.filepath),
        NodeKind::ImageTexture { image: None } => None,
        NodeKind::Other { type_name } => {
            debug!(
                "{} is fed by {} node '{}', ignoring link",
                slot.input_name(),
                type_name,
                producer.name
            );
            None
        }
        NodeKind::PrincipledBsdf => None,
    }
}

/// Resolve `slot` on the `principal` node of `graph`, falling back to
/// `default` when [`linked_texture`] finds nothing.
pub fn resolve_slot<G>(graph: &G, principal: NodeId, slot: Slot, default: &str) -> String
where
    G: ShadingGraph + ?Sized,
{
    match linked_texture(graph, principal, slot) {
        Some(reference) => {
            debug!("Found {} texture: {}", slot.input_name(), reference);
            reference
        }
        None => {
            debug!("Using default {} texture: {}", slot.input_name(), default);
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_for;
    use crate::graph::{ImageSource, NodeTree};

    fn image(path: &str) -> NodeKind {
        NodeKind::ImageTexture {
            image: Some(ImageSource {
                filepath: path.to_string(),
            }),
        }
    }

    fn tree_with(slot: Slot, producer: NodeKind) -> (NodeTree, NodeId) {
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node("Principled BSDF", NodeKind::PrincipledBsdf);
        let source = tree.add_node("source", producer);
        tree.link(source, "Color", bsdf, slot.input_name());
        (tree, bsdf)
    }

    #[test]
    fn test_basename_strips_directories() {
        assert_eq!(texture_basename("textures/brick_color.png"), "brick_color.png");
        assert_eq!(texture_basename("//textures/brick.png"), "brick.png");
        assert_eq!(texture_basename("C:\\tex\\wood\\oak.tga"), "oak.tga");
        assert_eq!(texture_basename("plain.png"), "plain.png");
        assert_eq!(texture_basename("dir/"), "");
    }

    #[test]
    fn test_texture_reference() {
        assert_eq!(
            texture_reference("textures/brick_color.png").as_deref(),
            Some("materials/brick_color.png")
        );
        assert_eq!(texture_reference("textures/"), None);
        assert_eq!(texture_reference(""), None);
    }

    #[test]
    fn test_connected_image_resolves_to_texture() {
        let (tree, bsdf) = tree_with(Slot::BaseColor, image("textures/brick_color.png"));
        let value = resolve_slot(&tree, bsdf, Slot::BaseColor, default_for(Slot::BaseColor));
        assert_eq!(value, "materials/brick_color.png");
    }

    #[test]
    fn test_unconnected_slot_uses_default() {
        let (tree, bsdf) = tree_with(Slot::BaseColor, image("a.png"));
        for slot in [Slot::Normal, Slot::Roughness, Slot::Metallic, Slot::Alpha] {
            assert_eq!(
                resolve_slot(&tree, bsdf, slot, default_for(slot)),
                default_for(slot)
            );
        }
    }

    #[test]
    fn test_procedural_producer_uses_default() {
        let (tree, bsdf) = tree_with(
            Slot::Roughness,
            NodeKind::Other {
                type_name: "TEX_NOISE".to_string(),
            },
        );
        let value = resolve_slot(&tree, bsdf, Slot::Roughness, default_for(Slot::Roughness));
        assert_eq!(value, "[0.501961 0.501961 0.501961 0.000000]");
    }

    #[test]
    fn test_link_not_followed_past_one_hop() {
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node("bsdf", NodeKind::PrincipledBsdf);
        let normal_map = tree.add_node(
            "Normal Map",
            NodeKind::Other {
                type_name: "NORMAL_MAP".to_string(),
            },
        );
        let tex = tree.add_node("tex", image("brick_normal.png"));
        tree.link(tex, "Color", normal_map, "Color");
        tree.link(normal_map, "Normal", bsdf, "Normal");

        let value = resolve_slot(&tree, bsdf, Slot::Normal, default_for(Slot::Normal));
        assert_eq!(value, default_for(Slot::Normal));
    }

    #[test]
    fn test_image_node_without_image_uses_default() {
        let (tree, bsdf) = tree_with(Slot::Metallic, NodeKind::ImageTexture { image: None });
        let value = resolve_slot(&tree, bsdf, Slot::Metallic, default_for(Slot::Metallic));
        assert_eq!(value, default_for(Slot::Metallic));

        let (tree, bsdf) = tree_with(Slot::Metallic, image("textures/"));
        let value = resolve_slot(&tree, bsdf, Slot::Metallic, default_for(Slot::Metallic));
        assert_eq!(value, default_for(Slot::Metallic));
    }

    #[test]
    fn test_linked_texture_distinguishes_default_named_files() {
        let (tree, bsdf) = tree_with(Slot::BaseColor, image("default/default_color.tga"));
        assert_eq!(
            linked_texture(&tree, bsdf, Slot::BaseColor).as_deref(),
            Some("materials/default_color.tga")
        );
        assert_eq!(linked_texture(&tree, bsdf, Slot::Alpha), None);
    }

    #[test]
    fn test_slot_input_names() {
        assert_eq!(Slot::BaseColor.input_name(), "Base Color");
        assert_eq!(Slot::AmbientOcclusion.input_name(), "Ambient Occlusion");
        assert_eq!(Slot::ALL.len(), 6);
    }
}
