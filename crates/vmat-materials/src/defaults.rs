//! Fallback values written for slots that do not resolve to a texture.

use crate::slot::Slot;

/// Prefix of every texture reference written into a VMAT file.
pub const TEXTURE_PREFIX: &str = "materials/";

/// Flat tangent-space normal.
pub const DEFAULT_NORMAL: &str = "[0.501961 0.501961 1.000000 0.000000]";
/// Mid-grey roughness.
pub const DEFAULT_ROUGHNESS: &str = "[0.501961 0.501961 0.501961 0.000000]";
/// Colour shares the metalness texture.
pub const DEFAULT_COLOR: &str = "materials/default/default_metal.tga";
pub const DEFAULT_METALNESS: &str = "materials/default/default_metal.tga";
pub const DEFAULT_AMBIENT_OCCLUSION: &str = "materials/default/default_ao.tga";
pub const DEFAULT_HEIGHT: &str = "materials/default/default_height.tga";
pub const DEFAULT_TINT_MASK: &str = "materials/default/default_mask.tga";
pub const DEFAULT_TRANSLUCENCY: &str = "materials/default/default_trans.tga";

/// The default written for `slot` when it is not fed by an image texture.
pub fn default_for(slot: Slot) -> &'static str {
    match slot {
        Slot::BaseColor => DEFAULT_COLOR,
        Slot::Normal => DEFAULT_NORMAL,
        Slot::Roughness => DEFAULT_ROUGHNESS,
        Slot::Metallic => DEFAULT_METALNESS,
        Slot::AmbientOcclusion => DEFAULT_AMBIENT_OCCLUSION,
        Slot::Alpha => DEFAULT_TRANSLUCENCY,
    }
}
