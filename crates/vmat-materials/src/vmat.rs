//! VMAT text generation for the `csgo_environment.vfx` shader.

use std::fmt;

use crate::defaults::{
    DEFAULT_AMBIENT_OCCLUSION, DEFAULT_COLOR, DEFAULT_HEIGHT, DEFAULT_METALNESS, DEFAULT_NORMAL,
    DEFAULT_ROUGHNESS, DEFAULT_TINT_MASK, DEFAULT_TRANSLUCENCY,
};

/// The eight texture values substituted into a VMAT file.
///
/// Every field is a texture reference (`materials/<file>`) or a literal
/// vector such as [`DEFAULT_NORMAL`]; none is ever empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmatDocument {
    pub ambient_occlusion: String,
    pub color: String,
    pub height: String,
    pub metalness: String,
    pub normal: String,
    pub roughness: String,
    pub tint_mask: String,
    pub translucency: String,
}

impl Default for VmatDocument {
    fn default() -> Self {
        Self {
            ambient_occlusion: DEFAULT_AMBIENT_OCCLUSION.to_string(),
            color: DEFAULT_COLOR.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
            metalness: DEFAULT_METALNESS.to_string(),
            normal: DEFAULT_NORMAL.to_string(),
            roughness: DEFAULT_ROUGHNESS.to_string(),
            tint_mask: DEFAULT_TINT_MASK.to_string(),
            translucency: DEFAULT_TRANSLUCENCY.to_string(),
        }
    }
}

impl VmatDocument {
    /// File name of the document written for `material_name`.
    ///
    /// Path separators and drive colons become `_`, so the result is always a
    /// single component inside the output folder.
    pub fn file_name(material_name: &str) -> String {
        let stem: String = material_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        format!("{stem}.vmat")
    }

    /// The full VMAT text, newline-terminated.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VmatDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"Layer0
{{
    shader "csgo_environment.vfx"
    F_ALPHA_TEST 1
    g_flModelTintAmount "1.000"
    g_nScaleTexCoordUByModelScaleAxis "0"
    g_nScaleTexCoordVByModelScaleAxis "0"
    g_vColorTint "[1.000000 1.000000 1.000000 0.000000]"
    g_bFogEnabled "1"
    g_flAlphaTestReference1 "0.010"
    g_flAntiAliasedEdgeStrength1 "0.000"
    g_flTexCoordRotation1 "0.000"
    g_vTexCoordCenter1 "[0.500 0.500]"
    g_vTexCoordOffset1 "[0.000 0.000]"
    g_vTexCoordScale1 "[1.000 1.000]"
    TextureAmbientOcclusion1 "{ao}"
    TextureColor1 "{color}"
    TextureHeight1 "{height}"
    TextureMetalness1 "{metalness}"
    TextureNormal1 "{normal}"
    TextureRoughness1 "{roughness}"
    TextureTintMask1 "{tint_mask}"
    TextureTranslucency1 "{translucency}"
    g_nTextureAddressModeU "0"
    g_nTextureAddressModeV "0"
    g_flAlphaTestReference "0.500"
    g_flAntiAliasedEdgeStrength "1.000"
    VariableState {{ "Color"{{}} "Fog"{{}} "Material1"{{"Color" 0 "Tint Mask" 0 "Translucent" 0 "Lighting" 0 "Height" 0 "Texture Transform" 1}} "Texture Address Mode"{{}} "Translucent"{{}} }}
}}
"#,
            ao = self.ambient_occlusion,
            color = self.color,
            height = self.height,
            metalness = self.metalness,
            normal = self.normal,
            roughness = self.roughness,
            tint_mask = self.tint_mask,
            translucency = self.translucency,
        )
    }
}
