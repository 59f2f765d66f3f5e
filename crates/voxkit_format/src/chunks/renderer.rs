//! rOBJ chunk: renderer settings, attributes only.

use crate::attributes::Attributes;
use crate::error::DecodeResult;
use crate::reader::ByteReader;

/// Category of a renderer setting block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderSettingKind {
    /// `_setting`, also used for unknown or absent `_type`.
    #[default]
    Setting,
    /// `_inf` - sun light.
    Inf,
    /// `_uni` - uniform sky light.
    Uni,
    /// `_ibl` - image based light.
    Ibl,
    /// `_atm` - atmosphere.
    Atm,
    /// `_fog_uni` - uniform fog.
    Fog,
    /// `_lens` - camera lens.
    Lens,
    /// `_film` - film response.
    Film,
    /// `_bloom`.
    Bloom,
    /// `_ground`.
    Ground,
    /// `_bg` - background.
    Background,
    /// `_edge`.
    Edge,
    /// `_grid`.
    Grid,
}

impl RenderSettingKind {
    /// Parses the `_type` value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "_inf" => Self::Inf,
            "_uni" => Self::Uni,
            "_ibl" => Self::Ibl,
            "_atm" => Self::Atm,
            "_fog_uni" => Self::Fog,
            "_lens" => Self::Lens,
            "_film" => Self::Film,
            "_bloom" => Self::Bloom,
            "_ground" => Self::Ground,
            "_bg" => Self::Background,
            "_edge" => Self::Edge,
            "_grid" => Self::Grid,
            _ => Self::Setting,
        }
    }
}

/// Undocumented renderer configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererSettingChunk {
    /// Raw attributes.
    pub attributes: Attributes,
}

impl RendererSettingChunk {
    /// Reads an rOBJ payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            attributes: Attributes::read(reader)?,
        })
    }

    /// `_type`.
    #[must_use]
    pub fn kind(&self) -> RenderSettingKind {
        self.attributes
            .get("_type")
            .map_or(RenderSettingKind::Setting, RenderSettingKind::parse)
    }
}
