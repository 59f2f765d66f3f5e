//! MATL chunk and its typed accessors.
//!
//! Scalar properties default to `1.0` when absent. A value that is present
//! but not a number reads as `0.0`.

use crate::attributes::Attributes;
use crate::error::DecodeResult;
use crate::reader::ByteReader;

/// Shading model of a material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialType {
    /// `_diffuse`.
    #[default]
    Diffuse,
    /// `_metal`.
    Metal,
    /// `_glass`.
    Glass,
    /// `_emit`.
    Emit,
    /// `_blend`.
    Blend,
    /// `_media`.
    Media,
    /// `_cloud`.
    Cloud,
}

impl MaterialType {
    /// Parses the `_type` value. Unknown names map to `Diffuse`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "_metal" => Self::Metal,
            "_glass" => Self::Glass,
            "_emit" => Self::Emit,
            "_blend" => Self::Blend,
            "_media" => Self::Media,
            "_cloud" => Self::Cloud,
            _ => Self::Diffuse,
        }
    }
}

/// Material properties for one palette slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialChunk {
    /// Material id (palette slot).
    pub id: i32,
    /// Raw properties.
    pub properties: Attributes,
}

impl MaterialChunk {
    /// Reads a MATL payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: reader.read_i32()?,
            properties: Attributes::read(reader)?,
        })
    }

    fn scalar(&self, key: &str) -> f32 {
        self.properties.get_f32_or(key, 1.0)
    }

    /// `_type`.
    #[must_use]
    pub fn kind(&self) -> MaterialType {
        self.properties
            .get("_type")
            .map_or(MaterialType::Diffuse, MaterialType::parse)
    }

    /// `_rough`.
    #[must_use]
    pub fn rough(&self) -> f32 {
        self.scalar("_rough")
    }

    /// `_flux`.
    #[must_use]
    pub fn flux(&self) -> f32 {
        self.scalar("_flux")
    }

    /// `_ior`.
    #[must_use]
    pub fn ior(&self) -> f32 {
        self.scalar("_ior")
    }

    /// `_plastic`.
    #[must_use]
    pub fn plastic(&self) -> f32 {
        self.scalar("_plastic")
    }

    /// `_att`.
    #[must_use]
    pub fn att(&self) -> f32 {
        self.scalar("_att")
    }

    /// `_alpha`.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.scalar("_alpha")
    }

    /// `_metal`.
    #[must_use]
    pub fn metal(&self) -> f32 {
        self.scalar("_metal")
    }

    /// `_sp`.
    #[must_use]
    pub fn specular(&self) -> f32 {
        self.scalar("_sp")
    }

    /// `_emit`.
    #[must_use]
    pub fn emit(&self) -> f32 {
        self.scalar("_emit")
    }

    /// `_glow`.
    #[must_use]
    pub fn glow(&self) -> f32 {
        self.scalar("_glow")
    }

    /// `_unit`.
    #[must_use]
    pub fn unit(&self) -> f32 {
        self.scalar("_unit")
    }

    /// `1 - rough`.
    #[must_use]
    pub fn smoothness(&self) -> f32 {
        1.0 - self.rough()
    }

    /// Effective emission: `emit * flux` for emissive materials, otherwise 0.
    #[must_use]
    pub fn emission(&self) -> f32 {
        if self.kind() == MaterialType::Emit {
            self.emit() * self.flux()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(pairs: &[(&str, &str)]) -> MaterialChunk {
        MaterialChunk {
            id: 8,
            properties: pairs.iter().copied().collect(),
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_defaults_to_one() {
        let m = material(&[]);
        assert_eq!(m.kind(), MaterialType::Diffuse);
        assert!(close(m.rough(), 1.0));
        assert!(close(m.alpha(), 1.0));
        assert!(close(m.smoothness(), 0.0));
        assert!(close(m.emission(), 0.0));
    }

    #[test]
    fn test_emission_only_for_emit() {
        let emit = material(&[("_type", "_emit"), ("_emit", "0.5"), ("_flux", "3")]);
        assert!(close(emit.emission(), 1.5));

        let metal = material(&[("_type", "_metal"), ("_emit", "0.5"), ("_flux", "3")]);
        assert_eq!(metal.kind(), MaterialType::Metal);
        assert!(close(metal.emission(), 0.0));
    }

    #[test]
    fn test_unparseable_reads_zero() {
        let m = material(&[("_rough", "rough"), ("_ior", "1,5"), ("_type", "_plasma")]);
        assert!(close(m.rough(), 0.0));
        assert!(close(m.ior(), 15.0));
        assert_eq!(m.kind(), MaterialType::Diffuse);
    }
}
