//! Decoder configuration.
//!
//! Options are plain values so callers can build them in code or load them
//! from a TOML table:
//!
//! ```toml
//! write_log = true
//! debug = false
//! offset_palette = true
//! max_nesting_depth = 64
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Options for a single decode pass.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// Emit one diagnostic record per parsed chunk.
    pub write_log: bool,
    /// Run scene-graph consistency checks after decoding.
    pub debug: bool,
    /// Store RGBA entry `i` in slot `i` instead of slot `i + 1`.
    pub offset_palette: bool,
    /// Maximum chunk nesting depth accepted before decoding fails.
    pub max_nesting_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            write_log: false,
            debug: false,
            offset_palette: true,
            max_nesting_depth: 64,
        }
    }
}

impl DecodeOptions {
    /// Logging and consistency checks enabled.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            write_log: true,
            debug: true,
            ..Self::default()
        }
    }

    /// Parses options from a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML, unknown keys or a zero
    /// nesting depth.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(source)?;
        if options.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        Ok(options)
    }
}
