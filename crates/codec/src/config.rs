//! Configuration for the display-list codec.
//!
//! This module defines the knobs that change how words are decoded, walked and
//! rendered. It provides:
//! 1. **Defaults:** Baseline values (lenient padding, preset canonicalization, walker limits).
//! 2. **Structures:** Hierarchical config for decoding, display-list walking, and text rendering.
//!
//! Configuration is supplied as JSON (`gbi --config FILE`) or use `Config::default()` for library callers.

use serde::Deserialize;

use crate::common::error::CodecError;

/// Default configuration constants for the codec.
mod defaults {
    /// Most commands a single walk decodes before giving up.
    ///
    /// Guards against display lists that never reach `G_ENDDL`.
    pub const MAX_COMMANDS: usize = 65_536;

    /// Segment holding the display list currently being walked.
    ///
    /// Calls into this segment are local jumps, not child display lists.
    pub const LOCAL_SEGMENT: u8 = 0x0E;
}

/// Root configuration structure containing all codec settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use f3dex2_codec::config::Config;
///
/// let config = Config::default();
/// assert!(config.decode.collapse_blender_presets);
/// assert_eq!(config.walk.local_segment, 0x0E);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use f3dex2_codec::config::Config;
///
/// let json = r#"{
///     "decode": {
///         "strict_padding": true
///     },
///     "walk": {
///         "max_commands": 128,
///         "stop_on_branch_list": false
///     },
///     "render": {
///         "hex_addresses": false
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.decode.strict_padding);
/// assert!(config.decode.warn_ambiguous_render_modes);
/// assert_eq!(config.walk.max_commands, 128);
/// assert!(!config.render.hex_addresses);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Word decoding settings
    #[serde(default)]
    pub decode: DecodeConfig,
    /// Display-list walker settings
    #[serde(default)]
    pub walk: WalkConfig,
    /// Text rendering settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `text` - JSON object; every section and field is optional.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or the `serde_json` error describing the first problem.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Settings that change how words decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodeConfig {
    /// Collapse cycle-1 render modes whose blender inputs match the pass,
    /// fog-shade or fog-primitive presets down to those presets.
    #[serde(default = "DecodeConfig::default_true")]
    pub collapse_blender_presets: bool,

    /// Treat non-zero padding or prefix bits as a `CodecError::Padding` instead
    /// of a diagnostic.
    #[serde(default)]
    pub strict_padding: bool,

    /// Emit a `warn!` event for render modes with no matching preset.
    #[serde(default = "DecodeConfig::default_true")]
    pub warn_ambiguous_render_modes: bool,
}

impl DecodeConfig {
    fn default_true() -> bool {
        true
    }

    /// Turns a fixed-field mismatch into an error when strict, else `None`.
    pub(crate) fn padding_error(
        &self,
        command: &'static str,
        field: &'static str,
        expected: u64,
        found: u64,
    ) -> Option<CodecError> {
        self.strict_padding.then_some(CodecError::Padding {
            command,
            field,
            expected,
            found,
        })
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            collapse_blender_presets: true,
            strict_padding: false,
            warn_ambiguous_render_modes: true,
        }
    }
}

/// Display-list walker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WalkConfig {
    /// Stop after this many commands even without `gsSPEndDisplayList`.
    #[serde(default = "WalkConfig::default_max_commands")]
    pub max_commands: usize,

    /// Treat `gsSPBranchList` as the end of the current list.
    #[serde(default = "WalkConfig::default_stop_on_branch_list")]
    pub stop_on_branch_list: bool,

    /// Segment number whose targets are not reported as child display lists.
    #[serde(default = "WalkConfig::default_local_segment")]
    pub local_segment: u8,
}

impl WalkConfig {
    fn default_max_commands() -> usize {
        defaults::MAX_COMMANDS
    }

    fn default_stop_on_branch_list() -> bool {
        true
    }

    fn default_local_segment() -> u8 {
        defaults::LOCAL_SEGMENT
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_commands: defaults::MAX_COMMANDS,
            stop_on_branch_list: true,
            local_segment: defaults::LOCAL_SEGMENT,
        }
    }
}

/// Text rendering settings for the disassembler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Print segmented addresses as `0x0E000010` rather than decimal.
    #[serde(default = "RenderConfig::default_hex_addresses")]
    pub hex_addresses: bool,
}

impl RenderConfig {
    fn default_hex_addresses() -> bool {
        true
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hex_addresses: true,
        }
    }
}
