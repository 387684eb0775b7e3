//! Workspace manifest (discmos.yaml) parsing.
//!
//! The manifest holds default mosaic settings so they do not have to be
//! repeated on every command line. Command-line flags override it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, Result};
use crate::mosaic::{ChannelWeights, ResampleFilter, TileSize};
use crate::render::EMOJI_SIZE;
use crate::selection::RegexScope;
use crate::types::Colour;

/// Default output file suffix.
pub const DEFAULT_SUFFIX: &str = "_mosaic_{we}_{r}_{hw}_{sw}_{vw}";

/// Workspace settings loaded from discmos.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Mosaic width in emojis.
    pub width: u32,

    /// Side length each tile is resized to before matching.
    pub resize: u32,

    /// Resampling filter for tiles and the source image.
    pub resample: ResampleFilter,

    pub hue_weight: f64,
    pub saturation_weight: f64,
    pub value_weight: f64,

    /// Text added to the source file stem to name outputs.
    pub suffix: String,

    /// Colour transparent pixels are flattened onto.
    pub background: Colour,

    /// Side length of emoji images in composites.
    pub emoji_size: u32,

    /// Which emojis `/regex/` emoji lines in include.txt search.
    pub regex_scope: RegexScope,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            width: 40,
            resize: 8,
            resample: ResampleFilter::default(),
            hue_weight: 1.0,
            saturation_weight: 1.0,
            value_weight: 1.0,
            suffix: DEFAULT_SUFFIX.to_string(),
            background: Colour::DISCORD_DARK,
            emoji_size: EMOJI_SIZE,
            regex_scope: RegexScope::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a discmos.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MosaicError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load the manifest if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let has_settings = content.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        if !has_settings {
            return Ok(Self::default());
        }

        let manifest: Self = serde_yaml::from_str(content).map_err(|e| MosaicError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check discmos.yaml syntax".to_string()),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MosaicError::Parse {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Reject settings no mosaic can be built with.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("width", self.width),
            ("resize", self.resize),
            ("emoji_size", self.emoji_size),
        ] {
            if value == 0 {
                return Err(MosaicError::Config {
                    message: format!("{} must be at least 1", field),
                    help: Some("Check discmos.yaml".to_string()),
                });
            }
        }

        if !self.weights().is_finite() {
            return Err(MosaicError::Config {
                message: "channel weights must be finite numbers".to_string(),
                help: Some("Check hue_weight, saturation_weight and value_weight".to_string()),
            });
        }

        Ok(())
    }

    pub fn weights(&self) -> ChannelWeights {
        ChannelWeights::new(self.hue_weight, self.saturation_weight, self.value_weight)
    }

    pub fn tile_size(&self) -> TileSize {
        TileSize::square(self.resize)
    }
}

/// Expand the placeholders of a suffix template:
/// `{we}` width, `{r}` resize, `{hw}` `{sw}` `{vw}` channel weights.
pub fn format_suffix(template: &str, width: u32, resize: u32, weights: ChannelWeights) -> String {
    template
        .replace("{we}", &width.to_string())
        .replace("{r}", &resize.to_string())
        .replace("{hw}", &weights.hue.to_string())
        .replace("{sw}", &weights.saturation.to_string())
        .replace("{vw}", &weights.value.to_string())
}
