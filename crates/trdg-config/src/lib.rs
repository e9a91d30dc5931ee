//! trdg configuration system
//!
//! Loads generator settings from `trdg.toml`, with `TRDG_*` environment
//! variables taking precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for the generator
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TrdgConfig {
    /// Font selection
    pub fonts: FontsConfig,
    /// Text layout and appearance
    pub text: TextConfig,
    /// Output files and framing
    pub output: OutputConfig,
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontsConfig {
    /// Primary font files (.ttf/.otf), cycled per input string.
    /// Empty means a system sans-serif font.
    pub primary: Vec<PathBuf>,
    /// Font used for characters the primary font lacks
    pub fallback: Option<PathBuf>,
    /// Font size in pixels
    pub size: u32,
    /// "fallback" or "drop"
    pub missing_glyph_strategy: String,
}

/// Text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Language code; "ckb" removes harakat from right-to-left text
    pub language: String,
    /// Treat input as right-to-left
    pub rtl: bool,
    /// 0 horizontal, 1 vertical
    pub orientation: i64,
    /// 0 start, 1 center, 2 end
    pub alignment: i64,
    /// Multiplier for the width of a space
    pub space_width: f32,
    /// Extra pixels after each character
    pub character_spacing: u32,
    /// Disable per-character spacing and use space width for word gaps
    pub word_split: bool,
    /// Crop output to the inked bounds
    pub fit: bool,
    pub stroke_width: u32,
    /// CSS color or "color,color" range
    pub text_color: String,
    pub stroke_fill: String,
    /// Wrap width in characters (0 disables wrapping)
    pub max_line_length: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the images and labels are written to
    pub dir: PathBuf,
    /// Image margins as (top, left, bottom, right)
    pub margins: (u32, u32, u32, u32),
    /// Fixed image width; -1 fits the text
    pub width: i64,
    /// Write `<index>_mask.png`
    pub mask: bool,
    /// Write `<index>_boxes.txt`
    pub bboxes: bool,
    /// Seed for color sampling; random when unset
    pub seed: Option<u64>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            primary: Vec::new(),
            fallback: None,
            size: 32,
            missing_glyph_strategy: "fallback".to_string(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            rtl: false,
            orientation: 0,
            alignment: 1,
            space_width: 1.0,
            character_spacing: 0,
            word_split: false,
            fit: false,
            stroke_width: 0,
            text_color: "#282828".to_string(),
            stroke_fill: "#282828".to_string(),
            max_line_length: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            margins: (5, 5, 5, 5),
            width: -1,
            mask: false,
            bboxes: false,
            seed: None,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl TrdgConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load `trdg.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file("trdg.toml").unwrap_or_default()
    }

    /// Override values with `TRDG_*` environment variables.
    ///
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Fonts
        if let Ok(font) = std::env::var("TRDG_FONT") {
            self.fonts.primary = vec![PathBuf::from(font)];
        }
        if let Ok(font) = std::env::var("TRDG_FALLBACK_FONT") {
            self.fonts.fallback = Some(PathBuf::from(font));
        }
        if let Ok(val) = std::env::var("TRDG_SIZE") {
            if let Ok(size) = val.parse::<u32>() {
                self.fonts.size = size;
            }
        }

        // Text
        if let Ok(language) = std::env::var("TRDG_LANGUAGE") {
            self.text.language = language;
        }
        if let Ok(val) = std::env::var("TRDG_RTL") {
            self.text.rtl = env_flag(&val);
        }
        if let Ok(val) = std::env::var("TRDG_ORIENTATION") {
            if let Ok(orientation) = val.parse::<i64>() {
                self.text.orientation = orientation;
            }
        }
        if let Ok(val) = std::env::var("TRDG_ALIGNMENT") {
            if let Ok(alignment) = val.parse::<i64>() {
                self.text.alignment = alignment;
            }
        }
        if let Ok(color) = std::env::var("TRDG_TEXT_COLOR") {
            self.text.text_color = color;
        }
        if let Ok(val) = std::env::var("TRDG_MAX_LINE_LENGTH") {
            if let Ok(len) = val.parse::<usize>() {
                self.text.max_line_length = len;
            }
        }

        // Output
        if let Ok(dir) = std::env::var("TRDG_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Ok(val) = std::env::var("TRDG_OUTPUT_MASK") {
            self.output.mask = env_flag(&val);
        }
        if let Ok(val) = std::env::var("TRDG_SEED") {
            if let Ok(seed) = val.parse::<u64>() {
                self.output.seed = Some(seed);
            }
        }
    }

    /// Load from `trdg.toml` (or defaults), then apply environment
    /// overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrdgConfig::default();
        assert_eq!(config.fonts.size, 32);
        assert_eq!(config.fonts.missing_glyph_strategy, "fallback");
        assert_eq!(config.text.text_color, "#282828");
        assert_eq!(config.text.alignment, 1);
        assert_eq!(config.output.margins, (5, 5, 5, 5));
        assert_eq!(config.output.width, -1);
    }

    #[test]
    fn test_toml_serialization() {
        let config = TrdgConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: TrdgConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: TrdgConfig = toml::from_str(
            r#"
            [text]
            rtl = true
            language = "ckb"

            [output]
            margins = [1, 2, 3, 4]
            "#,
        )
        .unwrap();
        assert!(parsed.text.rtl);
        assert_eq!(parsed.text.language, "ckb");
        assert_eq!(parsed.text.alignment, 1);
        assert_eq!(parsed.fonts.size, 32);
        assert_eq!(parsed.output.margins, (1, 2, 3, 4));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = TrdgConfig::load_from_file("/nonexistent/trdg.toml").unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("TRDG_SIZE", "48");
            std::env::set_var("TRDG_RTL", "true");
            std::env::set_var("TRDG_ORIENTATION", "not-a-number");
            std::env::set_var("TRDG_SEED", "9");
        }

        let mut config = TrdgConfig::default();
        config.merge_with_env();

        assert_eq!(config.fonts.size, 48);
        assert!(config.text.rtl);
        assert_eq!(config.text.orientation, 0);
        assert_eq!(config.output.seed, Some(9));

        unsafe {
            std::env::remove_var("TRDG_SIZE");
            std::env::remove_var("TRDG_RTL");
            std::env::remove_var("TRDG_ORIENTATION");
            std::env::remove_var("TRDG_SEED");
        }
    }
}
