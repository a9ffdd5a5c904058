//! Style settings for the Marten editor core.
//!
//! Loads `settings.toml` with optional CLI override, falling back to built-in
//! defaults when no file is present. Every field has a default, so a partial
//! (or empty) file is valid.
//!
//! The settings are read-only input to the editing core: a color map keyed by
//! [`ColorKey`], a monospace font descriptor, and the margin applied around
//! each node's bounding box.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// An opaque RGB color resolved by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Symbolic color reference carried by draw records.
///
/// The core never touches concrete colors; it tags each draw record with a
/// key the host resolves against [`Colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Background,
    Default,
    ClassDef,
    Focus,
    Constant,
    Identifier,
}

/// The editor color map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    pub background: Color,
    pub default: Color,
    pub class_def: Color,
    pub focus: Color,
    pub constant: Color,
    pub identifier: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: Color::rgb(255, 255, 255),
            default: Color::rgb(0, 0, 0),
            class_def: Color::rgb(255, 255, 128),
            focus: Color::rgb(128, 128, 128),
            constant: Color::rgb(200, 0, 0),
            identifier: Color::rgb(0, 200, 0),
        }
    }
}

impl Colors {
    /// Resolves a symbolic key to its configured color.
    pub fn get(&self, key: ColorKey) -> Color {
        match key {
            ColorKey::Background => self.background,
            ColorKey::Default => self.default,
            ColorKey::ClassDef => self.class_def,
            ColorKey::Focus => self.focus,
            ColorKey::Constant => self.constant,
            ColorKey::Identifier => self.identifier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Monospace font descriptor shared by every node in the tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSpec {
    /// Font family name.
    ///
    /// Defaults to "Courier" which is available cross-platform. Common
    /// alternatives include "Monaco", "Menlo", or "Consolas".
    pub family: String,

    /// Point size.
    pub size: f32,

    pub weight: FontWeight,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Courier".to_string(),
            size: 12.0,
            weight: FontWeight::Bold,
            italic: false,
        }
    }
}

/// Per-node presentation knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeStyle {
    /// Margin applied symmetrically to a node's bounding box, in pixels.
    pub margin: f32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self { margin: 2.0 }
    }
}

/// Complete style settings, loaded from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub colors: Colors,
    pub font: FontSpec,
    pub node: NodeStyle,
}

impl Settings {
    /// Read and deserialize a TOML settings file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Load settings with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Ok(Self::default())
    }
}
