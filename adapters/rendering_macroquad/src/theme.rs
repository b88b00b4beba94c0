//! Palette configuration for the Macroquad rendering backend.
//!
//! The palette ships with compiled-in defaults; an optional TOML file can
//! override any subset of entries. Each entry is an `[r, g, b]` byte triple.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lane_defence_rendering::Color;
use serde::Deserialize;

/// Colors used by the backend when drawing a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Solid color behind the field and the HUD strip.
    pub background: Color,
    /// Stroke color of the placement grid lines.
    pub grid_lines: Color,
    /// Fill color of gunner defenders.
    pub gunner: Color,
    /// Fill color of harvester defenders.
    pub harvester: Color,
    /// Fill color of attackers.
    pub attacker: Color,
    /// Fill color of projectiles.
    pub projectile: Color,
    /// Color of the HUD text.
    pub hud_text: Color,
    /// Color of the game-over overlay text.
    pub overlay_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xff, 0xff, 0xff),
            grid_lines: Color::from_rgb_u8(0xcc, 0xcc, 0xcc),
            gunner: Color::from_rgb_u8(0x00, 0x80, 0x00),
            harvester: Color::from_rgb_u8(0xff, 0xd7, 0x00),
            attacker: Color::from_rgb_u8(0x80, 0x00, 0x80),
            projectile: Color::from_rgb_u8(0xff, 0xd7, 0x00),
            hud_text: Color::from_rgb_u8(0x20, 0x20, 0x20),
            overlay_text: Color::from_rgb_u8(0xff, 0x00, 0x00),
        }
    }
}

impl Theme {
    /// Loads a theme from the TOML file at the provided path, merging the
    /// file's entries over the compiled-in defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to apply theme file at {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ThemeFile =
            toml::from_str(contents).context("failed to parse theme toml contents")?;

        let mut theme = Self::default();
        apply(&mut theme.background, file.background);
        apply(&mut theme.grid_lines, file.grid_lines);
        apply(&mut theme.gunner, file.gunner);
        apply(&mut theme.harvester, file.harvester);
        apply(&mut theme.attacker, file.attacker);
        apply(&mut theme.projectile, file.projectile);
        apply(&mut theme.hud_text, file.hud_text);
        apply(&mut theme.overlay_text, file.overlay_text);
        Ok(theme)
    }
}

fn apply(slot: &mut Color, entry: Option<[u8; 3]>) {
    if let Some([red, green, blue]) = entry {
        *slot = Color::from_rgb_u8(red, green, blue);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    background: Option<[u8; 3]>,
    grid_lines: Option<[u8; 3]>,
    gunner: Option<[u8; 3]>,
    harvester: Option<[u8; 3]>,
    attacker: Option<[u8; 3]>,
    projectile: Option<[u8; 3]>,
    hud_text: Option<[u8; 3]>,
    overlay_text: Option<[u8; 3]>,
}
