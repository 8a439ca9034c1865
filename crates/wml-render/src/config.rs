//! Rendering configuration for tilemap diff output.

use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for painting a tilemap diff.
///
/// Every field has a default, so a partial JSON config only needs the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of one cell, in pixels. Default: **72**.
    pub tile_size: u32,

    /// Directory that terrain image stems are resolved against.
    pub image_root: String,

    /// File extension appended to image stems, without the dot.
    pub image_extension: String,

    /// Outline color for changed cells.
    pub focus_color: String,

    /// Flag color per side; side `n` uses entry `(n - 1) % len`.
    pub flag_colors: Vec<String>,

    /// Draw side flags on starting positions. Default: **true**.
    pub draw_flags: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 72,
            image_root: "images/terrain".to_string(),
            image_extension: "png".to_string(),
            focus_color: "#FF00FF".to_string(),
            flag_colors: [
                "#FF0000", "#2E419B", "#62B664", "#93009D", "#000000", "#94500E", "#FF7E00",
                "#FFFFFF", "#1E9FAB",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            draw_flags: true,
        }
    }
}

impl RenderConfig {
    /// Full path of an image stem such as `grass/green`.
    pub fn image_path(&self, stem: &str) -> String {
        let root = self.image_root.trim_end_matches('/');
        if root.is_empty() {
            format!("{stem}.{}", self.image_extension)
        } else {
            format!("{root}/{stem}.{}", self.image_extension)
        }
    }

    /// Flag color for a side. Non-numeric sides use the first color.
    pub fn flag_color(&self, player: &str) -> &str {
        if self.flag_colors.is_empty() {
            return "#000000";
        }
        let index = player
            .parse::<usize>()
            .ok()
            .and_then(|side| side.checked_sub(1))
            .unwrap_or(0);
        &self.flag_colors[index % self.flag_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_joins_root_and_extension() {
        let config = RenderConfig::default();
        assert_eq!(config.image_path("grass/green"), "images/terrain/grass/green.png");

        let config = RenderConfig {
            image_root: "tiles/".to_string(),
            image_extension: "webp".to_string(),
            ..RenderConfig::default()
        };
        assert_eq!(config.image_path("castle/castle"), "tiles/castle/castle.webp");
    }

    #[test]
    fn flag_colors_cycle_by_side() {
        let config = RenderConfig::default();
        assert_eq!(config.flag_color("1"), "#FF0000");
        assert_eq!(config.flag_color("2"), "#2E419B");
        assert_eq!(config.flag_color("10"), "#FF0000");
        assert_eq!(config.flag_color("x"), "#FF0000");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{ "tile_size": 36 }"#).unwrap();
        assert_eq!(config.tile_size, 36);
        assert_eq!(config.image_extension, "png");
        assert!(config.draw_flags);
    }
}
