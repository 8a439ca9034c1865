//! SVG output for tilemap diffs.
//!
//! Each tile is an `<image>` referencing the terrain image on disk; flags
//! and focus marks are plain rectangles layered on top.

use crate::config::RenderConfig;
use crate::paint::TileCanvas;

/// A [`TileCanvas`] that accumulates an SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    config: RenderConfig,
    width: usize,
    height: usize,
    body: String,
}

impl SvgCanvas {
    /// Canvas for a map of `width` × `height` cells.
    pub fn new(width: usize, height: usize, config: &RenderConfig) -> Self {
        Self {
            config: config.clone(),
            width,
            height,
            body: String::new(),
        }
    }

    fn origin(&self, x: usize, y: usize) -> (usize, usize) {
        let size = self.config.tile_size as usize;
        (x * size, y * size)
    }

    /// Close the document and return the SVG text.
    pub fn finish(self) -> String {
        let size = self.config.tile_size as usize;
        let width = self.width * size;
        let height = self.height * size;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl TileCanvas for SvgCanvas {
    type Image = String;

    fn draw(&mut self, image: &String, x: usize, y: usize) {
        let (px, py) = self.origin(x, y);
        let size = self.config.tile_size;
        let href = escape_attr(&self.config.image_path(image));
        self.body.push_str(&format!(
            "  <image href=\"{href}\" x=\"{px}\" y=\"{py}\" width=\"{size}\" height=\"{size}\" />\n"
        ));
    }

    fn flag(&mut self, player: &str, x: usize, y: usize) {
        let (px, py) = self.origin(x, y);
        let size = self.config.tile_size / 4;
        let color = escape_attr(self.config.flag_color(player));
        self.body.push_str(&format!(
            "  <rect class=\"flag\" x=\"{px}\" y=\"{py}\" width=\"{size}\" height=\"{size}\" fill=\"{color}\" />\n"
        ));
    }

    fn focus(&mut self, x: usize, y: usize) {
        let (px, py) = self.origin(x, y);
        let size = self.config.tile_size;
        let color = escape_attr(&self.config.focus_color);
        self.body.push_str(&format!(
            "  <rect class=\"focus\" x=\"{px}\" y=\"{py}\" width=\"{size}\" height=\"{size}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"3\" />\n"
        ));
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
