//! Text sampling and layout
//!
//! Turns characters into flat vertex lists and places glyphs along the
//! horizontal axis so that a whole word is centered on the origin.

pub mod font;
pub mod glyph_sampler;
pub mod layout;

pub use font::{Font, FontError, FontLoader, FontState, DEFAULT_FONT_PATH};
pub use layout::{layout_word, WordLayout};

use serde::{Deserialize, Serialize};

/// Fixed style parameters used when tessellating a glyph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphStyle {
    /// Em size in world units
    pub size: f32,
    /// Extrusion depth along +Z
    pub depth: f32,
    /// Line segments per quadratic or cubic outline curve
    pub curve_segments: u32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            depth: 1.0,
            curve_segments: 12,
        }
    }
}

/// Sampled point representation of one character
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Source character
    pub character: char,
    /// Flat `(x, y, z)` triples
    vertices: Vec<f32>,
    /// Bounding-box width along X
    width: f32,
}

impl Glyph {
    /// Build a glyph from a flat vertex list, measuring its width
    ///
    /// Trailing components that do not form a full triple are dropped.
    pub fn from_vertices(character: char, mut vertices: Vec<f32>) -> Self {
        vertices.truncate(vertices.len() - vertices.len() % 3);

        let (min_x, max_x) = vertices
            .chunks_exact(3)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v[0]), hi.max(v[0]))
            });
        let width = if vertices.is_empty() { 0.0 } else { max_x - min_x };

        Self {
            character,
            vertices,
            width,
        }
    }

    /// A glyph with no points, used for whitespace and missing characters
    pub fn empty(character: char) -> Self {
        Self {
            character,
            vertices: Vec::new(),
            width: 0.0,
        }
    }

    /// Flat vertex coordinates
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Horizontal bounding-box width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of sampled points
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the glyph has no points
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Source of glyph point clouds
///
/// Implemented by [`Font`]; tests substitute fixed-shape sources.
pub trait GlyphSource {
    /// Sample one character at the given style
    ///
    /// Characters the source cannot draw come back as [`Glyph::empty`].
    fn sample(&self, character: char, style: &GlyphStyle) -> Glyph;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_width_spans_min_to_max_x() {
        let glyph = Glyph::from_vertices('A', vec![-2.0, 0.0, 0.0, 3.5, 1.0, 0.0, 1.0, 2.0, 1.0]);
        assert_eq!(glyph.point_count(), 3);
        assert_relative_eq!(glyph.width(), 5.5);
    }

    #[test]
    fn test_empty_glyph_has_zero_width() {
        let glyph = Glyph::from_vertices(' ', Vec::new());
        assert!(glyph.is_empty());
        assert_eq!(glyph.width(), 0.0);
        assert_eq!(glyph, Glyph::empty(' '));
    }

    #[test]
    fn test_partial_triple_is_dropped() {
        let glyph = Glyph::from_vertices('x', vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(glyph.vertices(), &[1.0, 2.0, 3.0]);
    }
}
