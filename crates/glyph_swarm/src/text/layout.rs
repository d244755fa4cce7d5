//! Word layout
//!
//! Centering needs the total width before any glyph can be placed, so layout
//! measures first and places second.

/// Horizontal placement of every glyph in a word
#[derive(Debug, Clone, PartialEq)]
pub struct WordLayout {
    /// Sum of glyph widths plus one spacing per glyph
    pub total_width: f32,
    /// Center X of each glyph, in input order
    pub offsets: Vec<f32>,
}

/// Center a row of glyphs on `x = 0`
///
/// Every glyph contributes its width plus `spacing` to the total, including
/// the last one, so the trailing gap shifts the row slightly left.
pub fn layout_word(widths: &[f32], spacing: f32) -> WordLayout {
    let total_width = widths.iter().sum::<f32>() + spacing * widths.len() as f32;

    let mut cursor = -total_width / 2.0;
    let offsets = widths
        .iter()
        .map(|&width| {
            cursor += width / 2.0;
            let center = cursor;
            cursor += width / 2.0 + spacing;
            center
        })
        .collect();

    WordLayout {
        total_width,
        offsets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_glyph_centers() {
        let (w_a, w_b) = (8.0, 6.0);
        let layout = layout_word(&[w_a, w_b], 10.0);

        assert_relative_eq!(layout.total_width, w_a + w_b + 20.0);
        let a = -(w_a + w_b + 20.0) / 2.0 + w_a / 2.0;
        assert_relative_eq!(layout.offsets[0], a);
        assert_relative_eq!(layout.offsets[1], a + w_a / 2.0 + 10.0 + w_b / 2.0);
    }

    #[test]
    fn test_single_glyph_sits_left_of_origin_by_half_spacing() {
        let layout = layout_word(&[4.0], 10.0);
        assert_relative_eq!(layout.offsets[0], -5.0);
    }

    #[test]
    fn test_empty_word() {
        let layout = layout_word(&[], 10.0);
        assert_eq!(layout.total_width, 0.0);
        assert!(layout.offsets.is_empty());
    }

    #[test]
    fn test_zero_width_glyphs_still_take_spacing() {
        let layout = layout_word(&[0.0, 0.0], 10.0);
        assert_relative_eq!(layout.offsets[1] - layout.offsets[0], 10.0);
    }
}
