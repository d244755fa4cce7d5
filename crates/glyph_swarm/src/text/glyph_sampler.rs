//! Glyph outline sampling
//!
//! Outlines are flattened into closed polylines (every curve split into a
//! fixed number of segments), fill-tessellated with lyon and extruded along
//! +Z. The result is a non-indexed triangle soup: both caps plus the side
//! walls, three floats per vertex.

use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    TessellationError, VertexBuffers,
};
use ttf_parser::OutlineBuilder;

/// Closed polyline in glyph space
pub type Contour = Vec<[f32; 2]>;

/// Collects scaled, flattened contours from a font outline
pub struct ContourSink {
    scale: f32,
    curve_segments: u32,
    contours: Vec<Contour>,
    current: Contour,
}

impl ContourSink {
    /// Create a sink scaling font units by `scale`
    pub fn new(scale: f32, curve_segments: u32) -> Self {
        Self {
            scale,
            curve_segments: curve_segments.max(1),
            contours: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Close any open contour and return everything collected
    pub fn finish(mut self) -> Vec<Contour> {
        self.close();
        self.contours
    }

    fn last(&self) -> [f32; 2] {
        self.current.last().copied().unwrap_or([0.0, 0.0])
    }

    fn push(&mut self, x: f32, y: f32) {
        self.current.push([x * self.scale, y * self.scale]);
    }
}

impl OutlineBuilder for ContourSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.close();
        self.push(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let [x0, y0] = self.last();
        let (c, end) = ([x1 * self.scale, y1 * self.scale], [x * self.scale, y * self.scale]);
        let n = self.curve_segments;
        for k in 1..=n {
            let t = k as f32 / n as f32;
            let mt = 1.0 - t;
            self.current.push([
                mt * mt * x0 + 2.0 * mt * t * c[0] + t * t * end[0],
                mt * mt * y0 + 2.0 * mt * t * c[1] + t * t * end[1],
            ]);
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let [x0, y0] = self.last();
        let c1 = [x1 * self.scale, y1 * self.scale];
        let c2 = [x2 * self.scale, y2 * self.scale];
        let end = [x * self.scale, y * self.scale];
        let n = self.curve_segments;
        for k in 1..=n {
            let t = k as f32 / n as f32;
            let mt = 1.0 - t;
            let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            self.current.push([
                a * x0 + b * c1[0] + c * c2[0] + d * end[0],
                a * y0 + b * c1[1] + c * c2[1] + d * end[1],
            ]);
        }
    }

    fn close(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        // Outlines usually repeat the start point before closing
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }
}

#[derive(Clone, Copy)]
struct PlanarVertexCtor;

impl FillVertexConstructor<[f32; 2]> for PlanarVertexCtor {
    fn new_vertex(&mut self, v: FillVertex) -> [f32; 2] {
        let p = v.position();
        [p.x, p.y]
    }
}

/// Tessellate contours and extrude them into a flat triangle-soup vertex list
pub fn extrude(contours: &[Contour], depth: f32) -> Result<Vec<f32>, TessellationError> {
    if contours.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = Path::builder();
    for contour in contours {
        let mut points = contour.iter();
        if let Some(&[x, y]) = points.next() {
            builder.begin(point(x, y));
            for &[x, y] in points {
                builder.line_to(point(x, y));
            }
            builder.end(true);
        }
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        path.as_slice(),
        &FillOptions::tolerance(0.01).with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut buffers, PlanarVertexCtor),
    )?;

    let side_edges: usize = contours.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity((buffers.indices.len() * 2 + side_edges * 6) * 3);

    // Front cap at z = 0
    for &index in &buffers.indices {
        let [x, y] = buffers.vertices[index as usize];
        out.extend_from_slice(&[x, y, 0.0]);
    }

    // Back cap at z = depth, reversed winding
    for tri in buffers.indices.chunks_exact(3) {
        for &index in &[tri[0], tri[2], tri[1]] {
            let [x, y] = buffers.vertices[index as usize];
            out.extend_from_slice(&[x, y, depth]);
        }
    }

    // Side walls: two triangles per outline edge
    for contour in contours {
        for (i, &[x0, y0]) in contour.iter().enumerate() {
            let [x1, y1] = contour[(i + 1) % contour.len()];
            if (x1 - x0).hypot(y1 - y0) < 1e-6 {
                continue;
            }
            out.extend_from_slice(&[
                x0, y0, 0.0, x1, y1, 0.0, x1, y1, depth,
                x0, y0, 0.0, x1, y1, depth, x0, y0, depth,
            ]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_sink() -> ContourSink {
        let mut sink = ContourSink::new(0.5, 12);
        sink.move_to(0.0, 0.0);
        sink.line_to(10.0, 0.0);
        sink.line_to(10.0, 10.0);
        sink.line_to(0.0, 10.0);
        sink.line_to(0.0, 0.0);
        sink.close();
        sink
    }

    #[test]
    fn test_closing_point_is_not_duplicated() {
        let contours = square_sink().finish();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert_eq!(contours[0][2], [5.0, 5.0]);
    }

    #[test]
    fn test_curves_use_fixed_segment_count() {
        let mut sink = ContourSink::new(1.0, 12);
        sink.move_to(0.0, 0.0);
        sink.quad_to(5.0, 10.0, 10.0, 0.0);
        sink.curve_to(10.0, -5.0, 0.0, -5.0, -1.0, 0.0);
        let contours = sink.finish();

        assert_eq!(contours[0].len(), 1 + 12 + 12);
        // Quadratic apex at t = 0.5
        assert_relative_eq!(contours[0][6][0], 5.0);
        assert_relative_eq!(contours[0][6][1], 5.0);
        assert_eq!(contours[0][12], [10.0, 0.0]);
    }

    #[test]
    fn test_degenerate_contours_are_dropped() {
        let mut sink = ContourSink::new(1.0, 4);
        sink.move_to(0.0, 0.0);
        sink.line_to(1.0, 1.0);
        sink.close();
        assert!(sink.finish().is_empty());
    }

    #[test]
    fn test_extruded_square_layout() {
        let vertices = extrude(&square_sink().finish(), 1.0).unwrap();
        assert_eq!(vertices.len() % 9, 0);

        // Eight wall triangles plus matching front and back caps
        let triangles = vertices.len() / 9;
        assert!(triangles >= 8 + 2 + 2);
        assert_eq!((triangles - 8) % 2, 0);

        let (mut min_x, mut max_x, mut min_z, mut max_z) =
            (f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::NEG_INFINITY);
        for v in vertices.chunks_exact(3) {
            min_x = min_x.min(v[0]);
            max_x = max_x.max(v[0]);
            min_z = min_z.min(v[2]);
            max_z = max_z.max(v[2]);
        }
        assert_relative_eq!(max_x - min_x, 5.0);
        assert_relative_eq!(min_z, 0.0);
        assert_relative_eq!(max_z, 1.0);
    }

    #[test]
    fn test_no_contours_yields_no_vertices() {
        assert!(extrude(&[], 1.0).unwrap().is_empty());
    }
}
