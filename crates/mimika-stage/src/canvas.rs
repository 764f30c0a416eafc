//! Software RGBA framebuffer with transform-aware fills.
//!
//! Shapes are described in the current transform's local space and
//! rasterized by inverse-mapping device pixels back into that space, so
//! every fill handles translation, zoom, and head rotation uniformly.

use mimika_core::Color;

use crate::camera::Transform2D;

/// The frame buffer the draw pass renders into.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    transform: Transform2D,
}

impl Canvas {
    /// A black canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); (width * height) as usize],
            transform: Transform2D::identity(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sets the transform subsequent fills draw through.
    pub fn set_transform(&mut self, transform: Transform2D) {
        self.transform = transform;
    }

    /// Restores the identity transform.
    pub fn reset_transform(&mut self) {
        self.transform = Transform2D::identity();
    }

    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Fills the whole buffer, ignoring the transform.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Reads a pixel; out-of-range coordinates return black.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if x >= self.width || y >= self.height {
            return Color::black();
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Writes a pixel in device space with source-over blending.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[idx];
        let a = color.a.clamp(0.0, 1.0);
        self.pixels[idx] = Color::rgb(
            color.r * a + dst.r * (1.0 - a),
            color.g * a + dst.g * (1.0 - a),
            color.b * a + dst.b * (1.0 - a),
        );
    }

    /// Rasterizes an arbitrary local-space shape.
    ///
    /// `bounds` is the shape's local bounding box `(x0, y0, x1, y1)`;
    /// `shade` returns the color for a covered local point, or None
    /// outside the shape.
    pub fn fill_shape<F>(&mut self, bounds: (f64, f64, f64, f64), shade: F)
    where
        F: Fn(f64, f64) -> Option<Color>,
    {
        let (x0, y0, x1, y1) = bounds;
        let t = self.transform;

        // Device bounding box of the transformed local bounds.
        let corners = [
            t.apply(x0, y0),
            t.apply(x1, y0),
            t.apply(x0, y1),
            t.apply(x1, y1),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f64::MAX, f64::min).floor();
        let max_x = corners.iter().map(|c| c.0).fold(f64::MIN, f64::max).ceil();
        let min_y = corners.iter().map(|c| c.1).fold(f64::MAX, f64::min).floor();
        let max_y = corners.iter().map(|c| c.1).fold(f64::MIN, f64::max).ceil();

        let px0 = (min_x.max(0.0)) as i64;
        let px1 = (max_x.min(self.width as f64 - 1.0)) as i64;
        let py0 = (min_y.max(0.0)) as i64;
        let py1 = (max_y.min(self.height as f64 - 1.0)) as i64;

        for py in py0..=py1 {
            for px in px0..=px1 {
                let (lx, ly) = t.invert(px as f64 + 0.5, py as f64 + 0.5);
                if lx < x0 || lx > x1 || ly < y0 || ly > y1 {
                    continue;
                }
                if let Some(color) = shade(lx, ly) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Fills an axis-aligned rectangle in local space.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.fill_shape((x, y, x + w, y + h), |_, _| Some(color));
    }

    /// Fills an ellipse centered at (cx, cy) in local space.
    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.fill_shape((cx - rx, cy - ry, cx + rx, cy + ry), move |lx, ly| {
            let nx = (lx - cx) / rx;
            let ny = (ly - cy) / ry;
            (nx * nx + ny * ny <= 1.0).then_some(color)
        });
    }

    /// Fills a rounded rectangle in local space.
    pub fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        self.fill_shape((x, y, x + w, y + h), move |lx, ly| {
            // Distance from the inner rectangle's corner region.
            let cx = lx.clamp(x + r, x + w - r);
            let cy = ly.clamp(y + r, y + h - r);
            let dx = lx - cx;
            let dy = ly - cy;
            (dx * dx + dy * dy <= r * r).then_some(color)
        });
    }

    /// Fills a convex quadrilateral in local space, shading each point by
    /// its progress along the p0p1 → p3p2 axis.
    ///
    /// Vertices must be given in winding order. Used for the arm capsules.
    pub fn fill_quad_gradient(
        &mut self,
        quad: [(f64, f64); 4],
        start_color: Color,
        end_color: Color,
    ) {
        let x0 = quad.iter().map(|p| p.0).fold(f64::MAX, f64::min);
        let x1 = quad.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let y0 = quad.iter().map(|p| p.1).fold(f64::MAX, f64::min);
        let y1 = quad.iter().map(|p| p.1).fold(f64::MIN, f64::max);

        // Gradient axis from the midpoint of the leading edge to the
        // midpoint of the trailing edge.
        let ax = (quad[0].0 + quad[1].0) / 2.0;
        let ay = (quad[0].1 + quad[1].1) / 2.0;
        let bx = (quad[2].0 + quad[3].0) / 2.0;
        let by = (quad[2].1 + quad[3].1) / 2.0;
        let axis = (bx - ax, by - ay);
        let axis_len_sq = (axis.0 * axis.0 + axis.1 * axis.1).max(1e-9);

        self.fill_shape((x0, y0, x1, y1), move |lx, ly| {
            if !point_in_convex_quad(lx, ly, &quad) {
                return None;
            }
            let t = ((lx - ax) * axis.0 + (ly - ay) * axis.1) / axis_len_sq;
            Some(start_color.lerp(&end_color, t))
        });
    }

    /// Fills a convex quadrilateral with a flat color.
    pub fn fill_quad(&mut self, quad: [(f64, f64); 4], color: Color) {
        self.fill_quad_gradient(quad, color, color);
    }

    /// Flattens the buffer to row-major RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            out.extend_from_slice(&c.to_rgba8());
        }
        out
    }
}

/// Half-plane test against every edge; consistent sign means inside.
fn point_in_convex_quad(x: f64, y: f64, quad: &[(f64, f64); 4]) -> bool {
    let mut sign = 0.0f64;
    for i in 0..4 {
        let (x1, y1) = quad[i];
        let (x2, y2) = quad[(i + 1) % 4];
        let cross = (x2 - x1) * (y - y1) - (y2 - y1) * (x - x1);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
