//! Body panel with emotion-driven glow.

use mimika_core::clamp01;

use crate::canvas::Canvas;

use super::palette;

/// Panel geometry in head space.
const PANEL_X: f64 = -110.0;
const PANEL_Y: f64 = 62.0;
const PANEL_W: f64 = 220.0;
const PANEL_H: f64 = 260.0;
const PANEL_RADIUS: f64 = 42.0;

/// Draws the torso panel. The glow widens and brightens with the total
/// non-neutral emotion weight.
pub fn draw_body(canvas: &mut Canvas, expressive_weight: f64) {
    let glow = clamp01(0.25 + expressive_weight / 400.0);

    // Two expanded translucent layers approximate a soft glow.
    for (inflate, alpha) in [(22.0, 0.10), (10.0, 0.18)] {
        let mut c = palette::GLOW;
        c.a = alpha * glow * 2.0;
        canvas.fill_rounded_rect(
            PANEL_X - inflate,
            PANEL_Y - inflate,
            PANEL_W + inflate * 2.0,
            PANEL_H + inflate * 2.0,
            PANEL_RADIUS + inflate,
            c,
        );
    }

    canvas.fill_rounded_rect(
        PANEL_X - 4.0,
        PANEL_Y - 4.0,
        PANEL_W + 8.0,
        PANEL_H + 8.0,
        PANEL_RADIUS + 4.0,
        palette::PANEL_EDGE,
    );
    canvas.fill_rounded_rect(PANEL_X, PANEL_Y, PANEL_W, PANEL_H, PANEL_RADIUS, palette::PANEL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Transform2D;
    use mimika_core::Color;

    fn centered_canvas() -> Canvas {
        let mut c = Canvas::new(480, 640);
        c.set_transform(Transform2D {
            tx: 240.0,
            ty: 300.0,
            scale: 1.0,
            rotation_rad: 0.0,
        });
        c
    }

    #[test]
    fn test_panel_covers_torso_area() {
        let mut c = centered_canvas();
        draw_body(&mut c, 0.0);
        // Head space (0, 190) is inside the panel: device (240, 490).
        assert_eq!(c.pixel(240, 490), palette::PANEL);
    }

    #[test]
    fn test_glow_scales_with_emotion() {
        let mut calm = centered_canvas();
        let mut excited = centered_canvas();
        calm.clear(Color::black());
        excited.clear(Color::black());

        draw_body(&mut calm, 0.0);
        draw_body(&mut excited, 400.0);

        // Sample inside the outer glow ring, above the panel proper.
        let probe_y = 300 + (PANEL_Y as i64) - 14;
        let a = calm.pixel(240, probe_y as u32);
        let b = excited.pixel(240, probe_y as u32);
        assert!(b.r > a.r, "glow did not brighten: {} vs {}", b.r, a.r);
    }
}
