//! Camera preset table and head-centered coordinate transform.

use mimika_core::CameraAngle;

/// One camera framing: horizontal offset in head-space units, vertical
/// head-line as a fraction of canvas height, and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub x_offset: f64,
    pub y_fraction: f64,
    pub scale: f64,
}

/// The fixed preset table.
pub fn preset(angle: CameraAngle) -> CameraPreset {
    match angle {
        CameraAngle::Front => CameraPreset {
            x_offset: 0.0,
            y_fraction: 0.52,
            scale: 1.0,
        },
        CameraAngle::ThreeQuarterLeft => CameraPreset {
            x_offset: -120.0,
            y_fraction: 0.50,
            scale: 1.06,
        },
        CameraAngle::ThreeQuarterRight => CameraPreset {
            x_offset: 120.0,
            y_fraction: 0.50,
            scale: 1.06,
        },
        CameraAngle::CloseUp => CameraPreset {
            x_offset: 0.0,
            y_fraction: 0.45,
            scale: 1.18,
        },
        CameraAngle::Wide => CameraPreset {
            x_offset: 0.0,
            y_fraction: 0.55,
            scale: 0.82,
        },
    }
}

impl CameraPreset {
    /// The transform mapping head-centered coordinates to canvas pixels.
    ///
    /// Head space puts (0, 0) at the head center with y growing downward;
    /// all avatar geometry is defined there and mapped through this.
    pub fn transform(&self, canvas_width: u32, canvas_height: u32) -> Transform2D {
        Transform2D {
            tx: canvas_width as f64 / 2.0 + self.x_offset * self.scale,
            ty: canvas_height as f64 * self.y_fraction,
            scale: self.scale,
            rotation_rad: 0.0,
        }
    }
}

/// Translate + uniform scale + rotation about the translation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
    pub rotation_rad: f64,
}

impl Transform2D {
    /// The identity mapping.
    pub fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            scale: 1.0,
            rotation_rad: 0.0,
        }
    }

    /// This transform with a rotation (degrees) about its origin.
    pub fn rotated_deg(mut self, degrees: f64) -> Self {
        self.rotation_rad = degrees.to_radians();
        self
    }

    /// Maps a point from local space to canvas pixels.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (sx, sy) = (x * self.scale, y * self.scale);
        let (sin, cos) = self.rotation_rad.sin_cos();
        (
            self.tx + sx * cos - sy * sin,
            self.ty + sx * sin + sy * cos,
        )
    }

    /// Maps a canvas pixel back to local space.
    pub fn invert(&self, px: f64, py: f64) -> (f64, f64) {
        let (dx, dy) = (px - self.tx, py - self.ty);
        let (sin, cos) = self.rotation_rad.sin_cos();
        let (rx, ry) = (dx * cos + dy * sin, -dx * sin + dy * cos);
        (rx / self.scale, ry / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_up_matches_fixed_table() {
        let p = preset(CameraAngle::CloseUp);
        assert_eq!(p.scale, 1.18);
        assert_eq!(p.y_fraction, 0.45);
        assert_eq!(p.x_offset, 0.0);
    }

    #[test]
    fn test_front_is_default_framing() {
        let p = preset(CameraAngle::Front);
        assert_eq!((p.x_offset, p.y_fraction, p.scale), (0.0, 0.52, 1.0));
    }

    #[test]
    fn test_three_quarter_presets_mirror() {
        let l = preset(CameraAngle::ThreeQuarterLeft);
        let r = preset(CameraAngle::ThreeQuarterRight);
        assert_eq!(l.x_offset, -r.x_offset);
        assert_eq!(l.scale, r.scale);
        assert_eq!(l.y_fraction, r.y_fraction);
    }

    #[test]
    fn test_transform_places_head_center() {
        let t = preset(CameraAngle::Front).transform(480, 640);
        let (x, y) = t.apply(0.0, 0.0);
        assert_eq!(x, 240.0);
        assert!((y - 640.0 * 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_transform_round_trip() {
        let t = Transform2D {
            tx: 100.0,
            ty: 50.0,
            scale: 1.18,
            rotation_rad: 0.3,
        };
        let (px, py) = t.apply(12.0, -7.0);
        let (x, y) = t.invert(px, py);
        assert!((x - 12.0).abs() < 1e-9);
        assert!((y + 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_applied_before_rotation() {
        let t = Transform2D {
            tx: 0.0,
            ty: 0.0,
            scale: 2.0,
            rotation_rad: std::f64::consts::FRAC_PI_2,
        };
        let (x, y) = t.apply(1.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!((y - 2.0).abs() < 1e-9);
    }
}
