use cgmath::{Vector3, Vector4};

/// Maps `sin(t)` into `[0, 1]`.
pub fn pulse(t: f32) -> f32 {
    unit(t.sin())
}

fn unit(v: f32) -> f32 {
    v / 2.0 + 0.5
}

pub fn green_pulse(t: f32) -> Vector4<f32> {
    Vector4::new(0.0, pulse(t), 0.0, 1.0)
}

/// Colors of the two animated triangle corners at time `t`.
pub fn corner_colors(t: f32) -> [Vector3<f32>; 2] {
    [
        Vector3::new(unit(t.sin()), unit(t.cos()), unit((t * 2.0).sin())),
        Vector3::new(unit(t.cos()), unit(t.sin()), unit((t * 2.0).cos())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn pulse_range() {
        assert_eq!(pulse(0.0), 0.5);
        assert!((pulse(FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!(pulse(-FRAC_PI_2).abs() < 1e-6);

        for i in 0..100 {
            let v = pulse(i as f32 * 0.37);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn green_only() {
        let c = green_pulse(0.0);
        assert_eq!(c, Vector4::new(0.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn corners_at_zero() {
        let [first, second] = corner_colors(0.0);
        assert_eq!(first, Vector3::new(0.5, 1.0, 0.5));
        assert_eq!(second, Vector3::new(1.0, 0.5, 1.0));
    }
}
