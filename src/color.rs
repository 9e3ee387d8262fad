//! Color space conversions over [`Vec3`] color triples.
//!
//! Conversions route through linear RGB as the hub space, so any pair of
//! supported spaces converts in at most two hops. Components are not
//! clamped on the sRGB/Oklab paths (out-of-gamut values pass through); the
//! CIE XYZ paths clamp negatives to zero because the matrices can produce
//! small negative components for in-gamut inputs.

use crate::math::Vec3;

/// The color spaces [`convert`] can translate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Gamma-compressed sRGB.
    Srgb,
    /// Linear-light RGB with sRGB primaries.
    LinearRgb,
    /// Oklab perceptual space (L, a, b).
    Oklab,
    /// CIE 1931 XYZ.
    Ciexyz,
}

/// Convert the color `c` from one color space to another.
///
/// Converting between identical spaces returns `c` unchanged.
#[must_use]
pub fn convert(c: Vec3, from: ColorSpace, to: ColorSpace) -> Vec3 {
    if from == to {
        return c;
    }
    let linear_rgb = match from {
        ColorSpace::Srgb => srgb_to_linear_rgb(c),
        ColorSpace::LinearRgb => c,
        ColorSpace::Oklab => oklab_to_linear_rgb(c),
        ColorSpace::Ciexyz => ciexyz_to_linear_rgb(c),
    };
    match to {
        ColorSpace::Srgb => linear_rgb_to_srgb(linear_rgb),
        ColorSpace::LinearRgb => linear_rgb,
        ColorSpace::Oklab => linear_rgb_to_oklab(linear_rgb),
        ColorSpace::Ciexyz => linear_rgb_to_ciexyz(linear_rgb),
    }
}

/// Pure power-function gamma compression with exponent `1 / gamma`.
#[must_use]
pub fn gamma_encode(c: Vec3, gamma: f32) -> Vec3 {
    let gamma_rcp = 1.0 / gamma;
    Vec3::new(
        c.x.powf(gamma_rcp),
        c.y.powf(gamma_rcp),
        c.z.powf(gamma_rcp),
    )
}

/// Pure power-function gamma expansion with exponent `gamma`.
#[must_use]
pub fn gamma_decode(c: Vec3, gamma: f32) -> Vec3 {
    Vec3::new(c.x.powf(gamma), c.y.powf(gamma), c.z.powf(gamma))
}

fn linear_to_srgb(x: f32) -> f32 {
    if x <= 0.003_130_8 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_to_linear(x: f32) -> f32 {
    if x <= 0.040_45 {
        x / 12.92
    } else {
        ((x + 0.055) * (1.0 / 1.055)).powf(2.4)
    }
}

/// Linear RGB to gamma-compressed sRGB (piecewise IEC 61966-2-1 curve).
#[must_use]
pub fn linear_rgb_to_srgb(c: Vec3) -> Vec3 {
    Vec3::new(
        linear_to_srgb(c.x),
        linear_to_srgb(c.y),
        linear_to_srgb(c.z),
    )
}

/// Gamma-compressed sRGB to linear RGB.
#[must_use]
pub fn srgb_to_linear_rgb(c: Vec3) -> Vec3 {
    Vec3::new(
        srgb_to_linear(c.x),
        srgb_to_linear(c.y),
        srgb_to_linear(c.z),
    )
}

/// Linear RGB to Oklab.
#[must_use]
pub fn linear_rgb_to_oklab(c: Vec3) -> Vec3 {
    let (r, g, b) = (c.x, c.y, c.z);

    let l = 0.412_221_46 * r + 0.536_332_55 * g + 0.051_445_995 * b;
    let m = 0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b;
    let s = 0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Vec3::new(
        0.210_454_26 * l_ + 0.793_617_8 * m_ - 0.004_072_047 * s_,
        1.977_998_5 * l_ - 2.428_592_2 * m_ + 0.450_593_7 * s_,
        0.025_904_037 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
    )
}

/// Oklab to linear RGB.
#[must_use]
pub fn oklab_to_linear_rgb(c: Vec3) -> Vec3 {
    let lightness = c.x;
    let a = c.y; // green/red opponent axis
    let b = c.z; // blue/yellow opponent axis

    let l_ = lightness + 0.396_337_78 * a + 0.215_803_76 * b;
    let m_ = lightness - 0.105_561_346 * a - 0.063_854_17 * b;
    let s_ = lightness - 0.089_484_18 * a - 1.291_485_5 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    Vec3::new(
        4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s,
        -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s,
        -0.004_196_086_4 * l - 0.703_418_6 * m + 1.707_614_7 * s,
    )
}

/// Linear RGB to CIE XYZ. Negative components are clamped to zero.
#[must_use]
pub fn linear_rgb_to_ciexyz(c: Vec3) -> Vec3 {
    let ciexyz = Vec3::new(
        0.412_453 * c.x + 0.357_580 * c.y + 0.180_423 * c.z,
        0.212_671 * c.x + 0.715_160 * c.y + 0.072_169 * c.z,
        0.019_334 * c.x + 0.119_193 * c.y + 0.950_227 * c.z,
    );
    ciexyz.max(Vec3::ZERO)
}

/// CIE XYZ to linear RGB. Negative components are clamped to zero.
#[must_use]
pub fn ciexyz_to_linear_rgb(c: Vec3) -> Vec3 {
    let linear_rgb = Vec3::new(
        3.240_479 * c.x - 1.537_15 * c.y - 0.498_535 * c.z,
        -0.969_256 * c.x + 1.875_991 * c.y + 0.041_556 * c.z,
        0.055_648 * c.x - 0.204_043 * c.y + 1.057_311 * c.z,
    );
    linear_rgb.max(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn assert_vec3_eq(v: Vec3, expected: Vec3, epsilon: f32) {
        assert_relative_eq!(v.x, expected.x, epsilon = epsilon);
        assert_relative_eq!(v.y, expected.y, epsilon = epsilon);
        assert_relative_eq!(v.z, expected.z, epsilon = epsilon);
    }

    #[test]
    fn identical_spaces_are_identity() {
        let c = Vec3::new(0.25, 0.5, 0.75);
        assert_eq!(convert(c, ColorSpace::Srgb, ColorSpace::Srgb), c);
        assert_eq!(convert(c, ColorSpace::Oklab, ColorSpace::Oklab), c);
    }

    #[test]
    fn black_and_white_are_fixed_points_of_srgb() {
        assert_vec3_eq(srgb_to_linear_rgb(Vec3::ZERO), Vec3::ZERO, 1e-6);
        assert_vec3_eq(srgb_to_linear_rgb(Vec3::ONE), Vec3::ONE, 1e-5);
        assert_vec3_eq(linear_rgb_to_srgb(Vec3::ONE), Vec3::ONE, 1e-5);
    }

    #[test]
    fn srgb_round_trips_through_linear() {
        for c in [
            Vec3::new(0.1, 0.5, 0.9),
            Vec3::new(0.02, 0.02, 0.02), // below the piecewise knee
            Vec3::new(0.97, 0.33, 0.66),
        ] {
            let round = linear_rgb_to_srgb(srgb_to_linear_rgb(c));
            assert_vec3_eq(round, c, 1e-4);
        }
    }

    #[test]
    fn oklab_round_trips_through_linear() {
        for c in [Vec3::new(0.2, 0.4, 0.8), Vec3::new(1.0, 1.0, 1.0)] {
            let round = oklab_to_linear_rgb(linear_rgb_to_oklab(c));
            assert_vec3_eq(round, c, 1e-4);
        }
    }

    #[test]
    fn oklab_white_reference_value() {
        // Linear-light white maps to L = 1, a = b = 0.
        let lab = linear_rgb_to_oklab(Vec3::ONE);
        assert_relative_eq!(lab.x, 1.0, epsilon = 1e-3);
        assert_relative_eq!(lab.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(lab.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn ciexyz_round_trips_through_linear() {
        let c = Vec3::new(0.3, 0.6, 0.1);
        let round = ciexyz_to_linear_rgb(linear_rgb_to_ciexyz(c));
        assert_vec3_eq(round, c, 1e-4);
    }

    #[test]
    fn convert_routes_between_non_hub_spaces() {
        let srgb = Vec3::new(0.8, 0.4, 0.2);
        let there = convert(srgb, ColorSpace::Srgb, ColorSpace::Oklab);
        let back = convert(there, ColorSpace::Oklab, ColorSpace::Srgb);
        assert_vec3_eq(back, srgb, 1e-4);
    }

    #[test]
    fn gamma_encode_decode_are_inverse() {
        let c = Vec3::new(0.2, 0.5, 0.8);
        assert_vec3_eq(gamma_decode(gamma_encode(c, 2.2), 2.2), c, 1e-5);
        // gamma 1 is the identity
        assert_vec3_eq(gamma_encode(c, 1.0), c, 1e-6);
    }
}
