/// Straight-alpha sRGB color.
///
/// Invariant:
/// - all channels are in `[0, 1]`; `a` is *not* premultiplied into `rgb`.
///
/// Straight alpha keeps the hue of fully transparent colors, which mask
/// post-processing relies on.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from sRGB components, clamped to `[0, 1]`.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a color from linear-light components.
    #[inline]
    pub fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_srgb(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b), a)
    }

    /// Linear-light RGB channels.
    #[inline]
    pub fn to_linear(self) -> [f32; 3] {
        [srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b)]
    }

    /// Returns the color with alpha multiplied by `opacity`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { a: (self.a * opacity.clamp(0.0, 1.0)).clamp(0.0, 1.0), ..self }
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 { c * 12.92 } else { 1.055 * c.powf(1.0 / 2.4) - 0.055 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_round_trip() {
        for v in [0.0, 0.2, 0.5, 1.0] {
            let [r, g, b] = Color::from_srgb(v, v, v, 1.0).to_linear();
            let back = Color::from_linear(r, g, b, 1.0);
            assert!((back.r - v).abs() < 1e-4, "{v} -> {}", back.r);
        }
    }

    #[test]
    fn mid_gray_is_darker_in_linear_space() {
        let [r, _, _] = Color::from_srgb(0.5, 0.5, 0.5, 1.0).to_linear();
        assert!((r - 0.214).abs() < 1e-3);
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let c = Color::from_srgb_u8(255, 0, 0, 255).with_opacity(0.25);
        assert_eq!((c.r, c.a), (1.0, 0.25));
        assert!(Color::from_srgb(1.0, 1.0, 1.0, 0.0).is_transparent());
    }
}
