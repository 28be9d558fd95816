use palette::{IntoColor, LinSrgb, Oklch, Srgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32, a: f32 },
    Rgb { r: u8, g: u8, b: u8, a: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `over` on top of `self` with the given coverage (0.0 - 1.0).
    ///
    /// Mixing happens in linear light so partially transparent overlays darken
    /// the way a browser would.
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return self;
        }
        if alpha >= 1.0 {
            return over;
        }

        let under = self.to_linear();
        let over = over.to_linear();
        let mixed = LinSrgb::new(
            under.red + (over.red - under.red) * alpha,
            under.green + (over.green - under.green) * alpha,
            under.blue + (over.blue - under.blue) * alpha,
        );
        let (r, g, b) = Srgb::<f32>::from_linear(mixed)
            .into_format::<u8>()
            .into_components();
        Rgb::new(r, g, b)
    }

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear()
    }
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h, a: 1.0 }
    }

    pub fn oklcha(l: f32, c: f32, h: f32, a: f32) -> Self {
        Self::Oklch { l, c, h, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::Rgb { r, g, b, a }
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn alpha(&self) -> f32 {
        match self {
            Self::Oklch { a, .. } | Self::Rgb { a, .. } => a.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Self::Oklch { l, c, h, .. } => Self::Oklch { l, c, h, a: alpha },
            Self::Rgb { r, g, b, .. } => Self::Rgb { r, g, b, a: alpha },
        }
    }

    /// Opaque RGB value, ignoring alpha.
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b, .. } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h, .. } => oklch_to_rgb(*l, *c, *h),
        }
    }

    /// Components in OKLCH space, for interpolation.
    pub fn to_oklch(&self) -> (f32, f32, f32, f32) {
        match self {
            Self::Oklch { l, c, h, a } => (*l, *c, *h, *a),
            Self::Rgb { r, g, b, a } => {
                let srgb = Srgb::new(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
                let oklch: Oklch = srgb.into_color();
                (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees(), *a)
            }
        }
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_extremes() {
        let base = Rgb::new(200, 100, 50);
        assert_eq!(base.blend(Rgb::BLACK, 0.0), base);
        assert_eq!(base.blend(Rgb::BLACK, 1.0), Rgb::BLACK);
    }

    #[test]
    fn blend_darkens_toward_black() {
        let dimmed = Rgb::WHITE.blend(Rgb::BLACK, 0.75);
        assert!(dimmed.r < 255 && dimmed.r > 0);
        assert_eq!(dimmed.r, dimmed.g);
        assert_eq!(dimmed.g, dimmed.b);
    }

    #[test]
    fn blend_mixes_in_linear_light() {
        // Half coverage in linear light sits well above the sRGB midpoint.
        let half = Rgb::WHITE.blend(Rgb::BLACK, 0.5);
        assert!((187..=188).contains(&half.r), "{half:?}");
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 0.5), half);
    }

    #[test]
    fn rgb_alpha_is_clamped() {
        assert_eq!(Color::rgba(0, 0, 0, 1.5).alpha(), 1.0);
        assert_eq!(Color::rgba(0, 0, 0, 0.75).alpha(), 0.75);
    }
}
