use super::*;

/// Linear RGB color, components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRgb([f32; 3]);

impl ColorRgb {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    pub fn from_srgb8([r, g, b]: [u8; 3]) -> Self {
        use palette::{LinSrgb, Srgb};
        let linear: LinSrgb<f32> = Srgb::new(r, g, b).into_format::<f32>().into_linear();
        Self::new(linear.red, linear.green, linear.blue)
    }

    pub const fn r(&self) -> f32 {
        self.0[0]
    }

    pub const fn g(&self) -> f32 {
        self.0[1]
    }

    pub const fn b(&self) -> f32 {
        self.0[2]
    }

    pub fn clamp(self) -> Self {
        Self::new(
            self.r().clamp(0.0, 1.0),
            self.g().clamp(0.0, 1.0),
            self.b().clamp(0.0, 1.0),
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }

    pub fn into_srgb8(self) -> [u8; 3] {
        use palette::{LinSrgb, Srgb};
        let clamped = self.clamp();
        let linear = LinSrgb::<f32>::new(clamped.r(), clamped.g(), clamped.b());
        let srgb = Srgb::<f32>::from_linear(linear);
        srgb.into_format().into()
    }

    pub fn into_plotters(self) -> plotters::style::RGBColor {
        let [r, g, b] = self.into_srgb8();
        plotters::style::RGBColor(r, g, b)
    }
}

impl fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(
                f,
                "{:.precision$},{:.precision$},{:.precision$}",
                self.r(),
                self.g(),
                self.b(),
            )
        } else {
            write!(f, "{},{},{}", self.r(), self.g(), self.b())
        }
    }
}

//
// Colormap
//

/// Sequential white to dark red ramp, endpoints taken in sRGB.
#[derive(Debug, Clone, Copy)]
pub struct Reds {
    low: ColorRgb,
    high: ColorRgb,
}

impl Reds {
    pub fn new() -> Self {
        Self {
            low: ColorRgb::from_srgb8([255, 245, 240]),
            high: ColorRgb::from_srgb8([103, 0, 13]),
        }
    }

    /// Maps `value` inside `range` to a color. Values outside are clamped, an
    /// empty range maps to the middle of the ramp.
    pub fn map(&self, value: f64, range: &Range<f64>) -> ColorRgb {
        let width = range.end - range.start;
        let t = if width > 0.0 {
            ((value - range.start) / width) as f32
        } else {
            0.5
        };
        self.low.lerp(self.high, t)
    }
}

impl Default for Reds {
    fn default() -> Self {
        Self::new()
    }
}

//
// Tests
//
