use serde::Serialize;

/// Decimal places alpha is kept at, matching the `rgb()` serialization.
const ALPHA_DECIMALS: i32 = 3;

/// An sRGB color with 8-bit channels and a unit alpha.
///
/// Alpha is clamped to [0, 1] and quantized to three decimals on
/// construction, so a color printed with [`crate::output::to_rgb_string`]
/// parses back to an identical value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

/// Largest translucent alpha at three decimals.
const ALPHA_BELOW_OPAQUE: f64 = 0.999;

fn quantize_alpha(a: f64) -> f64 {
    if a.is_nan() {
        return 1.;
    }
    let factor = 10f64.powi(ALPHA_DECIMALS);
    let quantized = (a.clamp(0., 1.) * factor).round() / factor;
    // A translucent input must stay translucent.
    if a < 1. && quantized >= 1. {
        ALPHA_BELOW_OPAQUE
    } else {
        quantized
    }
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: quantize_alpha(a),
        }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1. }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.
    }

    pub fn to_u8_array_no_alpha(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Alpha scaled to a byte, as used by 8-digit hex.
    pub fn alpha_u8(&self) -> u8 {
        (self.a * 255.).round() as u8
    }
}
