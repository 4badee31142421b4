//! Oklab conversions, from
//! https://bottosson.github.io/posts/oklab

use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    pub lightness: f64,
    pub a: f64,
    pub b: f64,
}

/// Polar Oklab. `hue` is in degrees and isn't normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklch {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
}

/// Linear-light sRGB. Channels are unbounded until encoded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        let h = lch.hue * PI / 180.;
        Oklab {
            lightness: lch.lightness,
            a: lch.chroma * h.cos(),
            b: lch.chroma * h.sin(),
        }
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        let chroma = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let hue = lab.b.atan2(lab.a) * 180. / PI;
        Oklch {
            lightness: lab.lightness,
            chroma,
            hue: if hue < 0. { hue + 360. } else { hue },
        }
    }
}

#[allow(clippy::excessive_precision)]
impl From<Oklab> for LinearRgb {
    fn from(lab: Oklab) -> Self {
        let Oklab { lightness, a, b } = lab;

        let l_ = lightness + 0.3963377774 * a + 0.2158037573 * b;
        let m_ = lightness - 0.1055613458 * a - 0.0638541728 * b;
        let s_ = lightness - 0.0894841775 * a - 1.2914855480 * b;

        let l = l_.powi(3);
        let m = m_.powi(3);
        let s = s_.powi(3);

        LinearRgb {
            red: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            green: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            blue: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }
}

#[allow(clippy::excessive_precision)]
impl From<LinearRgb> for Oklab {
    fn from(rgb: LinearRgb) -> Self {
        let LinearRgb { red, green, blue } = rgb;

        let l = 0.4122214708 * red + 0.5363325363 * green + 0.0514459929 * blue;
        let m = 0.2119034982 * red + 0.6806995451 * green + 0.1073969566 * blue;
        let s = 0.0883024619 * red + 0.2817188376 * green + 0.6299787005 * blue;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            lightness: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

/// sRGB transfer function. Negative input stays on the linear segment and
/// anything above 1 is clipped before the power curve.
pub fn gamma_encode(x: f64) -> f64 {
    if x <= 0.0031308 {
        12.92 * x
    } else {
        1.055 * x.clamp(0., 1.).powf(1. / 2.4) - 0.055
    }
}

pub fn gamma_decode(x: f64) -> f64 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn encode_channel(x: f64) -> u8 {
    (gamma_encode(x).clamp(0., 1.) * 255.).round().clamp(0., 255.) as u8
}

impl LinearRgb {
    /// Gamma encodes and quantizes each channel. Out of gamut values clip.
    pub fn to_srgb8(self) -> [u8; 3] {
        [self.red, self.green, self.blue].map(encode_channel)
    }

    pub fn from_srgb8([r, g, b]: [u8; 3]) -> Self {
        let decode = |c: u8| gamma_decode(f64::from(c) / 255.);
        LinearRgb {
            red: decode(r),
            green: decode(g),
            blue: decode(b),
        }
    }
}

impl Oklab {
    /// Total over finite input; NaN from overflowing cubes ends up as 0.
    pub fn to_srgb8(self) -> [u8; 3] {
        LinearRgb::from(self).to_srgb8()
    }

    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        LinearRgb::from_srgb8(rgb).into()
    }
}
