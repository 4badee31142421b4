use strum::{EnumIter, EnumString};

use crate::oklab::{Oklab, Oklch};
use crate::rgba::Rgba;

/// Notations a parsed color can be printed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, strum::Display, Default)]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Oklch,
    Oklab,
}

fn num(v: f64, decimals: i32) -> f64 {
    let factor = 10.0f64.powi(decimals);
    let n = (v * factor).round() / factor;

    if n == 0. && n.is_sign_negative() {
        -n
    } else {
        n
    }
}

fn css_alpha(rgba: &Rgba) -> String {
    if rgba.is_opaque() {
        String::new()
    } else {
        format!(" / {:.3}", rgba.a())
    }
}

/// Lowercase `#rrggbb`, or `#rrggbbaa` when the color is translucent.
pub fn to_hex(rgba: &Rgba) -> String {
    let [r, g, b] = rgba.to_u8_array_no_alpha();
    if rgba.is_opaque() {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{:02x}", rgba.alpha_u8())
    }
}

/// `rgb(r g b)`, or `rgb(r g b / a)` with three alpha decimals.
pub fn to_rgb_string(rgba: &Rgba) -> String {
    let [r, g, b] = rgba.to_u8_array_no_alpha();
    format!("rgb({r} {g} {b}{})", css_alpha(rgba))
}

/// Hue in degrees, saturation and lightness in [0, 1].
fn srgb8_to_hsl([r, g, b]: [u8; 3]) -> (f64, f64, f64) {
    let [r, g, b] = [r, g, b].map(|c| f64::from(c) / 255.);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.;
    let delta = max - min;

    if delta == 0. {
        return (0., 0., lightness);
    }

    let saturation = delta / (1. - (2. * lightness - 1.).abs());
    let hue = if max == r {
        60. * ((g - b) / delta).rem_euclid(6.)
    } else if max == g {
        60. * ((b - r) / delta + 2.)
    } else {
        60. * ((r - g) / delta + 4.)
    };

    (hue, saturation, lightness)
}

pub fn format_rgba(rgba: &Rgba, format: OutputFormat) -> String {
    let alpha = css_alpha(rgba);
    match format {
        OutputFormat::Hex => to_hex(rgba),
        OutputFormat::Rgb => to_rgb_string(rgba),
        OutputFormat::Hsl => {
            let (h, s, l) = srgb8_to_hsl(rgba.to_u8_array_no_alpha());
            format!(
                "hsl({} {}% {}%{alpha})",
                num(h, 2),
                num(s * 100., 2),
                num(l * 100., 2)
            )
        }
        OutputFormat::Oklch => {
            let c = Oklch::from(Oklab::from_srgb8(rgba.to_u8_array_no_alpha()));
            let chroma = num(c.chroma, 4);
            // Hue is meaningless without chroma.
            let hue = if chroma == 0. { 0. } else { num(c.hue, 2) };
            format!(
                "oklch({} {} {}{alpha})",
                num(c.lightness, 4),
                chroma,
                hue
            )
        }
        OutputFormat::Oklab => {
            let c = Oklab::from_srgb8(rgba.to_u8_array_no_alpha());
            format!(
                "oklab({} {} {}{alpha})",
                num(c.lightness, 4),
                num(c.a, 4),
                num(c.b, 4)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_output() {
        assert_eq!(to_hex(&Rgba::opaque(255, 0, 170)), "#ff00aa");
        assert_eq!(to_hex(&Rgba::new(255, 0, 170, 0.5)), "#ff00aa80");
        assert_eq!(to_hex(&Rgba::new(1, 2, 3, 0.)), "#01020300");
    }

    #[test]
    fn rgb_output() {
        assert_eq!(to_rgb_string(&Rgba::opaque(10, 20, 30)), "rgb(10 20 30)");
        assert_eq!(
            to_rgb_string(&Rgba::new(10, 20, 30, 0.5)),
            "rgb(10 20 30 / 0.500)"
        );
        assert_eq!(
            to_rgb_string(&Rgba::new(10, 20, 30, 0.)),
            "rgb(10 20 30 / 0.000)"
        );
    }

    #[test]
    fn hsl_output() {
        assert_eq!(
            format_rgba(&Rgba::opaque(255, 0, 170), OutputFormat::Hsl),
            "hsl(320 100% 50%)"
        );
        assert_eq!(
            format_rgba(&Rgba::new(128, 128, 128, 0.25), OutputFormat::Hsl),
            "hsl(0 0% 50.2% / 0.250)"
        );
    }

    #[test]
    fn ok_outputs() {
        assert_eq!(
            format_rgba(&Rgba::WHITE, OutputFormat::Oklch),
            "oklch(1 0 0)"
        );
        assert_eq!(
            format_rgba(&Rgba::opaque(255, 0, 0), OutputFormat::Oklch),
            "oklch(0.628 0.2577 29.23)"
        );
        assert_eq!(
            format_rgba(&Rgba::opaque(255, 0, 0), OutputFormat::Oklab),
            "oklab(0.628 0.2249 0.1258)"
        );
        assert_eq!(format_rgba(&Rgba::BLACK, OutputFormat::Oklab), "oklab(0 0 0)");
    }

    #[test]
    fn negative_zero_is_dropped() {
        assert_eq!(num(-0.00001, 4).to_string(), "0");
    }
}
