use serde::Serialize;
use strum::{EnumIter, EnumString};

use crate::error::ComponentError;
use crate::oklab::{Oklab, Oklch};
use crate::rgba::Rgba;
use crate::syntax::{
    Arguments, CssNum, angle, arguments, byte, has_alpha_clause, normalize_degrees,
    number, percent_to_unit, unit, unit_to_byte,
};

/// Chroma and a/b percentages are relative to this value, as in CSS Color 4.
const OK_PERCENT_REFERENCE: f64 = 0.4;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Oklch,
    Oklab,
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

/// Classifies a color string by its syntax alone, without looking at the
/// numbers. `None` means no supported syntax matched.
pub fn detect_format(s: &str) -> Option<ColorFormat> {
    let s = s.trim().to_ascii_lowercase();

    let format = if is_hex_color(&s) {
        ColorFormat::Hex
    } else if s.starts_with("rgba(") || (s.starts_with("rgb(") && has_alpha_clause(&s)) {
        ColorFormat::Rgba
    } else if s.starts_with("rgb(") {
        ColorFormat::Rgb
    } else if s.starts_with("hsla(") || (s.starts_with("hsl(") && has_alpha_clause(&s)) {
        ColorFormat::Hsla
    } else if s.starts_with("hsl(") {
        ColorFormat::Hsl
    } else if s.starts_with("oklch(") {
        ColorFormat::Oklch
    } else if s.starts_with("oklab(") {
        ColorFormat::Oklab
    } else {
        return None;
    };

    log::debug!("Detected format {format} for '{s}'");
    Some(format)
}

/// Parses `s` with the parser belonging to `format`.
pub fn parse_as(s: &str, format: ColorFormat) -> Result<Rgba, ComponentError> {
    let s = s.trim().to_ascii_lowercase();
    match format {
        ColorFormat::Hex => parse_hex(&s),
        ColorFormat::Rgb | ColorFormat::Rgba => parse_rgb(&s),
        ColorFormat::Hsl | ColorFormat::Hsla => parse_hsl(&s),
        ColorFormat::Oklch => parse_oklch(&s),
        ColorFormat::Oklab => parse_oklab(&s),
    }
}

fn hex_pair(digits: &str) -> Result<u8, ComponentError> {
    u8::from_str_radix(digits, 16).map_err(|_| ComponentError::HexDigits(digits.to_owned()))
}

fn hex_nibble(digit: char) -> Result<u8, ComponentError> {
    let n = digit
        .to_digit(16)
        .ok_or_else(|| ComponentError::HexDigits(digit.to_string()))?;
    Ok(n as u8 * 17)
}

pub fn parse_hex(s: &str) -> Result<Rgba, ComponentError> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.is_ascii() {
        return Err(ComponentError::HexDigits(digits.to_owned()));
    }

    match digits.len() {
        3 | 4 => {
            let mut nibbles = digits.chars().map(hex_nibble);
            let mut next = || nibbles.next().unwrap_or(Ok(255));
            let (r, g, b, a) = (next()?, next()?, next()?, next()?);
            Ok(Rgba::new(r, g, b, f64::from(a) / 255.))
        }
        6 | 8 => {
            let r = hex_pair(&digits[0..2])?;
            let g = hex_pair(&digits[2..4])?;
            let b = hex_pair(&digits[4..6])?;
            let a = match digits.get(6..8) {
                Some(pair) => f64::from(hex_pair(pair)?) / 255.,
                None => 1.,
            };
            Ok(Rgba::new(r, g, b, a))
        }
        len => Err(ComponentError::HexLength(len)),
    }
}

fn rgb_channel(token: &str) -> Result<u8, ComponentError> {
    Ok(match number(token)? {
        CssNum::Num(n) => byte(n),
        CssNum::Percent(p) => unit_to_byte(percent_to_unit(p)),
    })
}

pub fn parse_rgb(s: &str) -> Result<Rgba, ComponentError> {
    let Arguments {
        channels: [r, g, b],
        alpha,
    } = arguments(s, true)?;
    Ok(Rgba::new(rgb_channel(r)?, rgb_channel(g)?, rgb_channel(b)?, alpha))
}

fn required_percent(token: &str) -> Result<f64, ComponentError> {
    match number(token)? {
        CssNum::Percent(p) => Ok(percent_to_unit(p)),
        CssNum::Num(_) => Err(ComponentError::ExpectedPercentage),
    }
}

pub fn parse_hsl(s: &str) -> Result<Rgba, ComponentError> {
    let Arguments {
        channels: [h, sat, light],
        alpha,
    } = arguments(s, true)?;
    let hue = angle(h)?;
    let saturation = required_percent(sat)?;
    let lightness = required_percent(light)?;
    let [r, g, b] = hsl_to_srgb8(hue, saturation, lightness);
    Ok(Rgba::new(r, g, b, alpha))
}

/// `hue` in degrees (any range), `saturation` and `lightness` in [0, 1].
pub fn hsl_to_srgb8(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let c = (1. - (2. * lightness - 1.).abs()) * saturation;
    let h = normalize_degrees(hue) / 60.;
    let x = c * (1. - (h % 2. - 1.).abs());

    let (r1, g1, b1) = match h {
        h if h < 1. => (c, x, 0.),
        h if h < 2. => (x, c, 0.),
        h if h < 3. => (0., c, x),
        h if h < 4. => (0., x, c),
        h if h < 5. => (x, 0., c),
        _ => (c, 0., x),
    };

    let m = lightness - c / 2.;
    [r1, g1, b1].map(|channel| ((channel + m) * 255.).round().clamp(0., 255.) as u8)
}

fn ok_lightness(token: &str) -> Result<f64, ComponentError> {
    Ok(match number(token)? {
        CssNum::Num(n) => unit(n),
        CssNum::Percent(p) => percent_to_unit(p),
    })
}

fn ok_axis(token: &str) -> Result<f64, ComponentError> {
    Ok(match number(token)? {
        CssNum::Num(n) => n,
        CssNum::Percent(p) => p / 100. * OK_PERCENT_REFERENCE,
    })
}

pub fn parse_oklch(s: &str) -> Result<Rgba, ComponentError> {
    let Arguments {
        channels: [l, c, h],
        alpha,
    } = arguments(s, false)?;
    let lch = Oklch {
        lightness: ok_lightness(l)?,
        chroma: ok_axis(c)?.max(0.),
        hue: angle(h)?,
    };
    let [r, g, b] = Oklab::from(lch).to_srgb8();
    Ok(Rgba::new(r, g, b, alpha))
}

pub fn parse_oklab(s: &str) -> Result<Rgba, ComponentError> {
    let Arguments {
        channels: [l, a, b],
        alpha,
    } = arguments(s, false)?;
    let lab = Oklab {
        lightness: ok_lightness(l)?,
        a: ok_axis(a)?,
        b: ok_axis(b)?,
    };
    let [r, g, b] = lab.to_srgb8();
    Ok(Rgba::new(r, g, b, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(s: &str) -> Rgba {
        let format = detect_format(s).unwrap();
        parse_as(s, format).unwrap()
    }

    #[test]
    fn detection() {
        assert_eq!(detect_format("#fff"), Some(ColorFormat::Hex));
        assert_eq!(detect_format("  #FFFFFF80 "), Some(ColorFormat::Hex));
        assert_eq!(detect_format("#fffff"), None);
        assert_eq!(detect_format("#ggg"), None);
        assert_eq!(detect_format("rgb(1 2 3)"), Some(ColorFormat::Rgb));
        assert_eq!(detect_format("RGB(1 2 3 / 0.5)"), Some(ColorFormat::Rgba));
        assert_eq!(detect_format("rgba(1, 2, 3)"), Some(ColorFormat::Rgba));
        assert_eq!(detect_format("hsl(1 2% 3%)"), Some(ColorFormat::Hsl));
        assert_eq!(detect_format("hsl(1 2% 3% / 50%)"), Some(ColorFormat::Hsla));
        assert_eq!(detect_format("hsla(1, 2%, 3%)"), Some(ColorFormat::Hsla));
        assert_eq!(detect_format("oklch(0.5 0.1 30)"), Some(ColorFormat::Oklch));
        assert_eq!(detect_format("OKLAB(0.5 0.1 0.1)"), Some(ColorFormat::Oklab));
        assert_eq!(detect_format("rebeccapurple"), None);
        assert_eq!(detect_format("rgb"), None);
    }

    #[test]
    fn format_names() {
        assert_eq!(ColorFormat::Oklch.to_string(), "oklch");
        assert_eq!("hsla".parse::<ColorFormat>().unwrap(), ColorFormat::Hsla);
    }

    #[test]
    fn hex_forms() {
        assert_eq!(rgba("#f0a"), Rgba::new(255, 0, 170, 1.));
        assert_eq!(rgba("#f0a8"), Rgba::new(255, 0, 170, 136. / 255.));
        assert_eq!(rgba("#FF00AA"), Rgba::new(255, 0, 170, 1.));
        assert_eq!(rgba("#ff00aa00"), Rgba::new(255, 0, 170, 0.));
        assert_eq!(parse_hex("#12345"), Err(ComponentError::HexLength(5)));
    }

    #[test]
    fn rgb_forms() {
        assert_eq!(rgba("rgb(10,20,30)"), Rgba::new(10, 20, 30, 1.));
        assert_eq!(rgba("rgb(10 20 30 / 0.5)"), Rgba::new(10, 20, 30, 0.5));
        assert_eq!(rgba("rgba(10, 20, 30, 25%)"), Rgba::new(10, 20, 30, 0.25));
        assert_eq!(rgba("rgb(100% 50% 0%)"), Rgba::new(255, 128, 0, 1.));
        assert_eq!(rgba("rgb(300, -5, 12.7)"), Rgba::new(255, 0, 12, 1.));
        assert_eq!(rgba("rgb(1 2 3 / 7)"), Rgba::new(1, 2, 3, 1.));
    }

    #[test]
    fn rgb_malformed() {
        assert!(parse_rgb("rgb(1 2)").is_err());
        assert!(parse_rgb("rgb(a b c)").is_err());
        assert!(parse_rgb("rgb(1 2 3 / )").is_err());
    }

    #[test]
    fn hsl_sectors() {
        assert_eq!(rgba("hsl(0 100% 50%)"), Rgba::new(255, 0, 0, 1.));
        assert_eq!(rgba("hsl(60 100% 50%)"), Rgba::new(255, 255, 0, 1.));
        assert_eq!(rgba("hsl(120 100% 50%)"), Rgba::new(0, 255, 0, 1.));
        assert_eq!(rgba("hsl(180 100% 50%)"), Rgba::new(0, 255, 255, 1.));
        assert_eq!(rgba("hsl(240 100% 50%)"), Rgba::new(0, 0, 255, 1.));
        assert_eq!(rgba("hsl(300 100% 50%)"), Rgba::new(255, 0, 255, 1.));
        assert_eq!(rgba("hsl(-240 100% 50%)"), Rgba::new(0, 255, 0, 1.));
        assert_eq!(rgba("hsl(480deg 100% 50%)"), Rgba::new(0, 255, 0, 1.));
        assert_eq!(rgba("hsl(120 50% 50%)"), Rgba::new(64, 191, 64, 1.));
        assert_eq!(rgba("hsl(0 0% 100%)"), Rgba::new(255, 255, 255, 1.));
    }

    #[test]
    fn hsl_requires_percentages() {
        assert_eq!(
            parse_hsl("hsl(120,50,50)"),
            Err(ComponentError::ExpectedPercentage)
        );
        assert_eq!(
            parse_hsl("hsl(120 50% 50)"),
            Err(ComponentError::ExpectedPercentage)
        );
    }

    #[test]
    fn hsl_alpha() {
        assert_eq!(rgba("hsl(120 50% 50% / 50%)").a(), 0.5);
        assert_eq!(rgba("hsla(120, 50%, 50%, 0.2)").a(), 0.2);
    }

    #[test]
    fn oklch_blue() {
        let c = rgba("oklch(62% 0.19 244)");
        assert_eq!((c.r(), c.g(), c.b()), (0, 140, 238));
        assert_eq!(c.a(), 1.);
    }

    #[test]
    fn oklch_lightness_and_hue_forms() {
        assert_eq!(rgba("oklch(0.62 0.19 244deg)"), rgba("oklch(62% 0.19 244)"));
        assert_eq!(rgba("oklch(62% 0.19 604)"), rgba("oklch(62% 0.19 244)"));
        assert_eq!(rgba("oklch(150% 0 0)"), Rgba::new(255, 255, 255, 1.));
        assert_eq!(rgba("oklch(0.5 0.1 30 / 40%)").a(), 0.4);
    }

    #[test]
    fn oklch_needs_three_components() {
        assert_eq!(
            parse_oklch("oklch(0.5 0.1)"),
            Err(ComponentError::ComponentCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn oklab_forms() {
        assert_eq!(rgba("oklab(1 0 0)"), Rgba::new(255, 255, 255, 1.));
        assert_eq!(rgba("oklab(0 0 0)"), Rgba::new(0, 0, 0, 1.));
        assert_eq!(rgba("oklab(0.7 5 -5)"), Rgba::new(255, 0, 255, 1.));
        assert!(parse_oklab("oklab(0.5, x, 0)").is_err());
    }
}
