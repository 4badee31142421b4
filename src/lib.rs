//! Parses user-typed color expressions into a canonical RGBA value plus its
//! `#rrggbb` and `rgb()` forms.
//!
//! Supported syntaxes are hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`),
//! `rgb()`/`rgba()`, `hsl()`/`hsla()`, `oklch()` and `oklab()`, in both the
//! comma and the space separated grammar. Anything else can be handed to a
//! host supplied [`ColorResolver`].
//!
//! Parsing never panics on bad input; failures come back as [`ColorError`].
//!
//! ```
//! let parsed = color_sanitizer::parse_color("oklch(62% 0.19 244)").unwrap();
//! assert_eq!(parsed.hex, "#008cee");
//! ```

use serde::Serialize;

pub mod error;
pub mod fallback;
pub mod formats;
pub mod oklab;
pub mod output;
pub mod rgba;
pub mod syntax;

pub use error::{ColorError, ComponentError, ErrorKind};
pub use fallback::{ColorResolver, CommandResolver, NoResolver, ProbeHost, ProbeResolver};
pub use formats::{ColorFormat, detect_format};
pub use output::{OutputFormat, format_rgba};
pub use rgba::Rgba;

/// Where a successfully parsed color came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    /// One of the built-in parsers understood the input.
    Direct,
    /// The input went through a resolver first.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedColor {
    /// The trimmed input, as typed.
    pub input: String,
    /// Syntax that was parsed. For resolved colors this is the syntax of the
    /// resolver's answer.
    pub format: ColorFormat,
    pub rgba: Rgba,
    pub hex: String,
    pub rgb_string: String,
    pub source: Source,
}

impl ParsedColor {
    fn new(input: &str, format: ColorFormat, rgba: Rgba, source: Source) -> Self {
        Self {
            input: input.to_owned(),
            format,
            hex: output::to_hex(&rgba),
            rgb_string: output::to_rgb_string(&rgba),
            rgba,
            source,
        }
    }

    pub fn format_as(&self, format: OutputFormat) -> String {
        format_rgba(&self.rgba, format)
    }
}

/// A color reduced to a string any CSS consumer accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sanitized {
    pub value: String,
    pub source: Source,
}

pub type ParseOutcome = Result<ParsedColor, ColorError>;
pub type SanitizeOutcome = Result<Sanitized, ColorError>;

fn invalid(input: &str, format: ColorFormat, err: ComponentError) -> ColorError {
    let message = match err {
        ComponentError::ExpectedPercentage => err.to_string(),
        err => format!(
            "Could not parse {}: {err}",
            format.to_string().to_uppercase()
        ),
    };
    ColorError::new(input, ErrorKind::InvalidColor, message)
}

/// Parses with the built-in parsers only.
fn parse_direct(input: &str, source: Source) -> Option<ParseOutcome> {
    let format = detect_format(input)?;
    Some(
        formats::parse_as(input, format)
            .map(|rgba| ParsedColor::new(input, format, rgba, source))
            .map_err(|err| invalid(input, format, err)),
    )
}

/// Color parser with an optional resolver for syntaxes it doesn't know.
#[derive(Clone, Debug)]
pub struct ColorParser<R = NoResolver> {
    resolver: Option<R>,
}

impl ColorParser {
    pub const fn new() -> Self {
        Self { resolver: None }
    }
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ColorResolver> ColorParser<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    pub fn from_optional(resolver: Option<R>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> Option<&R> {
        self.resolver.as_ref()
    }

    /// Parses `input`, asking the resolver at most once when no built-in
    /// syntax matches.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorError::new(
                input,
                ErrorKind::InvalidColor,
                "Empty color string.",
            ));
        }

        if let Some(outcome) = parse_direct(trimmed, Source::Direct) {
            return outcome;
        }

        let Some(resolved) = fallback::resolve_with(self.resolver.as_ref(), trimmed) else {
            return Err(ColorError::unsupported(trimmed));
        };

        match parse_direct(resolved.trim(), Source::Fallback) {
            Some(Ok(parsed)) => Ok(ParsedColor {
                input: trimmed.to_owned(),
                ..parsed
            }),
            Some(Err(_)) | None => Err(ColorError::new(
                trimmed,
                ErrorKind::BrowserConversionFailed,
                format!("Resolver returned unknown color: {}", resolved.trim()),
            )),
        }
    }

    /// Like [`ColorParser::parse`] but collapsed to a usable `rgb()` string.
    ///
    /// Inputs whose syntax was recognized but whose body failed to parse get
    /// one more chance through the resolver. Other failures already went
    /// through it inside `parse`.
    pub fn sanitize(&self, input: &str) -> SanitizeOutcome {
        let err = match self.parse(input) {
            Ok(parsed) => {
                return Ok(Sanitized {
                    value: parsed.rgb_string,
                    source: parsed.source,
                });
            }
            Err(err) => err,
        };

        let trimmed = input.trim();
        if err.kind != ErrorKind::InvalidColor || trimmed.is_empty() {
            return Err(err);
        }

        let retried = fallback::resolve_with(self.resolver.as_ref(), trimmed)
            .and_then(|resolved| parse_direct(resolved.trim(), Source::Fallback));
        match retried {
            Some(Ok(parsed)) => Ok(Sanitized {
                value: parsed.rgb_string,
                source: Source::Fallback,
            }),
            _ => Err(err),
        }
    }

    /// Syntax check only; a supported color can still fail to parse.
    pub fn is_supported(&self, input: &str) -> bool {
        detect_format(input).is_some()
    }
}

/// Parses `input` without a resolver.
pub fn parse_color(input: &str) -> ParseOutcome {
    ColorParser::new().parse(input)
}

/// Sanitizes `input` without a resolver.
pub fn sanitize_color(input: &str) -> SanitizeOutcome {
    ColorParser::new().sanitize(input)
}

pub fn is_supported_color(input: &str) -> bool {
    detect_format(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        for input in ["", "   ", "\t\n"] {
            let err = parse_color(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidColor);
            assert_eq!(err.message, "Empty color string.");
        }
    }

    #[test]
    fn invalid_message_names_format() {
        let err = parse_color("oklch(0.5 0.1)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidColor);
        assert!(err.message.starts_with("Could not parse OKLCH"), "{}", err.message);

        let err = parse_color("hsl(120,50,50)").unwrap_err();
        assert_eq!(err.message, "Expected percentage (e.g., 50%).");
    }

    #[test]
    fn resolved_colors_keep_user_input() {
        let parser = ColorParser::with_resolver(|raw: &str| {
            (raw == "tomato").then(|| "rgb(255, 99, 71)".to_owned())
        });
        let parsed = parser.parse("  tomato ").unwrap();
        assert_eq!(parsed.input, "tomato");
        assert_eq!(parsed.format, ColorFormat::Rgb);
        assert_eq!(parsed.source, Source::Fallback);
        assert_eq!(parsed.hex, "#ff6347");
    }

    #[test]
    fn serializes_camel_case() {
        let parsed = parse_color("#ff00aa").unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["rgbString"], "rgb(255 0 170)");
        assert_eq!(json["format"], "hex");
        assert_eq!(json["source"], "direct");
        assert_eq!(json["rgba"]["b"], 170);
    }
}
