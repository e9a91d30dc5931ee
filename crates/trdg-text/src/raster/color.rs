use core::str::FromStr;

use csscolorparser::Color as CssColor;
use image::Rgb;
use rand::Rng;

use crate::error::{RenderError, Result};

/// One color or a range between two colors.
///
/// Written as a CSS color (`#282828`) or two comma-separated colors
/// (`#000000,#888888`); with more than two, the first and last are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpec {
    first: Rgb<u8>,
    last: Rgb<u8>,
}

impl ColorSpec {
    pub fn solid(color: Rgb<u8>) -> Self {
        Self {
            first: color,
            last: color,
        }
    }

    pub fn range(first: Rgb<u8>, last: Rgb<u8>) -> Self {
        Self { first, last }
    }

    pub fn parse(spec: &str) -> Result<Self> {
        let colors = spec
            .split(',')
            .map(|part| parse_rgb(part.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| RenderError::InvalidColor(spec.to_string()))?;
        match (colors.first(), colors.last()) {
            (Some(&first), Some(&last)) => Ok(Self { first, last }),
            _ => Err(RenderError::InvalidColor(spec.to_string())),
        }
    }

    /// Pick each channel independently and uniformly between the two
    /// endpoints.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb<u8> {
        let mut out = [0u8; 3];
        for (channel, slot) in out.iter_mut().enumerate() {
            let a = self.first.0[channel];
            let b = self.last.0[channel];
            *slot = rng.gen_range(a.min(b)..=a.max(b));
        }
        Rgb(out)
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::solid(Rgb([0x28, 0x28, 0x28]))
    }
}

impl FromStr for ColorSpec {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_rgb(value: &str) -> Option<Rgb<u8>> {
    let c = CssColor::from_str(value).ok()?;
    let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Some(Rgb([channel(c.r), channel(c.g), channel(c.b)]))
}

/// The two colors used for one generation call, fixed before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: Rgb<u8>,
    pub stroke: Rgb<u8>,
}

impl Palette {
    /// Sample the fill, then the stroke color.
    pub fn sample<R: Rng + ?Sized>(text: &ColorSpec, stroke: &ColorSpec, rng: &mut R) -> Self {
        let fill = text.sample(rng);
        let stroke = stroke.sample(rng);
        Self { fill, stroke }
    }
}
