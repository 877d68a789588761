use std::str::FromStr;

use crate::error::SceneError;

/// Linear premultiplied RGBA color.
///
/// Parses from the CSS forms materials are usually written in: `#rgb`,
/// `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || SceneError::invalid(format!("unrecognized color {s:?}"));

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(bad);
        }

        let (args, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(bad());
        };
        let args = args.strip_suffix(')').ok_or_else(bad)?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return Err(bad());
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| bad());
        let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        let a = match parts.get(3) {
            Some(p) => p.parse::<f32>().map_err(|_| bad())?,
            None => 1.0,
        };
        Ok(Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|n| n * 17);
    match hex.len() {
        3 => Some(Color::from_srgb_u8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Color::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_rgb() {
        let c: Color = "rgb(50, 100, 0)".parse().unwrap();
        assert_eq!(c, Color::from_srgb_u8(50, 100, 0, 255));
    }

    #[test]
    fn rgba_premultiplies() {
        let c: Color = "rgba(255, 255, 255, 0.5)".parse().unwrap();
        assert_eq!(c.a, 0.5);
        assert_eq!(c.r, 0.5);
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert!("#00000000".parse::<Color>().unwrap().is_transparent());
    }

    #[test]
    fn rejects_garbage() {
        assert!("red".parse::<Color>().is_err());
        assert!("#12".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgb(300, 0, 0)".parse::<Color>().is_err());
    }
}
