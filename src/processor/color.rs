//! Display-P3 -> sRGB conversion for theme and settings colours.
//!
//! Both spaces share the D65 white point and the sRGB transfer curve, so the
//! conversion is: decode, 3x3 primaries matrix, clip to gamut, encode.

use crate::error::{Error, Result};

/// Linear Display-P3 -> linear sRGB.
const P3_TO_SRGB: [[f64; 3]; 3] = [
    [1.224_940_2, -0.224_940_2, 0.0],
    [-0.042_056_9, 1.042_056_9, 0.0],
    [-0.019_637_6, -0.078_636_1, 1.098_273_7],
];

/// An 8-bit colour with optional alpha, as written in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub rgb: [u8; 3],
    pub alpha: Option<u8>,
}

impl HexColor {
    /// Accepts `#rrggbb` and `#rrggbbaa`; the `#` is optional.
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        let rgb = [byte(0)?, byte(2)?, byte(4)?];
        let alpha = if hex.len() == 8 { Some(byte(6)?) } else { None };
        Ok(Self { rgb, alpha })
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.rgb;
        match self.alpha {
            Some(a) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
            None => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }

    /// Reinterpret this Display-P3 colour in sRGB. Alpha is untouched.
    pub fn p3_to_srgb(self) -> Self {
        let linear = self.rgb.map(|c| decode(c as f64 / 255.0));
        let mut out = [0u8; 3];
        for (o, row) in out.iter_mut().zip(P3_TO_SRGB) {
            let v = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
            *o = (encode(v.clamp(0.0, 1.0)) * 255.0).round() as u8;
        }
        Self {
            rgb: out,
            alpha: self.alpha,
        }
    }
}

/// sRGB transfer curve, encoded -> linear.
fn decode(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer curve, linear -> encoded.
fn encode(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// `"#ff00ff"` in Display-P3 -> the equivalent sRGB hex string.
pub fn displayp3_hex_to_srgb_hex(hex: &str) -> Result<String> {
    Ok(HexColor::parse(hex)?.p3_to_srgb().to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutrals_are_unchanged() {
        for c in ["#000000", "#ffffff", "#808080", "#1e1e1e"] {
            assert_eq!(displayp3_hex_to_srgb_hex(c).unwrap(), c);
        }
    }

    #[test]
    fn saturated_colours_clip_to_gamut() {
        assert_eq!(displayp3_hex_to_srgb_hex("#ff0000").unwrap(), "#ff0000");
        assert_eq!(displayp3_hex_to_srgb_hex("#00ff00").unwrap(), "#00ff00");
    }

    #[test]
    fn in_gamut_colours_shift() {
        let srgb = HexColor::parse("#b05050").unwrap().p3_to_srgb();
        // P3 red is more saturated, so the sRGB equivalent has more red
        // and less green than the input.
        assert!(srgb.rgb[0] > 0xb0);
        assert!(srgb.rgb[1] < 0x50);
    }

    #[test]
    fn alpha_is_preserved() {
        assert_eq!(displayp3_hex_to_srgb_hex("#FFFFFF80").unwrap(), "#ffffff80");
        assert_eq!(displayp3_hex_to_srgb_hex("000000").unwrap(), "#000000");
    }

    #[test]
    fn invalid_colours() {
        for bad in ["#fff", "#12345", "#gggggg", ""] {
            assert!(matches!(
                displayp3_hex_to_srgb_hex(bad),
                Err(Error::InvalidColor(_))
            ));
        }
    }
}
