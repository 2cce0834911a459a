use image::Rgba;

/// An opaque ink colour, expressed as 8-bit RGB components
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from 8-bit RGB components
    pub fn new_rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    /// Parse a colour from a CSS-style hex string (`#rgb` or `#rrggbb`,
    /// leading `#` optional). Returns [None] if the string isn't a valid
    /// hex colour.
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            3 => {
                let mut components = hex.chars().filter_map(|c| c.to_digit(16));
                let r = components.next()? as u8;
                let g = components.next()? as u8;
                let b = components.next()? as u8;
                Some(Colour::new_rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Colour::new_rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb(c.0, c.1, c.2)
    }
}

impl From<[u8; 3]> for Colour {
    fn from(c: [u8; 3]) -> Self {
        let [r, g, b] = c;
        Colour::new_rgb(r, g, b)
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(c: Colour) -> Self {
        Rgba([c.r, c.g, c.b, 255])
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour { r: 0, g: 0, b: 0 };
    pub const WHITE: Colour = Colour {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLUE_INK: Colour = Colour {
        r: 16,
        g: 42,
        b: 122,
    };
    pub const RED: Colour = Colour { r: 255, g: 0, b: 0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Colour::from_hex("#102a7a"), Some(colours::BLUE_INK));
        assert_eq!(Colour::from_hex("000000"), Some(colours::BLACK));
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(Colour::from_hex("#fff"), Some(colours::WHITE));
        assert_eq!(Colour::from_hex("#f00"), Some(colours::RED));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Colour::from_hex("#12345"), None);
        assert_eq!(Colour::from_hex("notacolour"), None);
        assert_eq!(Colour::from_hex(""), None);
    }
}
