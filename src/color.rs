/// A single pixel value as it is stored in a TGA file.
///
/// Channels are kept in file order (blue, green, red, alpha). Only the first
/// `bytes_per_pixel` entries of `raw` are meaningful.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    raw: [u8; 4],
    bytes_per_pixel: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GRAY: Color = Color::grayscale(0);

    pub const fn grayscale(value: u8) -> Self {
        Color {
            raw: [value, 0, 0, 0],
            bytes_per_pixel: 1,
        }
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color {
            raw: [blue, green, red, 0],
            bytes_per_pixel: 3,
        }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color {
            raw: [blue, green, red, alpha],
            bytes_per_pixel: 4,
        }
    }

    /// Builds a color from at most four channel bytes in file order.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let bytes_per_pixel = bytes.len().min(4);
        let mut raw = [0; 4];
        raw[..bytes_per_pixel].copy_from_slice(&bytes[..bytes_per_pixel]);
        Color {
            raw,
            bytes_per_pixel: bytes_per_pixel as u8,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.bytes_per_pixel()]
    }

    /// All four channel slots, used when the color is written into a buffer
    /// with a different pixel size.
    pub(crate) fn raw(&self) -> &[u8; 4] {
        &self.raw
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::grayscale(0)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Color {}
