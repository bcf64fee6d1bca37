use std::fmt::Display;

use super::{Format, PixelBuffer};
use crate::error::Error;

pub const HEADER_LENGTH: usize = 18;

/// Image descriptor bit: rows are stored top to bottom.
pub const TOP_LEFT_ORIGIN: u8 = 0x20;
/// Image descriptor bit: pixels within a row are stored right to left.
pub const RIGHT_TO_LEFT_ORDER: u8 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    UncompressedTrueColor = 2,
    UncompressedGrayscale = 3,
    RunLengthTrueColor = 10,
    RunLengthGrayscale = 11,
}

impl DataType {
    pub fn for_format(format: Format, use_rle: bool) -> Self {
        match (format, use_rle) {
            (Format::Grayscale, false) => Self::UncompressedGrayscale,
            (Format::Grayscale, true) => Self::RunLengthGrayscale,
            (_, false) => Self::UncompressedTrueColor,
            (_, true) => Self::RunLengthTrueColor,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_run_length_encoded(&self) -> bool {
        matches!(self, Self::RunLengthTrueColor | Self::RunLengthGrayscale)
    }
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::UncompressedTrueColor),
            3 => Ok(Self::UncompressedGrayscale),
            10 => Ok(Self::RunLengthTrueColor),
            11 => Ok(Self::RunLengthGrayscale),
            code => Err(Error::UnsupportedFormat(code)),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UncompressedTrueColor => write!(f, "Uncompressed True Color"),
            Self::UncompressedGrayscale => write!(f, "Uncompressed Grayscale"),
            Self::RunLengthTrueColor => write!(f, "Run Length True Color"),
            Self::RunLengthGrayscale => write!(f, "Run Length Grayscale"),
        }
    }
}

/// The fixed 18 byte header at the start of every TGA file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub data_type_code: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Header describing `image` with a top-left origin.
    pub fn for_image(image: &PixelBuffer, use_rle: bool) -> Self {
        Self {
            data_type_code: DataType::for_format(image.format(), use_rle).code(),
            width: image.width(),
            height: image.height(),
            bits_per_pixel: (image.bytes_per_pixel() * 8) as u8,
            image_descriptor: TOP_LEFT_ORIGIN,
            ..Self::default()
        }
    }

    pub fn from_bytes(bytes: &[u8; HEADER_LENGTH]) -> Self {
        let word = |index: usize| u16::from_le_bytes([bytes[index], bytes[index + 1]]);
        Self {
            id_length: bytes[0],
            color_map_type: bytes[1],
            data_type_code: bytes[2],
            color_map_origin: word(3),
            color_map_length: word(5),
            color_map_depth: bytes[7],
            x_origin: word(8),
            y_origin: word(10),
            width: word(12),
            height: word(14),
            bits_per_pixel: bytes[16],
            image_descriptor: bytes[17],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0; HEADER_LENGTH];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.data_type_code;
        bytes[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        bytes[7] = self.color_map_depth;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.bits_per_pixel;
        bytes[17] = self.image_descriptor;
        bytes
    }

    /// Checks dimensions and pixel size, returning the pixel format.
    pub fn format(&self) -> crate::Result<Format> {
        let format = Format::from_bytes_per_pixel(self.bits_per_pixel as usize / 8);
        match format {
            Some(format) if self.width > 0 && self.height > 0 => Ok(format),
            _ => Err(Error::InvalidHeader {
                width: self.width,
                height: self.height,
                bits_per_pixel: self.bits_per_pixel,
            }),
        }
    }

    pub fn data_type(&self) -> crate::Result<DataType> {
        DataType::try_from(self.data_type_code)
    }

    pub fn is_bottom_up(&self) -> bool {
        self.image_descriptor & TOP_LEFT_ORIGIN == 0
    }

    pub fn is_right_to_left(&self) -> bool {
        self.image_descriptor & RIGHT_TO_LEFT_ORDER != 0
    }
}
