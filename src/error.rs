use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    InvalidHeader {
        width: u16,
        height: u16,
        bits_per_pixel: u8,
    },
    UnsupportedFormat(u8),
    TruncatedData(&'static str),
    CorruptRle {
        decoded_pixels: usize,
        packet_length: usize,
        pixel_count: usize,
    },
    InvalidDimensions(u16, u16),
    FailedToWriteHeader,
    FailedToWriteImageData,
    FailedToWriteFooter,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::InvalidHeader {
                width,
                height,
                bits_per_pixel,
            } => {
                write!(
                    f,
                    "Bad bits per pixel (or width/height) value in header: {}x{}/{}",
                    width, height, bits_per_pixel
                )
            }
            Self::UnsupportedFormat(data_type_code) => {
                write!(f, "Unknown TGA data type code {}", data_type_code)
            }
            Self::TruncatedData(section) => {
                write!(f, "Data ended unexpectedly while reading the {}", section)
            }
            Self::CorruptRle {
                decoded_pixels,
                packet_length,
                pixel_count,
            } => {
                write!(
                    f,
                    "Too many pixels read. Packet of {} pixels after {} of {} pixels.",
                    packet_length, decoded_pixels, pixel_count
                )
            }
            Self::InvalidDimensions(width, height) => {
                write!(
                    f,
                    "Image dimensions must be greater than zero, but were {}x{}",
                    width, height
                )
            }
            Self::FailedToWriteHeader => write!(f, "Failed to write TGA header"),
            Self::FailedToWriteImageData => write!(f, "Failed to write image data"),
            Self::FailedToWriteFooter => write!(f, "Failed to write TGA footer"),
        }
    }
}

impl std::error::Error for Error {}
