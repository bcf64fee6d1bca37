use std::io::Read;

use super::super::header::{DataType, TgaHeader, HEADER_LENGTH};
use super::super::run_length::Packet;
use super::super::{ImageReader, PixelBuffer};
use crate::error::Error;
use crate::logger;

const HEADER_SECTION_NAME: &str = "header";
const IMAGE_ID_SECTION_NAME: &str = "image id";
const PIXEL_DATA_SECTION_NAME: &str = "pixel data";
const RUN_LENGTH_PACKET_SECTION_NAME: &str = "run-length packet";

pub struct TgaImageReader<T: Read> {
    reader: T,
}

impl<T: Read> TgaImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    fn read_exact(&mut self, buffer: &mut [u8], section: &'static str) -> crate::Result<()> {
        self.reader
            .read_exact(buffer)
            .map_err(|_| Error::TruncatedData(section))
    }

    fn read_header(&mut self) -> crate::Result<TgaHeader> {
        let mut bytes = [0; HEADER_LENGTH];
        self.read_exact(&mut bytes, HEADER_SECTION_NAME)?;
        logger::log_header(&bytes);
        Ok(TgaHeader::from_bytes(&bytes))
    }

    fn skip_image_id(&mut self, header: &TgaHeader) -> crate::Result<()> {
        let mut image_id = vec![0; header.id_length as usize];
        self.read_exact(&mut image_id, IMAGE_ID_SECTION_NAME)
    }

    fn read_raw_data(&mut self, image: &mut PixelBuffer) -> crate::Result<()> {
        self.read_exact(image.as_bytes_mut(), PIXEL_DATA_SECTION_NAME)
    }

    fn read_control_byte(&mut self) -> crate::Result<u8> {
        let mut byte = [0; 1];
        self.read_exact(&mut byte, RUN_LENGTH_PACKET_SECTION_NAME)?;
        Ok(byte[0])
    }

    /// Fills the image as one flat pixel stream, so packets may cross rows.
    fn read_run_length_data(&mut self, image: &mut PixelBuffer) -> crate::Result<()> {
        let pixel_count = image.pixel_count();
        let bytes_per_pixel = image.bytes_per_pixel();
        let data = image.as_bytes_mut();
        let mut pixel = [0; 4];
        let mut decoded_pixels = 0;
        while decoded_pixels < pixel_count {
            let packet = Packet::from_control_byte(self.read_control_byte()?);
            if decoded_pixels + packet.length() > pixel_count {
                return Err(Error::CorruptRle {
                    decoded_pixels,
                    packet_length: packet.length(),
                    pixel_count,
                });
            }
            let start = decoded_pixels * bytes_per_pixel;
            let end = start + packet.length() * bytes_per_pixel;
            match packet {
                Packet::Raw { .. } => {
                    self.read_exact(&mut data[start..end], RUN_LENGTH_PACKET_SECTION_NAME)?;
                }
                Packet::Run { .. } => {
                    self.read_exact(&mut pixel[..bytes_per_pixel], RUN_LENGTH_PACKET_SECTION_NAME)?;
                    for target in data[start..end].chunks_exact_mut(bytes_per_pixel) {
                        target.copy_from_slice(&pixel[..bytes_per_pixel]);
                    }
                }
            }
            decoded_pixels += packet.length();
        }
        Ok(())
    }

    fn apply_orientation(header: &TgaHeader, image: &mut PixelBuffer) {
        if header.is_bottom_up() {
            image.flip_vertically();
        }
        if header.is_right_to_left() {
            image.flip_horizontally();
        }
    }
}

impl<T: Read> ImageReader for TgaImageReader<T> {
    fn read_image(&mut self) -> crate::Result<PixelBuffer> {
        let header = self.read_header()?;
        let format = header.format()?;
        let data_type = header.data_type()?;
        self.skip_image_id(&header)?;
        let mut image = PixelBuffer::new(header.width, header.height, format)?;
        log::debug!("Reading {} pixel data", data_type);
        match data_type {
            DataType::UncompressedTrueColor | DataType::UncompressedGrayscale => {
                self.read_raw_data(&mut image)?
            }
            DataType::RunLengthTrueColor | DataType::RunLengthGrayscale => {
                self.read_run_length_data(&mut image)?
            }
        }
        Self::apply_orientation(&header, &mut image);
        log::info!(
            "{}x{}/{}",
            image.width(),
            image.height(),
            image.bytes_per_pixel() * 8
        );
        Ok(image)
    }
}

#[cfg(test)]
mod test {
    use super::TgaImageReader;
    use crate::color::Color;
    use crate::error::Error;
    use crate::image::{Format, ImageReader, PixelBuffer};
    use crate::Result;

    fn header(data_type: u8, width: u16, height: u16, bits: u8, descriptor: u8) -> Vec<u8> {
        let mut bytes = vec![0, 0, data_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend(width.to_le_bytes());
        bytes.extend(height.to_le_bytes());
        bytes.push(bits);
        bytes.push(descriptor);
        bytes
    }

    fn read_tga(bytes: &[u8]) -> Result<PixelBuffer> {
        TgaImageReader::new(bytes).read_image()
    }

    #[test]
    fn read_raw_grayscale_top_left() {
        let mut bytes = header(3, 2, 2, 8, 0x20);
        bytes.extend([1, 2, 3, 4]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.format(), Format::Grayscale);
        assert_eq!(image.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn bottom_left_origin_is_flipped() {
        let mut bytes = header(3, 2, 2, 8, 0x00);
        bytes.extend([1, 2, 3, 4]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.as_bytes(), &[3, 4, 1, 2]);
    }

    #[test]
    fn right_to_left_order_is_flipped() {
        let mut bytes = header(3, 2, 2, 8, 0x30);
        bytes.extend([1, 2, 3, 4]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.as_bytes(), &[2, 1, 4, 3]);
    }

    #[test]
    fn read_raw_rgb_pixels() {
        let mut bytes = header(2, 1, 1, 24, 0x20);
        bytes.extend([30, 20, 10]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.get(0, 0), Color::rgb(10, 20, 30));
    }

    #[test]
    fn image_id_is_skipped() {
        let mut bytes = header(3, 1, 1, 8, 0x20);
        bytes[0] = 3;
        bytes.extend([b'a', b'b', b'c', 42]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.as_bytes(), &[42]);
    }

    #[test]
    fn run_packet_crosses_row_boundary() {
        let mut bytes = header(11, 3, 2, 8, 0x20);
        // raw 1 pixel, run of 4, raw 1 pixel
        bytes.extend([0, 1, 131, 6, 0, 2]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.as_bytes(), &[1, 6, 6, 6, 6, 2]);
    }

    #[test]
    fn read_run_length_rgba() {
        let mut bytes = header(10, 2, 1, 32, 0x20);
        bytes.extend([129, 1, 2, 3, 4]);
        let image = read_tga(&bytes).unwrap();
        assert_eq!(image.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn truncated_header() {
        let bytes = [0, 0, 2, 0];
        assert!(matches!(read_tga(&bytes), Err(Error::TruncatedData("header"))));
    }

    #[test]
    fn truncated_raw_data() {
        let mut bytes = header(2, 2, 2, 24, 0x20);
        bytes.extend([0; 11]);
        assert!(matches!(
            read_tga(&bytes),
            Err(Error::TruncatedData("pixel data"))
        ));
    }

    #[test]
    fn truncated_run_length_data() {
        let mut bytes = header(11, 4, 1, 8, 0x20);
        bytes.extend([129, 5]);
        assert!(matches!(
            read_tga(&bytes),
            Err(Error::TruncatedData("run-length packet"))
        ));
    }

    #[test]
    fn run_longer_than_image_is_corrupt() {
        let mut bytes = header(11, 2, 1, 8, 0x20);
        bytes.extend([130, 5]);
        assert!(matches!(
            read_tga(&bytes),
            Err(Error::CorruptRle {
                decoded_pixels: 0,
                packet_length: 3,
                pixel_count: 2
            })
        ));
    }

    #[test]
    fn unknown_data_type() {
        let mut bytes = header(1, 1, 1, 8, 0x20);
        bytes.push(0);
        assert!(matches!(read_tga(&bytes), Err(Error::UnsupportedFormat(1))));
    }

    #[test]
    fn invalid_bits_per_pixel() {
        let mut bytes = header(2, 1, 1, 16, 0x20);
        bytes.extend([0, 0]);
        assert!(matches!(
            read_tga(&bytes),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn zero_width_is_invalid() {
        let bytes = header(2, 0, 1, 24, 0x20);
        assert!(matches!(
            read_tga(&bytes),
            Err(Error::InvalidHeader { width: 0, .. })
        ));
    }
}
