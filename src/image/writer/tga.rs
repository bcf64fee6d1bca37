use std::fmt::Display;
use std::io;
use std::io::Write;

use super::super::header::TgaHeader;
use super::super::run_length::RunLengthPacketizer;
use super::super::{ImageWriter, PixelBuffer};
use crate::error::Error;
use crate::logger;

const DEVELOPER_AREA_REFERENCE: [u8; 4] = [0; 4];
const EXTENSION_AREA_REFERENCE: [u8; 4] = [0; 4];
const FOOTER_SIGNATURE: [u8; 18] = *b"TRUEVISION-XFILE.\0";

enum FooterField {
    DeveloperAreaReference,
    ExtensionAreaReference,
    Signature,
}

trait AsBinaryRef {
    fn as_binary_ref(&self) -> &'static [u8];
}

impl AsBinaryRef for FooterField {
    fn as_binary_ref(&self) -> &'static [u8] {
        match self {
            Self::DeveloperAreaReference => &DEVELOPER_AREA_REFERENCE,
            Self::ExtensionAreaReference => &EXTENSION_AREA_REFERENCE,
            Self::Signature => &FOOTER_SIGNATURE,
        }
    }
}

impl Display for FooterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeveloperAreaReference => write!(f, "Developer Area Reference"),
            Self::ExtensionAreaReference => write!(f, "Extension Area Reference"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

pub struct TgaImageWriter<'a, T: Write> {
    writer: T,
    image: &'a PixelBuffer,
    use_rle: bool,
}

impl<'a, T: Write> TgaImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a PixelBuffer, use_rle: bool) -> Self {
        Self {
            writer,
            image,
            use_rle,
        }
    }
}

impl<T: Write> ImageWriter for TgaImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let mut encoder = Encoder::new(&mut self.writer, self.image, self.use_rle);
        encoder.encode()?;
        // buffered footer bytes only reach the sink here
        self.writer.flush().map_err(|_| Error::FailedToWriteFooter)
    }
}

struct Encoder<'a, T> {
    writer: &'a mut T,
    image: &'a PixelBuffer,
    use_rle: bool,
}

impl<'a, T: Write> Encoder<'a, T> {
    fn new(writer: &'a mut T, image: &'a PixelBuffer, use_rle: bool) -> Encoder<'a, T> {
        Encoder {
            writer,
            image,
            use_rle,
        }
    }

    fn encode(&mut self) -> crate::Result<()> {
        self.write_header()?;
        self.write_image_data()?;
        self.write_footer()
    }

    fn write_header(&mut self) -> crate::Result<()> {
        let header = TgaHeader::for_image(self.image, self.use_rle).to_bytes();
        logger::log_header(&header);
        self.writer
            .write_all(&header)
            .map_err(|_| Error::FailedToWriteHeader)
    }

    fn write_image_data(&mut self) -> crate::Result<()> {
        let result = if self.use_rle {
            self.write_run_length_data()
        } else {
            self.writer.write_all(self.image.as_bytes())
        };
        result.map_err(|_| Error::FailedToWriteImageData)
    }

    fn write_run_length_data(&mut self) -> io::Result<()> {
        let bytes_per_pixel = self.image.bytes_per_pixel();
        let data = self.image.as_bytes();
        let mut packet_count = 0;
        for (packet, start_pixel) in RunLengthPacketizer::new(self.image) {
            let start = start_pixel * bytes_per_pixel;
            let end = start + packet.stored_pixels() * bytes_per_pixel;
            self.writer.write_all(&[packet.control_byte()])?;
            self.writer.write_all(&data[start..end])?;
            packet_count += 1;
        }
        log::debug!(
            "Wrote {} pixels in {} run-length packets",
            self.image.pixel_count(),
            packet_count
        );
        Ok(())
    }

    fn write_footer_field(&mut self, field: FooterField) -> io::Result<()> {
        log::debug!("Writing {}", field);
        self.writer.write_all(field.as_binary_ref())
    }

    fn write_footer(&mut self) -> crate::Result<()> {
        self.write_footer_field(FooterField::DeveloperAreaReference)
            .and_then(|_| self.write_footer_field(FooterField::ExtensionAreaReference))
            .and_then(|_| self.write_footer_field(FooterField::Signature))
            .map_err(|_| Error::FailedToWriteFooter)
    }
}
