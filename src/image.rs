use crate::color::Color;
use crate::error::Error;

pub mod header;
pub mod reader;
pub mod run_length;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<PixelBuffer>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl Format {
    pub fn bytes_per_pixel(&self) -> usize {
        *self as usize
    }

    pub fn from_bytes_per_pixel(bytes_per_pixel: usize) -> Option<Self> {
        match bytes_per_pixel {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }
}

/// A row-major grid of pixels stored in TGA channel order.
///
/// The backing vector always holds exactly `width * height * bytes_per_pixel`
/// bytes. Cloning copies the pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    format: Format,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u16, height: u16, format: Format) -> crate::Result<Self> {
        check_dimensions(width, height)?;
        let length = width as usize * height as usize * format.bytes_per_pixel();
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; length],
        })
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: u16, height: u16, format: Format, color: Color) -> crate::Result<Self> {
        let mut buffer = Self::new(width, height, format)?;
        let bytes_per_pixel = format.bytes_per_pixel();
        for pixel in buffer.data.chunks_exact_mut(bytes_per_pixel) {
            pixel.copy_from_slice(&color.raw()[..bytes_per_pixel]);
        }
        Ok(buffer)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Channel bytes of the pixel at `index` in the flat pixel stream.
    pub(crate) fn pixel(&self, index: usize) -> &[u8] {
        let bytes_per_pixel = self.bytes_per_pixel();
        let start = index * bytes_per_pixel;
        &self.data[start..start + bytes_per_pixel]
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((x as usize + y as usize * self.width as usize) * self.bytes_per_pixel())
    }

    /// Returns the pixel at (x, y), or the zero color outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.offset(x, y) {
            Some(offset) => Color::from_bytes(&self.data[offset..offset + self.bytes_per_pixel()]),
            None => Color::default(),
        }
    }

    /// Overwrites the pixel at (x, y) with the first `bytes_per_pixel` channel
    /// bytes of `color`. Returns false and leaves the buffer untouched outside
    /// its bounds.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        let Some(offset) = self.offset(x, y) else {
            return false;
        };
        let bytes_per_pixel = self.bytes_per_pixel();
        self.data[offset..offset + bytes_per_pixel].copy_from_slice(&color.raw()[..bytes_per_pixel]);
        true
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn flip_horizontally(&mut self) {
        let bytes_per_pixel = self.bytes_per_pixel();
        let width = self.width as usize;
        for row in self.data.chunks_exact_mut(width * bytes_per_pixel) {
            for column in 0..width / 2 {
                let mirrored = width - 1 - column;
                for channel in 0..bytes_per_pixel {
                    row.swap(
                        column * bytes_per_pixel + channel,
                        mirrored * bytes_per_pixel + channel,
                    );
                }
            }
        }
    }

    pub fn flip_vertically(&mut self) {
        let bytes_per_line = self.width as usize * self.bytes_per_pixel();
        let height = self.height as usize;
        for row in 0..height / 2 {
            let mirrored = height - 1 - row;
            let (upper, lower) = self.data.split_at_mut(mirrored * bytes_per_line);
            upper[row * bytes_per_line..(row + 1) * bytes_per_line]
                .swap_with_slice(&mut lower[..bytes_per_line]);
        }
    }

    /// Resamples the buffer to `width` x `height` by picking the nearest
    /// source pixel on each axis. No blending takes place.
    pub fn scale(&mut self, width: u16, height: u16) -> crate::Result<()> {
        check_dimensions(width, height)?;
        let bytes_per_pixel = self.bytes_per_pixel();
        let source_columns = nearest_source_indices(self.width as usize, width as usize);
        let source_rows = nearest_source_indices(self.height as usize, height as usize);
        let mut data = Vec::with_capacity(width as usize * height as usize * bytes_per_pixel);
        for source_row in source_rows {
            let row_start = source_row * self.width as usize;
            for &source_column in &source_columns {
                data.extend_from_slice(self.pixel(row_start + source_column));
            }
        }
        log::debug!(
            "Scaled {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.data = data;
        Ok(())
    }
}

fn check_dimensions(width: u16, height: u16) -> crate::Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(width, height));
    }
    Ok(())
}

// error accumulation walk: output index i maps to floor(i * source / target)
fn nearest_source_indices(source_length: usize, target_length: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity(target_length);
    let mut error = 0;
    let mut source_index = 0;
    for _ in 0..target_length {
        indices.push(source_index);
        error += source_length;
        while error >= target_length {
            error -= target_length;
            source_index += 1;
        }
    }
    indices
}
