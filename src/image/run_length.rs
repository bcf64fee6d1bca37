use super::PixelBuffer;

pub const MAX_PACKET_LENGTH: usize = 128;

/// A TGA run-length packet, counted in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Packet {
    /// `length` pixels stored one after another
    Raw { length: usize },
    /// a single pixel repeated `length` times
    Run { length: usize },
}

impl Packet {
    pub fn from_control_byte(control_byte: u8) -> Self {
        if control_byte < 128 {
            Self::Raw {
                length: control_byte as usize + 1,
            }
        } else {
            Self::Run {
                length: control_byte as usize - 127,
            }
        }
    }

    pub fn control_byte(&self) -> u8 {
        match self {
            Self::Raw { length } => (length - 1) as u8,
            Self::Run { length } => (length + 127) as u8,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            Self::Raw { length } | Self::Run { length } => *length,
        }
    }

    /// Number of pixels whose channel bytes follow the control byte.
    pub fn stored_pixels(&self) -> usize {
        match self {
            Self::Raw { length } => *length,
            Self::Run { .. } => 1,
        }
    }
}

/// Splits the flat pixel stream of an image into packets.
///
/// The split is greedy: the first comparison of a packet decides whether it
/// is a run or a raw packet, and a raw packet ends as soon as two equal
/// neighbours show up, even where keeping them raw would be smaller.
pub struct RunLengthPacketizer<'a> {
    image: &'a PixelBuffer,
    current_pixel: usize,
}

impl<'a> RunLengthPacketizer<'a> {
    pub fn new(image: &'a PixelBuffer) -> Self {
        Self {
            image,
            current_pixel: 0,
        }
    }

    fn pixels_equal(&self, index: usize) -> bool {
        self.image.pixel(index) == self.image.pixel(index + 1)
    }
}

impl Iterator for RunLengthPacketizer<'_> {
    /// the packet and the index of its first pixel
    type Item = (Packet, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let pixel_count = self.image.pixel_count();
        let start = self.current_pixel;
        if start >= pixel_count {
            return None;
        }
        let mut run_length = 1;
        let mut raw = true;
        let mut compared_pixel = start;
        while start + run_length < pixel_count && run_length < MAX_PACKET_LENGTH {
            let equal = self.pixels_equal(compared_pixel);
            compared_pixel += 1;
            if run_length == 1 {
                raw = !equal;
            }
            if raw && equal {
                run_length -= 1;
                break;
            }
            if !raw && !equal {
                break;
            }
            run_length += 1;
        }
        self.current_pixel += run_length;
        let packet = if raw {
            Packet::Raw { length: run_length }
        } else {
            Packet::Run { length: run_length }
        };
        Some((packet, start))
    }
}
