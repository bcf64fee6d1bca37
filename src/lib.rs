use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use color::Color;
pub use error::Error;
pub use geometry::Point2D;
use image::{reader::tga::TgaImageReader, writer::tga::TgaImageWriter, ImageReader, ImageWriter};
pub use image::{Format, PixelBuffer};
pub use raster::{draw_line, fill_polygon};

mod cli;
pub mod color;
mod error;
pub mod geometry;
pub mod image;
mod logger;
pub mod raster;

pub type Result<T> = std::result::Result<T, error::Error>;

const DEMO_CANVAS_SIZE: u16 = 1000;

#[rustfmt::skip]
const DEMO_POLYGON: [(f64, f64); 8] = [
    (100.0, 400.0), (100.0, 700.0), (250.0, 800.0), (300.0, 750.0),
    (450.0, 850.0), (550.0, 700.0), (700.0, 700.0), (800.0, 500.0),
];

pub struct Arguments {
    output_file: PathBuf,
    use_rle: bool,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

pub fn read_tga_file(file_path: &Path) -> Result<PixelBuffer> {
    let input_file = open_input_file(file_path)?;
    TgaImageReader::new(BufReader::new(input_file)).read_image()
}

pub fn write_tga_file(image: &PixelBuffer, file_path: &Path, use_rle: bool) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    TgaImageWriter::new(BufWriter::new(output_file), image, use_rle).write_image()
}

pub fn decode_tga(bytes: &[u8]) -> Result<PixelBuffer> {
    TgaImageReader::new(bytes).read_image()
}

pub fn encode_tga(image: &PixelBuffer, use_rle: bool) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    TgaImageWriter::new(&mut bytes, image, use_rle).write_image()?;
    Ok(bytes)
}

pub fn demo_polygon() -> Vec<Point2D> {
    DEMO_POLYGON
        .iter()
        .map(|(x, y)| Point2D::new(*x, *y))
        .collect()
}

/// Renders the demo polygon onto a blank canvas and writes it with a
/// bottom-left origin flip applied.
pub fn render_demo_polygon(arguments: &Arguments) -> Result<()> {
    let mut image = PixelBuffer::new(DEMO_CANVAS_SIZE, DEMO_CANVAS_SIZE, Format::Rgb)?;
    fill_polygon(&mut image, &demo_polygon(), Color::RED);
    image.flip_vertically();
    write_tga_file(&image, &arguments.output_file, arguments.use_rle)?;
    log::info!("Wrote {}", arguments.output_file.display());
    Ok(())
}
