use std::mem::swap;

use crate::color::Color;
use crate::geometry::{closed_edges, open_edges, Bounds, Point2D, Segment};
use crate::image::PixelBuffer;

/// Anything the rasterizer can plot pixels into.
pub trait Canvas {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    /// Returns false when (x, y) lies outside the canvas.
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool;
}

impl Canvas for PixelBuffer {
    fn width(&self) -> u16 {
        PixelBuffer::width(self)
    }

    fn height(&self) -> u16 {
        PixelBuffer::height(self)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        PixelBuffer::set(self, x, y, color)
    }
}

pub struct Rasterizer<'a, C: ?Sized> {
    canvas: &'a mut C,
    bounds: Bounds,
}

impl<'a, C: Canvas + ?Sized> Rasterizer<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        let bounds = Bounds::new(canvas.width() as f64, canvas.height() as f64);
        Self { canvas, bounds }
    }

    /// Draws a line by stepping along its major axis and truncating the
    /// interpolated minor coordinate. Steps that fall outside the canvas on
    /// the major axis are skipped.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if x0 == x1 && y0 == y1 {
            self.canvas.set(x0, y0, color);
            return;
        }
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let steep = (x0 - x1).abs() < (y0 - y1).abs();
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }
        let major_extent = i64::from(if steep {
            self.canvas.height()
        } else {
            self.canvas.width()
        });
        for x in x0.max(0)..=x1.min(major_extent - 1) {
            let y = if y0 == y1 {
                y1
            } else {
                let t = (x - x0) as f32 / (x1 - x0) as f32;
                (y0 as f32 * (1.0 - t) + y1 as f32 * t) as i64
            };
            let (x, y) = (x as i32, y.clamp(i32::MIN.into(), i32::MAX.into()) as i32);
            if steep {
                self.canvas.set(y, x, color);
            } else {
                self.canvas.set(x, y, color);
            }
        }
    }

    /// Strokes the open polyline through `vertices`, then fills the closed
    /// polygon scanline by scanline.
    pub fn fill_polygon(&mut self, vertices: &[Point2D], color: Color) {
        for edge in open_edges(vertices) {
            self.line(
                edge.start.x as i32,
                edge.start.y as i32,
                edge.end.x as i32,
                edge.end.y as i32,
                color,
            );
        }
        if vertices.len() <= 1 {
            return;
        }
        // rows outside the canvas never meet an edge inside the bounds
        let start_y = vertices
            .iter()
            .map(|vertex| vertex.y)
            .fold(self.bounds.height(), f64::min)
            .max(0.0);
        let end_y = vertices
            .iter()
            .map(|vertex| vertex.y)
            .fold(0.0, f64::max)
            .min(self.bounds.height());
        log::debug!(
            "Filling polygon with {} vertices from y {} to y {}",
            vertices.len(),
            start_y,
            end_y
        );
        let mut y = start_y as i32;
        while y as f64 <= end_y {
            self.fill_scanline(y, vertices, color);
            y += 1;
        }
    }

    fn fill_scanline(&mut self, y: i32, vertices: &[Point2D], color: Color) {
        let crossings = self.scanline_crossings(y as f64, vertices);
        log::trace!("Scanline {} crosses {} edges", y, crossings.len());
        for pair in crossings.windows(2) {
            let (x0, x1) = (pair[0], pair[1]);
            let midpoint = Point2D::new(x0 + (x1 - x0) / 2.0, y as f64);
            if self.bounds.point_in_polygon(&midpoint, vertices) {
                self.line(x0 as i32, y, x1 as i32, y, color);
            }
        }
    }

    /// X coordinates where the horizontal line at `y` meets the polygon
    /// edges, in ascending order.
    fn scanline_crossings(&self, y: f64, vertices: &[Point2D]) -> Vec<f64> {
        let scanline = Segment::new(Point2D::new(0.0, y), Point2D::new(self.bounds.width(), y));
        let mut crossings: Vec<f64> = closed_edges(vertices)
            .filter_map(|edge| {
                self.bounds
                    .line_intersection(&scanline, &edge)
                    .filter(|crossing| edge.spans_x(crossing.x))
            })
            .map(|crossing| crossing.x)
            .collect();
        crossings.sort_by(f64::total_cmp);
        crossings
    }
}

pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    Rasterizer::new(canvas).line(x0, y0, x1, y1, color);
}

pub fn fill_polygon<C: Canvas + ?Sized>(canvas: &mut C, vertices: &[Point2D], color: Color) {
    Rasterizer::new(canvas).fill_polygon(vertices, color);
}
