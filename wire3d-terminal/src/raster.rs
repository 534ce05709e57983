/// Pixel raster that edge matrices are drawn into
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use wire3d_core::EdgeMatrix;

use crate::RenderError;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed-size raster with the origin in the bottom-left corner
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: Color::BLACK,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Pixel at a row-major position, row 0 being the top of the image
    pub fn pixel(&self, col: usize, row: usize) -> Option<Color> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.pixels[row * self.width + col])
    }

    /// Number of pixels that differ from the background
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != self.background).count()
    }

    /// Set the pixel at screen coordinates (x, y); y grows upward.
    /// Points off the screen are dropped.
    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let row = self.height - 1 - y as usize;
        self.pixels[row * self.width + x as usize] = color;
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Bresenham line between two screen points, endpoints included.
    ///
    /// A line leaving the screen is first clipped to it, so the error terms
    /// stay within the screen's size.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let (x0, y0, x1, y1) = if self.contains(x0, y0) && self.contains(x1, y1) {
            (x0, y0, x1, y1)
        } else {
            if self.width == 0 || self.height == 0 {
                return;
            }
            let max = ((self.width - 1) as f64, (self.height - 1) as f64);
            let Some((a, b)) = clip_segment(
                (x0 as f64, y0 as f64),
                (x1 as f64, y1 as f64),
                (0.0, 0.0),
                max,
            ) else {
                return;
            };
            (
                a.0.round() as i64,
                a.1.round() as i64,
                b.0.round() as i64,
                b.1.round() as i64,
            )
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw every segment of the edge matrix, ignoring depth.
    ///
    /// Coordinates are truncated toward zero to pick the pixel. Segments are
    /// clipped to a one-pixel margin around the screen first; segments with
    /// non-finite coordinates are skipped.
    pub fn draw_edges(&mut self, edges: &EdgeMatrix, color: Color) {
        let max = (self.width as f64, self.height as f64);
        for (p0, p1) in edges.lines() {
            let Some((a, b)) = clip_segment((p0.x, p0.y), (p1.x, p1.y), (-1.0, -1.0), max) else {
                continue;
            };
            self.draw_line(a.0 as i64, a.1 as i64, b.0 as i64, b.1 as i64, color);
        }
    }

    /// Write the raster to `path`.
    ///
    /// `.ppm` files are written as plain-text P3 by the PNM encoder; every
    /// other extension goes through the encoder `image` picks for it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("ppm"))
            .unwrap_or(false);

        if is_ppm {
            let mut out = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut out)?;
            out.flush()?;
            return Ok(());
        }

        let (width, height) = self.dimensions_u32()?;
        let img = image::RgbImage::from_raw(width, height, self.rgb_bytes()).ok_or(
            RenderError::Dimensions {
                width: self.width,
                height: self.height,
            },
        )?;
        img.save(path)?;
        Ok(())
    }

    /// Plain-text P3 encoding of the raster
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let (width, height) = self.dimensions_u32()?;
        PnmEncoder::new(out)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
            .write_image(&self.rgb_bytes(), width, height, ExtendedColorType::Rgb8)?;
        Ok(())
    }

    fn rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    fn dimensions_u32(&self) -> Result<(u32, u32), RenderError> {
        let err = || RenderError::Dimensions {
            width: self.width,
            height: self.height,
        };
        Ok((
            u32::try_from(self.width).map_err(|_| err())?,
            u32::try_from(self.height).map_err(|_| err())?,
        ))
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BELOW: u8 = 4;
const ABOVE: u8 = 8;

fn outcode(p: (f64, f64), min: (f64, f64), max: (f64, f64)) -> u8 {
    let mut code = 0;
    if p.0 < min.0 {
        code |= LEFT;
    } else if p.0 > max.0 {
        code |= RIGHT;
    }
    if p.1 < min.1 {
        code |= BELOW;
    } else if p.1 > max.1 {
        code |= ABOVE;
    }
    code
}

fn lerp(a: f64, b: f64, f: f64) -> f64 {
    if a == b {
        a
    } else {
        a * (1.0 - f) + b * f
    }
}

/// Cohen-Sutherland clip of the segment `p0`-`p1` to the rectangle
/// `min`..=`max`.
///
/// An endpoint moved onto a boundary takes that boundary's coordinate
/// exactly. Differences are taken at half scale so endpoints near
/// `f64::MAX` do not overflow.
fn clip_segment(
    mut p0: (f64, f64),
    mut p1: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if ![p0.0, p0.1, p1.0, p1.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let mut c0 = outcode(p0, min, max);
    let mut c1 = outcode(p1, min, max);
    // Each pass puts one endpoint on one boundary
    for _ in 0..8 {
        if c0 | c1 == 0 {
            return Some((p0, p1));
        }
        if c0 & c1 != 0 {
            return None;
        }

        let (out, a, b) = if c0 != 0 { (c0, p0, p1) } else { (c1, p1, p0) };
        let moved = if out & (LEFT | RIGHT) != 0 {
            let x = if out & LEFT != 0 { min.0 } else { max.0 };
            let f = ((x - a.0) * 0.5) / (b.0 * 0.5 - a.0 * 0.5);
            (x, lerp(a.1, b.1, f))
        } else {
            let y = if out & BELOW != 0 { min.1 } else { max.1 };
            let f = ((y - a.1) * 0.5) / (b.1 * 0.5 - a.1 * 0.5);
            (lerp(a.0, b.0, f), y)
        };

        if c0 != 0 {
            p0 = moved;
            c0 = outcode(p0, min, max);
        } else {
            p1 = moved;
            c1 = outcode(p1, min, max);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::Point;

    #[test]
    fn test_plot_flips_y() {
        let mut screen = Screen::new(4, 3);
        screen.plot(1, 0, Color::GREEN);
        assert_eq!(screen.pixel(1, 2), Some(Color::GREEN));
        assert_eq!(screen.pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_plot_off_screen_is_dropped() {
        let mut screen = Screen::new(4, 4);
        screen.plot(-1, 0, Color::GREEN);
        screen.plot(0, 4, Color::GREEN);
        assert_eq!(screen.lit_count(), 0);
    }

    #[test]
    fn test_draw_line_all_octants() {
        let ends = [
            (10, 3),
            (3, 10),
            (-3, 10),
            (-10, 3),
            (-10, -3),
            (-3, -10),
            (3, -10),
            (10, -3),
        ];
        for (dx, dy) in ends {
            let mut screen = Screen::new(32, 32);
            screen.draw_line(16, 16, 16 + dx, 16 + dy, Color::GREEN);
            // One pixel per step along the major axis
            let major = dx.abs().max(dy.abs()) as usize;
            assert_eq!(screen.lit_count(), major + 1, "octant ({}, {})", dx, dy);
            assert_eq!(screen.pixel(16, 15), Some(Color::GREEN));
            assert_eq!(
                screen.pixel((16 + dx) as usize, (15 - dy) as usize),
                Some(Color::GREEN)
            );
        }
    }

    #[test]
    fn test_draw_edges_pairs_columns() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point::new(0.0, 0.0, 0.0), Point::new(4.9, 0.0, 0.0));
        // Unpaired trailing point draws nothing
        edges.add_point(Point::new(2.0, 2.0, 0.0));

        let mut screen = Screen::new(8, 8);
        screen.draw_edges(&edges, Color::GREEN);
        assert_eq!(screen.lit_count(), 5);
        assert_eq!(screen.pixel(4, 7), Some(Color::GREEN));

        screen.clear();
        assert_eq!(screen.lit_count(), 0);
    }

    #[test]
    fn test_far_off_edge_is_clipped_to_screen() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point::new(-1e30, 0.0, 0.0), Point::new(1e30, 0.0, 0.0));
        edges.add_edge(Point::new(3.0, -1e300, 0.0), Point::new(3.0, f64::MAX, 0.0));

        let mut screen = Screen::new(8, 8);
        screen.draw_edges(&edges, Color::GREEN);
        // Bottom row plus column 3, sharing one pixel
        assert_eq!(screen.lit_count(), 8 + 7);
        assert!((0..8).all(|col| screen.pixel(col, 7) == Some(Color::GREEN)));
        assert!((0..8).all(|row| screen.pixel(3, row) == Some(Color::GREEN)));
    }

    #[test]
    fn test_off_screen_and_non_finite_edges_draw_nothing() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point::new(-1e30, 20.0, 0.0), Point::new(1e30, 20.0, 0.0));
        edges.add_edge(Point::new(f64::NEG_INFINITY, 1.0, 0.0), Point::new(3.0, 1.0, 0.0));
        edges.add_edge(Point::new(f64::NAN, 1.0, 0.0), Point::new(3.0, 1.0, 0.0));

        let mut screen = Screen::new(8, 8);
        screen.draw_edges(&edges, Color::GREEN);
        assert_eq!(screen.lit_count(), 0);
    }

    #[test]
    fn test_draw_line_with_extreme_endpoints() {
        let mut screen = Screen::new(8, 8);
        screen.draw_line(i64::MIN, 3, i64::MAX, 3, Color::GREEN);
        assert_eq!(screen.lit_count(), 8);
        assert!((0..8).all(|col| screen.pixel(col, 4) == Some(Color::GREEN)));
    }

    #[test]
    fn test_clip_segment_keeps_inside_and_rejects_outside() {
        let (min, max) = ((0.0, 0.0), (7.0, 7.0));
        assert_eq!(
            clip_segment((1.0, 2.0), (5.0, 6.0), min, max),
            Some(((1.0, 2.0), (5.0, 6.0)))
        );
        assert_eq!(
            clip_segment((-4.0, 2.0), (10.0, 2.0), min, max),
            Some(((0.0, 2.0), (7.0, 2.0)))
        );
        assert_eq!(clip_segment((-4.0, -1.0), (-1.0, 9.0), min, max), None);
        // Crosses the corner region without touching the rectangle
        assert_eq!(clip_segment((-3.0, 5.0), (5.0, 13.0), min, max), None);
    }

    #[test]
    fn test_write_ppm() {
        let mut screen = Screen::new(2, 1);
        screen.plot(1, 0, Color::new(1, 2, 3));
        let mut out = Vec::new();
        screen.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(tokens, ["P3", "2", "1", "255", "0", "0", "0", "1", "2", "3"]);
    }

    #[test]
    fn test_save_png_and_ppm() {
        let dir = std::env::temp_dir().join(format!("wire3d-raster-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut screen = Screen::new(16, 16);
        screen.draw_line(0, 0, 15, 15, Color::GREEN);

        let png = dir.join("line.png");
        screen.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.get_pixel(0, 15).0, [0, 255, 0]);

        let ppm = dir.join("line.ppm");
        screen.save(&ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        let header: Vec<&str> = text.split_whitespace().take(4).collect();
        assert_eq!(header, ["P3", "16", "16", "255"]);
        assert_eq!(text.split_whitespace().count(), 4 + 16 * 16 * 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
