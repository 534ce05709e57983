/// ASCII renderer for showing a raster in the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use crate::raster::Screen;

/// Character drawn for cells that cover at least one lit pixel
const LIT: char = '#';

/// Downsamples a raster to terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Map every terminal cell to the block of pixels it covers.
    ///
    /// A cell shows the color of the first lit pixel found in its block.
    pub fn render_screen(&mut self, screen: &Screen) {
        self.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }

        for cy in 0..self.height {
            let row_start = cy * screen.height() / self.height;
            let row_end = ((cy + 1) * screen.height() / self.height).max(row_start + 1);
            for cx in 0..self.width {
                let col_start = cx * screen.width() / self.width;
                let col_end = ((cx + 1) * screen.width() / self.width).max(col_start + 1);

                let lit = (row_start..row_end)
                    .flat_map(|row| (col_start..col_end).map(move |col| (col, row)))
                    .filter_map(|(col, row)| screen.pixel(col, row))
                    .find(|&p| p != screen.background());

                self.cells[cy * self.width + cx] = lit.map(|p| Color::Rgb {
                    r: p.r,
                    g: p.g,
                    b: p.b,
                });
            }
        }
    }

    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(color) => {
                        writer.queue(SetForegroundColor(color))?;
                        writer.queue(Print(LIT))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
