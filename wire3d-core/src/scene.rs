/// Scene state driven by script commands
use std::path::Path;

use crate::curve;
use crate::edges::EdgeMatrix;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::script::Command;
use crate::transform::Transform;

/// Rasterizer that receives the edge matrix on `display` and `save`.
///
/// Implementations clear their raster, draw every segment from
/// [`EdgeMatrix::segments`] and then show or persist the result.
pub trait Output {
    type Error: std::error::Error + Send + Sync + 'static;

    fn display(&mut self, edges: &EdgeMatrix) -> std::result::Result<(), Self::Error>;

    fn save(&mut self, edges: &EdgeMatrix, path: &Path) -> std::result::Result<(), Self::Error>;
}

/// Running transform and accumulated geometry of one script run
#[derive(Debug, Clone, Default)]
pub struct Scene {
    transform: Matrix,
    edges: EdgeMatrix,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            transform: Matrix::identity(),
            edges: EdgeMatrix::new(),
        }
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn edges(&self) -> &EdgeMatrix {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut EdgeMatrix {
        &mut self.edges
    }

    /// Pre-multiply the running transform: `transform = t * transform`.
    ///
    /// The most recently added transform is therefore the last one applied
    /// to the geometry.
    pub fn push_transform(&mut self, t: &Matrix) -> Result<()> {
        self.transform = t.multiply(&self.transform)?;
        Ok(())
    }

    pub fn reset_transform(&mut self) {
        self.transform = Matrix::identity();
    }

    /// Multiply the running transform into every stored point
    pub fn apply(&mut self) -> Result<()> {
        self.edges.apply(&self.transform)
    }

    pub fn execute<O: Output>(&mut self, command: &Command, output: &mut O) -> Result<()> {
        log::trace!("{:?}", command);
        match command {
            Command::Line { p0, p1 } => curve::add_line(&mut self.edges, *p0, *p1),
            Command::Circle { cx, cy, cz, r } => {
                curve::add_circle(&mut self.edges, *cx, *cy, *cz, *r)
            }
            Command::Hermite([x0, y0, x1, y1, rx0, ry0, rx1, ry1]) => curve::add_hermite(
                &mut self.edges,
                *x0,
                *y0,
                *x1,
                *y1,
                *rx0,
                *ry0,
                *rx1,
                *ry1,
            )?,
            Command::Bezier([x0, y0, x1, y1, x2, y2, x3, y3]) => curve::add_bezier(
                &mut self.edges,
                *x0,
                *y0,
                *x1,
                *y1,
                *x2,
                *y2,
                *x3,
                *y3,
            )?,
            Command::Ident => self.reset_transform(),
            Command::Scale { sx, sy, sz } => {
                self.push_transform(&Transform::scale(*sx, *sy, *sz))?
            }
            Command::Move { tx, ty, tz } => {
                self.push_transform(&Transform::translate(*tx, *ty, *tz))?
            }
            Command::Rotate { axis, degrees } => {
                self.push_transform(&Transform::rotate(*axis, *degrees))?
            }
            Command::Apply => self.apply()?,
            Command::Display => {
                log::info!("displaying {} segments", self.edges.segments().count());
                output
                    .display(&self.edges)
                    .map_err(|e| Error::Output(Box::new(e)))?
            }
            Command::Save { path } => {
                log::info!("saving {}", path.display());
                output
                    .save(&self.edges, path)
                    .map_err(|e| Error::Output(Box::new(e)))?
            }
        }
        Ok(())
    }

    /// Execute commands in order, stopping at the first error
    pub fn run<O: Output>(&mut self, commands: &[Command], output: &mut O) -> Result<()> {
        for command in commands {
            self.execute(command, output)?;
        }
        Ok(())
    }
}
