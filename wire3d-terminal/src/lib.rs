/// Terminal front end: rasterizes edge matrices, shows them, saves them
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::path::Path;
use wire3d_core::{parse_script_file, EdgeMatrix, Output, Scene};

pub mod config;
pub mod logging;
pub mod raster;
pub mod renderer;

pub use config::RenderConfig;
pub use raster::{Color, Screen};
pub use renderer::AsciiRenderer;

/// Failures while showing or saving a raster
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("raster of {width}x{height} pixels cannot be encoded")]
    Dimensions { width: usize, height: usize },
}

/// `Output` that draws into a raster and shows it in the terminal
pub struct TerminalOutput {
    screen: Screen,
    color: Color,
    headless: bool,
}

impl TerminalOutput {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            screen: Screen::new(config.width, config.height),
            color: config.color,
            headless: config.headless,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    fn redraw(&mut self, edges: &EdgeMatrix) {
        self.screen.clear();
        self.screen.draw_edges(edges, self.color);
        log::debug!("{} pixels lit", self.screen.lit_count());
    }

    /// Show the raster in the alternate screen until a key is pressed
    fn show(&self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.draw_and_wait();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn draw_and_wait(&self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        // Last row holds the status line
        let mut renderer = AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize);
        renderer.render_screen(&self.screen);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        renderer.draw(&mut stdout)?;
        queue!(
            stdout,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "wire3d | {}x{} raster | press any key to continue",
                self.screen.width(),
                self.screen.height()
            )),
            ResetColor
        )?;
        stdout.flush()?;

        loop {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

impl Output for TerminalOutput {
    type Error = RenderError;

    fn display(&mut self, edges: &EdgeMatrix) -> Result<(), Self::Error> {
        self.redraw(edges);
        if self.headless {
            log::info!("headless, skipping display");
            return Ok(());
        }
        self.show()?;
        Ok(())
    }

    fn save(&mut self, edges: &EdgeMatrix, path: &Path) -> Result<(), Self::Error> {
        self.redraw(edges);
        self.screen.save(path)
    }
}

/// Parse and run a script file against a fresh scene
pub fn run_script(config: &RenderConfig) -> wire3d_core::Result<Scene> {
    let commands = parse_script_file(&config.script)?;
    log::info!("running {} ({} commands)", config.script.display(), commands.len());

    let mut output = TerminalOutput::new(config);
    let mut scene = Scene::new();
    scene.run(&commands, &mut output)?;
    Ok(scene)
}
