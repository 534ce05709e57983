/// wire3d - Wireframe Script Renderer
///
/// Runs a wireframe script, showing `display` frames in the terminal and
/// writing `save` frames to image files.
/// Options:
///   - --headless: skip terminal display
///   - --size WxH: raster size (default 500x500)
///   - WIRE3D_LOG=debug: more logging on stderr

use std::process::ExitCode;
use wire3d_terminal::config::{ConfigError, USAGE};
use wire3d_terminal::{logging, run_script, RenderConfig};

fn main() -> ExitCode {
    logging::init();

    let config = match RenderConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => return usage_error(err),
    };
    if config.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run_script(&config) {
        Ok(scene) => {
            log::info!("done, {} points in edge matrix", scene.edges().len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("wire3d: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn usage_error(err: ConfigError) -> ExitCode {
    eprintln!("wire3d: {}", err);
    eprintln!("{}", USAGE);
    ExitCode::from(2)
}
