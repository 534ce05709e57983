/// Command-line configuration for the renderer
use std::path::PathBuf;

use crate::raster::Color;

pub const DEFAULT_WIDTH: usize = 500;
pub const DEFAULT_HEIGHT: usize = 500;
pub const DEFAULT_SCRIPT: &str = "script";

pub const USAGE: &str = "usage: wire3d [--headless] [--size WIDTHxHEIGHT] [SCRIPT]";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("`{0}` needs a value")]
    MissingValue(&'static str),

    #[error("invalid size `{0}`, expected WIDTHxHEIGHT")]
    InvalidSize(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Raster and run settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub script: PathBuf,
    pub width: usize,
    pub height: usize,
    pub color: Color,
    /// Skip terminal display, keep saving
    pub headless: bool,
    pub help: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from(DEFAULT_SCRIPT),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color: Color::GREEN,
            headless: false,
            help: false,
        }
    }
}

impl RenderConfig {
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut script = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.help = true,
                "--headless" => config.headless = true,
                "--size" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--size"))?;
                    (config.width, config.height) = parse_size(&value)?;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        if let Some(script) = script {
            config.script = script;
        }
        Ok(config)
    }
}

fn parse_size(value: &str) -> Result<(usize, usize), ConfigError> {
    let invalid = || ConfigError::InvalidSize(value.to_string());
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: usize = w.parse().map_err(|_| invalid())?;
    let height: usize = h.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    // One RGB triple per pixel has to fit in memory and in the encoders' u32 sides
    let bytes = width.checked_mul(height).and_then(|pixels| pixels.checked_mul(3));
    if bytes.is_none() || u32::try_from(width).is_err() || u32::try_from(height).is_err() {
        return Err(invalid());
    }
    Ok((width, height))
}
