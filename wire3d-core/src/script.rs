//! Line-oriented script parser
//!
//! A command keyword sits alone on a line. Commands that take arguments read
//! them from the following line as whitespace-separated tokens. Lines that
//! are not commands are skipped, and `quit` ends the script.
use std::path::{Path, PathBuf};

use nom::{
    bytes::complete::is_not,
    character::complete::{space0, space1},
    combinator::all_consuming,
    multi::separated_list0,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::edges::Point;
use crate::error::{Error, Result};
use crate::transform::Axis;

/// One parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line { p0: Point, p1: Point },
    Circle { cx: f64, cy: f64, cz: f64, r: f64 },
    /// x0 y0 x1 y1 rx0 ry0 rx1 ry1
    Hermite([f64; 8]),
    /// x0 y0 x1 y1 x2 y2 x3 y3
    Bezier([f64; 8]),
    Ident,
    Scale { sx: f64, sy: f64, sz: f64 },
    Move { tx: f64, ty: f64, tz: f64 },
    Rotate { axis: Axis, degrees: f64 },
    Apply,
    Display,
    Save { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Line,
    Circle,
    Hermite,
    Bezier,
    Ident,
    Scale,
    Move,
    Rotate,
    Apply,
    Display,
    Save,
    Quit,
}

impl Keyword {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "line" => Keyword::Line,
            "circle" => Keyword::Circle,
            "hermite" => Keyword::Hermite,
            "bezier" => Keyword::Bezier,
            "ident" => Keyword::Ident,
            "scale" => Keyword::Scale,
            "move" => Keyword::Move,
            "rotate" => Keyword::Rotate,
            "apply" => Keyword::Apply,
            "display" => Keyword::Display,
            "save" => Keyword::Save,
            "quit" => Keyword::Quit,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Keyword::Line => "line",
            Keyword::Circle => "circle",
            Keyword::Hermite => "hermite",
            Keyword::Bezier => "bezier",
            Keyword::Ident => "ident",
            Keyword::Scale => "scale",
            Keyword::Move => "move",
            Keyword::Rotate => "rotate",
            Keyword::Apply => "apply",
            Keyword::Display => "display",
            Keyword::Save => "save",
            Keyword::Quit => "quit",
        }
    }

    fn arity(self) -> usize {
        match self {
            Keyword::Line => 6,
            Keyword::Circle => 4,
            Keyword::Hermite | Keyword::Bezier => 8,
            Keyword::Scale | Keyword::Move => 3,
            Keyword::Rotate => 2,
            Keyword::Save => 1,
            Keyword::Ident | Keyword::Apply | Keyword::Display | Keyword::Quit => 0,
        }
    }
}

/// Argument tokens of one command
struct Arguments<'a> {
    command: &'static str,
    line: usize,
    tokens: Vec<&'a str>,
}

impl<'a> Arguments<'a> {
    fn new(keyword: Keyword, line: usize, text: &'a str) -> Result<Self> {
        let tokens = match split_tokens(text) {
            Ok((_, tokens)) => tokens,
            Err(_) => Vec::new(),
        };
        if tokens.len() < keyword.arity() {
            return Err(Error::ArgumentCount {
                command: keyword.name(),
                line,
                expected: keyword.arity(),
                found: tokens.len(),
            });
        }
        Ok(Self {
            command: keyword.name(),
            line,
            tokens,
        })
    }

    fn number(&self, index: usize) -> Result<f64> {
        let token = self.tokens[index];
        match all_consuming(double::<&str, nom::error::Error<&str>>)(token) {
            Ok((_, value)) => Ok(value),
            Err(_) => Err(Error::ArgumentFormat {
                command: self.command,
                line: self.line,
                token: token.to_string(),
            }),
        }
    }

    fn numbers<const N: usize>(&self) -> Result<[f64; N]> {
        let mut values = [0.0; N];
        for (i, value) in values.iter_mut().enumerate() {
            *value = self.number(i)?;
        }
        Ok(values)
    }
}

fn split_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(space0, separated_list0(space1, is_not(" \t\r\n")))(input)
}

/// Parse a whole script into commands, stopping at `quit`
pub fn parse_script(input: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let Some(keyword) = Keyword::from_token(raw.trim()) else {
            if !raw.trim().is_empty() {
                log::trace!("line {}: skipping `{}`", index + 1, raw.trim());
            }
            continue;
        };

        let args = if keyword.arity() > 0 {
            let (arg_index, text) = lines.next().unwrap_or((index + 1, ""));
            Arguments::new(keyword, arg_index + 1, text)?
        } else {
            Arguments::new(keyword, index + 1, "")?
        };

        match build_command(keyword, &args)? {
            Some(command) => commands.push(command),
            None => {
                log::debug!("line {}: quit", index + 1);
                break;
            }
        }
    }

    log::debug!("parsed {} commands", commands.len());
    Ok(commands)
}

/// Read and parse a script file
pub fn parse_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let source = std::fs::read_to_string(path)?;
    parse_script(&source)
}

/// `None` for `quit`
fn build_command(keyword: Keyword, args: &Arguments) -> Result<Option<Command>> {
    Ok(Some(match keyword {
        Keyword::Line => {
            let [x0, y0, z0, x1, y1, z1] = args.numbers()?;
            Command::Line {
                p0: Point::new(x0, y0, z0),
                p1: Point::new(x1, y1, z1),
            }
        }
        Keyword::Circle => {
            let [cx, cy, cz, r] = args.numbers()?;
            Command::Circle { cx, cy, cz, r }
        }
        Keyword::Hermite => Command::Hermite(args.numbers()?),
        Keyword::Bezier => Command::Bezier(args.numbers()?),
        Keyword::Ident => Command::Ident,
        Keyword::Scale => {
            let [sx, sy, sz] = args.numbers()?;
            Command::Scale { sx, sy, sz }
        }
        Keyword::Move => {
            let [tx, ty, tz] = args.numbers()?;
            Command::Move { tx, ty, tz }
        }
        Keyword::Rotate => Command::Rotate {
            axis: Axis::from_token(args.tokens[0]),
            degrees: args.number(1)?,
        },
        Keyword::Apply => Command::Apply,
        Keyword::Display => Command::Display,
        Keyword::Save => Command::Save {
            path: PathBuf::from(args.tokens[0]),
        },
        Keyword::Quit => return Ok(None),
    }))
}
