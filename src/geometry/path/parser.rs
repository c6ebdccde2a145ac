//! Path mini-language parser.
//!
//! Grammar handled: implicit command repetition, implicit `L`/`l` after
//! `M`/`m`, `,` or whitespace separators, exponents, numbers packed without
//! separators (`10-5`, `0.5.5`) and packed arc flags (`a1 1 0 00 10 10`).

use super::PathCommand;
use super::arc::{ArcSegment, arc_to_cubics};
use crate::common::error::{Error, Result};
use crate::geometry::Point;

/// Parser switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replace arcs by their cubic approximation while parsing.
    pub expand_arcs: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { expand_arcs: true }
    }
}

/// Parse path data with arcs expanded to cubic Béziers.
///
/// ```
/// use svgdml::geometry::{Point, path::{PathCommand, parse}};
///
/// let cmds = parse("m10 10 h5 v5 z").unwrap();
/// assert_eq!(cmds[0], PathCommand::MoveTo(Point::new(10.0, 10.0)));
/// assert_eq!(cmds[1], PathCommand::HorizontalLineTo(15.0));
/// assert_eq!(cmds[3], PathCommand::ClosePath);
/// ```
pub fn parse(text: &str) -> Result<Vec<PathCommand>> {
    parse_with(text, ParseOptions::default())
}

/// Parse path data.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Vec<PathCommand>> {
    PathParser::new(text, options).run()
}

/// Byte cursor over path data.
struct PathSyntax<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> PathSyntax<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_wsp_comma(&mut self) {
        self.skip_whitespace();
        if self.current() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
    }

    fn at_number(&self) -> bool {
        matches!(self.current(), Some(b'0'..=b'9' | b'.' | b'+' | b'-'))
    }

    fn read_command(&mut self) -> Option<u8> {
        let c = self.current()?;
        if b"MmLlHhVvCcSsQqTtAaZz".contains(&c) {
            self.pos += 1;
            self.skip_wsp_comma();
            Some(c)
        } else {
            None
        }
    }

    fn read_number(&mut self) -> Result<f64> {
        if !self.at_number() {
            return Err(self.unexpected("number"));
        }
        let rest = &self.text[self.pos..];
        let (value, consumed) = fast_float2::parse_partial::<f64, _>(rest)
            .map_err(|_| Error::path(self.pos, "malformed number"))?;
        if consumed == 0 {
            return Err(self.unexpected("number"));
        }
        if !value.is_finite() {
            return Err(Error::path(self.pos, "number out of range"));
        }
        self.pos += consumed;
        self.skip_wsp_comma();
        Ok(value)
    }

    fn read_flag(&mut self) -> Result<bool> {
        let flag = match self.current() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => return Err(self.unexpected("arc flag")),
        };
        self.pos += 1;
        self.skip_wsp_comma();
        Ok(flag)
    }

    fn read_coord(&mut self) -> Result<Point> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        Ok(Point::new(x, y))
    }

    fn unexpected(&self, expected: &str) -> Error {
        let found = self.text[self.pos..]
            .chars()
            .next()
            .map(|c| format!("'{}'", c))
            .unwrap_or_else(|| "end of data".to_string());
        Error::path(self.pos, format!("expected {}, found {}", expected, found))
    }
}

struct PathParser<'a> {
    syntax: PathSyntax<'a>,
    options: ParseOptions,
    commands: Vec<PathCommand>,
    current: Point,
    subpath_start: Point,
    /// Second control point of the previous C/S, for reflecting into S
    last_cubic_ctrl: Option<Point>,
    /// Control point of the previous Q/T, for reflecting into T
    last_quad_ctrl: Option<Point>,
    /// Set after Z until the next command opens a subpath
    closed: bool,
}

impl<'a> PathParser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        Self {
            syntax: PathSyntax::new(text),
            options,
            commands: Vec::new(),
            current: Point::default(),
            subpath_start: Point::default(),
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
            closed: false,
        }
    }

    fn run(mut self) -> Result<Vec<PathCommand>> {
        let mut last_command: Option<u8> = None;

        self.syntax.skip_wsp_comma();
        while !self.syntax.at_end() {
            let command_pos = self.syntax.pos;
            let command = match self.syntax.read_command() {
                Some(c) => c,
                None if self.syntax.at_number() => match last_command {
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(b'Z' | b'z') | None => return Err(self.syntax.unexpected("command")),
                    Some(c) => c,
                },
                None => return Err(self.syntax.unexpected("command")),
            };

            if last_command.is_none() && !matches!(command, b'M' | b'm') {
                return Err(Error::path(command_pos, "path data must start with a moveto"));
            }

            self.command(command)?;
            last_command = Some(command);
        }

        Ok(self.commands)
    }

    fn command(&mut self, command: u8) -> Result<()> {
        let relative = command.is_ascii_lowercase();
        let base = if relative { self.current } else { Point::default() };
        let abs = |p: Point| Point::new(base.x + p.x, base.y + p.y);

        if self.closed && !matches!(command, b'M' | b'm') {
            self.commands.push(PathCommand::MoveTo(self.subpath_start));
        }
        self.closed = false;

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match command.to_ascii_uppercase() {
            b'M' => {
                let p = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::MoveTo(p));
                self.current = p;
                self.subpath_start = p;
            },
            b'L' => {
                let p = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::LineTo(p));
                self.current = p;
            },
            b'H' => {
                let x = self.syntax.read_number()? + base.x;
                self.commands.push(PathCommand::HorizontalLineTo(x));
                self.current.x = x;
            },
            b'V' => {
                let y = self.syntax.read_number()? + base.y;
                self.commands.push(PathCommand::VerticalLineTo(y));
                self.current.y = y;
            },
            b'C' => {
                let c1 = abs(self.syntax.read_coord()?);
                let c2 = abs(self.syntax.read_coord()?);
                let end = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::CubicBezierTo { c1, c2, end });
                self.current = end;
                cubic_ctrl = Some(c2);
            },
            b'S' => {
                let c1 = self
                    .last_cubic_ctrl
                    .map_or(self.current, |c| self.current.reflect(c));
                let c2 = abs(self.syntax.read_coord()?);
                let end = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::SmoothCubicTo { c1, c2, end });
                self.current = end;
                cubic_ctrl = Some(c2);
            },
            b'Q' => {
                let c = abs(self.syntax.read_coord()?);
                let end = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::QuadraticBezierTo { c, end });
                self.current = end;
                quad_ctrl = Some(c);
            },
            b'T' => {
                let c = self
                    .last_quad_ctrl
                    .map_or(self.current, |c| self.current.reflect(c));
                let end = abs(self.syntax.read_coord()?);
                self.commands.push(PathCommand::SmoothQuadraticTo { c, end });
                self.current = end;
                quad_ctrl = Some(c);
            },
            b'A' => {
                let rx = self.syntax.read_number()?;
                let ry = self.syntax.read_number()?;
                let x_axis_rotation = self.syntax.read_number()?;
                let large_arc = self.syntax.read_flag()?;
                let sweep = self.syntax.read_flag()?;
                let end = abs(self.syntax.read_coord()?);
                let arc = ArcSegment {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    end,
                };
                if self.options.expand_arcs {
                    self.commands.extend(arc_to_cubics(self.current, &arc));
                } else {
                    self.commands.push(PathCommand::ArcTo(arc));
                }
                self.current = end;
            },
            b'Z' => {
                self.commands.push(PathCommand::ClosePath);
                self.current = self.subpath_start;
                self.closed = true;
            },
            _ => unreachable!("read_command only yields path command letters"),
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
        Ok(())
    }
}
