use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use itertools::Itertools;
use log::{log, Level};

use super::*;
use crate::error::{Error, Result};
use crate::geo::{try_parse_coordinate, Position};

#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Forget the `V X=` center at every record start instead of carrying
    /// it into the next record.
    pub reset_center: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticKind {
    Coordinate(String),
    Number { command: String, text: String },
    MissingDirection,
    UnknownVariable(String),
    UnknownCommand(String),
}

impl DiagnosticKind {
    pub fn level(&self) -> Level {
        match self {
            DiagnosticKind::UnknownVariable(_) | DiagnosticKind::UnknownCommand(_) => Level::Debug,
            _ => Level::Warn,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticKind::Coordinate(reason) => write!(f, "malformed coordinate: {}", reason),
            DiagnosticKind::Number { command, text } => {
                write!(f, "{}: '{}' is not a number", command, text)
            }
            DiagnosticKind::MissingDirection => write!(f, "V D= without a direction"),
            DiagnosticKind::UnknownVariable(name) => write!(f, "unknown variable '{}'", name),
            DiagnosticKind::UnknownCommand(command) => write!(f, "unknown command '{}'", command),
        }
    }
}

/// A field that was degraded instead of rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// State shared between the commands of one parsing session.
///
/// `V X=`, `V D=` and `V Z=` write here and the `DA`/`DB`/`DC`/`DP` builders
/// read from here. Direction and zoom start over with every record; the
/// center is carried into the next record unless
/// [`ParseOptions::reset_center`] is set.
///
/// There is no separate "center assigned" flag: the center is whatever the
/// last `V X=` parsed to, so an unparseable `V X=` and a center that was
/// never set both read as an invalid [`Position`]. Only the diagnostics tell
/// the two apart.
#[derive(Debug)]
pub struct ParserContext {
    center: Position,
    clockwise: bool,
    zoom: Option<f32>,
    options: ParseOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Default for ParserContext {
    fn default() -> Self {
        ParserContext::new(ParseOptions::default())
    }
}

impl ParserContext {
    pub fn new(options: ParseOptions) -> Self {
        ParserContext {
            center: Position::invalid(),
            clockwise: true,
            zoom: None,
            options,
            diagnostics: Vec::new(),
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn zoom(&self) -> Option<f32> {
        self.zoom
    }

    pub fn set_center(&mut self, center: Position) {
        self.center = center;
    }

    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
    }

    pub fn set_zoom(&mut self, zoom: Option<f32>) {
        self.zoom = zoom;
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind.level() == Level::Warn)
            .count()
    }

    fn begin_record(&mut self) {
        self.clockwise = true;
        self.zoom = None;
        if self.options.reset_center {
            self.center = Position::invalid();
        }
    }

    fn report(&mut self, line: usize, kind: DiagnosticKind) {
        log!(kind.level(), "line {}: {}", line, kind);
        self.diagnostics.push(Diagnostic { line, kind });
    }

    fn coordinate(&mut self, line: usize, text: &str) -> Position {
        try_parse_coordinate(text).unwrap_or_else(|e| {
            self.report(line, DiagnosticKind::Coordinate(e.to_string()));
            Position::invalid()
        })
    }

    fn number<T: FromStr + Default>(&mut self, line: usize, command: &str, text: &str) -> T {
        let text = text.trim();
        text.parse().unwrap_or_else(|_| {
            self.report(
                line,
                DiagnosticKind::Number {
                    command: command.to_owned(),
                    text: text.to_owned(),
                },
            );
            T::default()
        })
    }

    /// Exactly `count` comma-separated values; missing ones read as zero and
    /// surplus ones are dropped.
    fn numbers<T: FromStr + Default>(
        &mut self,
        line: usize,
        command: &str,
        data: &str,
        count: usize,
    ) -> Vec<T> {
        let fields = data
            .split(',')
            .pad_using(count, |_| "")
            .take(count)
            .collect_vec();
        fields
            .into_iter()
            .map(|field| self.number(line, command, field))
            .collect()
    }
}

/// Line reader over an OpenAir source.
///
/// Input is decoded as Latin-1 and may use CRLF or LF endings. The class
/// token of an `AC` line that closed a record is held here until the next
/// [`Airspace::construct`] call picks it up.
pub struct OpenAirStream<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    pending_class: Option<String>,
}

impl<R: BufRead> OpenAirStream<R> {
    pub fn new(reader: R) -> Self {
        OpenAirStream {
            reader,
            buf: Vec::new(),
            line: 0,
            pending_class: None,
        }
    }

    /// Number of the last line read, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Skips ahead to the first `AC` line. Returns false if there is none.
    pub fn seek_record(&mut self) -> Result<bool> {
        if self.pending_class.is_some() {
            return Ok(true);
        }
        while let Some((command, data)) = self.next_command()? {
            if command == "AC" {
                self.pending_class = Some(first_token(&data));
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn records<'a>(&'a mut self, ctx: &'a mut ParserContext) -> Records<'a, R> {
        Records {
            stream: self,
            ctx,
            started: false,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        // Latin-1 maps every byte to the code point of the same value
        Ok(Some(self.buf.iter().map(|&b| char::from(b)).collect()))
    }

    /// Next non-blank, non-comment line split into its command token and the
    /// data that follows, with any trailing `*` comment removed.
    fn next_command(&mut self) -> Result<Option<(String, String)>> {
        while let Some(line) = self.read_line()? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('*') {
                continue;
            }
            let (command, data) = match line.find(char::is_whitespace) {
                Some(i) => line.split_at(i),
                None => (line, ""),
            };
            let data = data.split('*').next().unwrap_or("").trim();
            return Ok(Some((command.to_owned(), data.to_owned())));
        }
        Ok(None)
    }
}

fn first_token(data: &str) -> String {
    data.split_whitespace().next().unwrap_or("").to_owned()
}

/// Handles `V <name>=<value>`. Returns the airway width for `V W=`.
fn assign_variable(ctx: &mut ParserContext, line: usize, data: &str) -> Option<f64> {
    let name = data.chars().next()?;
    let value = data.split_once('=').map_or(data, |(_, value)| value).trim();

    match name {
        'X' => {
            let center = ctx.coordinate(line, value);
            ctx.set_center(center);
        }
        'D' => match value.chars().next() {
            Some(sign) => ctx.set_clockwise(sign != '-'),
            None => {
                ctx.report(line, DiagnosticKind::MissingDirection);
                ctx.set_clockwise(true);
            }
        },
        'W' => return Some(ctx.number(line, "V W", value)),
        'Z' => {
            let zoom: f32 = ctx.number(line, "V Z", value);
            ctx.set_zoom(Some(zoom));
        }
        other => ctx.report(line, DiagnosticKind::UnknownVariable(other.to_string())),
    }
    None
}

impl Airspace {
    /// Reads one record from `stream`.
    ///
    /// The flag is true when the record was closed by the next `AC` line,
    /// which is left for the following call. False means the stream ran out
    /// first; the record is still returned but may be incomplete. Only I/O
    /// failures are errors, malformed fields end up in `ctx`'s diagnostics.
    pub fn construct<R: BufRead>(
        stream: &mut OpenAirStream<R>,
        ctx: &mut ParserContext,
    ) -> Result<(Airspace, bool)> {
        let class_text = match stream.pending_class.take() {
            Some(class) => class,
            None => match stream.next_command()? {
                Some((command, data)) if command == "AC" => first_token(&data),
                Some((command, _)) => command,
                None => String::new(),
            },
        };

        ctx.begin_record();
        let mut record = AirspaceBuilder::default();
        record
            .class(AirspaceClass::from_token(&class_text))
            .class_text(class_text);

        let mut labels = Vec::new();
        let mut geometry = Vec::new();
        let mut airway = Vec::new();
        let mut terminated = false;

        while let Some((command, data)) = stream.next_command()? {
            let line = stream.line();
            match command.as_str() {
                "AC" => {
                    stream.pending_class = Some(first_token(&data));
                    terminated = true;
                    break;
                }
                "AN" => {
                    record.name(data);
                }
                "AL" => {
                    record.floor(data);
                }
                "AH" => {
                    record.ceiling(data);
                }
                "TO" => {
                    record.terrain_open(data);
                }
                "TC" => {
                    record.terrain_closed(data);
                }
                "AT" => labels.push(ctx.coordinate(line, &data)),
                "SP" => {
                    let f: Vec<i32> = ctx.numbers(line, "SP", &data, 5);
                    record.pen(Pen {
                        style: f[0],
                        width: f[1],
                        r: f[2],
                        g: f[3],
                        b: f[4],
                    });
                }
                "SB" => {
                    let f: Vec<i32> = ctx.numbers(line, "SB", &data, 3);
                    record.brush(Brush {
                        r: f[0],
                        g: f[1],
                        b: f[2],
                    });
                }
                "V" => {
                    if let Some(width) = assign_variable(ctx, line, &data) {
                        record.airway_width(width);
                    }
                }
                "DP" => {
                    let point = ctx.coordinate(line, &data);
                    geometry.push(Geometry::polygon(point, ctx));
                }
                "DA" => {
                    let f: Vec<f64> = ctx.numbers(line, "DA", &data, 3);
                    geometry.push(Geometry::arc(f[0], f[1], f[2], ctx));
                }
                "DB" => {
                    let (start, end) = data.split_once(',').unwrap_or((data.as_str(), ""));
                    let start = ctx.coordinate(line, start);
                    let end = ctx.coordinate(line, end);
                    geometry.push(Geometry::arc_between(start, end, ctx));
                }
                "DC" => {
                    let radius: f64 = ctx.number(line, "DC", &data);
                    geometry.push(Geometry::circle(radius, ctx));
                }
                "DY" => airway.push(ctx.coordinate(line, &data)),
                _ => ctx.report(line, DiagnosticKind::UnknownCommand(command.clone())),
            }
        }

        let airspace = record
            .labels(labels)
            .geometry(geometry)
            .airway(airway)
            .build()
            .map_err(|_| Error::NotYielded)?;
        Ok((airspace, terminated))
    }
}

/// Every record of a stream, starting at its first `AC` line.
pub struct Records<'a, R> {
    stream: &'a mut OpenAirStream<R>,
    ctx: &'a mut ParserContext,
    started: bool,
    done: bool,
}

impl<'a, R: BufRead> Iterator for Records<'a, R> {
    type Item = Result<Airspace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            match self.stream.seek_record() {
                Ok(true) => (),
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        match Airspace::construct(&mut *self.stream, &mut *self.ctx) {
            Ok((airspace, more)) => {
                self.done = !more;
                Some(Ok(airspace))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
