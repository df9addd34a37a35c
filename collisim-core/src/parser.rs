use crate::ast::{
    ParticleDecl, Scenario, SimulateDecl, WindowDecl, DEFAULT_FRAME_DELAY_MS, DEFAULT_STEPS,
};
use crate::color::Color;
use crate::diagnostics::Span;
use glam::DVec2;
use thiserror::Error;

/// Parse error with optional span information
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message}")]
    SyntaxError {
        message: String,
        span: Option<Span>,
    },
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span: None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::SyntaxError { span, .. } => *span,
        }
    }
}

/// Helper to track byte offsets while parsing
struct ParseContext {
    line_offsets: Vec<usize>, // Byte offset of start of each line
    len: usize,
}

impl ParseContext {
    fn new(source: &str) -> Self {
        let mut line_offsets = vec![0];
        let mut offset = 0;
        for ch in source.chars() {
            offset += ch.len_utf8();
            if ch == '\n' {
                line_offsets.push(offset);
            }
        }
        Self {
            line_offsets,
            len: source.len(),
        }
    }

    /// Get byte offset for start of line (0-indexed)
    fn line_start(&self, line: usize) -> usize {
        self.line_offsets.get(line).copied().unwrap_or(self.len)
    }

    /// Create a span for the entire line
    fn full_line_span(&self, line: usize) -> Span {
        let start = self.line_start(line);
        let end = self.line_start(line + 1);
        Span::new(start, end)
    }
}

/// Parse a scenario from source text
pub fn parse_scenario(source: &str) -> Result<Scenario, ParseError> {
    let ctx = ParseContext::new(source);
    let mut window = None;
    let mut particles = Vec::new();
    let mut simulate = None;

    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let line_span = Some(ctx.full_line_span(i));

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("particle ") {
            particles.push(parse_particle(line, line_span)?);
        } else if line.starts_with("window ") {
            if window.is_some() {
                return Err(ParseError::new("Duplicate 'window' declaration", line_span));
            }
            window = Some(parse_window(line, line_span)?);
        } else if line.starts_with("simulate ") {
            if simulate.is_some() {
                return Err(ParseError::new(
                    "Duplicate 'simulate' declaration",
                    line_span,
                ));
            }
            simulate = Some(parse_simulate(line, line_span)?);
        } else {
            return Err(ParseError::new(
                format!("Unexpected token: {}", line.split_whitespace().next().unwrap_or("")),
                line_span,
            ));
        }
    }

    let simulate =
        simulate.ok_or_else(|| ParseError::message("Missing 'simulate' declaration"))?;

    Ok(Scenario {
        window: window.unwrap_or_default(),
        particles,
        simulate,
    })
}

/// Parse a particle declaration:
/// `particle name at (x, y) radius r mass m [color c] [velocity (vx, vy)]`
fn parse_particle(line: &str, span: Option<Span>) -> Result<ParticleDecl, ParseError> {
    let rest = line
        .strip_prefix("particle ")
        .ok_or_else(|| ParseError::new("Expected 'particle' keyword", span))?;

    let at_pos = rest.find(" at ").ok_or_else(|| {
        ParseError::new(format!("Expected 'at' in particle declaration: {}", line), span)
    })?;

    let name = rest[..at_pos].trim().to_string();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ParseError::new(
            format!("Invalid particle name in: {}", line),
            span,
        ));
    }

    let (pos_str, mut rest) = next_value(&rest[at_pos + 4..], line, span)?;
    let position = parse_vec2(pos_str, span)?;

    let mut radius = None;
    let mut mass = None;
    let mut color = None;
    let mut velocity = None;

    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let key_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let key = &trimmed[..key_end];
        let (value, remaining) = next_value(&trimmed[key_end..], line, span)?;
        rest = remaining;

        let duplicate = match key {
            "radius" => radius.replace(parse_number(value, span)?).is_some(),
            "mass" => mass.replace(parse_number(value, span)?).is_some(),
            "color" => color.replace(parse_color(value, span)?).is_some(),
            "velocity" => velocity.replace(parse_vec2(value, span)?).is_some(),
            other => {
                return Err(ParseError::new(
                    format!("Unknown particle attribute '{}' in: {}", other, line),
                    span,
                ))
            }
        };
        if duplicate {
            return Err(ParseError::new(
                format!("Attribute '{}' given twice in: {}", key, line),
                span,
            ));
        }
    }

    let radius = radius.ok_or_else(|| {
        ParseError::new(format!("Expected 'radius' in particle declaration: {}", line), span)
    })?;
    let mass = mass.ok_or_else(|| {
        ParseError::new(format!("Expected 'mass' in particle declaration: {}", line), span)
    })?;

    Ok(ParticleDecl {
        name,
        position,
        radius,
        mass,
        color: color.unwrap_or_default(),
        velocity: velocity.unwrap_or(DVec2::ZERO),
        span,
    })
}

/// Parse a window declaration: `window W x H [title "text"]`
fn parse_window(line: &str, span: Option<Span>) -> Result<WindowDecl, ParseError> {
    let rest = line
        .strip_prefix("window ")
        .ok_or_else(|| ParseError::new("Expected 'window' keyword", span))?;

    let (dims, title) = match rest.find(" title ") {
        Some(idx) => (&rest[..idx], Some(rest[idx + 7..].trim())),
        None => (rest, None),
    };

    let parts: Vec<&str> = dims.split_whitespace().collect();
    if parts.len() != 3 || parts[1] != "x" {
        return Err(ParseError::new(
            format!("Expected 'window <width> x <height>': {}", line),
            span,
        ));
    }
    let width = parse_dimension(parts[0], span)?;
    let height = parse_dimension(parts[2], span)?;

    let title = match title {
        Some(quoted) => quoted
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| {
                ParseError::new(format!("Expected quoted title: {}", line), span)
            })?
            .to_string(),
        None => WindowDecl::default().title,
    };

    Ok(WindowDecl {
        width,
        height,
        title,
    })
}

/// Parse the simulate declaration: `simulate dt = v [steps = n] [delay = ms]`
fn parse_simulate(line: &str, span: Option<Span>) -> Result<SimulateDecl, ParseError> {
    let rest = line
        .strip_prefix("simulate ")
        .ok_or_else(|| ParseError::new("Expected 'simulate' keyword", span))?;

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() % 3 != 0 {
        return Err(ParseError::new(
            format!("Expected 'key = value' pairs in simulate: {}", line),
            span,
        ));
    }

    let mut dt = None;
    let mut steps = DEFAULT_STEPS;
    let mut delay_ms = DEFAULT_FRAME_DELAY_MS;

    for chunk in tokens.chunks(3) {
        let (key, eq, value) = (chunk[0], chunk[1], chunk[2]);
        if eq != "=" {
            return Err(ParseError::new(
                format!("Expected '=' after '{}' in simulate: {}", key, line),
                span,
            ));
        }
        match key {
            "dt" => dt = Some(parse_number(value, span)?),
            "steps" => {
                steps = value.parse().map_err(|_| {
                    ParseError::new(format!("Invalid step count: {}", value), span)
                })?
            }
            "delay" => {
                delay_ms = value.parse().map_err(|_| {
                    ParseError::new(format!("Invalid frame delay: {}", value), span)
                })?
            }
            other => {
                return Err(ParseError::new(
                    format!("Unknown simulate parameter '{}'", other),
                    span,
                ))
            }
        }
    }

    let dt = dt.ok_or_else(|| {
        ParseError::new(format!("Expected 'dt =' in simulate: {}", line), span)
    })?;

    Ok(SimulateDecl {
        dt,
        steps,
        delay_ms,
        span,
    })
}

/// Split the next value off `rest`: a bare word, or a parenthesised group
/// such as `(4, 0)` or `rgb(0, 255, 255)`.
fn next_value<'a>(
    rest: &'a str,
    line: &str,
    span: Option<Span>,
) -> Result<(&'a str, &'a str), ParseError> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Err(ParseError::new(format!("Missing value in: {}", line), span));
    }

    let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    match rest.find('(') {
        Some(open) if open < word_end => {
            let close = rest[open..]
                .find(')')
                .map(|c| open + c)
                .ok_or_else(|| ParseError::new(format!("Expected ')' in: {}", line), span))?;
            Ok((&rest[..=close], &rest[close + 1..]))
        }
        _ => Ok((&rest[..word_end], &rest[word_end..])),
    }
}

fn parse_number(s: &str, span: Option<Span>) -> Result<f64, ParseError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::new(format!("Invalid number: {}", s.trim()), span))
}

fn parse_dimension(s: &str, span: Option<Span>) -> Result<u32, ParseError> {
    s.parse::<u32>()
        .map_err(|_| ParseError::new(format!("Invalid window dimension: {}", s), span))
}

/// Parse `(x, y)`
fn parse_vec2(s: &str, span: Option<Span>) -> Result<DVec2, ParseError> {
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| ParseError::new(format!("Expected '(x, y)', got: {}", s), span))?;

    let coords: Vec<&str> = inner.split(',').map(|c| c.trim()).collect();
    if coords.len() != 2 {
        return Err(ParseError::new(
            format!("Expected two coordinates, got: {}", s),
            span,
        ));
    }

    Ok(DVec2::new(
        parse_number(coords[0], span)?,
        parse_number(coords[1], span)?,
    ))
}

/// Parse a color name or `rgb(r, g, b)`
fn parse_color(s: &str, span: Option<Span>) -> Result<Color, ParseError> {
    if let Some(args) = s.strip_prefix("rgb(").and_then(|t| t.strip_suffix(')')) {
        let channels = args
            .split(',')
            .map(|c| {
                c.trim().parse::<u8>().map_err(|_| {
                    ParseError::new(format!("Invalid color channel '{}' in {}", c.trim(), s), span)
                })
            })
            .collect::<Result<Vec<u8>, ParseError>>()?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            _ => Err(ParseError::new(
                format!("Expected three channels in {}", s),
                span,
            )),
        };
    }

    Color::from_name(s).map_err(|e| ParseError::new(e.to_string(), span))
}
