//! Placeholder templates in the `str.format` style used by ISA-Tab
//! templates: `{Temperature[unit][name]}`, `{study.title}`, `{date:>10}`.
//!
//! Rendering never fails. A placeholder whose path does not resolve, or
//! whose format spec cannot be applied to the resolved value, renders as an
//! empty string.

use std::fmt::{self, Write};

use crate::metadata::Scalar;

/// One step of a placeholder path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// `[name]` or `.name`
    Name(String),
    /// `[3]`
    Index(usize),
    /// `[#]`, the index of the current entry-list repetition
    Entry,
}

/// A placeholder path: a root name followed by keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    root: String,
    keys: Vec<Key>,
}

impl FieldPath {
    /// Path to a root name
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            keys: Vec::new(),
        }
    }

    /// Append a named key
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(Key::Name(name.into()));
        self
    }

    /// Root name
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Keys after the root
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Whether the path selects an entry-list item through `[#]`
    pub fn has_entry_key(&self) -> bool {
        self.keys.contains(&Key::Entry)
    }

    fn with_entry_index(&self, index: usize) -> Self {
        let keys = self
            .keys
            .iter()
            .map(|k| match k {
                Key::Entry => Key::Index(index),
                other => other.clone(),
            })
            .collect();
        Self {
            root: self.root.clone(),
            keys,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for key in &self.keys {
            match key {
                Key::Name(name) => write!(f, "[{}]", name)?,
                Key::Index(i) => write!(f, "[{}]", i)?,
                Key::Entry => f.write_str("[#]")?,
            }
        }
        Ok(())
    }
}

/// Outcome of resolving a placeholder path
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A scalar to format
    Value(Scalar),
    /// Nothing under that path
    Missing,
    /// The path exists but does not end on a scalar, or indexes into the
    /// wrong kind of value
    Invalid,
}

/// Anything placeholders can be resolved against
pub trait Resolve {
    /// Resolve a path to a value
    fn resolve(&self, path: &FieldPath) -> Resolved;
}

/// A template syntax error, with the byte offset it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset within the template text
    pub position: usize,
    /// Description
    pub message: String,
}

impl SyntaxError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder { path: FieldPath, spec: String },
}

/// A parsed template string
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(SyntaxError::new(pos, "single '}' encountered")),
                '{' => {
                    let end = source[pos..]
                        .find('}')
                        .map(|offset| pos + offset)
                        .ok_or_else(|| SyntaxError::new(pos, "unclosed placeholder"))?;
                    let body = &source[pos + 1..end];
                    if let Some(nested) = body.find('{') {
                        return Err(SyntaxError::new(pos + 1 + nested, "nested placeholder"));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(body, pos + 1)?);

                    while chars.peek().is_some_and(|(p, _)| *p <= end) {
                        chars.next();
                    }
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// A template that renders to fixed text
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Literal(text)],
        }
    }

    /// A template made of a single placeholder
    pub fn placeholder(path: FieldPath) -> Self {
        Self {
            segments: vec![Segment::Placeholder {
                path,
                spec: String::new(),
            }],
        }
    }

    /// Paths of every placeholder, in order
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder { path, .. } => Some(path),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template has no placeholder
    pub fn is_literal(&self) -> bool {
        self.paths().next().is_none()
    }

    /// Root of the first placeholder iterating an entry list with `[#]`
    pub fn entry_list(&self) -> Option<&str> {
        self.paths()
            .find(|p| p.has_entry_key())
            .map(FieldPath::root)
    }

    /// Copy with every `[#]` replaced by a concrete index
    pub fn with_entry_index(&self, index: usize) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Placeholder { path, spec } => Segment::Placeholder {
                    path: path.with_entry_index(index),
                    spec: spec.clone(),
                },
                literal => literal.clone(),
            })
            .collect();
        Self { segments }
    }

    /// Substitute every placeholder
    pub fn render(&self, context: &dyn Resolve) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { path, spec } => {
                    if let Resolved::Value(value) = context.resolve(path) {
                        if let Some(formatted) = FormatSpec::parse(spec).and_then(|s| s.apply(&value)) {
                            out.push_str(&formatted);
                        }
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(&text.replace('{', "{{").replace('}', "}}"))?,
                Segment::Placeholder { path, spec } if spec.is_empty() => write!(f, "{{{}}}", path)?,
                Segment::Placeholder { path, spec } => write!(f, "{{{}:{}}}", path, spec)?,
            }
        }
        Ok(())
    }
}

fn parse_placeholder(body: &str, offset: usize) -> Result<Segment, SyntaxError> {
    let (field, spec) = match body.find(':') {
        Some(i) => (&body[..i], &body[i + 1..]),
        None => (body, ""),
    };
    if field.contains('!') {
        return Err(SyntaxError::new(offset, "conversions are not supported"));
    }

    let root_end = field.find(['[', '.']).unwrap_or(field.len());
    let root = &field[..root_end];
    if root.is_empty() {
        return Err(SyntaxError::new(offset, "empty field name"));
    }

    let mut keys = Vec::new();
    let mut rest = &field[root_end..];
    while !rest.is_empty() {
        let at = offset + field.len() - rest.len();
        if let Some(after) = rest.strip_prefix('[') {
            let close = after
                .find(']')
                .ok_or_else(|| SyntaxError::new(at, "missing ']'"))?;
            let key = &after[..close];
            if key.is_empty() {
                return Err(SyntaxError::new(at, "empty index"));
            }
            keys.push(if key == "#" {
                Key::Entry
            } else if key.bytes().all(|b| b.is_ascii_digit()) {
                Key::Index(key.parse().map_err(|_| SyntaxError::new(at, "index too large"))?)
            } else {
                Key::Name(key.to_string())
            });
            rest = &after[close + 1..];
        } else if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['[', '.']).unwrap_or(after.len());
            if end == 0 {
                return Err(SyntaxError::new(at, "empty attribute"));
            }
            keys.push(Key::Name(after[..end].to_string()));
            rest = &after[end..];
        } else {
            return Err(SyntaxError::new(at, "expected '[' or '.' after field name"));
        }
    }

    Ok(Segment::Placeholder {
        path: FieldPath {
            root: root.to_string(),
            keys,
        },
        spec: spec.to_string(),
    })
}

/// Alignment inside the padded width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding between the sign and the digits
    AfterSign,
}

/// Largest padded width a spec may request
pub const MAX_WIDTH: usize = 1024;
/// Largest precision a spec may request
pub const MAX_PRECISION: usize = 64;

/// `[[fill]align][sign][0][width][.precision][type]`
///
/// Width and precision are clamped to [`MAX_WIDTH`] and [`MAX_PRECISION`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    sign: Option<char>,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    kind: Option<char>,
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    /// Parse a format spec; `None` if it is not valid
    pub fn parse(spec: &str) -> Option<Self> {
        let mut out = FormatSpec::default();
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;

        if chars.len() >= 2 && align_of(chars[1]).is_some() {
            out.fill = Some(chars[0]);
            out.align = align_of(chars[1]);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            out.align = Some(align);
            i = 1;
        }

        if let Some(&c) = chars.get(i) {
            if matches!(c, '+' | '-' | ' ') {
                out.sign = Some(c);
                i += 1;
            }
        }
        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }

        let digits = |from: usize| chars[from..].iter().take_while(|c| c.is_ascii_digit()).count();
        let n = digits(i);
        if n > 0 {
            let width: usize = chars[i..i + n].iter().collect::<String>().parse().ok()?;
            out.width = width.min(MAX_WIDTH);
            i += n;
        }
        if chars.get(i) == Some(&'.') {
            let n = digits(i + 1);
            if n == 0 {
                return None;
            }
            let precision: usize = chars[i + 1..i + 1 + n].iter().collect::<String>().parse().ok()?;
            out.precision = Some(precision.min(MAX_PRECISION));
            i += 1 + n;
        }
        if let Some(&c) = chars.get(i) {
            if !matches!(c, 's' | 'd' | 'f' | 'F' | 'e' | 'E' | '%') {
                return None;
            }
            out.kind = Some(c);
            i += 1;
        }

        (i == chars.len()).then_some(out)
    }

    /// Format a value; `None` when the spec does not apply to its type
    pub fn apply(&self, value: &Scalar) -> Option<String> {
        match value {
            Scalar::Text(text) => self.format_text(text),
            Scalar::Integer(v) => match self.kind {
                None | Some('d') if self.precision.is_none() => {
                    self.pad_number(*v < 0, &v.unsigned_abs().to_string())
                }
                Some('f' | 'F' | 'e' | 'E' | '%') => self.format_float(*v as f64),
                _ => None,
            },
            Scalar::Float(v) => match self.kind {
                None if self.precision.is_none() => {
                    let text = Scalar::Float(v.abs()).to_string();
                    self.pad_number(v.is_sign_negative(), &text)
                }
                Some('d' | 's') => None,
                _ => self.format_float(*v),
            },
        }
    }

    fn format_text(&self, text: &str) -> Option<String> {
        if !matches!(self.kind, None | Some('s')) || self.sign.is_some() || self.align == Some(Align::AfterSign) {
            return None;
        }
        let text: String = match self.precision {
            Some(p) => text.chars().take(p).collect(),
            None => text.to_string(),
        };
        Some(self.pad(&text, Align::Left))
    }

    fn format_float(&self, v: f64) -> Option<String> {
        let precision = self.precision.unwrap_or(6);
        let magnitude = v.abs();
        let body = match self.kind {
            Some('e') => exponent(magnitude, precision, 'e'),
            Some('E') => exponent(magnitude, precision, 'E'),
            Some('%') => format!("{:.*}%", precision, magnitude * 100.0),
            Some('F') => format!("{:.*}", precision, magnitude).to_uppercase(),
            _ => format!("{:.*}", precision, magnitude),
        };
        self.pad_number(v.is_sign_negative() && v != 0.0, &body)
    }

    fn pad_number(&self, negative: bool, digits: &str) -> Option<String> {
        let sign = match (negative, self.sign) {
            (true, _) => "-",
            (false, Some('+')) => "+",
            (false, Some(' ')) => " ",
            _ => "",
        };
        let align = match (self.align, self.zero) {
            (Some(align), _) => align,
            (None, true) => Align::AfterSign,
            (None, false) => Align::Right,
        };
        if align == Align::AfterSign {
            let fill = self.fill.unwrap_or(if self.zero { '0' } else { ' ' });
            let len = sign.chars().count() + digits.chars().count();
            let padding: String = std::iter::repeat(fill).take(self.width.saturating_sub(len)).collect();
            return Some(format!("{}{}{}", sign, padding, digits));
        }
        Some(self.pad(&format!("{}{}", sign, digits), align))
    }

    fn pad(&self, text: &str, default: Align) -> String {
        let len = text.chars().count();
        if len >= self.width {
            return text.to_string();
        }
        let fill = self.fill.unwrap_or(' ');
        let total = self.width - len;
        let (left, right) = match self.align.unwrap_or(default) {
            Align::Left => (0, total),
            Align::Center => (total / 2, total - total / 2),
            Align::Right | Align::AfterSign => (total, 0),
        };
        let mut out = String::with_capacity(self.width);
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(text);
        out.extend(std::iter::repeat(fill).take(right));
        out
    }
}

/// Scientific notation with a signed, two-digit exponent (`1.50e+02`)
fn exponent(v: f64, precision: usize, marker: char) -> String {
    let raw = format!("{:.*e}", precision, v);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let mut out = String::with_capacity(raw.len() + 2);
    out.push_str(mantissa);
    out.push(marker);
    let _ = write!(out, "{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs());
    out
}
