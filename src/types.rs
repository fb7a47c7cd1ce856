use crate::error::{ConfigError, ParseResult};
use serde::Serialize;
use std::fmt;

/// RGBA color kept as four channel strings.
///
/// Channels stay textual so that a value read from a file is written back
/// exactly as it was typed (`0a` stays `0a`, a missing alpha stays empty).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Color {
    pub r: String,
    pub g: String,
    pub b: String,
    pub a: String,
}

impl Color {
    /// Create a color from its four channel strings
    pub fn new(
        r: impl Into<String>,
        g: impl Into<String>,
        b: impl Into<String>,
        a: impl Into<String>,
    ) -> Self {
        Self {
            r: r.into(),
            g: g.into(),
            b: b.into(),
            a: a.into(),
        }
    }

    /// Create a color without an alpha channel
    pub fn from_rgb(r: impl Into<String>, g: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(r, g, b, "")
    }

    /// Decode a single color token (`rgba(rrggbbaa)`, `rgb(rrggbb)` or `0xaarrggbb`).
    ///
    /// The prefix and a trailing `)` are stripped and the next eight characters are
    /// sliced into channels. Channels past the end of the token come back empty.
    pub fn from_token(token: &str) -> Self {
        let body = ["rgba(", "rgb(", "rgba", "rgb", "0x"]
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix))
            .unwrap_or(token);
        let body = body.strip_suffix(')').unwrap_or(body);

        let chars: Vec<char> = body.chars().take(8).collect();
        let channel = |i: usize| -> String { chars.iter().skip(i * 2).take(2).collect() };

        Self {
            r: channel(0),
            g: channel(1),
            b: channel(2),
            a: channel(3),
        }
    }

    /// The channels concatenated, e.g. `33ccffee`
    pub fn rgba(&self) -> String {
        format!("{}{}{}{}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({})", self.rgba())
    }
}

/// An ordered list of colors plus an angle in degrees
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Gradient {
    pub angle: i64,
    pub colors: Vec<Color>,
}

impl Gradient {
    pub fn new(angle: i64, colors: Vec<Color>) -> Self {
        Self { angle, colors }
    }

    /// Append a color at the end of the gradient
    pub fn add_color(&mut self, color: Color) {
        self.colors.push(color);
    }

    /// Remove the first color equal to `color`. Returns false if none matched.
    pub fn remove_color(&mut self, color: &Color) -> bool {
        match self.colors.iter().position(|c| c == color) {
            Some(index) => {
                self.colors.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.colors {
            write!(f, "{} ", color)?;
        }
        write!(f, "{}deg", self.angle)
    }
}

/// Plain decimal text for a float, never in exponent form. Whole numbers keep a
/// trailing `.0` so they read back as floats.
pub(crate) fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// A decoded setting value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Color(Color),
    Gradient(Gradient),
    /// Anything the coder did not recognise, kept verbatim
    Raw(String),
}

impl Value {
    pub fn as_bool(&self) -> ParseResult<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(ConfigError::invalid_value(self.to_string(), "Bool")),
        }
    }

    pub fn as_int(&self) -> ParseResult<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            _ => Err(ConfigError::invalid_value(self.to_string(), "Int")),
        }
    }

    /// Integers widen to floats
    pub fn as_float(&self) -> ParseResult<f64> {
        match self {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            _ => Err(ConfigError::invalid_value(self.to_string(), "Float")),
        }
    }

    pub fn as_color(&self) -> ParseResult<&Color> {
        match self {
            Value::Color(v) => Ok(v),
            _ => Err(ConfigError::invalid_value(self.to_string(), "Color")),
        }
    }

    pub fn as_gradient(&self) -> ParseResult<&Gradient> {
        match self {
            Value::Gradient(v) => Ok(v),
            _ => Err(ConfigError::invalid_value(self.to_string(), "Gradient")),
        }
    }

    pub fn as_str(&self) -> ParseResult<&str> {
        match self {
            Value::Raw(v) => Ok(v),
            _ => Err(ConfigError::invalid_value(self.to_string(), "String")),
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Color(_) => "Color",
            Value::Gradient(_) => "Gradient",
            Value::Raw(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Color(v) => write!(f, "{}", v),
            Value::Gradient(v) => write!(f, "{}", v),
            Value::Raw(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

impl From<Gradient> for Value {
    fn from(v: Gradient) -> Self {
        Value::Gradient(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Raw(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Raw(v)
    }
}
