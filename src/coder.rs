//! Value Coder: infers the type of a raw value string and formats it back.
//!
//! Decoding tries, in order, boolean, integer, float, color and gradient, and keeps
//! anything else as a raw string. The order matters: `5` must stay an integer and a
//! lone color must never become a one-color gradient.

use crate::error::{ConfigError, ParseResult};
use crate::types::{Color, Gradient, Value};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "value.pest"]
struct ValueParser;

/// Converts between value text and [`Value`]
pub trait ValueCoder {
    /// Decode a trimmed value string
    fn decode(&self, raw: &str) -> Value;

    /// Format a value as it should appear on the right of `=`
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }
}

/// The heuristic coder used by default.
///
/// Hex digits in colors are not validated and the float
/// check only asks whether the text looks like digits and dots.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseCoder;

impl LooseCoder {
    pub fn new() -> Self {
        Self
    }

    pub fn is_bool(raw: &str) -> bool {
        ValueParser::parse(Rule::boolean, raw).is_ok()
    }

    pub fn is_int(raw: &str) -> bool {
        ValueParser::parse(Rule::integer, raw).is_ok()
    }

    pub fn is_float(raw: &str) -> bool {
        ValueParser::parse(Rule::float, raw).is_ok()
    }

    pub fn is_color(raw: &str) -> bool {
        ValueParser::parse(Rule::color, raw).is_ok()
    }

    pub fn is_gradient(raw: &str) -> bool {
        ValueParser::parse(Rule::gradient, raw).is_ok()
    }

    fn decode_int(raw: &str) -> Option<i64> {
        if !Self::is_int(raw) {
            return None;
        }
        raw.parse().ok()
    }

    fn decode_float(raw: &str) -> Option<f64> {
        if !Self::is_float(raw) {
            return None;
        }
        raw.parse().ok()
    }

    fn decode_gradient(raw: &str) -> Option<Gradient> {
        let pairs = ValueParser::parse(Rule::gradient, raw).ok()?;
        let mut gradient = Gradient::default();

        for pair in pairs.flatten() {
            match pair.as_rule() {
                Rule::color_token => gradient.add_color(Color::from_token(pair.as_str())),
                Rule::angle => {
                    gradient.angle = pair.as_str().trim_end_matches("deg").parse().ok()?;
                }
                _ => {}
            }
        }

        Some(gradient)
    }
}

impl ValueCoder for LooseCoder {
    fn decode(&self, raw: &str) -> Value {
        let raw = raw.trim();

        if let Ok(b) = parse_bool(raw) {
            Value::Bool(b)
        } else if let Some(i) = Self::decode_int(raw) {
            Value::Int(i)
        } else if let Some(f) = Self::decode_float(raw) {
            Value::Float(f)
        } else if Self::is_color(raw) {
            Value::Color(Color::from_token(raw))
        } else if let Some(gradient) = Self::decode_gradient(raw) {
            Value::Gradient(gradient)
        } else {
            Value::Raw(raw.to_string())
        }
    }
}

/// Parse a boolean literal (`on`/`yes`/`true`, `off`/`no`/`false`)
pub fn parse_bool(raw: &str) -> ParseResult<bool> {
    let invalid = || ConfigError::invalid_value(raw, "boolean (on/yes/true/off/no/false)");

    let pair = ValueParser::parse(Rule::boolean, raw)
        .map_err(|_| invalid())?
        .flatten()
        .find(|p| matches!(p.as_rule(), Rule::truthy | Rule::falsy))
        .ok_or_else(invalid)?;

    Ok(pair.as_rule() == Rule::truthy)
}
