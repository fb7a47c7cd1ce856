//! Typed records for each directive kind and the parsers that build them from a
//! normalized line.
//!
//! Every record's `Display` renders the canonical directive line, which is what the
//! mutation API writes back into a file.

use crate::coder::ValueCoder;
use crate::error::{ConfigError, ParseResult};
use crate::line::SectionStack;
use crate::types::{format_float, Value};
use serde::Serialize;
use std::fmt;

/// A `key = value` option addressed by its colon-separated path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    pub path: String,
    pub value: Value,
}

impl Setting {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Last path segment, the key as written inside its section
    pub fn name(&self) -> &str {
        self.path.rsplit(':').next().unwrap_or(&self.path)
    }

    /// Enclosing section names, outermost first
    pub fn sections(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.path.split(':').collect();
        segments.pop();
        segments
    }

    /// Nesting depth of the key (number of enclosing sections)
    pub fn depth(&self) -> usize {
        self.path.matches(':').count()
    }

    /// Render with an explicit coder
    pub fn format_with(&self, coder: &dyn ValueCoder) -> String {
        format!("{} = {}", self.name(), coder.encode(&self.value))
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name(), self.value)
    }
}

/// `monitor = name,resolution,position,scale[,extra...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monitor {
    pub name: String,
    pub resolution: String,
    pub position: String,
    pub scale: String,
    /// Fields after the scale (transform, mirror, bitdepth...), kept verbatim
    pub extra: Vec<String>,
}

impl Monitor {
    pub fn new(
        name: impl Into<String>,
        resolution: impl Into<String>,
        position: impl Into<String>,
        scale: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resolution: resolution.into(),
            position: position.into(),
            scale: scale.into(),
            extra: Vec::new(),
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new("", "preferred", "auto", "1")
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monitor = {},{},{},{}",
            self.name, self.resolution, self.position, self.scale
        )?;
        for field in &self.extra {
            write!(f, ",{}", field)?;
        }
        Ok(())
    }
}

/// A key binding such as `bind = SUPER SHIFT, Q, exec, kitty`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub mods: Vec<String>,
    pub key: String,
    pub dispatcher: String,
    pub params: Vec<String>,
    /// The keyword left of `=` (`bind`, `bindm`, `binde`...)
    pub bind_type: String,
}

impl Binding {
    pub fn new(
        bind_type: impl Into<String>,
        mods: Vec<String>,
        key: impl Into<String>,
        dispatcher: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Self {
            mods,
            key: key.into(),
            dispatcher: dispatcher.into(),
            params,
            bind_type: bind_type.into(),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = vec![self.mods.join(" "), self.key.clone(), self.dispatcher.clone()];
        fields.extend(self.params.iter().cloned());
        write!(f, "{} = {}", self.bind_type, fields.join(", "))
    }
}

/// `$name = value`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} = {}", self.name, self.value)
    }
}

/// A named animation curve with up to four control-point coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bezier {
    pub name: String,
    pub points: Vec<f64>,
}

impl Bezier {
    pub fn new(name: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

impl fmt::Display for Bezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bezier = {}", self.name)?;
        for point in &self.points {
            write!(f, ", {}", format_float(*point))?;
        }
        Ok(())
    }
}

/// `env = NAME, value[:value...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Env {
    pub name: String,
    pub value: Vec<String>,
}

impl Env {
    pub fn new(name: impl Into<String>, value: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "env = {}, {}", self.name, self.value.join(":"))
    }
}

/// `exec = cmd` or `exec-once = cmd`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exec {
    pub cmd: String,
    pub once: bool,
}

impl Exec {
    pub fn new(cmd: impl Into<String>, once: bool) -> Self {
        Self {
            cmd: cmd.into(),
            once,
        }
    }

    pub fn keyword(&self) -> &'static str {
        if self.once { "exec-once" } else { "exec" }
    }
}

impl fmt::Display for Exec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.keyword(), self.cmd)
    }
}

fn split_assignment<'a>(directive: &str, line: &'a str) -> ParseResult<(&'a str, &'a str)> {
    line.split_once(" = ")
        .ok_or_else(|| ConfigError::malformed(directive, line, "missing '='"))
}

pub fn parse_setting(
    line: &str,
    sections: &SectionStack,
    coder: &dyn ValueCoder,
) -> ParseResult<Setting> {
    let (name, value) = split_assignment("setting", line)?;
    Ok(Setting {
        path: sections.qualify(name.trim()),
        value: coder.decode(value),
    })
}

pub fn parse_variable(line: &str) -> ParseResult<Variable> {
    let body = line.strip_prefix('$').unwrap_or(line);
    match body.split_once(" = ") {
        Some((name, value)) => Ok(Variable::new(name, value)),
        None => Ok(Variable::new(body, "")),
    }
}

pub fn parse_monitor(line: &str) -> ParseResult<Monitor> {
    let (_, value) = split_assignment("monitor", line)?;
    let mut fields = value.split(',').map(str::trim);

    let mut monitor = Monitor::default();
    monitor.name = fields.next().unwrap_or("").to_string();
    if let Some(resolution) = fields.next() {
        monitor.resolution = resolution.to_string();
    }
    if let Some(position) = fields.next() {
        monitor.position = position.to_string();
    }
    if let Some(scale) = fields.next() {
        monitor.scale = scale.to_string();
    }
    monitor.extra = fields.map(str::to_string).collect();

    Ok(monitor)
}

pub fn parse_bind(line: &str) -> ParseResult<Binding> {
    let (bind_type, value) = split_assignment("bind", line)?;
    let fields: Vec<&str> = value.splitn(5, ',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(ConfigError::malformed(
            "bind",
            line,
            "expected at least mods, key and dispatcher",
        ));
    }

    let mods = fields[0].split_whitespace().map(str::to_string).collect();
    let params = fields[3..].iter().map(|p| p.to_string()).collect();

    Ok(Binding::new(bind_type, mods, fields[1], fields[2], params))
}

pub fn parse_bezier(line: &str) -> ParseResult<Bezier> {
    let (_, value) = split_assignment("bezier", line)?;
    let mut fields = value.splitn(5, ',').map(str::trim);
    let name = fields.next().unwrap_or("");
    if name.is_empty() {
        return Err(ConfigError::malformed("bezier", line, "missing curve name"));
    }

    let points = fields
        .map(|p| {
            p.parse::<f64>()
                .map_err(|_| ConfigError::malformed("bezier", line, format!("'{}' is not a number", p)))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Bezier::new(name, points))
}

pub fn parse_env(line: &str) -> ParseResult<Env> {
    let (_, value) = split_assignment("env", line)?;
    let (name, rest) = value
        .split_once(',')
        .ok_or_else(|| ConfigError::malformed("env", line, "expected 'NAME,value'"))?;

    Ok(Env::new(
        name.trim(),
        rest.trim().split(':').map(str::to_string).collect(),
    ))
}

pub fn parse_exec(line: &str) -> ParseResult<Exec> {
    let (keyword, cmd) = split_assignment("exec", line)?;
    Ok(Exec::new(cmd, keyword == "exec-once"))
}

/// The raw path of a `source = path` line
pub fn parse_source(line: &str) -> ParseResult<&str> {
    let (_, path) = split_assignment("source", line)?;
    Ok(path)
}
