//! Document model: every record parsed from the source graph.
//!
//! Settings, beziers and env entries are keyed and overwrite earlier declarations
//! (last write wins). Monitors, binds, variables and execs are kept in file order
//! and may repeat.

use crate::directives::{Bezier, Binding, Env, Exec, Monitor, Setting, Variable};
use crate::types::Value;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    settings: BTreeMap<String, Setting>,
    monitors: Vec<Monitor>,
    binds: Vec<Binding>,
    variables: Vec<Variable>,
    beziers: BTreeMap<String, Bezier>,
    env: BTreeMap<String, Env>,
    execs: Vec<Exec>,
    /// Window and layer rules are recognised but not modeled
    ignored_rules: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a setting by path
    pub fn insert_setting(&mut self, setting: Setting) -> Option<Setting> {
        self.settings.insert(setting.path.clone(), setting)
    }

    pub fn setting(&self, path: &str) -> Option<&Setting> {
        self.settings.get(path)
    }

    pub(crate) fn setting_mut(&mut self, path: &str) -> Option<&mut Setting> {
        self.settings.get_mut(path)
    }

    /// Shortcut to a setting's value
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.settings.get(path).map(|s| &s.value)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.settings.contains_key(path)
    }

    pub fn settings(&self) -> &BTreeMap<String, Setting> {
        &self.settings
    }

    /// All setting paths, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.settings.keys().map(String::as_str).collect()
    }

    pub fn push_monitor(&mut self, monitor: Monitor) {
        self.monitors.push(monitor);
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn push_bind(&mut self, bind: Binding) {
        self.binds.push(bind);
    }

    pub fn binds(&self) -> &[Binding] {
        &self.binds
    }

    pub fn push_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The most recent definition of `$name`
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .rev()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn insert_bezier(&mut self, bezier: Bezier) -> Option<Bezier> {
        self.beziers.insert(bezier.name.clone(), bezier)
    }

    pub fn bezier(&self, name: &str) -> Option<&Bezier> {
        self.beziers.get(name)
    }

    pub fn beziers(&self) -> &BTreeMap<String, Bezier> {
        &self.beziers
    }

    pub fn insert_env(&mut self, env: Env) -> Option<Env> {
        self.env.insert(env.name.clone(), env)
    }

    pub fn env_var(&self, name: &str) -> Option<&Env> {
        self.env.get(name)
    }

    pub fn env(&self) -> &BTreeMap<String, Env> {
        &self.env
    }

    pub fn push_exec(&mut self, exec: Exec) {
        self.execs.push(exec);
    }

    pub fn execs(&self) -> &[Exec] {
        &self.execs
    }

    pub(crate) fn count_ignored_rule(&mut self) {
        self.ignored_rules += 1;
    }

    /// Number of window-rule and layer-rule lines seen
    pub fn ignored_rules(&self) -> usize {
        self.ignored_rules
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.settings.len()
            + self.monitors.len()
            + self.binds.len()
            + self.variables.len()
            + self.beziers.len()
            + self.env.len()
            + self.execs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
