//! Minifier option groups and their deep merge with user overrides.
//!
//! User overrides arrive as an untyped JSON object, shaped like the option bag of
//! common JavaScript minifiers:
//!
//! ```json
//! { "compress": { "drop_console": true }, "mangle": false, "format": { "comments": true } }
//! ```
//!
//! A group set to a boolean toggles the whole group. A group set to an object overrides
//! only the keys it names. Unknown keys and mistyped values are ignored.

use log::debug;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
    pub enabled: bool,
    pub drop_console: bool,
    pub drop_debugger: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self { enabled: true, drop_console: false, drop_debugger: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangleOptions {
    pub enabled: bool,
    pub top_level: bool,
}

impl Default for MangleOptions {
    fn default() -> Self {
        Self { enabled: true, top_level: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Keep comments in the output
    pub comments: bool,
    pub single_quote: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinifyOptions {
    pub compress: CompressOptions,
    pub mangle: MangleOptions,
    pub format: FormatOptions,
}

impl MinifyOptions {
    /// Returns a copy of `self` with `overrides` merged in, group by group.
    pub fn merged(&self, overrides: &Value) -> MinifyOptions {
        let mut merged = self.clone();
        let Some(groups) = overrides.as_object() else {
            if !overrides.is_null() {
                debug!("Ignoring minify options that are not an object: {}", overrides);
            }
            return merged;
        };

        for (group, value) in groups {
            match group.as_str() {
                "compress" => {
                    let c = &mut merged.compress;
                    for (key, flag) in group_flags(group, value, &mut c.enabled) {
                        match key.as_str() {
                            "drop_console" => c.drop_console = flag,
                            "drop_debugger" => c.drop_debugger = flag,
                            _ => debug!("Ignoring unknown option compress.{}", key),
                        }
                    }
                }
                "mangle" => {
                    let m = &mut merged.mangle;
                    for (key, flag) in group_flags(group, value, &mut m.enabled) {
                        match key.as_str() {
                            "toplevel" | "top_level" => m.top_level = flag,
                            _ => debug!("Ignoring unknown option mangle.{}", key),
                        }
                    }
                }
                // Formatting cannot be switched off, only tuned
                "format" | "output" => {
                    let f = &mut merged.format;
                    for (key, flag) in group_flags(group, value, &mut true) {
                        match key.as_str() {
                            "comments" => f.comments = flag,
                            "single_quote" => f.single_quote = flag,
                            _ => debug!("Ignoring unknown option {}.{}", group, key),
                        }
                    }
                }
                other => debug!("Ignoring unknown minify option group '{}'", other),
            }
        }
        merged
    }
}

/// Reads one group override. A boolean toggles `enabled`; an object enables the group
/// and yields its boolean entries.
fn group_flags(group: &str, value: &Value, enabled: &mut bool) -> Vec<(String, bool)> {
    match value {
        Value::Bool(on) => {
            *enabled = *on;
            Vec::new()
        }
        Value::Object(keys) => {
            *enabled = true;
            boolean_entries(group, keys)
        }
        other => {
            debug!("Ignoring '{}' override of unexpected type: {}", group, other);
            Vec::new()
        }
    }
}

fn boolean_entries(group: &str, keys: &Map<String, Value>) -> Vec<(String, bool)> {
    keys.iter()
        .filter_map(|(key, value)| match value.as_bool() {
            Some(flag) => Some((key.clone(), flag)),
            None => {
                debug!("Ignoring non-boolean option {}.{}: {}", group, key, value);
                None
            }
        })
        .collect()
}
