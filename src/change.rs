//! Change detector: does a new configuration require recomposing the script?
//!
//! Top-level fields are compared one by one. Nested fields (`style`,
//! `files`, `source`) go through [`value_changed`], a recursive comparison
//! over their JSON form.
//!
//! Only what is present in the *next* snapshot is compared. An optional field
//! that became `None`, an object key that disappeared, or trailing array
//! elements that were dropped are not reported as changes.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::Configuration;
use crate::debug;

/// Top-level configuration field, in comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Style,
    Zoomable,
    ScalesPageToFit,
    Files,
    CustomStyle,
    CustomScript,
    Source,
}

impl ConfigField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Zoomable => "zoomable",
            Self::ScalesPageToFit => "scalesPageToFit",
            Self::Files => "files",
            Self::CustomStyle => "customStyle",
            Self::CustomScript => "customScript",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the host must treat `next` as a meaningful update over `prev`.
///
/// A missing snapshot on either side always counts as changed.
pub fn should_update(prev: Option<&Configuration>, next: Option<&Configuration>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        debug!("change"; "no baseline snapshot");
        return true;
    };
    match first_change(prev, next) {
        Some(field) => {
            debug!("change"; "`{}` changed", field);
            true
        }
        None => false,
    }
}

/// First field of `next` that differs from `prev`.
pub fn first_change(prev: &Configuration, next: &Configuration) -> Option<ConfigField> {
    if nested_changed(prev.style.as_ref(), next.style.as_ref()) {
        return Some(ConfigField::Style);
    }
    if prev.zoomable != next.zoomable {
        return Some(ConfigField::Zoomable);
    }
    if prev.scales_page_to_fit != next.scales_page_to_fit {
        return Some(ConfigField::ScalesPageToFit);
    }
    if nested_changed(Some(&prev.files), Some(&next.files)) {
        return Some(ConfigField::Files);
    }
    if optional_changed(prev.custom_style.as_ref(), next.custom_style.as_ref()) {
        return Some(ConfigField::CustomStyle);
    }
    if optional_changed(prev.custom_script.as_ref(), next.custom_script.as_ref()) {
        return Some(ConfigField::CustomScript);
    }
    if nested_changed(Some(&prev.source), Some(&next.source)) {
        return Some(ConfigField::Source);
    }
    None
}

/// Primitive optional field; `None` in `next` means absent and is skipped.
fn optional_changed<T: PartialEq>(prev: Option<&T>, next: Option<&T>) -> bool {
    match (prev, next) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(prev), Some(next)) => prev != next,
    }
}

/// Structured optional field; `None` in `next` means absent and is skipped.
fn nested_changed<T: Serialize>(prev: Option<&T>, next: Option<&T>) -> bool {
    match (prev, next) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(prev), Some(next)) => match (serde_json::to_value(prev), serde_json::to_value(next)) {
            (Ok(prev), Ok(next)) => value_changed(&prev, &next),
            // Not representable: cannot prove equality.
            _ => true,
        },
    }
}

/// Recursive comparison of `next` against `prev`, visiting only keys (or
/// indices) present in `next`.
///
/// - both structured (object or array): recurse; a key missing from `prev`
///   counts as changed
/// - otherwise: changed iff the values differ, numbers compared numerically
pub fn value_changed(prev: &Value, next: &Value) -> bool {
    if primitive_eq(prev, next) {
        return false;
    }
    match next {
        Value::Object(map) if is_structured(prev) => map
            .iter()
            .any(|(key, value)| child_changed(prev, key, value)),
        Value::Array(items) if is_structured(prev) => items
            .iter()
            .enumerate()
            .any(|(index, value)| child_changed(prev, &index.to_string(), value)),
        _ => true,
    }
}

fn child_changed(prev: &Value, key: &str, next: &Value) -> bool {
    match child(prev, key) {
        Some(prev) => value_changed(prev, next),
        None => true,
    }
}

/// Property lookup that treats arrays as index-keyed objects.
fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Strict equality for leaves; structured values are never equal here so
/// they fall through to recursion.
fn primitive_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => false,
    }
}
