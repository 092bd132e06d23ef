use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use scan_core::errors::ScanError;
use scan_core::{Assignment, ParamKey, Value, ValueKey};
use scan_sample::Axis;
use serde::{Deserialize, Serialize};

/// How case directories are arranged under a campaign root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseLayout {
    /// One directory level per parameter, named after the parameter and its
    /// exact value. Re-running an assignment lands in the same directory.
    #[default]
    Nested,
    /// Counter-based buckets (`run_0_1000000/run_0_10000/run_0_100/run_7`).
    /// Every call gets a fresh directory, so repeats are not idempotent.
    Hierarchy,
}

/// Bucketed path for the `run`-th case, relative to `root`.
pub fn rundir_hierarchy(root: &Path, run: usize) -> PathBuf {
    let level_dir = |exponent: u32| {
        let level = 100usize.pow(exponent);
        let lower = run / level * level;
        format!("run_{}_{}", lower, lower + level)
    };
    root.join(level_dir(3))
        .join(level_dir(2))
        .join(level_dir(1))
        .join(format!("run_{run}"))
}

/// Nested-layout path segments.
///
/// A segment reads `{block}.{name}_{index}_{value}` when the value sits on a
/// known axis and `{block}.{name}_{value}` otherwise. Block, name and value
/// are escaped so that `.` and `_` only ever appear as separators, and the
/// value is written exactly, so two segments are equal only for equal keys
/// and values. Axis indices are positions on the axes the registry was built
/// with; they never grow, so a path depends on the assignment alone.
///
/// Dimensions nest in axis order, then any remaining keys in sorted order.
#[derive(Debug, Clone, Default)]
pub struct AxisRegistry {
    axes: IndexMap<String, HashMap<ValueKey, usize>>,
}

impl AxisRegistry {
    /// Registry without axes: segments carry no index and nest in key order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every axis in order, numbering values by position.
    pub fn from_axes(axes: &[Axis]) -> Result<Self, ScanError> {
        let mut registry = Self::new();
        for axis in axes {
            ParamKey::parse(&axis.key).map_err(ScanError::TemplateMerge)?;
            let slots = registry.axes.entry(axis.key.clone()).or_default();
            for value in &axis.values {
                let next = slots.len();
                slots.entry(value.identity()).or_insert(next);
            }
        }
        Ok(registry)
    }

    /// Number of registered axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// True when no axis was registered.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Path segments for `assignment`, one per key it carries.
    pub fn segments(&self, assignment: &Assignment) -> Result<Vec<String>, ScanError> {
        let mut keys = Vec::with_capacity(assignment.len());
        for (raw, value) in assignment.iter() {
            let key = ParamKey::parse(raw).map_err(ScanError::TemplateMerge)?;
            keys.push((self.axes.get_index_of(raw), raw, key, value));
        }
        // Known axes first in axis order, the rest by key.
        keys.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.1.cmp(b.1),
        });

        let mut segments = Vec::with_capacity(keys.len());
        for (_, raw, key, value) in keys {
            let mut segment = String::new();
            escape_into(&mut segment, &key.block, false);
            segment.push('.');
            escape_into(&mut segment, &key.name, false);
            let index = self
                .axes
                .get(raw)
                .and_then(|slots| slots.get(&value.identity()));
            if let Some(index) = index {
                let _ = write!(segment, "_{index:03}");
            }
            segment.push('_');
            segment.push_str(&value_token(value));
            segments.push(segment);
        }
        Ok(segments)
    }
}

/// Exact, type-distinguishing rendering of a value. Floats always carry a
/// `.` or an exponent, strings are prefixed with `s`.
fn value_token(value: &Value) -> String {
    match value {
        Value::Float(v) => {
            let v = if *v == 0.0 { 0.0 } else { *v };
            format!("{v:?}")
        }
        Value::Int(v) => v.to_string(),
        Value::Bool(true) => "T".to_string(),
        Value::Bool(false) => "F".to_string(),
        Value::Str(s) => {
            let mut token = String::from("s");
            escape_into(&mut token, s, true);
            token
        }
    }
}

/// Percent-escapes everything outside `[A-Za-z0-9+-]` (plus `.` when
/// `keep_dot`), byte by byte.
fn escape_into(out: &mut String, raw: &str, keep_dot: bool) {
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '+' | '-') || (keep_dot && c == '.') {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_of(raw: &str, keep_dot: bool) -> String {
        let mut out = String::new();
        escape_into(&mut out, raw, keep_dot);
        out
    }

    #[test]
    fn hierarchy_buckets() {
        let path = rundir_hierarchy(Path::new("root"), 1234);
        assert_eq!(
            path,
            PathBuf::from("root/run_0_1000000/run_0_10000/run_1200_1300/run_1234")
        );
        let path = rundir_hierarchy(Path::new("root"), 0);
        assert_eq!(
            path,
            PathBuf::from("root/run_0_1000000/run_0_10000/run_0_100/run_0")
        );
    }

    #[test]
    fn tokens_are_exact_and_typed() {
        assert_eq!(value_token(&Value::Float(10.0)), "10.0");
        assert_eq!(value_token(&Value::Float(-2.5e-7)), "-2.5e-7");
        assert_eq!(value_token(&Value::Float(-0.0)), "0.0");
        assert_ne!(
            value_token(&Value::Float(1.00001)),
            value_token(&Value::Float(1.00002))
        );
        assert_eq!(value_token(&Value::Int(1)), "1");
        assert_eq!(value_token(&Value::Str("1".into())), "s1");
        assert_eq!(value_token(&Value::Str("a/b c".into())), "sa%2Fb%20c");
        assert_eq!(value_token(&Value::Str("a_b".into())), "sa%5Fb");
    }

    #[test]
    fn escaping_keeps_separators_unambiguous() {
        assert_eq!(token_of("a.b", false), "a%2Eb");
        assert_eq!(token_of("a/b", false), "a%2Fb");
        assert_eq!(token_of("a_b", false), "a%5Fb");
        assert_eq!(token_of("..", false), "%2E%2E");
        assert_eq!(token_of("µ", false), "%C2%B5");
    }

    #[test]
    fn seeded_axes_number_by_position() {
        let axes = vec![Axis {
            key: "block:x".into(),
            values: vec![Value::Float(0.0), Value::Float(0.5), Value::Float(1.0)],
        }];
        let registry = AxisRegistry::from_axes(&axes).unwrap();
        let on_axis = registry
            .segments(&Assignment::new().with("block:x", 1.0))
            .unwrap();
        assert_eq!(on_axis, vec!["block.x_002_1.0".to_string()]);
        let off_axis = registry
            .segments(&Assignment::new().with("block:x", 0.75))
            .unwrap();
        assert_eq!(off_axis, vec!["block.x_0.75".to_string()]);
    }

    #[test]
    fn unseeded_keys_nest_in_sorted_order() {
        let registry = AxisRegistry::new();
        let forward = Assignment::new().with("b:y", 2i64).with("a:x", 1i64);
        let reverse = Assignment::new().with("a:x", 1i64).with("b:y", 2i64);
        let expected = vec!["a.x_1".to_string(), "b.y_2".to_string()];
        assert_eq!(registry.segments(&forward).unwrap(), expected);
        assert_eq!(registry.segments(&reverse).unwrap(), expected);
    }
}
