use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::{ParamKey, Value};
use serde::{Deserialize, Serialize};

use crate::spacing::gridspace;

/// Range record as written in parameter files, keyed by `block:name`.
///
/// Either `min`/`max` or an explicit `values` list must be supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeSpec {
    /// Lower bound.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound.
    #[serde(default)]
    pub max: Option<f64>,
    /// Logarithmic spacing.
    #[serde(default)]
    pub log: bool,
    /// Whether grid axes reach `max`; defaults to true.
    #[serde(default = "RangeSpec::default_endpoint")]
    pub endpoint: bool,
    /// Fixed grid resolution for this dimension.
    #[serde(default)]
    pub n_samples: Option<usize>,
    /// Explicit axis values.
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

impl RangeSpec {
    const fn default_endpoint() -> bool {
        true
    }
}

/// One scanned dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Deck block the parameter lives in.
    pub block: String,
    /// Parameter name inside the block.
    pub name: String,
    /// Lower bound.
    pub min: f64,
    /// Upper bound; equal to `min` for a single-valued dimension.
    pub max: f64,
    /// Sample in the logarithm of the value; both bounds must be positive.
    pub log: bool,
    /// Include `max` on grid axes.
    pub endpoint: bool,
    /// Per-dimension grid resolution, overriding the sampler's choice.
    pub n_samples: Option<usize>,
    /// Explicit axis. When set, the numeric fields are ignored.
    pub values: Option<Vec<Value>>,
}

impl ParameterSpec {
    /// Linear range `[min, max]` for `block:name`.
    pub fn new(block: impl Into<String>, name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            block: block.into(),
            name: name.into(),
            min,
            max,
            log: false,
            endpoint: true,
            n_samples: None,
            values: None,
        }
    }

    /// Linear range addressed by a composite `block:name` key.
    pub fn from_key(key: &str, min: f64, max: f64) -> Result<Self, ScanError> {
        let key = parse_key(key)?;
        Ok(Self::new(key.block, key.name, min, max))
    }

    /// Explicit list of values for `block:name`.
    pub fn listed(block: impl Into<String>, name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            values: Some(values),
            ..Self::new(block, name, 0.0, 0.0)
        }
    }

    /// Builds a spec from a file record.
    pub fn from_range(key: &str, range: RangeSpec) -> Result<Self, ScanError> {
        let parsed = parse_key(key)?;
        if let Some(values) = range.values {
            return Ok(Self::listed(parsed.block, parsed.name, values));
        }
        let (Some(min), Some(max)) = (range.min, range.max) else {
            return Err(ScanError::InvalidParameter(
                ErrorInfo::new("param-missing-bounds", "range requires both `min` and `max`")
                    .with_context("key", key)
                    .with_hint("supply `min` and `max`, or an explicit `values` list"),
            ));
        };
        Ok(Self {
            log: range.log,
            endpoint: range.endpoint,
            n_samples: range.n_samples,
            ..Self::new(parsed.block, parsed.name, min, max)
        })
    }

    /// Switches the dimension to logarithmic spacing.
    pub fn log_scaled(mut self) -> Self {
        self.log = true;
        self
    }

    /// Excludes `max` from grid axes.
    pub fn without_endpoint(mut self) -> Self {
        self.endpoint = false;
        self
    }

    /// Pins the grid resolution of this dimension.
    pub fn with_resolution(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Composite `block:name` identifier.
    pub fn key(&self) -> String {
        ParamKey::new(self.block.as_str(), self.name.as_str()).to_string()
    }

    /// Resolution fixed by the spec itself, if any.
    pub fn fixed_resolution(&self) -> Option<usize> {
        match &self.values {
            Some(values) => Some(values.len()),
            None => self.n_samples,
        }
    }

    /// Grid axis for this dimension. `resolution` applies only when the spec
    /// does not fix its own.
    pub fn axis(&self, resolution: usize) -> Vec<Value> {
        if let Some(values) = &self.values {
            return values.clone();
        }
        let num = self.n_samples.unwrap_or(resolution);
        gridspace(self.min, self.max, num, self.log, self.endpoint)
            .into_iter()
            .map(Value::Float)
            .collect()
    }

    /// Checks bounds, log positivity and resolution overrides.
    pub fn validate(&self) -> Result<(), ScanError> {
        let key = self.key();
        parse_key(&key)?;
        let invalid = |code: &str, message: &str| {
            ScanError::InvalidParameter(
                ErrorInfo::new(code, message)
                    .with_context("key", key.clone())
                    .with_context("min", self.min.to_string())
                    .with_context("max", self.max.to_string()),
            )
        };
        if let Some(values) = &self.values {
            if values.is_empty() {
                return Err(invalid("param-empty-values", "explicit value list is empty"));
            }
            return Ok(());
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid("param-non-finite", "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(invalid("param-inverted-bounds", "min exceeds max"));
        }
        if self.log && self.min <= 0.0 {
            return Err(invalid(
                "param-log-non-positive",
                "log-scaled bounds must be strictly positive",
            ));
        }
        if self.n_samples == Some(0) {
            return Err(invalid(
                "param-zero-resolution",
                "per-parameter n_samples must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse_key(key: &str) -> Result<ParamKey, ScanError> {
    ParamKey::parse(key).map_err(ScanError::InvalidParameter)
}

/// Ordered, duplicate-free collection of scanned dimensions.
///
/// The order drives grid enumeration and directory nesting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSpace {
    specs: Vec<ParameterSpec>,
}

impl ParameterSpace {
    /// Validates every spec, rejects duplicates and empty spaces.
    pub fn new(specs: Vec<ParameterSpec>) -> Result<Self, ScanError> {
        if specs.is_empty() {
            return Err(ScanError::InvalidParameter(ErrorInfo::new(
                "space-empty",
                "parameter space needs at least one dimension",
            )));
        }
        let mut seen = BTreeSet::new();
        for spec in &specs {
            spec.validate()?;
            let key = spec.key();
            if !seen.insert(key.clone()) {
                return Err(ScanError::InvalidParameter(
                    ErrorInfo::new("space-duplicate-key", "parameter listed more than once")
                        .with_context("key", key),
                ));
            }
        }
        Ok(Self { specs })
    }

    /// Builds a space from file records in their given order.
    pub fn from_ranges(ranges: IndexMap<String, RangeSpec>) -> Result<Self, ScanError> {
        let specs = ranges
            .into_iter()
            .map(|(key, range)| ParameterSpec::from_range(&key, range))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(specs)
    }

    /// Parses a YAML (or JSON, which YAML subsumes) mapping of ranges.
    pub fn from_yaml_str(text: &str) -> Result<Self, ScanError> {
        let ranges: IndexMap<String, RangeSpec> = serde_yaml::from_str(text).map_err(|err| {
            ScanError::Serde(ErrorInfo::new("space-yaml-decode", err.to_string()))
        })?;
        Self::from_ranges(ranges)
    }

    /// Parses a JSON mapping of ranges.
    pub fn from_json_str(text: &str) -> Result<Self, ScanError> {
        let ranges: IndexMap<String, RangeSpec> = serde_json::from_str(text).map_err(|err| {
            ScanError::Serde(ErrorInfo::new("space-json-decode", err.to_string()))
        })?;
        Self::from_ranges(ranges)
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always false for a constructed space; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Dimensions in space order.
    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }

    /// Iterates the dimensions in space order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterSpec> {
        self.specs.iter()
    }

    /// Composite keys in space order.
    pub fn keys(&self) -> Vec<String> {
        self.specs.iter().map(ParameterSpec::key).collect()
    }

    /// Dimension addressed by `block:name`.
    pub fn get(&self, key: &str) -> Option<&ParameterSpec> {
        self.specs.iter().find(|spec| spec.key() == key)
    }
}

impl<'a> IntoIterator for &'a ParameterSpace {
    type Item = &'a ParameterSpec;
    type IntoIter = std::slice::Iter<'a, ParameterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Loads a parameter space from disk. `.json` files are parsed as JSON,
/// everything else as YAML.
pub fn load_space(path: &Path) -> Result<ParameterSpace, ScanError> {
    let text = fs::read_to_string(path).map_err(|err| {
        ScanError::Io(
            ErrorInfo::new("space-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        ParameterSpace::from_json_str(&text)
    } else {
        ParameterSpace::from_yaml_str(&text)
    }
}
