//! Loading suites of test cases from YAML or JSON files.
//!
//! A suite file names one built-in function and lists its cases as raw rows:
//!
//! ```yaml
//! function: add_numbers
//! cases:
//!   - [[1, 2], 3, "Simple addition"]
//!   - [[0, 0], 0]
//! ```
//!
//! Rows are kept raw so the harness can report a malformed row and carry on
//! with the rest of the file. A row that is not even a [`Value`], such as a
//! mapping, still loads as a [`Row`] and is rejected when the suite runs.

use crate::case::{CaseFormatError, IntoTestCase, TestCase};
use crate::value::Value;
use miette::Diagnostic;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Contents of a suite file.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteFile {
    pub function: String,
    #[serde(default)]
    pub cases: Vec<Row>,
}

/// One entry of a suite's `cases` list, before shape validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Row {
    Value(Value),
    Mapping(Mapping),
    Other(IgnoredAny),
}

impl Row {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Row::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl IntoTestCase for Row {
    fn into_test_case(self) -> Result<TestCase, CaseFormatError> {
        match self {
            Row::Value(value) => value.into_test_case(),
            Row::Mapping(_) => Err(CaseFormatError::Mapping),
            Row::Other(_) => Err(CaseFormatError::Unsupported),
        }
    }
}

/// Marker for a mapping row; only its shape matters, so entries are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping;

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = Mapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Mapping, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    Yaml,
    Json,
}

impl SuiteFormat {
    /// Picks the format from the file extension; anything but `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SuiteFormat::Json,
            _ => SuiteFormat::Yaml,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SuiteError {
    #[error("failed to read suite file {path}")]
    #[diagnostic(code(testbench::io), help("check that the file exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML suite {path}")]
    #[diagnostic(
        code(testbench::suite_format),
        help("a suite needs a `function` name and a `cases` list")
    )]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse JSON suite {path}")]
    #[diagnostic(
        code(testbench::suite_format),
        help("a suite needs a `function` name and a `cases` list")
    )]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses suite text; `path` is only used to label errors.
pub fn parse_suite(source: &str, format: SuiteFormat, path: &Path) -> Result<SuiteFile, SuiteError> {
    match format {
        SuiteFormat::Yaml => serde_yaml::from_str(source).map_err(|source| SuiteError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        SuiteFormat::Json => serde_json::from_str(source).map_err(|source| SuiteError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and parse a suite file.
pub fn load_suite(path: &Path) -> Result<SuiteFile, SuiteError> {
    let content = fs::read_to_string(path).map_err(|source| SuiteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let suite = parse_suite(&content, SuiteFormat::from_path(path), path)?;
    debug!(path = %path.display(), function = %suite.function, cases = suite.cases.len(), "loaded suite");
    Ok(suite)
}
