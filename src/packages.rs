//! Sensor package sources
//!
//! A package is one workout code with its positional sensor values. Packages
//! come either from the built-in sample set or from a CSV, JSON or TOML file.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ParseError, Result};

/// One raw reading: workout code plus positional values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub code: String,
    pub values: Vec<f64>,
}

impl Package {
    pub fn new(code: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            code: code.into(),
            values,
        }
    }
}

/// Demonstration readings: one swim, one run, one walk
pub fn sample_packages() -> Vec<Package> {
    vec![
        Package::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        Package::new("RUN", vec![15000.0, 1.0, 75.0]),
        Package::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Trait for reading packages from different file formats
pub trait PackageFormat {
    /// Check if this reader can handle the given file
    fn can_read(&self, path: &Path) -> bool;

    /// Parse packages from file contents
    fn parse(&self, content: &str) -> Result<Vec<Package>>;

    /// Get the format name for this reader
    fn format_name(&self) -> &'static str;
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// `RUN,15000,1,75` per line; no header, `#` starts a comment line
pub struct CsvPackages;

impl PackageFormat for CsvPackages {
    fn can_read(&self, path: &Path) -> bool {
        has_extension(path, "csv")
    }

    fn parse(&self, content: &str) -> Result<Vec<Package>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let mut packages = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let mut fields = record.iter();

            let malformed = |reason: String| ParseError::Malformed {
                format: "CSV".to_string(),
                reason: format!("record {}: {}", index + 1, reason),
            };

            let code = match fields.next() {
                Some(code) if !code.is_empty() => code,
                _ => return Err(malformed("missing workout code".to_string()).into()),
            };

            let values = fields
                .map(|field| {
                    if field.is_empty() {
                        return Err(malformed("empty value".to_string()));
                    }
                    field
                        .parse::<f64>()
                        .map_err(|_| malformed(format!("'{}' is not a number", field)))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;

            packages.push(Package::new(code, values));
        }

        Ok(packages)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// `[{"code": "RUN", "values": [15000, 1, 75]}]`
pub struct JsonPackages;

impl PackageFormat for JsonPackages {
    fn can_read(&self, path: &Path) -> bool {
        has_extension(path, "json")
    }

    fn parse(&self, content: &str) -> Result<Vec<Package>> {
        Ok(serde_json::from_str(content)?)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

#[derive(Deserialize)]
struct TomlPackageFile {
    #[serde(default, rename = "package")]
    packages: Vec<Package>,
}

/// `[[package]]` tables with `code` and `values` keys
pub struct TomlPackages;

impl PackageFormat for TomlPackages {
    fn can_read(&self, path: &Path) -> bool {
        has_extension(path, "toml")
    }

    fn parse(&self, content: &str) -> Result<Vec<Package>> {
        let file: TomlPackageFile = toml::from_str(content)?;
        Ok(file.packages)
    }

    fn format_name(&self) -> &'static str {
        "TOML"
    }
}

/// Picks a reader by file extension
pub struct PackageLoader {
    formats: Vec<Box<dyn PackageFormat>>,
}

impl Default for PackageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageLoader {
    pub fn new() -> Self {
        let formats: Vec<Box<dyn PackageFormat>> = vec![
            Box::new(CsvPackages),
            Box::new(JsonPackages),
            Box::new(TomlPackages),
        ];

        Self { formats }
    }

    /// Load all packages from a file, auto-detecting the format
    pub fn load(&self, path: &Path) -> Result<Vec<Package>> {
        let format = self
            .formats
            .iter()
            .find(|format| format.can_read(path))
            .ok_or_else(|| ParseError::UnknownFormat {
                extension: path
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })?;

        let content = fs::read_to_string(path)?;
        let packages = format.parse(&content)?;

        tracing::info!(
            path = %path.display(),
            format = format.format_name(),
            count = packages.len(),
            "Loaded packages"
        );
        Ok(packages)
    }
}

/// Load packages from a file with the default set of formats
pub fn load_packages(path: &Path) -> Result<Vec<Package>> {
    PackageLoader::new().load(path)
}
