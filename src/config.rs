/*!
# Parser Configuration

Structural markers and text heuristics the parser relies on. Documentation
pages follow fixed conventions (heading classes, anchor naming, table
classes); these are kept here as data rather than literals so that other
document variants can be handled with a TOML or YAML file.

Defaults reproduce the conventions of the operation pages exactly.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::DocParseError;

/// Разметка HTML, по которой находятся заголовки, секции и таблицы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMarkers {
    /// CSS class of operation and section titles
    pub title_class: String,
    /// Tag of the operation title
    pub operation_title_tag: String,
    /// Tag of section titles (request/response headings and type sections)
    pub section_title_tag: String,
    /// Tag of the container enclosing a named section
    pub section_container_tag: String,
    /// Tag of the description block following a section title
    pub description_tag: String,
    /// CSS class of parameter tables
    pub type_table_class: String,
    /// Header label identifying a parameter table
    pub parameter_header: String,
    /// Prefix marking a parameter as an attribute
    pub attribute_marker: char,
    /// Prefix stripped from the operation title
    pub operation_prefix: String,
}

impl Default for DocumentMarkers {
    fn default() -> Self {
        Self {
            title_class: "ws-title".to_string(),
            operation_title_tag: "h3".to_string(),
            section_title_tag: "h4".to_string(),
            section_container_tag: "td".to_string(),
            description_tag: "div".to_string(),
            type_table_class: "typetable".to_string(),
            parameter_header: "Parameter name".to_string(),
            attribute_marker: '@',
            operation_prefix: "Operation: ".to_string(),
        }
    }
}

/// Текстовые эвристики (подстроки для поиска сервиса и секций)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicPatterns {
    /// A link whose text contains any of these names the web service
    pub web_service_patterns: Vec<String>,
    /// Section title substring locating the request root element
    pub request_keyword: String,
    /// Section title substring locating the response root element
    pub response_keyword: String,
    /// Substrings removed from anchor identifiers, in order, to form display names
    pub element_name_suffixes: Vec<String>,
    /// Fallback for operation and web service names
    pub unknown_label: String,
}

impl Default for HeuristicPatterns {
    fn default() -> Self {
        Self {
            web_service_patterns: vec!["Human_Resources".to_string(), "v45".to_string()],
            request_keyword: "Request".to_string(),
            response_keyword: "Response".to_string(),
            element_name_suffixes: vec![
                "Type".to_string(),
                "_Request".to_string(),
                "_Response".to_string(),
            ],
            unknown_label: "Unknown".to_string(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving generated JSON files
    pub output_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("WebserviceOperationJSON"),
        }
    }
}

/// Полная конфигурация парсера
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub markers: DocumentMarkers,
    pub heuristics: HeuristicPatterns,
    pub output: OutputSettings,
}

impl ParserConfig {
    /// Load configuration, choosing YAML for `.yaml`/`.yml` and TOML otherwise
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::load_from_yaml(path)
        } else {
            Self::load_from_toml(path)
        }
    }

    /// Load configuration from TOML file
    pub fn load_from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read parser config from {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse TOML config from {}", path.as_ref().display())
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read parser config from {}", path.as_ref().display())
        })?;

        let config: Self = serde_yaml::from_str(&content).with_context(|| {
            format!("Failed to parse YAML config from {}", path.as_ref().display())
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize parser config to TOML")?;

        std::fs::write(&path, content).with_context(|| {
            format!("Failed to write parser config to {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocParseError> {
        let markers = &self.markers;
        let names = [
            ("title_class", &markers.title_class),
            ("operation_title_tag", &markers.operation_title_tag),
            ("section_title_tag", &markers.section_title_tag),
            ("section_container_tag", &markers.section_container_tag),
            ("description_tag", &markers.description_tag),
            ("type_table_class", &markers.type_table_class),
        ];
        for (field, value) in names {
            if !is_css_identifier(value) {
                return Err(DocParseError::Config(format!(
                    "markers.{} must be a non-empty name of [A-Za-z0-9_-], got '{}'",
                    field, value
                )));
            }
        }

        if markers.parameter_header.trim().is_empty() {
            return Err(DocParseError::Config(
                "markers.parameter_header must not be empty".to_string(),
            ));
        }

        let heuristics = &self.heuristics;
        if heuristics.request_keyword.is_empty() || heuristics.response_keyword.is_empty() {
            return Err(DocParseError::Config(
                "heuristics.request_keyword and heuristics.response_keyword must not be empty"
                    .to_string(),
            ));
        }

        if self.output.output_dir.as_os_str().is_empty() {
            return Err(DocParseError::Config(
                "output.output_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_css_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
