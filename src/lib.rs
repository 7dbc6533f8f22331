/*!
# WS Doc Parser

Converts HTML documentation pages of web-service operations into a
hierarchical JSON description of their request and response messages.

## Core Features

- **Operation header extraction** - operation name, description, owning web service
- **Parameter tables** - name, type, cardinality, description, attribute flag
- **Reference expansion** - complex-type links resolved into nested structures,
  depth-first, with cycle protection per root element
- **Configurable markup** - class names, tags, header labels and heuristics
  loaded from TOML or YAML
- **Batch mode** - whole documentation directories converted in parallel

## Architecture

```text
WS Doc Parser
├── Core              - Error handling, file helpers
├── Config            - Markup markers and heuristics
├── Docs Integration  - Table extractor, element resolver, reference expander, operation parser
├── Converter         - Single file: read, parse, serialize, write
├── Batch             - Directory conversion with Rayon
└── CLI Common        - Logging, console output, progress
```

## Usage

### CLI
```bash
# Convert one page into WebserviceOperationJSON/
ws-doc-parser "Get_Workers Operation Details.html"

# Print JSON instead of writing a file
ws-doc-parser page.html --stdout

# Convert a directory with 4 workers and a custom configuration
ws-doc-parser ./docs --output-dir ./json --config parser.toml --jobs 4
```

### Library
```rust,ignore
use ws_doc_parser::{parse_operation_document, render_json};

let operation = parse_operation_document(&html);
println!("{}", render_json(&operation)?);
println!("{}", operation.statistics());
```
*/

pub mod batch;
pub mod cli_common;
pub mod config;
pub mod converter;
pub mod core;
pub mod docs_integration;

// Re-export main types for convenience
pub use batch::{discover_html_files, BatchConverter, BatchFailure, BatchSummary};
pub use config::{DocumentMarkers, HeuristicPatterns, OutputSettings, ParserConfig};
pub use converter::{convert_file, derive_output_path, parse_file, render_json, ConversionOutcome};
pub use core::{DocParseError, DocResult};
pub use docs_integration::{
    expand_references, extract_parameters, parse_operation_document, resolve_element,
    DocumentStatistics, ElementStructure, OperationDocParser, OperationDocument, ParameterRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_yields_unknown_operation() {
        let operation = parse_operation_document("<html><body></body></html>");
        assert_eq!(operation.operation_name, "Unknown");
        assert_eq!(operation.description, "");
        assert_eq!(operation.web_service, "Unknown");
        assert!(operation.request.is_none());
        assert!(operation.response.is_none());
    }

    #[test]
    fn test_default_parser_uses_default_config() {
        let parser = OperationDocParser::default();
        assert_eq!(parser.config(), &ParserConfig::default());
    }
}
