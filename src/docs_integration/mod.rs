/*!
# Documentation Integration Module

Разбор HTML документации операций веб-сервисов в дерево параметров.

## Основные компоненты

- `TableExtractor` - строки таблицы типа в записи параметров
- `ElementResolver` - поиск секции по якорю, описание и таблица параметров
- `ReferenceExpander` - рекурсивное развертывание ссылок на комплексные типы
- `OperationDocParser` - заголовок, описание, сервис, корни запроса и ответа

Поток управления: `OperationDocParser` → `ElementResolver` (корень) →
`ReferenceExpander` (рекурсивно) → `TableExtractor`.

## Использование

```rust,ignore
use ws_doc_parser::docs_integration::parse_operation_document;

let operation = parse_operation_document(&html);
if let Some(request) = &operation.request {
    println!("{}: {} parameters", request.element_name, request.parameters.len());
}
```
*/

pub mod element_resolver;
pub mod model;
pub mod operation_parser;
pub mod reference_expander;
pub mod selectors;
pub mod table_extractor;

pub use element_resolver::{display_name, ElementResolver};
pub use model::{DocumentStatistics, ElementStructure, OperationDocument, ParameterRecord};
pub use operation_parser::{parse_operation_document, OperationDocParser, OperationSide};
pub use reference_expander::{expand_references, ExpansionStats, ReferenceExpander};
pub use selectors::DocSelectors;
pub use table_extractor::{extract_parameters, is_required, TableExtractor};

use scraper::Html;

/// Разрешает элемент документа с разметкой по умолчанию
pub fn resolve_element(document: &Html, element_id: &str) -> Option<ElementStructure> {
    operation_parser::DEFAULT_PARSER
        .resolver(document)
        .resolve(element_id)
}
