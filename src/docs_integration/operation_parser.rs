/*!
# Operation Document Parser

Разбор страницы документации операции веб-сервиса: заголовок, описание,
имя сервиса и корневые элементы запроса/ответа с полностью развернутыми
вложенными типами.

## Использование

```rust,ignore
let parser = OperationDocParser::new(ParserConfig::default())?;
let operation = parser.parse(&html);
println!("{}", operation.statistics());
```
*/

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::element_resolver::ElementResolver;
use super::model::{ElementStructure, OperationDocument};
use super::reference_expander::ReferenceExpander;
use super::selectors::{
    element_text, find_next_element, DocSelectors, DEFAULT_SELECTORS, HREF_SELECTOR,
};
use crate::config::ParserConfig;
use crate::core::DocResult;

/// Сторона операции: запрос или ответ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSide {
    Request,
    Response,
}

/// Парсер страниц операций
#[derive(Debug, Clone)]
pub struct OperationDocParser {
    config: ParserConfig,
    selectors: DocSelectors,
}

impl OperationDocParser {
    /// Создает парсер; конфигурация проверяется, селекторы компилируются один раз
    pub fn new(config: ParserConfig) -> DocResult<Self> {
        config.validate()?;
        let selectors = DocSelectors::from_markers(&config.markers)?;
        Ok(Self { config, selectors })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn selectors(&self) -> &DocSelectors {
        &self.selectors
    }

    /// Резолвер элементов документа с разметкой этого парсера
    pub fn resolver<'d>(&'d self, document: &'d Html) -> ElementResolver<'d> {
        ElementResolver::new(
            document,
            &self.selectors,
            &self.config.markers,
            &self.config.heuristics,
        )
    }

    /// Разбирает HTML страницы операции
    pub fn parse(&self, html: &str) -> OperationDocument {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }

    /// Разбирает уже построенное DOM-дерево
    pub fn parse_document(&self, document: &Html) -> OperationDocument {
        let operation_title = document.select(&self.selectors.operation_title).next();

        let operation_name = operation_title
            .map(|title| self.operation_name(&title))
            .unwrap_or_else(|| self.config.heuristics.unknown_label.clone());

        let description = operation_title
            .and_then(|title| {
                find_next_element(document, &title, |e| self.selectors.paragraph.matches(e))
            })
            .map(|p| element_text(&p))
            .unwrap_or_default();

        let resolver = self.resolver(document);

        let request = self
            .root_element_id(document, OperationSide::Request)
            .and_then(|id| self.build_side(&resolver, &id));
        let response = self
            .root_element_id(document, OperationSide::Response)
            .and_then(|id| self.build_side(&resolver, &id));

        OperationDocument {
            operation_name,
            description,
            web_service: self.web_service_name(document),
            request,
            response,
        }
    }

    fn operation_name(&self, title: &ElementRef) -> String {
        let text = element_text(title);
        match text.strip_prefix(self.config.markers.operation_prefix.as_str()) {
            Some(stripped) => stripped.to_string(),
            None => text,
        }
    }

    /// Имя сервиса: первая ссылка на `.html`, текст которой содержит один из шаблонов
    pub fn web_service_name(&self, document: &Html) -> String {
        let patterns = &self.config.heuristics.web_service_patterns;
        document
            .select(&HREF_SELECTOR)
            .filter(|link| {
                link.value()
                    .attr("href")
                    .is_some_and(|href| href.contains(".html"))
            })
            .map(|link| element_text(&link))
            .find(|text| patterns.iter().any(|pattern| text.contains(pattern.as_str())))
            .unwrap_or_else(|| self.config.heuristics.unknown_label.clone())
    }

    /// Идентификатор корневого элемента стороны: фрагмент первой ссылки с `#`
    /// после заголовка секции, содержащего ключевое слово
    pub fn root_element_id(&self, document: &Html, side: OperationSide) -> Option<String> {
        let keyword = match side {
            OperationSide::Request => &self.config.heuristics.request_keyword,
            OperationSide::Response => &self.config.heuristics.response_keyword,
        };

        let heading = document
            .select(&self.selectors.section_title)
            .find(|title| element_text(title).contains(keyword.as_str()));
        let Some(heading) = heading else {
            debug!("No {:?} heading found", side);
            return None;
        };

        let link = find_next_element(document, &heading, |e| {
            e.value().name() == "a"
                && e.value().attr("href").is_some_and(|href| href.contains('#'))
        })?;

        link.value()
            .attr("href")
            .and_then(|href| href.split_once('#'))
            .map(|(_, fragment)| fragment.to_string())
            .filter(|fragment| !fragment.is_empty())
    }

    fn build_side(&self, resolver: &ElementResolver, root_id: &str) -> Option<ElementStructure> {
        let mut element = resolver.resolve(root_id)?;

        if !element.parameters.is_empty() {
            let mut expander = ReferenceExpander::for_root(resolver, root_id);
            expander.expand(&mut element.parameters);
            let stats = expander.stats();
            debug!(
                "Expanded '{}': {} resolved, {} unresolved, {} repeated",
                root_id,
                stats.resolved,
                stats.unresolved.len(),
                stats.repeated
            );
        }

        Some(element)
    }
}

impl Default for OperationDocParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

/// Парсер с конфигурацией по умолчанию, селекторы компилируются один раз
pub(crate) static DEFAULT_PARSER: Lazy<OperationDocParser> = Lazy::new(|| OperationDocParser {
    config: ParserConfig::default(),
    selectors: DEFAULT_SELECTORS.clone(),
});

/// Разбирает страницу операции с конфигурацией по умолчанию
pub fn parse_operation_document(html: &str) -> OperationDocument {
    DEFAULT_PARSER.parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r##"<html><head><title>Get_Workers</title></head><body>
<div class="breadcrumb">
  <a href="index.html">Directory</a> &gt;
  <a href="Human_Resources.html">Human_Resources (v45.0)</a>
</div>
<h3 class="ws-title">Operation: Get_Workers</h3>
<div><p>Returns   information for <b>workers</b>.</p></div>
<h4 class="ws-title">Request Element: Get_Workers_Request</h4>
<p>See <a href="#Get_Workers_Request">Get_Workers_Request</a></p>
<h4 class="ws-title">Response Element: Get_Workers_Response</h4>
<p>See <a href="Get_Workers.html#Get_Workers_Response">Get_Workers_Response</a></p>
<table>
  <tr><td>
    <a name="Get_Workers_Request"></a>
    <h4 class="ws-title">Get_Workers_Request</h4>
    <div>Request element</div>
    <table class="typetable">
      <tr><th>Parameter name</th><th>Type/Value</th><th>Cardinality</th><th>Description</th></tr>
      <tr><td>@version</td><td>string</td><td>[0..1]</td><td>Version</td></tr>
      <tr><td>Request_References</td><td><a href="#Worker_Request_ReferencesType">Worker_Request_References</a></td><td>[0..1]</td><td>Refs</td></tr>
    </table>
  </td></tr>
  <tr><td>
    <a name="Worker_Request_ReferencesType"></a>
    <h4 class="ws-title">Worker_Request_References</h4>
    <div>Worker references</div>
    <table class="typetable">
      <tr><th>Parameter name</th><th>Type/Value</th><th>Cardinality</th><th>Description</th></tr>
      <tr><td>Worker_Reference</td><td>WorkerObject</td><td>[1..*]</td><td>Worker</td></tr>
    </table>
  </td></tr>
  <tr><td>
    <a name="Get_Workers_Response"></a>
    <h4 class="ws-title">Get_Workers_Response</h4>
    <div>Response element</div>
    <table class="typetable">
      <tr><th>Parameter name</th><th>Type/Value</th><th>Cardinality</th><th>Description</th></tr>
      <tr><td>Request_References</td><td><a href="#Worker_Request_ReferencesType">Worker_Request_References</a></td><td>[0..1]</td><td>Echo</td></tr>
    </table>
  </td></tr>
</table>
</body></html>"##;

    #[test]
    fn test_parse_operation_header() {
        let doc = parse_operation_document(PAGE);
        assert_eq!(doc.operation_name, "Get_Workers");
        // Фрагменты склеиваются без разделителя, как в исходной разметке
        assert_eq!(doc.description, "Returns   information forworkers.");
        assert_eq!(doc.web_service, "Human_Resources (v45.0)");
    }

    #[test]
    fn test_request_and_response_expanded_independently() {
        let doc = parse_operation_document(PAGE);

        let request = doc.request.unwrap();
        assert_eq!(request.element_name, "Get_Workers");
        assert_eq!(request.full_element_name, "Get_Workers_Request");
        assert_eq!(request.parameters.len(), 2);
        let refs = request.parameters[1].nested_structure.as_ref().unwrap();
        // "Type" и "_Request" удаляются из любого места идентификатора
        assert_eq!(refs.element_name, "Worker_References");
        assert!(refs.parameters[0].required);

        // Свой набор visited на каждую сторону: ответ тоже разворачивает тип
        let response = doc.response.unwrap();
        assert_eq!(response.full_element_name, "Get_Workers_Response");
        assert!(response.parameters[0].nested_structure.is_some());
    }

    #[test]
    fn test_missing_request_heading() {
        let page = PAGE.replace(
            "Request Element: Get_Workers_Request",
            "Input Element: Get_Workers_Input",
        );
        let page = page.replace(
            "<h4 class=\"ws-title\">Get_Workers_Request</h4>",
            "<h4 class=\"ws-title\">Get_Workers_Input</h4>",
        );
        let page = page.replace(
            "<h4 class=\"ws-title\">Worker_Request_References</h4>",
            "<h4 class=\"ws-title\">Worker_References</h4>",
        );

        let doc = parse_operation_document(&page);
        assert!(doc.request.is_none());
        assert!(doc.response.is_some());
    }

    #[test]
    fn test_empty_document_defaults() {
        let doc = parse_operation_document("<html><body><p>Nothing here</p></body></html>");
        assert_eq!(doc.operation_name, "Unknown");
        assert_eq!(doc.description, "");
        assert_eq!(doc.web_service, "Unknown");
        assert!(doc.request.is_none());
        assert!(doc.response.is_none());
    }

    #[test]
    fn test_unresolvable_root_is_absent() {
        let page = PAGE.replace("<a name=\"Get_Workers_Response\"></a>", "");
        let doc = parse_operation_document(&page);
        assert!(doc.request.is_some());
        assert!(doc.response.is_none());
    }

    #[test]
    fn test_configured_web_service_patterns() {
        let mut config = ParserConfig::default();
        config.heuristics.web_service_patterns = vec!["Directory".to_string()];
        let parser = OperationDocParser::new(config).unwrap();
        assert_eq!(parser.parse(PAGE).web_service, "Directory");

        let page = PAGE.replace("Human_Resources (v45.0)", "Staffing (v46.0)");
        assert_eq!(parse_operation_document(&page).web_service, "Unknown");
    }

    #[test]
    fn test_shared_default_matches_fresh_parser() {
        let fresh = OperationDocParser::new(ParserConfig::default()).unwrap();
        assert_eq!(fresh.parse(PAGE), parse_operation_document(PAGE));
        assert_eq!(OperationDocParser::default().config(), fresh.config());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = serde_json::to_string_pretty(&parse_operation_document(PAGE)).unwrap();
        let second = serde_json::to_string_pretty(&parse_operation_document(PAGE)).unwrap();
        assert_eq!(first, second);
    }
}
