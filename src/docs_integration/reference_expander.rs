/*!
# Reference Graph Expander

Рекурсивно разворачивает ссылки на комплексные типы во вложенные структуры.

Множество `visited` общее для всего обхода от одного корня: каждый
идентификатор разворачивается не более одного раза. Повторная ссылка (в том
числе циклическая) оставляет `complex_type_ref`, но не получает
`nested_structure`. Глубина рекурсии ограничена числом различных
идентификаторов, достижимых из корня.
*/

use scraper::Html;
use std::collections::HashSet;
use tracing::debug;

use super::element_resolver::ElementResolver;
use super::model::ParameterRecord;
use super::operation_parser::DEFAULT_PARSER;

/// Итоги одного развертывания
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// References that received a nested structure
    pub resolved: usize,
    /// References whose section could not be resolved, in visit order
    pub unresolved: Vec<String>,
    /// References skipped because they were already visited
    pub repeated: usize,
}

/// Развертыватель ссылок для одного корневого элемента
pub struct ReferenceExpander<'r, 'd> {
    resolver: &'r ElementResolver<'d>,
    visited: HashSet<String>,
    stats: ExpansionStats,
}

impl<'r, 'd> ReferenceExpander<'r, 'd> {
    /// `visited` задает уже просмотренные идентификаторы (обычно только корень)
    pub fn new(resolver: &'r ElementResolver<'d>, visited: HashSet<String>) -> Self {
        Self {
            resolver,
            visited,
            stats: ExpansionStats::default(),
        }
    }

    /// Начинает обход с корня: корень сразу считается просмотренным
    pub fn for_root(resolver: &'r ElementResolver<'d>, root_id: &str) -> Self {
        Self::new(resolver, HashSet::from([root_id.to_string()]))
    }

    /// Разворачивает ссылки в порядке параметров, углубляясь в каждую сразу
    pub fn expand(&mut self, parameters: &mut [ParameterRecord]) {
        for param in parameters.iter_mut() {
            let Some(type_ref) = param.expandable_ref() else {
                continue;
            };

            if self.visited.contains(type_ref) {
                debug!("Reference '{}' already expanded, skipping", type_ref);
                self.stats.repeated += 1;
                continue;
            }

            let type_ref = type_ref.to_string();
            self.visited.insert(type_ref.clone());

            match self.resolver.resolve(&type_ref) {
                Some(mut nested) => {
                    self.stats.resolved += 1;
                    self.expand(&mut nested.parameters);
                    param.nested_structure = Some(Box::new(nested));
                }
                None => {
                    debug!("Reference '{}' could not be resolved", type_ref);
                    self.stats.unresolved.push(type_ref);
                }
            }
        }
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn stats(&self) -> &ExpansionStats {
        &self.stats
    }

    pub fn into_parts(self) -> (HashSet<String>, ExpansionStats) {
        (self.visited, self.stats)
    }
}

/// Разворачивает ссылки в документе с разметкой по умолчанию.
/// `visited` дополняется всеми просмотренными идентификаторами.
pub fn expand_references(
    document: &Html,
    mut parameters: Vec<ParameterRecord>,
    visited: &mut HashSet<String>,
) -> Vec<ParameterRecord> {
    let resolver = DEFAULT_PARSER.resolver(document);

    let mut expander = ReferenceExpander::new(&resolver, std::mem::take(visited));
    expander.expand(&mut parameters);
    let (seen, _) = expander.into_parts();
    *visited = seen;

    parameters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::docs_integration::selectors::DocSelectors;
    use crate::docs_integration::table_extractor::TableExtractor;
    use scraper::Selector;

    fn section(id: &str, rows: &[(&str, Option<&str>)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(name, reference)| match reference {
                Some(target) => format!(
                    "<tr><td>{}</td><td><a href=\"#{}\">{}</a></td><td>[0..1]</td><td></td></tr>",
                    name, target, target
                ),
                None => format!(
                    "<tr><td>{}</td><td>string</td><td>[1..1]</td><td></td></tr>",
                    name
                ),
            })
            .collect();
        format!(
            "<tr><td><a name=\"{id}\"></a><h4 class=\"ws-title\">{id}</h4><div>{id} section</div>\
             <table class=\"typetable\"><tr><th>Parameter name</th><th>Type/Value</th>\
             <th>Cardinality</th><th>Description</th></tr>{rows}</table></td></tr>"
        )
    }

    fn document(sections: &[String]) -> Html {
        Html::parse_document(&format!(
            "<html><body><table>{}</table></body></html>",
            sections.concat()
        ))
    }

    fn root_parameters(document: &Html, root: &str) -> Vec<ParameterRecord> {
        let selector = Selector::parse(&format!("a[name=\"{}\"]", root)).unwrap();
        let anchor = document.select(&selector).next().unwrap();
        let cell = crate::docs_integration::selectors::enclosing_element(&anchor, "td").unwrap();
        let table = cell.select(&Selector::parse("table.typetable").unwrap()).next().unwrap();
        TableExtractor::default().extract_parameters(&table)
    }

    #[test]
    fn test_cycle_terminates() {
        let doc = document(&[
            section("Root", &[("A", Some("A_Type"))]),
            section("A_Type", &[("Value", None), ("B", Some("B_Type"))]),
            section("B_Type", &[("Back", Some("A_Type"))]),
        ]);

        let mut visited = HashSet::from(["Root".to_string()]);
        let params = expand_references(&doc, root_parameters(&doc, "Root"), &mut visited);

        let a = params[0].nested_structure.as_ref().unwrap();
        assert_eq!(a.full_element_name, "A_Type");
        assert_eq!(a.element_name, "A_");

        let b = a.parameters[1].nested_structure.as_ref().unwrap();
        assert_eq!(b.full_element_name, "B_Type");

        let back = &b.parameters[0];
        assert_eq!(back.complex_type_ref.as_deref(), Some("A_Type"));
        assert!(back.nested_structure.is_none());

        assert_eq!(
            visited,
            HashSet::from(["Root".to_string(), "A_Type".to_string(), "B_Type".to_string()])
        );
    }

    #[test]
    fn test_self_reference_to_root() {
        let doc = document(&[section("Root", &[("Parent", Some("Root"))])]);
        let mut visited = HashSet::from(["Root".to_string()]);
        let params = expand_references(&doc, root_parameters(&doc, "Root"), &mut visited);
        assert!(params[0].nested_structure.is_none());
        assert_eq!(params[0].complex_type_ref.as_deref(), Some("Root"));
    }

    #[test]
    fn test_repeated_reference_expanded_once() {
        let doc = document(&[
            section(
                "Root",
                &[("Home", Some("Address_Data")), ("Work", Some("Address_Data"))],
            ),
            section("Address_Data", &[("Line", None)]),
        ]);

        let config = ParserConfig::default();
        let selectors = DocSelectors::from_markers(&config.markers).unwrap();
        let resolver = ElementResolver::new(&doc, &selectors, &config.markers, &config.heuristics);
        let mut params = root_parameters(&doc, "Root");

        let mut expander = ReferenceExpander::for_root(&resolver, "Root");
        expander.expand(&mut params);

        assert!(params[0].nested_structure.is_some());
        assert!(params[1].nested_structure.is_none());
        assert_eq!(params[1].complex_type_ref.as_deref(), Some("Address_Data"));
        assert_eq!(expander.stats().resolved, 1);
        assert_eq!(expander.stats().repeated, 1);
        assert!(expander.stats().unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_reference_tolerated() {
        let doc = document(&[section(
            "Root",
            &[("Address", Some("Address_Data")), ("Name", None)],
        )]);

        let config = ParserConfig::default();
        let selectors = DocSelectors::from_markers(&config.markers).unwrap();
        let resolver = ElementResolver::new(&doc, &selectors, &config.markers, &config.heuristics);
        let mut params = root_parameters(&doc, "Root");

        let mut expander = ReferenceExpander::for_root(&resolver, "Root");
        expander.expand(&mut params);

        assert!(params[0].is_complex_type);
        assert_eq!(params[0].complex_type_ref.as_deref(), Some("Address_Data"));
        assert!(params[0].nested_structure.is_none());
        assert_eq!(expander.stats().unresolved, vec!["Address_Data".to_string()]);
        assert!(expander.visited().contains("Address_Data"));
    }

    #[test]
    fn test_depth_first_order() {
        // Вложенный тип, встреченный раньше в глубине, не разворачивается у соседа
        let doc = document(&[
            section("Root", &[("First", Some("X_Type")), ("Second", Some("Y_Type"))]),
            section("X_Type", &[("Inner", Some("Y_Type"))]),
            section("Y_Type", &[("Leaf", None)]),
        ]);
        let mut visited = HashSet::from(["Root".to_string()]);
        let params = expand_references(&doc, root_parameters(&doc, "Root"), &mut visited);

        let x = params[0].nested_structure.as_ref().unwrap();
        assert!(x.parameters[0].nested_structure.is_some());
        assert!(params[1].nested_structure.is_none());
    }
}
