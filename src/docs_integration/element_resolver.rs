/*!
# Element Resolver

Находит секцию документа по идентификатору якоря и извлекает из нее
описание элемента и таблицу параметров.

Секция устроена так:

```html
<td>
  <a name="Address_Data"></a>
  <h4 class="ws-title">Address_Data</h4>
  <div>Описание элемента</div>
  <table class="typetable">...</table>
</td>
```

Отсутствие якоря, контейнера или заголовка не является ошибкой: результат `None`.
*/

use scraper::{ElementRef, Html};
use tracing::debug;

use super::model::ElementStructure;
use super::selectors::{
    element_text, enclosing_element, next_sibling_element, DocSelectors, HEADER_CELL_SELECTOR,
    NAMED_ANCHOR_SELECTOR,
};
use super::table_extractor::TableExtractor;
use crate::config::{DocumentMarkers, HeuristicPatterns};

/// Резолвер элементов в пределах одного документа
pub struct ElementResolver<'d> {
    document: &'d Html,
    selectors: &'d DocSelectors,
    markers: &'d DocumentMarkers,
    name_suffixes: &'d [String],
    extractor: TableExtractor,
}

impl<'d> ElementResolver<'d> {
    pub fn new(
        document: &'d Html,
        selectors: &'d DocSelectors,
        markers: &'d DocumentMarkers,
        heuristics: &'d HeuristicPatterns,
    ) -> Self {
        Self {
            document,
            selectors,
            markers,
            name_suffixes: &heuristics.element_name_suffixes,
            extractor: TableExtractor::new(markers),
        }
    }

    /// Разрешает элемент по точному имени якоря
    pub fn resolve(&self, element_id: &str) -> Option<ElementStructure> {
        let Some(anchor) = self.find_anchor(element_id) else {
            debug!("Anchor '{}' not found", element_id);
            return None;
        };

        let Some(section) = enclosing_element(&anchor, &self.markers.section_container_tag) else {
            debug!(
                "Anchor '{}' has no enclosing <{}>",
                element_id, self.markers.section_container_tag
            );
            return None;
        };

        let Some(title) = section.select(&self.selectors.section_title).next() else {
            debug!("Section '{}' has no title", element_id);
            return None;
        };

        let description = next_sibling_element(&title)
            .filter(|sibling| sibling.value().name() == self.markers.description_tag)
            .map(|sibling| element_text(&sibling))
            .unwrap_or_default();

        let parameters = match self.find_parameter_table(&section) {
            Some(table) => self.extractor.extract_parameters(&table),
            None => {
                debug!("Section '{}' has no parameter table", element_id);
                Vec::new()
            }
        };

        Some(ElementStructure {
            element_name: display_name(element_id, self.name_suffixes),
            full_element_name: element_id.to_string(),
            description,
            parameters,
        })
    }

    fn find_anchor(&self, element_id: &str) -> Option<ElementRef<'d>> {
        self.document
            .select(&NAMED_ANCHOR_SELECTOR)
            .find(|anchor| anchor.value().attr("name") == Some(element_id))
    }

    /// Первая таблица типа, в заголовке которой есть метка колонки имени параметра
    fn find_parameter_table(&self, section: &ElementRef<'d>) -> Option<ElementRef<'d>> {
        section.select(&self.selectors.type_table).find(|table| {
            table
                .select(&HEADER_CELL_SELECTOR)
                .any(|th| th.text().collect::<String>().contains(&self.markers.parameter_header))
        })
    }
}

/// Отображаемое имя элемента: суффиксы удаляются по порядку, все вхождения
pub fn display_name(element_id: &str, suffixes: &[String]) -> String {
    suffixes
        .iter()
        .fold(element_id.to_string(), |name, suffix| name.replace(suffix.as_str(), ""))
}
