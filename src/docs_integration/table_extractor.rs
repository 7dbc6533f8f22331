/*!
# Table Extractor

Разбор таблицы параметров типа. Первая строка таблицы является заголовком, каждая
следующая строка с четырьмя и более ячейками описывает один параметр:
имя, тип, кратность, описание.

Строки, которые не удается разобрать, молча пропускаются.
*/

use scraper::ElementRef;
use tracing::trace;

use super::model::ParameterRecord;
use super::selectors::{element_text, CELL_SELECTOR, LINK_SELECTOR, ROW_SELECTOR};
use crate::config::DocumentMarkers;

const MIN_CELLS: usize = 4;

/// Извлекатель параметров из таблицы типа
#[derive(Debug, Clone)]
pub struct TableExtractor {
    attribute_marker: char,
    header_label: String,
}

impl TableExtractor {
    pub fn new(markers: &DocumentMarkers) -> Self {
        Self {
            attribute_marker: markers.attribute_marker,
            header_label: markers.parameter_header.clone(),
        }
    }

    /// Извлекает параметры в порядке строк таблицы
    pub fn extract_parameters(&self, table: &ElementRef) -> Vec<ParameterRecord> {
        table
            .select(&ROW_SELECTOR)
            .skip(1)
            .filter_map(|row| self.parse_row(&row))
            .collect()
    }

    fn parse_row(&self, row: &ElementRef) -> Option<ParameterRecord> {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < MIN_CELLS {
            trace!("Skipping row with {} cells", cells.len());
            return None;
        }

        let original_name = element_text(&cells[0]);
        if original_name.is_empty() || original_name == self.header_label {
            return None;
        }

        let param_type = element_text(&cells[1]);
        let cardinality = element_text(&cells[2]);
        let description = element_text(&cells[3]);

        let is_attribute = original_name.starts_with(self.attribute_marker);
        let name = original_name
            .trim_start_matches(self.attribute_marker)
            .trim()
            .to_string();

        // Ссылка в ячейке типа означает комплексный тип
        let type_link = cells[1].select(&LINK_SELECTOR).next();
        let is_complex_type = type_link.is_some();
        let complex_type_ref = type_link
            .and_then(|link| link.value().attr("href"))
            .map(|href| href.trim_start_matches('#').to_string())
            .filter(|reference| !reference.is_empty());

        Some(ParameterRecord {
            name,
            original_name,
            param_type,
            is_attribute,
            is_complex_type,
            required: is_required(&cardinality),
            cardinality,
            description,
            complex_type_ref,
            nested_structure: None,
        })
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(&DocumentMarkers::default())
    }
}

/// Кратность с минимумом 1 означает обязательный параметр
pub fn is_required(cardinality: &str) -> bool {
    cardinality.contains("[1..1]") || cardinality.starts_with("[1..")
}

/// Разбирает таблицу с разметкой по умолчанию
pub fn extract_parameters(table: &ElementRef) -> Vec<ParameterRecord> {
    TableExtractor::default().extract_parameters(table)
}
