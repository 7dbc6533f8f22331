//! Селекторы и вспомогательные функции обхода DOM

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::DocumentMarkers;
use crate::core::{DocParseError, DocResult};

pub(crate) static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("valid selector"));
pub(crate) static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("valid selector"));
pub(crate) static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("valid selector"));
pub(crate) static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid selector"));
pub(crate) static HREF_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
pub(crate) static NAMED_ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[name]").expect("valid selector"));

/// Селекторы разметки по умолчанию
pub(crate) static DEFAULT_SELECTORS: Lazy<DocSelectors> = Lazy::new(|| {
    DocSelectors::from_markers(&DocumentMarkers::default())
        .expect("default markers are valid selectors")
});

/// Селекторы, зависящие от конфигурируемой разметки
#[derive(Debug, Clone)]
pub struct DocSelectors {
    pub operation_title: Selector,
    pub section_title: Selector,
    pub type_table: Selector,
    pub paragraph: Selector,
}

impl DocSelectors {
    pub fn from_markers(markers: &DocumentMarkers) -> DocResult<Self> {
        Ok(Self {
            operation_title: compile(&format!(
                "{}.{}",
                markers.operation_title_tag, markers.title_class
            ))?,
            section_title: compile(&format!(
                "{}.{}",
                markers.section_title_tag, markers.title_class
            ))?,
            type_table: compile(&format!("table.{}", markers.type_table_class))?,
            paragraph: compile("p")?,
        })
    }
}

fn compile(selector: &str) -> DocResult<Selector> {
    Selector::parse(selector).map_err(|e| DocParseError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Текст элемента: каждый текстовый фрагмент обрезается по краям, пустые
/// отбрасываются, остальные склеиваются без разделителя. Пробелы внутри
/// фрагмента сохраняются.
pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Следующий соседний элемент (текстовые узлы пропускаются)
pub fn next_sibling_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Первый элемент после `origin` в порядке документа, удовлетворяющий предикату.
/// Потомки `origin` тоже просматриваются.
pub fn find_next_element<'a, F>(
    document: &'a Html,
    origin: &ElementRef<'a>,
    predicate: F,
) -> Option<ElementRef<'a>>
where
    F: Fn(&ElementRef<'a>) -> bool,
{
    let origin_id = origin.id();
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != origin_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| predicate(element))
}

/// Ближайший предок с указанным тегом
pub fn enclosing_element<'a>(element: &ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == tag)
}
