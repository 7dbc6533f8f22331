//! Модель результата разбора: операция, элементы и параметры
//!
//! Порядок полей совпадает с порядком ключей выходного JSON.

use serde::{Deserialize, Serialize};

/// Параметр из таблицы описания типа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Имя без маркера атрибута
    pub name: String,
    /// Имя как в документации (может начинаться с `@`)
    pub original_name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub is_attribute: bool,
    pub is_complex_type: bool,
    pub cardinality: String,
    pub description: String,
    pub required: bool,
    /// Идентификатор якоря, на который ссылается тип
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_type_ref: Option<String>,
    /// Развернутая структура комплексного типа
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_structure: Option<Box<ElementStructure>>,
}

impl ParameterRecord {
    /// Ссылка, которую нужно развернуть (только для комплексных типов)
    pub fn expandable_ref(&self) -> Option<&str> {
        if self.is_complex_type {
            self.complex_type_ref.as_deref()
        } else {
            None
        }
    }
}

/// Описание элемента (комплексного типа)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStructure {
    pub element_name: String,
    pub full_element_name: String,
    pub description: String,
    pub parameters: Vec<ParameterRecord>,
}

/// Корень результата: операция веб-сервиса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDocument {
    pub operation_name: String,
    pub description: String,
    pub web_service: String,
    pub request: Option<ElementStructure>,
    pub response: Option<ElementStructure>,
}

impl OperationDocument {
    /// Собирает статистику по дереву параметров
    pub fn statistics(&self) -> DocumentStatistics {
        let mut stats = DocumentStatistics {
            request_parameters: self.request.as_ref().map_or(0, |r| r.parameters.len()),
            response_parameters: self.response.as_ref().map_or(0, |r| r.parameters.len()),
            ..DocumentStatistics::default()
        };

        for root in [&self.request, &self.response].into_iter().flatten() {
            stats.expanded_structures += 1;
            collect_statistics(&root.parameters, 1, &mut stats);
        }

        stats
    }
}

fn collect_statistics(parameters: &[ParameterRecord], depth: usize, stats: &mut DocumentStatistics) {
    stats.max_depth = stats.max_depth.max(depth);
    for param in parameters {
        stats.total_parameters += 1;
        if param.is_complex_type {
            stats.complex_parameters += 1;
        }
        match &param.nested_structure {
            Some(nested) => {
                stats.expanded_structures += 1;
                collect_statistics(&nested.parameters, depth + 1, stats);
            }
            None if param.complex_type_ref.is_some() => stats.unexpanded_references += 1,
            None => {}
        }
    }
}

/// Статистика разобранной операции
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStatistics {
    /// Top-level request parameters
    pub request_parameters: usize,
    /// Top-level response parameters
    pub response_parameters: usize,
    /// Parameters at every nesting level
    pub total_parameters: usize,
    pub complex_parameters: usize,
    /// Root elements plus every attached nested structure
    pub expanded_structures: usize,
    /// References left without a nested structure (repeat or unresolved)
    pub unexpanded_references: usize,
    pub max_depth: usize,
}

impl std::fmt::Display for DocumentStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation Document Statistics:\n\
             Request parameters: {}\n\
             Response parameters: {}\n\
             Total parameters: {}\n\
             Complex parameters: {}\n\
             Expanded structures: {}\n\
             Unexpanded references: {}\n\
             Max depth: {}",
            self.request_parameters,
            self.response_parameters,
            self.total_parameters,
            self.complex_parameters,
            self.expanded_structures,
            self.unexpanded_references,
            self.max_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(name: &str) -> ParameterRecord {
        ParameterRecord {
            name: name.to_string(),
            original_name: name.to_string(),
            param_type: "string".to_string(),
            is_attribute: false,
            is_complex_type: false,
            cardinality: "[0..1]".to_string(),
            description: String::new(),
            required: false,
            complex_type_ref: None,
            nested_structure: None,
        }
    }

    fn complex(name: &str, reference: &str, nested: Option<ElementStructure>) -> ParameterRecord {
        ParameterRecord {
            param_type: reference.to_string(),
            is_complex_type: true,
            complex_type_ref: Some(reference.to_string()),
            nested_structure: nested.map(Box::new),
            ..simple(name)
        }
    }

    fn element(id: &str, parameters: Vec<ParameterRecord>) -> ElementStructure {
        ElementStructure {
            element_name: id.to_string(),
            full_element_name: id.to_string(),
            description: String::new(),
            parameters,
        }
    }

    #[test]
    fn test_optional_keys_are_omitted() {
        let value = serde_json::to_value(simple("ID")).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(keys.contains(&"type"));
        assert!(!keys.contains(&"complex_type_ref"));
        assert!(!keys.contains(&"nested_structure"));
    }

    #[test]
    fn test_absent_sides_serialize_as_null() {
        let doc = OperationDocument {
            operation_name: "Get_Workers".to_string(),
            description: String::new(),
            web_service: "Unknown".to_string(),
            request: None,
            response: None,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["request"].is_null());
        assert!(value["response"].is_null());
    }

    #[test]
    fn test_statistics() {
        let address = element("Address_Data", vec![simple("Line"), simple("City")]);
        let request = element(
            "Put_Request",
            vec![
                simple("@version"),
                complex("Address", "Address_Data", Some(address)),
                complex("Other_Address", "Address_Data", None),
            ],
        );
        let doc = OperationDocument {
            operation_name: "Put".to_string(),
            description: String::new(),
            web_service: "Unknown".to_string(),
            request: Some(request),
            response: None,
        };

        let stats = doc.statistics();
        assert_eq!(stats.request_parameters, 3);
        assert_eq!(stats.response_parameters, 0);
        assert_eq!(stats.total_parameters, 5);
        assert_eq!(stats.complex_parameters, 2);
        assert_eq!(stats.expanded_structures, 2);
        assert_eq!(stats.unexpanded_references, 1);
        assert_eq!(stats.max_depth, 2);
    }
}
