/*!
# Converter

Граница вызова для одного файла: чтение HTML, разбор, сериализация в JSON
и запись в выходной каталог.
*/

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{ensure_dir, read_html_file, DocParseError, DocResult};
use crate::docs_integration::{DocumentStatistics, OperationDocParser, OperationDocument};

/// Результат конвертации одного файла
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub statistics: DocumentStatistics,
}

/// JSON с отступом в 2 пробела, не-ASCII символы сохраняются как есть
pub fn render_json(document: &OperationDocument) -> DocResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Путь выходного файла.
///
/// Имя берется из `output`, либо из имени входного файла с заменой `.html`
/// на `.json` (или с добавлением `.json`). Результат всегда лежит в
/// `output_dir`, если только `output` не абсолютный.
pub fn derive_output_path(input: &Path, output: Option<&Path>, output_dir: &Path) -> PathBuf {
    let file_name = match output {
        Some(name) => name.to_path_buf(),
        None => PathBuf::from(json_file_name(input)),
    };
    output_dir.join(file_name)
}

fn json_file_name(input: &Path) -> String {
    let base = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let html_suffix = base.len() >= 5
        && base.is_char_boundary(base.len() - 5)
        && base[base.len() - 5..].eq_ignore_ascii_case(".html");
    if html_suffix {
        format!("{}.json", &base[..base.len() - 5])
    } else {
        format!("{}.json", base)
    }
}

/// Читает и разбирает файл без записи результата
pub fn parse_file(parser: &OperationDocParser, input: &Path) -> DocResult<OperationDocument> {
    let html = read_html_file(input)?;
    Ok(parser.parse(&html))
}

/// Конвертирует один HTML файл в JSON
pub fn convert_file(
    parser: &OperationDocParser,
    input: &Path,
    output: Option<&Path>,
    output_dir: &Path,
) -> DocResult<ConversionOutcome> {
    let document = parse_file(parser, input)?;
    let json = render_json(&document)?;

    let output_path = derive_output_path(input, output, output_dir);
    if let Some(parent) = output_path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(&output_path, json).map_err(|e| DocParseError::from_write(&output_path, e))?;

    info!(
        "Converted {} -> {}",
        input.display(),
        output_path.display()
    );

    Ok(ConversionOutcome {
        input: input.to_path_buf(),
        output: output_path,
        statistics: document.statistics(),
    })
}
