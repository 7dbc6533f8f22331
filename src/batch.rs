/*!
# Batch Conversion

Конвертация каталога страниц документации. Каждый файл разбирается
независимо (свое DOM-дерево и свой набор `visited`), файлы обрабатываются
параллельно пулом Rayon.
*/

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::cli_common::conversion_bar;
use crate::converter::{convert_file, derive_output_path, ConversionOutcome};
use crate::core::{DocParseError, DocResult};
use crate::docs_integration::OperationDocParser;

/// Ошибка конвертации отдельного файла
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub message: String,
}

/// Итоги пакетной конвертации
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<ConversionOutcome>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Находит все `.html` файлы каталога (рекурсивно), отсортированные по пути
pub fn discover_html_files(dir: &Path) -> DocResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(DocParseError::FileNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "walk error"));
            DocParseError::Io { path, source }
        })?;

        let is_html = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Каталог результата для файла пакета: подкаталоги `input_dir` повторяются
/// внутри `output_dir`
pub fn batch_output_dir(input_dir: &Path, file: &Path, output_dir: &Path) -> PathBuf {
    match file.parent().and_then(|parent| parent.strip_prefix(input_dir).ok()) {
        Some(relative) => output_dir.join(relative),
        None => output_dir.to_path_buf(),
    }
}

/// Файл, готовый к конвертации
struct PlannedConversion {
    input: PathBuf,
    output_dir: PathBuf,
}

/// Пакетный конвертер каталога
pub struct BatchConverter<'p> {
    parser: &'p OperationDocParser,
    output_dir: PathBuf,
    jobs: usize,
    show_progress: bool,
}

impl<'p> BatchConverter<'p> {
    pub fn new(parser: &'p OperationDocParser, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            parser,
            output_dir: output_dir.into(),
            jobs: num_cpus::get(),
            show_progress: false,
        }
    }

    /// Число рабочих потоков (0 - по числу ядер)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Конвертирует все `.html` файлы каталога в выходной каталог
    pub fn convert_directory(&self, input_dir: &Path) -> DocResult<BatchSummary> {
        let files = discover_html_files(input_dir)?;
        info!(
            "Converting {} documents from {} using {} workers",
            files.len(),
            input_dir.display(),
            self.jobs
        );

        let mut summary = BatchSummary::default();
        let planned = self.plan(input_dir, files, &mut summary.failed);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| DocParseError::Config(format!("Failed to build thread pool: {}", e)))?;

        let progress = if self.show_progress {
            conversion_bar(planned.len())
        } else {
            ProgressBar::hidden()
        };
        let results: Vec<(PathBuf, DocResult<ConversionOutcome>)> = pool.install(|| {
            planned
                .par_iter()
                .map(|job| {
                    let result = convert_file(self.parser, &job.input, None, &job.output_dir);
                    progress.inc(1);
                    (job.input.clone(), result)
                })
                .collect()
        });
        progress.finish_with_message("Conversion finished");

        for (input, result) in results {
            match result {
                Ok(outcome) => summary.converted.push(outcome),
                Err(e) => {
                    warn!("Failed to convert {}: {}", input.display(), e);
                    summary.failed.push(BatchFailure {
                        input,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch finished: {} converted, {} failed",
            summary.converted.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Назначает каждому файлу выходной каталог. Файлы, чей результат совпал
    /// бы с уже назначенным, не конвертируются и попадают в `failed`.
    fn plan(
        &self,
        input_dir: &Path,
        files: Vec<PathBuf>,
        failed: &mut Vec<BatchFailure>,
    ) -> Vec<PlannedConversion> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut planned = Vec::with_capacity(files.len());

        for input in files {
            let output_dir = batch_output_dir(input_dir, &input, &self.output_dir);
            let output = derive_output_path(&input, None, &output_dir);

            if let Some(first) = claimed.get(&output) {
                warn!(
                    "Skipping {}: {} is already produced by {}",
                    input.display(),
                    output.display(),
                    first.display()
                );
                failed.push(BatchFailure {
                    message: format!(
                        "Output {} is already produced by {}",
                        output.display(),
                        first.display()
                    ),
                    input,
                });
                continue;
            }

            claimed.insert(output, input.clone());
            planned.push(PlannedConversion { input, output_dir });
        }

        planned
    }
}
