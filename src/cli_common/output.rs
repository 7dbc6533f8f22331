//! Модуль для вывода результатов

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::docs_integration::DocumentStatistics;

/// Writer для вывода результатов
pub struct OutputWriter {
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Создает writer для stdout
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout()),
        }
    }

    #[cfg(test)]
    fn from_writer(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    /// Записывает объект как JSON с отступом в 2 пробела
    pub fn write_json<T: Serialize>(&mut self, obj: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(obj)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Записывает заголовок
    pub fn write_header(&mut self, header: &str) -> Result<()> {
        writeln!(self.writer, "\n{}", header.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(header.chars().count()).blue())?;
        Ok(())
    }

    /// Записывает статистику разобранной операции
    pub fn write_statistics(&mut self, stats: &DocumentStatistics) -> Result<()> {
        self.write_header("Statistics")?;
        let rows = [
            ("Request parameters", stats.request_parameters),
            ("Response parameters", stats.response_parameters),
            ("Total parameters", stats.total_parameters),
            ("Complex parameters", stats.complex_parameters),
            ("Expanded structures", stats.expanded_structures),
            ("Unexpanded references", stats.unexpanded_references),
            ("Max depth", stats.max_depth),
        ];
        for (label, value) in rows {
            writeln!(self.writer, "  {:<22} {}", label, value)?;
        }
        Ok(())
    }

    /// Завершает запись и сбрасывает буфер
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
