//! Общий модуль для CLI
//!
//! Содержит общую функциональность бинарника:
//! - Инициализация логирования
//! - Форматирование вывода
//! - Общие аргументы командной строки

use anyhow::{anyhow, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod output;
pub mod progress;

pub use args::{CommonArgs, ConfigArgs};
pub use output::OutputWriter;
pub use progress::conversion_bar;

/// Инициализирует систему логирования.
///
/// Уровень по умолчанию задается флагами, `RUST_LOG` может его уточнить.
/// Логи идут в stderr, чтобы не смешиваться с JSON в stdout.
pub fn init_logging(level: tracing::Level) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Выводит заголовок CLI утилиты
pub fn print_header(name: &str, version: &str, description: &str) {
    println!(
        "{} {} - {}",
        "🔧".blue(),
        name.bold().blue(),
        version.dimmed()
    );
    println!("{}\n", description.dimmed());
}

/// Выводит успешное завершение операции
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Выводит предупреждение
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.yellow());
}

/// Выводит ошибку
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Выводит информационное сообщение
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ️".blue(), message);
}

/// Форматирует продолжительность в человекочитаемый вид
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{:03}s", secs, millis)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}
