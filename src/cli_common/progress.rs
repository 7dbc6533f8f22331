//! Модуль для отображения прогресса пакетной конвертации

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

const BAR_TEMPLATE: &str =
    "{spinner:.cyan} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} {msg}";

/// Прогресс-бар конвертации; `ProgressBar` можно разделять между потоками Rayon
pub fn conversion_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("█▓░")),
        Err(e) => warn!("Invalid progress template: {}", e),
    }
    bar
}
