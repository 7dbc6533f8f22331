//! Общие аргументы командной строки для CLI утилит

use clap::Args;
use std::path::PathBuf;

/// Общие аргументы для всех CLI команд
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Аргументы для работы с конфигурацией парсера и выводом
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Parser configuration file (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory receiving JSON output (overrides the configuration)
    #[arg(short = 'd', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

impl CommonArgs {
    /// Определяет уровень логирования на основе флагов
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Проверяет, нужно ли выводить информацию
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let args = CommonArgs::default();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        let args = CommonArgs {
            verbose: true,
            quiet: false,
        };
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        let args = CommonArgs {
            verbose: false,
            quiet: true,
        };
        assert_eq!(args.log_level(), tracing::Level::ERROR);
        assert!(!args.should_print());
    }
}
