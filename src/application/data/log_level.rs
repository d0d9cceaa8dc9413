use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    /// Installs no subscriber at all
    Silent,
}

impl LogLevel {
    pub fn to_level_filter(self) -> Option<LevelFilter> {
        match self {
            LogLevel::Trace => Some(LevelFilter::TRACE),
            LogLevel::Debug => Some(LevelFilter::DEBUG),
            LogLevel::Info => Some(LevelFilter::INFO),
            LogLevel::Warn => Some(LevelFilter::WARN),
            LogLevel::Error => Some(LevelFilter::ERROR),
            LogLevel::Silent => None,
        }
    }
}
