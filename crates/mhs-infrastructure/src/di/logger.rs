//! Logging support
//!
//! Every scope gets its own [`LoggerFactory`]. Loggers emit `tracing` events
//! tagged with the scope (host or server name) and a category, so output
//! from different servers in one process stays attributable.

use tracing::{Level, Span};

/// Creates category loggers for one scope
#[derive(Debug, Clone)]
pub struct LoggerFactory {
    scope: String,
}

impl LoggerFactory {
    /// Create a factory for the named scope
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// Scope the factory tags events with
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Logger for a category (usually a component or type name)
    pub fn create_logger(&self, category: impl Into<String>) -> Logger {
        Logger {
            scope: self.scope.clone(),
            category: category.into(),
        }
    }

    /// Logger categorized by the type `T`
    pub fn create_logger_for<T: ?Sized>(&self) -> Logger {
        self.create_logger(std::any::type_name::<T>())
    }
}

/// Category logger bound to a scope
#[derive(Debug, Clone)]
pub struct Logger {
    scope: String,
    category: String,
}

impl Logger {
    /// Scope of the logger
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Category of the logger
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Emit an event at `level`
    pub fn log(&self, level: Level, message: &str) {
        let (scope, category) = (self.scope.as_str(), self.category.as_str());
        match level {
            Level::TRACE => tracing::trace!(scope, category, "{message}"),
            Level::DEBUG => tracing::debug!(scope, category, "{message}"),
            Level::INFO => tracing::info!(scope, category, "{message}"),
            Level::WARN => tracing::warn!(scope, category, "{message}"),
            Level::ERROR => tracing::error!(scope, category, "{message}"),
        }
    }

    /// Debug-level event
    pub fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    /// Info-level event
    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    /// Warn-level event
    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    /// Error-level event
    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    /// Span carrying the scope and category, for instrumenting work
    pub fn span(&self) -> Span {
        tracing::info_span!("component", scope = %self.scope, category = %self.category)
    }
}
