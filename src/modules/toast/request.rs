use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Title used when a request does not carry one.
pub const DEFAULT_TITLE: &str = "Notification";

/// Auto-dismiss delay used when a request does not carry a usable timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Variant {
    /// Lenient lookup: anything unrecognised is `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Variant::Success,
            "warning" => Variant::Warning,
            "error" => Variant::Error,
            _ => Variant::Info,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Info => "info",
            Variant::Success => "success",
            Variant::Warning => "warning",
            Variant::Error => "error",
        }
    }
}

/// Caller-supplied description of a toast. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub variant: Option<Variant>,
    /// Milliseconds; `0` keeps the toast until dismissed, negative falls back to the default.
    pub timeout_ms: Option<i64>,
}

impl ToastRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn persistent(self) -> Self {
        self.timeout_ms(0)
    }

    /// Coerces the request into a fully specified toast. Never fails.
    pub fn resolve(self) -> Toast {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let message = self.message.filter(|m| !m.is_empty());
        let timeout = match self.timeout_ms {
            Some(0) => None,
            Some(ms) if ms > 0 => Some(Duration::from_millis(ms as u64)),
            _ => Some(DEFAULT_TIMEOUT),
        };

        Toast {
            title,
            message,
            variant: self.variant.unwrap_or_default(),
            timeout,
        }
    }
}

/// A request after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: Option<String>,
    pub variant: Variant,
    /// `None` means the toast stays until dismissed.
    pub timeout: Option<Duration>,
}
