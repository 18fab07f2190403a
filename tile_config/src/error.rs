use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Parse,
    IO,
    Validation,
}

impl ConfigErrorKind {
    pub(crate) fn from_code(code: &'static str) -> Self {
        match code {
            "E1001" => Self::Parse,

            "E2001" => Self::IO,

            "E4001" | "E4002" | "E4003" | "E4004" | "E4005" | "E4006" | "E4101" | "E4102"
            | "E4103" | "E4201" => Self::Validation,

            _ => Self::Parse,
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct ConfigError {
    pub code: &'static str,
    pub kind: ConfigErrorKind,
    pub message: String,

    pub file: Option<String>,
    /// Dotted path of the offending value, e.g. `tiles[2].spawn_rate`.
    pub field: Option<String>,
    pub context: Option<String>,
}

impl ConfigError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: ConfigErrorKind::from_code(code),
            message: message.into(),

            file: None,
            field: None,
            context: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
