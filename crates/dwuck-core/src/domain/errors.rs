use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, DwuckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DwuckErrorCategory {
    InvalidStateError,
    FieldOverflowError,
    EmptyDocumentError,
    NoSeriesFoundError,
    IoSystemError,
    InternalError,
}

impl DwuckErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidStateError => "INVALID_STATE",
            Self::FieldOverflowError => "FIELD_OVERFLOW",
            Self::EmptyDocumentError => "EMPTY_DOCUMENT",
            Self::NoSeriesFoundError => "NO_SERIES_FOUND",
            Self::IoSystemError => "IO_SYSTEM",
            Self::InternalError => "INTERNAL",
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InvalidStateError => 2,
            Self::FieldOverflowError => 3,
            Self::EmptyDocumentError => 4,
            Self::NoSeriesFoundError => 5,
            Self::IoSystemError => 6,
            Self::InternalError => 7,
        }
    }
}

impl Display for DwuckErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error currency for the whole codec: a category drives recovery policy
/// and process exit code, while the placeholder is a stable machine-readable
/// code that diagnostics and tests key on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{placeholder}] {message}")]
pub struct DwuckError {
    category: DwuckErrorCategory,
    placeholder: String,
    message: String,
}

impl DwuckError {
    fn new(
        category: DwuckErrorCategory,
        placeholder: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder: placeholder.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::InvalidStateError, placeholder, message)
    }

    pub fn field_overflow(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::FieldOverflowError, placeholder, message)
    }

    pub fn empty_document(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::EmptyDocumentError, placeholder, message)
    }

    pub fn no_series_found(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::NoSeriesFoundError, placeholder, message)
    }

    pub fn io_system(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn internal(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DwuckErrorCategory::InternalError, placeholder, message)
    }

    pub fn category(&self) -> DwuckErrorCategory {
        self.category
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!(
            "ERROR: [{}] [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        match self.category {
            DwuckErrorCategory::InvalidStateError => None,
            _ => Some(format!(
                "Fatal {} failure; exiting with status {}.",
                self.category.as_str(),
                self.exit_code()
            )),
        }
    }
}
