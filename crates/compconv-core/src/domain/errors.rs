pub type ConversionResult<T> = Result<T, ConversionError>;
pub type ParserResult<T> = ConversionResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    /// Symbol is not present in the atomic weight table.
    UnknownElement,
    /// Percentages are negative, non-finite, duplicated or do not sum to 100.
    InvalidComposition,
    /// Nothing to normalize against: no entries, all zero, or a zero denominator.
    DegenerateInput,
    /// Composition text could not be parsed.
    MalformedInput,
    /// Atomic weight data source is missing or corrupt.
    TableLoad,
    Usage,
    Io,
    Internal,
}

impl ConversionErrorKind {
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::UnknownElement
            | Self::InvalidComposition
            | Self::MalformedInput
            | Self::Usage => ErrorCategory::InputValidationError,
            Self::DegenerateInput => ErrorCategory::ComputationError,
            Self::TableLoad | Self::Io => ErrorCategory::IoSystemError,
            Self::Internal => ErrorCategory::InternalError,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownElement => "INPUT.UNKNOWN_ELEMENT",
            Self::InvalidComposition => "INPUT.INVALID_COMPOSITION",
            Self::MalformedInput => "INPUT.MALFORMED",
            Self::Usage => "INPUT.CLI_USAGE",
            Self::DegenerateInput => "RUN.DEGENERATE_INPUT",
            Self::TableLoad => "IO.ATOMIC_WEIGHTS",
            Self::Io => "IO.CLI",
            Self::Internal => "SYS.INTERNAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{}] {}", .kind.category().as_str(), .kind.code(), .message)]
pub struct ConversionError {
    kind: ConversionErrorKind,
    message: String,
}

impl ConversionError {
    pub fn new(kind: ConversionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_element(symbol: &str) -> Self {
        Self::new(
            ConversionErrorKind::UnknownElement,
            format!("element '{}' is missing from the atomic weight table", symbol),
        )
    }

    pub fn invalid_composition(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::InvalidComposition, message)
    }

    pub fn degenerate_input(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::DegenerateInput, message)
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::MalformedInput, message)
    }

    pub fn table_load(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::TableLoad, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::Usage, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::Io, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ConversionErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.kind.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code(), self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
