//! Exit codes for the `dbreport` binary.
//!
//! - 0: success
//! - 10-19: problems the caller can fix (arguments, input, layout, files)

use dbr_report::ReportError;

/// Process exit status. Stable for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every requested report was rendered or checked.
    Clean = 0,

    /// Invalid arguments, malformed JSON, bad layout or unknown view.
    ArgsError = 10,

    /// A table or its navigation has the wrong shape.
    SchemaError = 11,

    /// Reading input or writing reports failed.
    IoError = 12,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Stable name for machine-readable output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::SchemaError => "ERR_SCHEMA",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::Schema(_) => ExitCode::SchemaError,
            ReportError::IoError(_) | ReportError::NotADirectory(_) => ExitCode::IoError,
            ReportError::JsonError(_)
            | ReportError::Layout(_)
            | ReportError::UnknownView(_)
            | ReportError::InvalidViewName(_)
            | ReportError::UnknownFilterKey(_)
            | ReportError::InvalidConfig(_) => ExitCode::ArgsError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
