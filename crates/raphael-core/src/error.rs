use std::fmt;

/// Machine-readable error codes for scripted callers of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    CatalogNotFound,
    CatalogUnreadable,
    CatalogMalformed,
    ProjectNotFound,
    InvalidEnumValue,
    InvalidContact,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::CatalogNotFound => "E1002",
            Self::CatalogUnreadable => "E1003",
            Self::CatalogMalformed => "E1004",
            Self::ProjectNotFound => "E2001",
            Self::InvalidEnumValue => "E2002",
            Self::InvalidContact => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::CatalogNotFound => "Catalog export not found",
            Self::CatalogUnreadable => "Catalog export could not be read",
            Self::CatalogMalformed => "Catalog export is not valid JSON",
            Self::ProjectNotFound => "Project not found",
            Self::InvalidEnumValue => "Invalid status value",
            Self::InvalidContact => "Invalid contact submission",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .raphael/config.toml and retry."),
            Self::CatalogNotFound => Some(
                "Export the dataset (e.g. `sanity dataset export`) or pass --catalog <path>.",
            ),
            Self::CatalogUnreadable => Some("Check file permissions on the catalog export."),
            Self::CatalogMalformed => {
                Some("Use a JSON array or one JSON document per line (NDJSON).")
            }
            Self::ProjectNotFound => Some("Run `rc projects` to list known slugs."),
            Self::InvalidEnumValue => Some("Use one of: all, current, previous."),
            Self::InvalidContact => Some("Provide a name, a valid email address and a message."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
