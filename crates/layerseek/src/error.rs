use crate::message::Severity;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no layer selected")]
    NoLayerSelected,

    #[error("selected layer is not a vector layer")]
    UnsupportedLayerType,

    #[error("enter a free word or a refinement value")]
    NoSearchCriteria,

    #[error("layer has no string fields to search")]
    NoSearchableFields,

    #[error("could not build a usable search expression")]
    NoUsableExpression,

    #[error("expression error: {0}")]
    ExpressionSyntax(String),

    #[error("comparison requires a numeric value, got '{0}'")]
    NonNumericComparison(String),

    #[error("layer has no field named '{0}'")]
    UnknownField(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Severity used when this error is surfaced to the user.
    ///
    /// Input and precondition problems warn; engine and persistence
    /// failures are critical.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoLayerSelected
            | Self::UnsupportedLayerType
            | Self::NoSearchCriteria
            | Self::NoSearchableFields
            | Self::NoUsableExpression
            | Self::NonNumericComparison(_)
            | Self::UnknownField(_) => Severity::Warning,
            Self::ExpressionSyntax(_) | Self::Query(_) | Self::Settings(_) | Self::Io(_) => {
                Severity::Critical
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
