use thiserror::Error;

/// Result type alias using EsDiffError
pub type Result<T> = std::result::Result<T, EsDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events and assertions.
/// None of these ever escape the boolean suppression contract; they explain
/// why a comparison was reported as "different".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// One side of a comparison is not valid JSON
    MalformedJson,
    /// Valid JSON that does not decode into the managed kind's shape
    ShapeMismatch,

    // Registry
    UnknownResource,
    UnknownField,

    // Provider
    InvalidConfig,
    UnsupportedVersion,

    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedJson => "ERR_MALFORMED_JSON",
            ExErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            ExErrorKind::UnknownResource => "ERR_UNKNOWN_RESOURCE",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::UnsupportedVersion => "ERR_UNSUPPORTED_VERSION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    managed_kind: Option<String>,
    field: Option<String>,
    side: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            managed_kind: None,
            field: None,
            side: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the managed kind (e.g. `transform`) being compared
    pub fn with_managed_kind(mut self, kind: impl Into<String>) -> Self {
        self.managed_kind = Some(kind.into());
        self
    }

    /// Add the resource field being compared
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add which document side (`old` / `new`) failed
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn managed_kind(&self) -> Option<&str> {
        self.managed_kind.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn side(&self) -> Option<&str> {
        self.side.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = &self.managed_kind {
            write!(f, " (kind: {})", kind)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(side) = &self.side {
            write!(f, " (side: {})", side)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Typed failures raised while decoding, configuring or dispatching comparisons
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EsDiffError {
    /// Input is not JSON at all
    #[error("Malformed JSON on {side} side: {reason}")]
    MalformedJson { side: String, reason: String },

    /// Input is JSON but not the expected shape for the managed kind
    #[error("Document on {side} side is not a valid {kind}: {reason}")]
    ShapeMismatch {
        kind: String,
        side: String,
        reason: String,
    },

    #[error("Unknown resource type: {resource}")]
    UnknownResource { resource: String },

    #[error("Field {field} of {resource} has no registered comparator")]
    UnknownField { resource: String, field: String },

    #[error("Invalid provider configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Elasticsearch {found} is older than the minimum supported {minimum}")]
    UnsupportedVersion { found: String, minimum: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<EsDiffError> for ExError {
    fn from(err: EsDiffError) -> Self {
        let message = err.to_string();
        match err {
            EsDiffError::MalformedJson { side, .. } => ExError::new(ExErrorKind::MalformedJson)
                .with_side(side)
                .with_message(message),
            EsDiffError::ShapeMismatch { kind, side, .. } => {
                ExError::new(ExErrorKind::ShapeMismatch)
                    .with_managed_kind(kind)
                    .with_side(side)
                    .with_message(message)
            }
            EsDiffError::UnknownResource { .. } => {
                ExError::new(ExErrorKind::UnknownResource).with_message(message)
            }
            EsDiffError::UnknownField { field, .. } => ExError::new(ExErrorKind::UnknownField)
                .with_field(field)
                .with_message(message),
            EsDiffError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            EsDiffError::UnsupportedVersion { .. } => {
                ExError::new(ExErrorKind::UnsupportedVersion).with_message(message)
            }
            EsDiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for EsDiffError {
    fn from(err: serde_json::Error) -> Self {
        EsDiffError::Serialization {
            message: err.to_string(),
        }
    }
}
