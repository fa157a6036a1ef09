use formbind_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using FormBindError
pub type Result<T> = std::result::Result<T, FormBindError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every kind maps to a stable code that tests, logs and hosts can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Description documents
    InvalidDescription,
    DuplicateElement,
    UnsupportedSchemaVersion,

    // Type machinery
    UnresolvedType,

    // Evaluation / execution
    EvaluationFailed,
    OperationFailed,
    EditRejected,
    UnknownVariable,
    NotFound,

    // Integration/IO
    Config,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidDescription => "ERR_INVALID_DESCRIPTION",
            ExErrorKind::DuplicateElement => "ERR_DUPLICATE_ELEMENT",
            ExErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            ExErrorKind::UnresolvedType => "ERR_UNRESOLVED_TYPE",
            ExErrorKind::EvaluationFailed => "ERR_EVALUATION_FAILED",
            ExErrorKind::OperationFailed => "ERR_OPERATION_FAILED",
            ExErrorKind::EditRejected => "ERR_EDIT_REJECTED",
            ExErrorKind::UnknownVariable => "ERR_UNKNOWN_VARIABLE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields support programmatic handling; the optional context
/// fields locate the failure (which operation, which description element,
/// which request).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    element_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            element_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add description element context
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(element_id) = &self.element_id {
            write!(f, " (element_id: {})", element_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for formbind operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormBindError {
    // ===== Description documents =====
    /// Document text is not valid YAML/JSON or does not match the expected shape
    #[error("Description document could not be parsed: {reason}")]
    DescriptionParse { reason: String },

    /// Document parsed but violates a structural rule
    #[error("Invalid description element {element_id}: {reason}")]
    InvalidDescription { element_id: String, reason: String },

    /// Two elements of one document share an id
    #[error("Duplicate description element id: {element_id}")]
    DuplicateElementId { element_id: String },

    #[error("Unsupported description schema_version {found}; expected {expected}")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },

    // ===== Type machinery =====
    /// Qualified type name does not resolve against the registry
    #[error("Unresolved domain type: {qualified_name}")]
    UnresolvedType { qualified_name: String },

    // ===== Evaluation / execution =====
    /// Expression evaluated to nothing usable where a value was required
    #[error("Expression produced no {expected}: {expression}")]
    ExpressionYieldedNothing {
        expression: String,
        expected: &'static str,
    },

    /// An operation needed a variable the context does not bind
    #[error("Variable not bound in evaluation context: {name}")]
    UnknownVariable { name: String },

    /// The edit service refused a primitive mutation
    #[error("Edit '{operation}' rejected: {reason}")]
    EditRejected { operation: String, reason: String },

    // ===== Generic =====
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<FormBindError> for ExError {
    fn from(err: FormBindError) -> Self {
        match err {
            FormBindError::DescriptionParse { reason } => {
                ExError::new(ExErrorKind::InvalidDescription)
                    .with_op("parse_descriptions")
                    .with_message(reason)
            }

            FormBindError::InvalidDescription { element_id, reason } => {
                ExError::new(ExErrorKind::InvalidDescription)
                    .with_element_id(element_id)
                    .with_message(reason)
            }

            FormBindError::DuplicateElementId { element_id } => {
                ExError::new(ExErrorKind::DuplicateElement)
                    .with_element_id(element_id)
                    .with_message("Description element id is used more than once")
            }

            FormBindError::UnsupportedSchemaVersion { found, expected } => {
                ExError::new(ExErrorKind::UnsupportedSchemaVersion).with_message(format!(
                    "schema_version {} is not supported (expected {})",
                    found, expected
                ))
            }

            FormBindError::UnresolvedType { qualified_name } => {
                ExError::new(ExErrorKind::UnresolvedType)
                    .with_message(format!("Cannot resolve '{}'", qualified_name))
            }

            FormBindError::ExpressionYieldedNothing {
                expression,
                expected,
            } => ExError::new(ExErrorKind::EvaluationFailed).with_message(format!(
                "'{}' produced no {}",
                expression, expected
            )),

            FormBindError::UnknownVariable { name } => ExError::new(ExErrorKind::UnknownVariable)
                .with_message(format!("Variable '{}' is not bound", name)),

            FormBindError::EditRejected { operation, reason } => {
                ExError::new(ExErrorKind::EditRejected)
                    .with_op(operation)
                    .with_message(reason)
            }

            FormBindError::Config { reason } => {
                ExError::new(ExErrorKind::Config).with_message(reason)
            }

            FormBindError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            FormBindError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<ExError> for FormBindError {
    fn from(err: ExError) -> Self {
        match err.kind() {
            ExErrorKind::EditRejected => FormBindError::EditRejected {
                operation: err.op().unwrap_or("edit").to_string(),
                reason: err.message().to_string(),
            },
            _ => FormBindError::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for FormBindError {
    fn from(err: std::io::Error) -> Self {
        FormBindError::Io {
            message: err.to_string(),
        }
    }
}
