use aws_sdk_dynamodb::error::{BuildError, ProvideErrorMetadata, SdkError};
use std::{error, fmt};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed provider failure.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// Broad classification of an [`Error`], used by boundary layers to pick a response.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The caller supplied bad data; retrying the same request will fail again.
    Client,
    /// The requested table or item does not exist.
    NotFound,
    /// The store failed, or returned something this crate cannot interpret.
    Server,
}

/// Errors raised by the codec, the scan paginator and the table operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field failed type validation while being encoded.
    #[error("{message}")]
    InvalidField {
        /// Path of the offending field, e.g. `items[2].tags[0]`.
        field: String,
        /// Human-readable description.
        message: String,
        /// Nested Base64 decoding failure, for binary fields.
        #[source]
        source: Option<base64::DecodeError>,
    },
    /// A request argument was rejected before contacting the store.
    #[error("{message}")]
    InvalidArgument {
        /// Human-readable description.
        message: String,
    },
    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound {
        /// Human-readable description.
        message: String,
    },
    /// A value returned by the store could not be decoded.
    #[error("{message}")]
    MalformedAttribute {
        /// Path of the offending attribute.
        field: String,
        /// Human-readable description.
        message: String,
    },
    /// The store answered with a response missing required parts.
    #[error("{message}")]
    InvalidResponse {
        /// Human-readable description.
        message: String,
    },
    /// Any other failure reported by the table-access primitive.
    #[error("DynamoDB {operation} failed")]
    Provider {
        /// Name of the failed operation.
        operation: &'static str,
        /// Error code reported by the store, if any.
        code: Option<String>,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidField { .. } | Self::InvalidArgument { .. } => ErrorKind::Client,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MalformedAttribute { .. }
            | Self::InvalidResponse { .. }
            | Self::Provider { .. } => ErrorKind::Server,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidField { .. } => "InvalidField",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::NotFound { .. } => "ResourceNotFound",
            Self::MalformedAttribute { .. } => "MalformedAttribute",
            Self::InvalidResponse { .. } => "InvalidResponse",
            Self::Provider { code, .. } => code.as_deref().unwrap_or("ProviderError"),
        }
    }

    /// HTTP status a boundary layer should answer with.
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Client => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Server => 500,
        }
    }

    /// Path of the offending field for field-level errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidField { field, .. } | Self::MalformedAttribute { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    /// Map an SDK failure, keeping resource-not-found distinct from other provider errors.
    pub(crate) fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + error::Error + Send + Sync + 'static,
        R: fmt::Debug + Send + Sync + 'static,
    {
        let code = err.code().map(str::to_string);
        let mapped = match code.as_deref() {
            Some("ResourceNotFoundException") => Self::NotFound {
                message: err
                    .message()
                    .unwrap_or("Requested resource not found")
                    .to_string(),
            },
            _ => Self::Provider {
                operation,
                code,
                source: Box::new(err),
            },
        };
        #[cfg(feature = "tracing")]
        if let Self::Provider { source, .. } = &mapped {
            tracing::error!(operation, code = mapped.code(), error = %source, "provider call failed");
        }
        mapped
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}
