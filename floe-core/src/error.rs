// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream-level error types.
//!
//! [`FloeError`] is the error carried in-band by [`StreamItem::Error`]
//! (see [`crate::StreamItem`]): it describes why a source stream failed, and it
//! travels through a freeze gate with the same ordering discipline as any value.
//! API-surface failures (closed signal, finalized registry, destroyed
//! coordinator) have their own small enums next to the types they guard.

/// Root error type for stream-level failures.
///
/// Producers turn their domain errors into a `FloeError` before pushing them
/// into a gated stream; the gate delays but never rewrites them.
#[derive(Debug, thiserror::Error)]
pub enum FloeError {
    /// A failure in stream processing itself.
    #[error("stream processing error: {context}")]
    Stream {
        /// Description of what went wrong.
        context: String,
    },

    /// An error produced by the upstream source.
    #[error("source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FloeError {
    /// Create a stream processing error with the given context.
    pub fn stream(context: impl Into<String>) -> Self {
        Self::Stream {
            context: context.into(),
        }
    }

    /// Wrap an upstream source error.
    pub fn source(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(error))
    }
}

impl Clone for FloeError {
    fn clone(&self) -> Self {
        match self {
            Self::Stream { context } => Self::Stream {
                context: context.clone(),
            },
            // The boxed source is not cloneable; degrade to its message.
            Self::Source(e) => Self::Stream {
                context: format!("source error: {e}"),
            },
        }
    }
}

/// Specialized `Result` for floe operations.
pub type Result<T> = std::result::Result<T, FloeError>;
