//! Error taxonomy shared across the harness.

use thiserror::Error;

use crate::engine::Engine;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
	/// Requested engine is outside the closed catalog. Fatal, never retried.
	#[error("unsupported engine: {name}")]
	UnsupportedEngine { name: String },

	/// The automation runtime for an engine could not be started.
	#[error("launch failed for {engine}: {message}")]
	Launch { engine: Engine, message: String },

	/// Setup finished without producing a usable session.
	#[error("no usable session for {engine}")]
	SessionUnavailable { engine: Engine },

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	/// A bounded wait expired. Surfaced to the test body as a normal failure.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("invalid declaration: {0}")]
	InvalidDeclaration(String),

	/// Failure raised by the test body itself.
	#[error(transparent)]
	Body(anyhow::Error),
}

impl HarnessError {
	/// True when this is a bounded-wait expiry rather than a hard failure.
	pub fn is_timeout(&self) -> bool {
		matches!(self, HarnessError::Timeout { .. })
	}
}
