//! Capability contract implemented by participating test suites.

use async_trait::async_trait;

use crate::driver::Session;
use crate::engine::Engine;
use crate::error::Result;

/// Capability set a suite exposes to the lifecycle manager.
///
/// Implementations must uphold three rules:
///
/// - `setup_session` either yields an owned, live [`Session`] or fails,
///   typically with [`Launch`](crate::HarnessError::Launch) or
///   [`SessionUnavailable`](crate::HarnessError::SessionUnavailable). A
///   dead or placeholder session is not representable here; suites that
///   used to swallow launch failures and hand back nothing must surface
///   the error instead.
/// - `setup_session` releases any session the suite still holds from a
///   previous invocation before creating a new one, so re-entrant calls
///   within a multi-invocation run are safe.
/// - `teardown` runs after every invocation, including ones whose setup
///   failed. It must be idempotent and tolerate never having produced a
///   session; it never fails and never panics.
#[async_trait]
pub trait TestContract: Send {
	/// Base URL opened when a declaration carries no explicit URL.
	///
	/// An empty string means the automatic navigation step is skipped.
	fn base_url(&self) -> &str;

	/// Acquires one session for `engine`.
	async fn setup_session(&mut self, engine: Engine) -> Result<Session>;

	/// Releases any suite-held resources.
	async fn teardown(&mut self);
}
