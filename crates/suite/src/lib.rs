//! Image-host upload suite: ordinary test-body logic layered on the harness.
//!
//! The interesting machinery (engine selection, session lifecycle) lives in
//! `ab-harness`; this crate only supplies the [`TestContract`]
//! implementation, page locators, and fixture paths the upload tests share.

pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ab::driver::{DriverBackend, DriverFactory, Session};
use ab::{Engine, Result, TestContract};
use async_trait::async_trait;
use tracing::debug;

/// Target site for the upload tests.
pub const BASE_URL: &str = "https://fastpic.org/";

/// Default bound for element-presence waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Bound for the upload itself; the host needs longer than a page load.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Remote image used by the upload-by-URL tests.
pub const TEST_IMAGE_URL: &str = "https://placekitten.com/800/600";

/// Path of an upload fixture under the repository `docs/` directory.
pub fn fixture_path(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("../..")
		.join("docs")
		.join(name)
}

pub fn jpg_image() -> PathBuf {
	fixture_path("test.jpg")
}

pub fn png_image() -> PathBuf {
	fixture_path("test.png")
}

pub fn gif_image() -> PathBuf {
	fixture_path("test.gif")
}

/// Suite contract for the upload tests.
///
/// Sessions are created per invocation through a [`DriverFactory`] and owned
/// by the lifecycle manager, so there is nothing to release here; `teardown`
/// exists for suites that do hold state and is a no-op for this one.
pub struct UploadSuite {
	factory: DriverFactory,
}

impl UploadSuite {
	/// Builds the suite over any backend: the real automation runtime in
	/// CI, or `ab::testkit::FakeBackend` for orchestration tests.
	pub fn new(backend: Arc<dyn DriverBackend>) -> Self {
		Self {
			factory: DriverFactory::new(backend, BASE_URL),
		}
	}
}

#[async_trait]
impl TestContract for UploadSuite {
	fn base_url(&self) -> &str {
		BASE_URL
	}

	async fn setup_session(&mut self, engine: Engine) -> Result<Session> {
		debug!(target: "ab.suite", %engine, "acquiring session");
		self.factory.create(engine).await
	}

	async fn teardown(&mut self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fixture_paths_point_into_docs() {
		assert!(jpg_image().ends_with("docs/test.jpg"));
		assert!(png_image().ends_with("docs/test.png"));
		assert!(gif_image().ends_with("docs/test.gif"));
	}
}
