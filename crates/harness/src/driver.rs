//! Driver abstraction, engine-keyed launch profiles, and session construction.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::error::{HarnessError, Result};

/// Fixed launch configuration applied per engine.
///
/// Profiles are keyed by engine and never user-supplied per call, so a
/// launch for a given engine behaves identically across invocations.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchProfile {
	pub headless: bool,
	pub args: Vec<String>,
	pub maximize_window: bool,
	pub launch_timeout: Duration,
}

impl LaunchProfile {
	/// Returns the fixed profile for `engine`.
	pub fn for_engine(engine: Engine) -> Self {
		match engine {
			Engine::Chrome => Self {
				headless: true,
				args: vec!["--remote-allow-origins=*".to_string()],
				maximize_window: true,
				launch_timeout: Duration::from_secs(30),
			},
			// Firefox needs the sandbox/GPU flags to start reliably under
			// Wayland and in containers.
			Engine::Firefox => Self {
				headless: true,
				args: vec![
					"--no-sandbox".to_string(),
					"--disable-dev-shm-usage".to_string(),
					"--disable-gpu".to_string(),
				],
				maximize_window: true,
				launch_timeout: Duration::from_secs(30),
			},
			Engine::Edge => Self {
				headless: true,
				args: Vec::new(),
				maximize_window: true,
				launch_timeout: Duration::from_secs(30),
			},
		}
	}
}

/// A located element returned by bounded presence waits.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
	pub locator: String,
	pub text: Option<String>,
}

/// One live automation handle. Implementations wrap the concrete runtime.
#[async_trait]
pub trait DriverHandle: Send {
	/// Navigates to an absolute URL.
	async fn navigate(&mut self, url: &str) -> Result<()>;

	/// Waits up to `timeout` for an element to be present.
	///
	/// Implementations poll with a bound and fail with
	/// [`HarnessError::Timeout`] instead of blocking indefinitely.
	async fn find_element(&mut self, locator: &str, timeout: Duration) -> Result<Element>;

	/// Waits up to `timeout` for the element, then clicks it.
	async fn click(&mut self, locator: &str, timeout: Duration) -> Result<()>;

	/// Waits up to `timeout` for the element, then types `text` into it.
	async fn send_keys(&mut self, locator: &str, text: &str, timeout: Duration) -> Result<()>;

	/// Returns the current page URL.
	async fn current_url(&mut self) -> Result<String>;

	/// Maximizes the window as part of post-launch setup.
	async fn maximize_window(&mut self) -> Result<()>;

	/// Releases the underlying native resources.
	async fn quit(&mut self) -> Result<()>;
}

/// Starts automation runtimes for requested engines.
#[async_trait]
pub trait DriverBackend: Send + Sync {
	/// Launches the runtime for `engine` with the given fixed profile.
	///
	/// Fails with [`HarnessError::Launch`] when the runtime cannot be
	/// started (binary missing, incompatible version, OS-level failure).
	async fn launch(&self, engine: Engine, profile: &LaunchProfile) -> Result<Box<dyn DriverHandle>>;
}

/// One automation session, bound to exactly one test invocation.
///
/// A session is exclusively owned for the duration of its invocation and is
/// released when the invocation ends, regardless of outcome. It never
/// outlives the invocation and is never shared across invocations.
pub struct Session {
	engine: Engine,
	handle: Box<dyn DriverHandle>,
	base_url: String,
	released: bool,
}

impl Session {
	pub fn engine(&self) -> Engine {
		self.engine
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub async fn navigate(&mut self, url: &str) -> Result<()> {
		debug!(target: "ab.session", engine = %self.engine, %url, "navigate");
		self.handle.navigate(url).await
	}

	/// Bounded presence wait; expires with [`HarnessError::Timeout`].
	pub async fn find_element(&mut self, locator: &str, timeout: Duration) -> Result<Element> {
		self.handle.find_element(locator, timeout).await
	}

	/// Bounded wait for the element, then a click.
	pub async fn click(&mut self, locator: &str, timeout: Duration) -> Result<()> {
		debug!(target: "ab.session", engine = %self.engine, %locator, "click");
		self.handle.click(locator, timeout).await
	}

	/// Bounded wait for the element, then keystrokes.
	pub async fn send_keys(&mut self, locator: &str, text: &str, timeout: Duration) -> Result<()> {
		debug!(target: "ab.session", engine = %self.engine, %locator, "send keys");
		self.handle.send_keys(locator, text, timeout).await
	}

	pub async fn current_url(&mut self) -> Result<String> {
		self.handle.current_url().await
	}

	/// Releases the handle. Calling it again is a no-op.
	pub async fn quit(&mut self) -> Result<()> {
		if self.released {
			return Ok(());
		}
		self.released = true;
		debug!(target: "ab.session", engine = %self.engine, "quit");
		self.handle.quit().await
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("engine", &self.engine)
			.field("base_url", &self.base_url)
			.field("released", &self.released)
			.finish()
	}
}

/// Constructs sessions by applying engine-keyed profiles to a backend.
#[derive(Clone)]
pub struct DriverFactory {
	backend: Arc<dyn DriverBackend>,
	base_url: String,
	launch_timeout: Option<Duration>,
}

impl DriverFactory {
	pub fn new(backend: Arc<dyn DriverBackend>, base_url: impl Into<String>) -> Self {
		Self {
			backend,
			base_url: base_url.into(),
			launch_timeout: None,
		}
	}

	/// Overrides the profile's launch bound for every engine.
	pub fn with_launch_timeout(mut self, launch_timeout: Duration) -> Self {
		self.launch_timeout = Some(launch_timeout);
		self
	}

	/// Launches a session for `engine`, bounded by the profile's launch
	/// timeout (or the factory override).
	///
	/// A launch that outlives the bound fails with
	/// [`HarnessError::Timeout`]. If post-launch setup fails, the handle
	/// obtained up to that point is quit before the
	/// [`HarnessError::Launch`] error is surfaced, so a failed create never
	/// leaks a running runtime.
	pub async fn create(&self, engine: Engine) -> Result<Session> {
		let profile = LaunchProfile::for_engine(engine);
		let bound = self.launch_timeout.unwrap_or(profile.launch_timeout);
		debug!(target: "ab.driver", %engine, args = ?profile.args, timeout_ms = bound.as_millis() as u64, "launching");
		let mut handle = match timeout(bound, self.backend.launch(engine, &profile)).await {
			Ok(launched) => launched?,
			Err(_) => {
				return Err(HarnessError::Timeout {
					ms: bound.as_millis() as u64,
					condition: format!("launch of {engine}"),
				});
			}
		};

		if profile.maximize_window {
			if let Err(err) = handle.maximize_window().await {
				warn!(target: "ab.driver", %engine, error = %err, "post-launch setup failed; releasing handle");
				if let Err(quit_err) = handle.quit().await {
					warn!(target: "ab.driver", %engine, error = %quit_err, "release after failed setup also failed");
				}
				return Err(HarnessError::Launch {
					engine,
					message: format!("window setup failed: {err}"),
				});
			}
		}

		Ok(Session {
			engine,
			handle,
			base_url: self.base_url.clone(),
			released: false,
		})
	}

	/// Resolves `name` against the catalog, then launches.
	///
	/// Names outside the closed catalog fail with
	/// [`HarnessError::UnsupportedEngine`] before any runtime is touched.
	pub async fn create_named(&self, name: &str) -> Result<Session> {
		let engine: Engine = name.parse()?;
		self.create(engine).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testkit::FakeBackend;

	fn factory(backend: &FakeBackend) -> DriverFactory {
		DriverFactory::new(Arc::new(backend.clone()), "https://fastpic.org")
	}

	#[test]
	fn profiles_are_deterministic_per_engine() {
		assert_eq!(LaunchProfile::for_engine(Engine::Chrome), LaunchProfile::for_engine(Engine::Chrome));
		assert!(
			LaunchProfile::for_engine(Engine::Firefox)
				.args
				.contains(&"--no-sandbox".to_string())
		);
	}

	#[tokio::test]
	async fn unknown_engine_name_fails_before_launch() {
		let backend = FakeBackend::new();
		let err = factory(&backend).create_named("safari").await.unwrap_err();
		assert!(matches!(err, HarnessError::UnsupportedEngine { name } if name == "safari"));
		assert!(backend.launches().is_empty());
	}

	#[tokio::test]
	async fn create_named_resolves_catalog_names() {
		let backend = FakeBackend::new();
		let session = factory(&backend).create_named("edge").await.unwrap();
		assert_eq!(session.engine(), Engine::Edge);
		assert_eq!(session.base_url(), "https://fastpic.org");
	}

	#[tokio::test]
	async fn hung_launch_is_bounded_by_the_launch_timeout() {
		let backend = FakeBackend::new();
		backend.hang_launch(Engine::Chrome);
		let factory = factory(&backend).with_launch_timeout(Duration::from_millis(50));
		let err = factory.create(Engine::Chrome).await.unwrap_err();
		assert!(err.is_timeout(), "{err}");
		// The attempt reached the backend but never produced a handle.
		assert_eq!(backend.launch_profiles().len(), 1);
		assert!(backend.launches().is_empty());
	}

	#[tokio::test]
	async fn backend_receives_the_engine_keyed_profile() {
		let backend = FakeBackend::new();
		factory(&backend).create(Engine::Firefox).await.unwrap();
		assert_eq!(
			backend.launch_profiles(),
			vec![(Engine::Firefox, LaunchProfile::for_engine(Engine::Firefox))]
		);
	}

	#[tokio::test]
	async fn launch_failure_surfaces_as_launch_error() {
		let backend = FakeBackend::new();
		backend.fail_launch(Engine::Firefox);
		let err = factory(&backend).create(Engine::Firefox).await.unwrap_err();
		assert!(matches!(err, HarnessError::Launch { engine: Engine::Firefox, .. }));
	}

	#[tokio::test]
	async fn failed_window_setup_releases_handle_before_erroring() {
		let backend = FakeBackend::new();
		backend.fail_window_setup(Engine::Chrome);
		let err = factory(&backend).create(Engine::Chrome).await.unwrap_err();
		assert!(matches!(err, HarnessError::Launch { engine: Engine::Chrome, .. }));
		// The half-constructed handle must be gone already.
		assert_eq!(backend.total_quits(), 1);
	}

	#[tokio::test]
	async fn session_quit_is_idempotent() {
		let backend = FakeBackend::new();
		let mut session = factory(&backend).create(Engine::Chrome).await.unwrap();
		session.quit().await.unwrap();
		session.quit().await.unwrap();
		assert_eq!(backend.total_quits(), 1);
	}
}
