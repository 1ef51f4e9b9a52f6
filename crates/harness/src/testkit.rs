//! Trait-based test doubles for driving the harness without real browsers.
//!
//! Exposed from the library rather than behind `cfg(test)` so downstream
//! suites can run whole declarations against a scriptable backend:
//! [`FakeBackend`] stands in for the automation runtime, and
//! [`RecordingContract`] is a [`TestContract`] that counts lifecycle calls.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::contract::TestContract;
use crate::driver::{DriverBackend, DriverFactory, DriverHandle, Element, LaunchProfile, Session};
use crate::engine::Engine;
use crate::error::{HarnessError, Result};

#[derive(Default)]
struct FakeState {
	next_handle_id: u64,
	launches: Vec<Engine>,
	launch_profiles: Vec<(Engine, LaunchProfile)>,
	fail_launch: Vec<Engine>,
	fail_window_setup: Vec<Engine>,
	hang_launch: Vec<Engine>,
	hang_navigation: Vec<Engine>,
	quits: HashMap<u64, u32>,
	navigations: HashMap<u64, Vec<String>>,
	clicks: HashMap<u64, Vec<String>>,
	inputs: HashMap<u64, Vec<(String, String)>>,
	elements: HashMap<String, String>,
}

/// Scriptable in-memory automation backend.
///
/// Clones share state, so a test can keep a handle for scripting and
/// assertions while the factory owns another.
#[derive(Clone, Default)]
pub struct FakeBackend {
	state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Scripts launch to fail for `engine`.
	pub fn fail_launch(&self, engine: Engine) {
		self.state.lock().fail_launch.push(engine);
	}

	/// Scripts post-launch window setup to fail for `engine`.
	pub fn fail_window_setup(&self, engine: Engine) {
		self.state.lock().fail_window_setup.push(engine);
	}

	/// Scripts launch to never complete for `engine`.
	pub fn hang_launch(&self, engine: Engine) {
		self.state.lock().hang_launch.push(engine);
	}

	/// Scripts navigation to never complete for `engine`.
	pub fn hang_navigation(&self, engine: Engine) {
		self.state.lock().hang_navigation.push(engine);
	}

	/// Registers an element every fake page exposes.
	pub fn put_element(&self, locator: &str, text: &str) {
		self.state.lock().elements.insert(locator.to_string(), text.to_string());
	}

	/// Engines successfully launched so far, in order.
	pub fn launches(&self) -> Vec<Engine> {
		self.state.lock().launches.clone()
	}

	/// Profiles seen by launch attempts, in order (failed attempts included).
	pub fn launch_profiles(&self) -> Vec<(Engine, LaunchProfile)> {
		self.state.lock().launch_profiles.clone()
	}

	/// Total quit calls across all handles.
	pub fn total_quits(&self) -> u32 {
		self.state.lock().quits.values().sum()
	}

	/// Navigation log of the `nth` launched handle.
	pub fn navigations(&self, nth: u64) -> Vec<String> {
		self.state.lock().navigations.get(&nth).cloned().unwrap_or_default()
	}

	/// Click log of the `nth` launched handle.
	pub fn clicks(&self, nth: u64) -> Vec<String> {
		self.state.lock().clicks.get(&nth).cloned().unwrap_or_default()
	}

	/// Keystroke log of the `nth` launched handle, as (locator, text) pairs.
	pub fn inputs(&self, nth: u64) -> Vec<(String, String)> {
		self.state.lock().inputs.get(&nth).cloned().unwrap_or_default()
	}
}

#[async_trait]
impl DriverBackend for FakeBackend {
	async fn launch(&self, engine: Engine, profile: &LaunchProfile) -> Result<Box<dyn DriverHandle>> {
		let handle = {
			let mut state = self.state.lock();
			state.launch_profiles.push((engine, profile.clone()));
			if state.fail_launch.contains(&engine) {
				return Err(HarnessError::Launch {
					engine,
					message: "scripted launch failure".to_string(),
				});
			}
			if state.hang_launch.contains(&engine) {
				None
			} else {
				let id = state.next_handle_id;
				state.next_handle_id += 1;
				state.launches.push(engine);
				let fail_window_setup = state.fail_window_setup.contains(&engine);
				let hang_navigation = state.hang_navigation.contains(&engine);
				Some(FakeHandle {
					id,
					engine,
					current_url: "about:blank".to_string(),
					released: false,
					fail_window_setup,
					hang_navigation,
					state: Arc::clone(&self.state),
				})
			}
		};

		match handle {
			Some(handle) => Ok(Box::new(handle)),
			None => futures::future::pending().await,
		}
	}
}

/// Handle produced by [`FakeBackend`]; keeps navigation state per handle.
struct FakeHandle {
	id: u64,
	engine: Engine,
	current_url: String,
	released: bool,
	fail_window_setup: bool,
	hang_navigation: bool,
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl DriverHandle for FakeHandle {
	async fn navigate(&mut self, url: &str) -> Result<()> {
		if self.released {
			return Err(HarnessError::Navigation {
				url: url.to_string(),
				source: anyhow::anyhow!("handle already released"),
			});
		}
		if self.hang_navigation {
			futures::future::pending::<()>().await;
		}
		self.current_url = url.to_string();
		self.state.lock().navigations.entry(self.id).or_default().push(url.to_string());
		Ok(())
	}

	async fn find_element(&mut self, locator: &str, timeout: Duration) -> Result<Element> {
		let text = self.state.lock().elements.get(locator).cloned();
		match text {
			Some(text) => Ok(Element {
				locator: locator.to_string(),
				text: Some(text),
			}),
			None => Err(HarnessError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: format!("element {locator}"),
			}),
		}
	}

	async fn click(&mut self, locator: &str, timeout: Duration) -> Result<()> {
		let mut state = self.state.lock();
		if !state.elements.contains_key(locator) {
			return Err(HarnessError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: format!("element {locator}"),
			});
		}
		state.clicks.entry(self.id).or_default().push(locator.to_string());
		Ok(())
	}

	async fn send_keys(&mut self, locator: &str, text: &str, timeout: Duration) -> Result<()> {
		let mut state = self.state.lock();
		if !state.elements.contains_key(locator) {
			return Err(HarnessError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: format!("element {locator}"),
			});
		}
		state.inputs.entry(self.id).or_default().push((locator.to_string(), text.to_string()));
		Ok(())
	}

	async fn current_url(&mut self) -> Result<String> {
		Ok(self.current_url.clone())
	}

	async fn maximize_window(&mut self) -> Result<()> {
		if self.fail_window_setup {
			return Err(HarnessError::Launch {
				engine: self.engine,
				message: "scripted window setup failure".to_string(),
			});
		}
		Ok(())
	}

	async fn quit(&mut self) -> Result<()> {
		self.released = true;
		*self.state.lock().quits.entry(self.id).or_insert(0) += 1;
		Ok(())
	}
}

/// Contract double that acquires sessions from a [`DriverFactory`] over a
/// fake backend and counts lifecycle calls.
pub struct RecordingContract {
	factory: DriverFactory,
	base_url: String,
	refuse_sessions: bool,
	setup_calls: u32,
	teardown_calls: u32,
}

impl RecordingContract {
	/// Builds a contract over `backend`. An empty `base_url` skips the
	/// automatic navigation step.
	pub fn new(backend: FakeBackend, base_url: impl Into<String>) -> Self {
		let base_url = base_url.into();
		Self {
			factory: DriverFactory::new(Arc::new(backend), base_url.clone()),
			base_url,
			refuse_sessions: false,
			setup_calls: 0,
			teardown_calls: 0,
		}
	}

	/// Scripts `setup_session` to fail with
	/// [`HarnessError::SessionUnavailable`], modeling suites whose setup
	/// completes without producing a usable session.
	pub fn refuse_sessions(&mut self) {
		self.refuse_sessions = true;
	}

	pub fn setup_calls(&self) -> u32 {
		self.setup_calls
	}

	pub fn teardown_calls(&self) -> u32 {
		self.teardown_calls
	}
}

#[async_trait]
impl TestContract for RecordingContract {
	fn base_url(&self) -> &str {
		&self.base_url
	}

	async fn setup_session(&mut self, engine: Engine) -> Result<Session> {
		self.setup_calls += 1;
		if self.refuse_sessions {
			return Err(HarnessError::SessionUnavailable { engine });
		}
		self.factory.create(engine).await
	}

	async fn teardown(&mut self) {
		self.teardown_calls += 1;
	}
}
