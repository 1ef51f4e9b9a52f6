//! Per-invocation session lifecycle orchestration.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::contract::TestContract;
use crate::declaration::TestDeclaration;
use crate::driver::Session;
use crate::engine::Engine;
use crate::error::{HarnessError, Result};
use crate::selector::select;

/// States an invocation passes through, in order. Navigation is optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationState {
	Pending,
	SessionAcquired,
	Navigated,
	Running,
	TornDown,
}

/// Context threaded into the test body for one invocation.
///
/// Carries the resolved engine and its session explicitly. The body never
/// has to recover either from the rendered display name, where engines
/// sharing name fragments are indistinguishable.
pub struct Invocation<'i> {
	engine: Engine,
	index: usize,
	display_name: &'i str,
	session: &'i mut Session,
}

impl<'i> Invocation<'i> {
	pub fn engine(&self) -> Engine {
		self.engine
	}

	/// Zero-based position of this invocation within its declaration.
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn display_name(&self) -> &str {
		self.display_name
	}

	/// The session bound to this invocation, and to no other.
	pub fn session(&mut self) -> &mut Session {
		self.session
	}
}

/// Outcome of one (test, engine) invocation.
#[derive(Debug)]
pub struct InvocationReport {
	pub engine: Engine,
	pub display_name: String,
	/// Terminal lifecycle state. Teardown is unconditional, so this is
	/// [`InvocationState::TornDown`] on every exit path.
	pub state: InvocationState,
	pub outcome: Result<()>,
}

impl InvocationReport {
	pub fn passed(&self) -> bool {
		self.outcome.is_ok()
	}
}

/// Bounds for the blocking operations the manager itself performs.
#[derive(Clone, Debug)]
pub struct LifecycleConfig {
	/// Upper bound for the automatic pre-body navigation.
	pub navigation_timeout: Duration,
}

impl Default for LifecycleConfig {
	fn default() -> Self {
		Self {
			navigation_timeout: Duration::from_secs(30),
		}
	}
}

/// Test body: borrows the invocation context for the whole run.
pub type TestBody<'i> = BoxFuture<'i, anyhow::Result<()>>;

/// Binds one session to each (test, engine) invocation and guarantees its
/// release.
///
/// Per invocation: resolve the engine, acquire a session through the
/// contract, optionally navigate to the declared or base URL, run the body,
/// then release the session and call [`TestContract::teardown`] on normal
/// completion, on assertion failure, and on any error raised along the way.
pub struct SessionLifecycleManager {
	config: LifecycleConfig,
}

impl Default for SessionLifecycleManager {
	fn default() -> Self {
		Self::new()
	}
}

impl SessionLifecycleManager {
	pub fn new() -> Self {
		Self::with_config(LifecycleConfig::default())
	}

	pub fn with_config(config: LifecycleConfig) -> Self {
		Self { config }
	}

	/// Runs `body` once per engine selected by `declaration`.
	///
	/// Invocations execute to completion sequentially and are independent:
	/// a failure for one engine (launch failure included) never prevents
	/// the remaining engines from running. One report is returned per
	/// engine, in catalog order.
	pub async fn run<C, F>(&self, contract: &mut C, declaration: &TestDeclaration, body: F) -> Vec<InvocationReport>
	where
		C: TestContract,
		F: for<'i> Fn(Invocation<'i>) -> TestBody<'i>,
	{
		let mut reports = Vec::new();
		for (index, engine) in select(declaration).into_iter().enumerate() {
			reports.push(self.run_invocation(contract, declaration, engine, index, &body).await);
		}
		reports
	}

	/// Runs a single invocation through the full state machine.
	pub async fn run_invocation<C, F>(
		&self,
		contract: &mut C,
		declaration: &TestDeclaration,
		engine: Engine,
		index: usize,
		body: &F,
	) -> InvocationReport
	where
		C: TestContract,
		F: for<'i> Fn(Invocation<'i>) -> TestBody<'i>,
	{
		let display_name = declaration.display_name(index, engine);
		let mut state = InvocationState::Pending;
		let mut slot: Option<Session> = None;

		debug!(target: "ab.lifecycle", %engine, name = %display_name, state = ?state, "invocation begin");
		let outcome = self
			.drive(contract, declaration, engine, index, &display_name, &mut slot, &mut state, body)
			.await;

		// Scoped release: runs on every exit path, including setup and
		// navigation failures and body timeouts. Release errors never mask
		// the body outcome.
		if let Some(mut session) = slot.take() {
			if let Err(err) = session.quit().await {
				warn!(target: "ab.lifecycle", %engine, error = %err, "session release failed");
			}
		}
		contract.teardown().await;
		state = InvocationState::TornDown;

		match &outcome {
			Ok(()) => debug!(target: "ab.lifecycle", %engine, name = %display_name, state = ?state, "invocation passed"),
			Err(err) => {
				debug!(target: "ab.lifecycle", %engine, name = %display_name, state = ?state, error = %err, "invocation failed")
			}
		}

		InvocationReport {
			engine,
			display_name,
			state,
			outcome,
		}
	}

	/// Setup, optional navigation, and body execution. Session ownership is
	/// parked in `slot` so the caller can release it on every exit path.
	async fn drive<C, F>(
		&self,
		contract: &mut C,
		declaration: &TestDeclaration,
		engine: Engine,
		index: usize,
		display_name: &str,
		slot: &mut Option<Session>,
		state: &mut InvocationState,
		body: &F,
	) -> Result<()>
	where
		C: TestContract,
		F: for<'i> Fn(Invocation<'i>) -> TestBody<'i>,
	{
		let session = slot.insert(contract.setup_session(engine).await?);
		*state = InvocationState::SessionAcquired;
		debug!(target: "ab.lifecycle", %engine, state = ?*state, "session acquired");

		let target = match declaration.url() {
			Some(url) => Some(url.to_string()),
			None if !contract.base_url().is_empty() => Some(contract.base_url().to_string()),
			None => None,
		};
		if let Some(url) = target {
			let bound = self.config.navigation_timeout;
			match timeout(bound, session.navigate(&url)).await {
				Ok(result) => result?,
				Err(_) => {
					return Err(HarnessError::Timeout {
						ms: bound.as_millis() as u64,
						condition: format!("navigation to {url}"),
					});
				}
			}
			*state = InvocationState::Navigated;
			debug!(target: "ab.lifecycle", %engine, %url, state = ?*state, "navigated");
		}

		*state = InvocationState::Running;
		debug!(target: "ab.lifecycle", %engine, state = ?*state, "running body");
		let invocation = Invocation {
			engine,
			index,
			display_name,
			session,
		};
		body(invocation).await.map_err(HarnessError::Body)?;
		Ok(())
	}
}
