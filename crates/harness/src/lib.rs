//! Declarative cross-engine test orchestration.
//!
//! One test body runs unmodified against a configurable subset of browser
//! engines. A [`TestDeclaration`] attached at registration time names the
//! engine set (inclusion or exclusion) and an optional auto-opened URL;
//! [`selector::select`] expands it into concrete engines in catalog order;
//! [`SessionLifecycleManager`] then binds exactly one automation
//! [`Session`] to each (test, engine) invocation and guarantees its release
//! on every exit path.
//!
//! The concrete automation runtime stays behind the [`DriverBackend`] /
//! [`DriverHandle`] traits; [`testkit`] ships a scriptable in-memory
//! implementation for suites that want to exercise orchestration without
//! spawning browsers.
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use ab::testkit::{FakeBackend, RecordingContract};
//! use ab::{Engine, SessionLifecycleManager, TestDeclaration};
//! use futures::FutureExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = FakeBackend::new();
//!     backend.put_element("//input[@type='file']", "");
//!
//!     let mut contract = RecordingContract::new(backend, "https://fastpic.org/");
//!     let declaration = TestDeclaration::new().with_engines([Engine::Firefox]).with_exclude(true);
//!
//!     let reports = SessionLifecycleManager::new()
//!         .run(&mut contract, &declaration, |mut inv| {
//!             async move {
//!                 inv.session().find_element("//input[@type='file']", std::time::Duration::from_secs(3)).await?;
//!                 Ok(())
//!             }
//!             .boxed()
//!         })
//!         .await;
//!
//!     assert!(reports.iter().all(|r| r.passed()));
//!     Ok(())
//! }
//! ```

pub mod contract;
pub mod declaration;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod selector;
pub mod testkit;

pub use contract::TestContract;
pub use declaration::{DEFAULT_DISPLAY_NAME_TEMPLATE, TestDeclaration};
pub use driver::{DriverBackend, DriverFactory, DriverHandle, Element, LaunchProfile, Session};
pub use engine::{CATALOG, Engine};
pub use error::{HarnessError, Result};
pub use lifecycle::{
	Invocation, InvocationReport, InvocationState, LifecycleConfig, SessionLifecycleManager, TestBody,
};
