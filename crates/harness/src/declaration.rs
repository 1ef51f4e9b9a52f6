//! Static per-test metadata describing engine targeting and launch behavior.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::engine::Engine;
use crate::error::{HarnessError, Result};

/// Default display-name template: invocation index plus engine name.
pub const DEFAULT_DISPLAY_NAME_TEMPLATE: &str = "[{index}] {engine}";

/// Immutable declaration attached to a test at registration time.
///
/// Read by the selector (to expand the engine set) and by the lifecycle
/// manager (for the auto-opened URL and display names); never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestDeclaration {
	/// Explicit engine set. Empty means unconstrained: run on everything.
	#[serde(default)]
	engines: Vec<Engine>,
	/// When true, `engines` lists exclusions instead of inclusions.
	#[serde(default)]
	exclude: bool,
	/// URL opened before the body runs; falls back to the contract base URL.
	#[serde(default)]
	url: Option<Url>,
	/// Template rendered once per invocation.
	#[serde(default = "default_template")]
	display_name_template: String,
}

fn default_template() -> String {
	DEFAULT_DISPLAY_NAME_TEMPLATE.to_string()
}

impl Default for TestDeclaration {
	fn default() -> Self {
		Self::new()
	}
}

impl TestDeclaration {
	/// Creates an unconstrained declaration: every engine, no auto URL.
	pub fn new() -> Self {
		Self {
			engines: Vec::new(),
			exclude: false,
			url: None,
			display_name_template: default_template(),
		}
	}

	/// Sets the explicit engine set. Duplicates are dropped, first mention wins.
	pub fn with_engines(mut self, engines: impl IntoIterator<Item = Engine>) -> Self {
		self.engines.clear();
		for engine in engines {
			if !self.engines.contains(&engine) {
				self.engines.push(engine);
			}
		}
		self
	}

	/// Flips the engine set from inclusion to exclusion semantics.
	pub fn with_exclude(mut self, exclude: bool) -> Self {
		self.exclude = exclude;
		self
	}

	/// Sets the URL opened automatically before the body runs.
	///
	/// The URL must be absolute; relative or malformed input fails with
	/// [`HarnessError::InvalidDeclaration`].
	pub fn with_url(mut self, url: &str) -> Result<Self> {
		let parsed = Url::parse(url)
			.map_err(|e| HarnessError::InvalidDeclaration(format!("url `{url}`: {e}")))?;
		self.url = Some(parsed);
		Ok(self)
	}

	/// Sets the display-name template. `{index}` and `{engine}` are substituted.
	pub fn with_display_name_template(mut self, template: impl Into<String>) -> Self {
		self.display_name_template = template.into();
		self
	}

	pub fn engines(&self) -> &[Engine] {
		&self.engines
	}

	pub fn exclude(&self) -> bool {
		self.exclude
	}

	pub fn url(&self) -> Option<&Url> {
		self.url.as_ref()
	}

	pub fn display_name_template(&self) -> &str {
		&self.display_name_template
	}

	/// Renders the display name for one invocation.
	///
	/// Purely cosmetic: nothing in the harness recovers the engine from this
	/// string, the engine always travels in the invocation context.
	pub fn display_name(&self, index: usize, engine: Engine) -> String {
		self.display_name_template
			.replace("{index}", &index.to_string())
			.replace("{engine}", engine.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_unconstrained() {
		let decl = TestDeclaration::new();
		assert!(decl.engines().is_empty());
		assert!(!decl.exclude());
		assert!(decl.url().is_none());
		assert_eq!(decl.display_name_template(), DEFAULT_DISPLAY_NAME_TEMPLATE);
	}

	#[test]
	fn duplicate_engines_are_dropped() {
		let decl = TestDeclaration::new().with_engines([Engine::Edge, Engine::Chrome, Engine::Edge]);
		assert_eq!(decl.engines(), &[Engine::Edge, Engine::Chrome]);
	}

	#[test]
	fn relative_url_is_rejected() {
		let err = TestDeclaration::new().with_url("/upload").unwrap_err();
		assert!(matches!(err, HarnessError::InvalidDeclaration(_)));
	}

	#[test]
	fn absolute_url_is_kept_verbatim() {
		let decl = TestDeclaration::new().with_url("https://fastpic.org/").unwrap();
		assert_eq!(decl.url().unwrap().as_str(), "https://fastpic.org/");
	}

	#[test]
	fn display_name_substitutes_index_and_engine() {
		let decl = TestDeclaration::new().with_display_name_template("main page in {engine} #{index}");
		assert_eq!(decl.display_name(2, Engine::Firefox), "main page in firefox #2");
	}

	#[test]
	fn display_name_is_stable_for_identical_inputs() {
		let decl = TestDeclaration::new();
		assert_eq!(decl.display_name(0, Engine::Chrome), decl.display_name(0, Engine::Chrome));
	}

	#[test]
	fn serde_round_trip() {
		let decl = TestDeclaration::new()
			.with_engines([Engine::Firefox])
			.with_exclude(true)
			.with_url("https://fastpic.org/")
			.unwrap();
		let json = serde_json::to_string(&decl).unwrap();
		let back: TestDeclaration = serde_json::from_str(&json).unwrap();
		assert_eq!(back, decl);
	}

	#[test]
	fn missing_fields_deserialize_to_defaults() {
		let decl: TestDeclaration = serde_json::from_str("{}").unwrap();
		assert_eq!(decl, TestDeclaration::new());
	}
}
