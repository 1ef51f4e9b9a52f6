//! Closed catalog of supported browser engines.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Browser engine a test can target.
///
/// The declaration order is the canonical catalog order: selector results
/// and "all engines" expansions always follow it, so generated display
/// names stay reproducible run to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
	Chrome,
	Firefox,
	Edge,
}

/// Full catalog in canonical order.
pub const CATALOG: [Engine; 3] = [Engine::Chrome, Engine::Firefox, Engine::Edge];

impl Engine {
	/// Returns every supported engine in stable catalog order.
	pub fn all() -> &'static [Engine] {
		&CATALOG
	}

	/// Lowercase engine name used in display names and configuration.
	pub fn name(self) -> &'static str {
		match self {
			Engine::Chrome => "chrome",
			Engine::Firefox => "firefox",
			Engine::Edge => "edge",
		}
	}
}

impl std::fmt::Display for Engine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl std::str::FromStr for Engine {
	type Err = HarnessError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"chrome" => Ok(Engine::Chrome),
			"firefox" => Ok(Engine::Firefox),
			"edge" => Ok(Engine::Edge),
			_ => Err(HarnessError::UnsupportedEngine { name: s.to_string() }),
		}
	}
}
