//! Pure expansion of a declaration into the concrete engine set.

use crate::declaration::TestDeclaration;
use crate::engine::Engine;

/// Expands `declaration` into the engines it runs on, in catalog order.
///
/// An empty engine set is unconstrained: it selects the full catalog even
/// when `exclude` is set, so an empty exclusion can never exclude
/// everything. The result is deterministic for identical inputs and always
/// a subset of the catalog; it is empty only when a non-empty inclusion-
/// flipped set covers the whole catalog.
pub fn select(declaration: &TestDeclaration) -> Vec<Engine> {
	let catalog = Engine::all();
	if declaration.engines().is_empty() {
		return catalog.to_vec();
	}

	catalog
		.iter()
		.copied()
		.filter(|engine| declaration.exclude() != declaration.engines().contains(engine))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_set_selects_full_catalog() {
		let decl = TestDeclaration::new();
		assert_eq!(select(&decl), Engine::all());
	}

	#[test]
	fn empty_set_with_exclude_still_selects_full_catalog() {
		let decl = TestDeclaration::new().with_exclude(true);
		assert_eq!(select(&decl), Engine::all());
	}

	#[test]
	fn inclusion_filters_to_membership() {
		let decl = TestDeclaration::new().with_engines([Engine::Edge]);
		assert_eq!(select(&decl), vec![Engine::Edge]);
	}

	#[test]
	fn exclusion_removes_membership_preserving_order() {
		let decl = TestDeclaration::new().with_engines([Engine::Firefox]).with_exclude(true);
		assert_eq!(select(&decl), vec![Engine::Chrome, Engine::Edge]);
	}

	#[test]
	fn inclusion_order_follows_catalog_not_declaration() {
		let decl = TestDeclaration::new().with_engines([Engine::Edge, Engine::Chrome]);
		assert_eq!(select(&decl), vec![Engine::Chrome, Engine::Edge]);
	}

	#[test]
	fn excluding_whole_catalog_yields_empty_set() {
		let decl = TestDeclaration::new()
			.with_engines([Engine::Chrome, Engine::Firefox, Engine::Edge])
			.with_exclude(true);
		assert!(select(&decl).is_empty());
	}

	#[test]
	fn selection_is_deterministic() {
		let decl = TestDeclaration::new().with_engines([Engine::Firefox, Engine::Edge]);
		assert_eq!(select(&decl), select(&decl));
	}
}
