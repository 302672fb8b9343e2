//! Cascading category selection.
//!
//! Each setter clears every descendant level unconditionally, so a child
//! selection can never outlive the parent it was chosen under.

use serde::{Deserialize, Serialize};

use crate::taxonomy::CategoryTaxonomy;

/// Which category levels the taxonomy demands for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredLevels {
    pub sub: bool,
    pub child: bool,
}

/// The three dependent selections. Empty string means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    main_category: String,
    sub_category: String,
    child_category: String,
}

impl CategorySelection {
    pub fn main_category(&self) -> &str {
        &self.main_category
    }

    pub fn sub_category(&self) -> &str {
        &self.sub_category
    }

    pub fn child_category(&self) -> &str {
        &self.child_category
    }

    /// Select a main category. Sub and child are cleared; a value that is not
    /// a main category leaves the selection empty.
    pub fn set_main(&mut self, taxonomy: &CategoryTaxonomy, value: &str) {
        self.main_category = if taxonomy.is_main(value) {
            value.to_string()
        } else {
            reject("main", value);
            String::new()
        };
        self.sub_category.clear();
        self.child_category.clear();
    }

    /// Select a sub-category under the current main category. Child is cleared.
    pub fn set_sub(&mut self, taxonomy: &CategoryTaxonomy, value: &str) {
        self.sub_category = if taxonomy.is_sub_of(&self.main_category, value) {
            value.to_string()
        } else {
            reject("sub", value);
            String::new()
        };
        self.child_category.clear();
    }

    /// Select a child option under the current `(main, sub)` pair.
    pub fn set_child(&mut self, taxonomy: &CategoryTaxonomy, value: &str) {
        self.child_category =
            if taxonomy.is_child_of(&self.main_category, &self.sub_category, value) {
                value.to_string()
            } else {
                reject("child", value);
                String::new()
            };
    }

    /// Rebuild a selection from stored values, dropping every level from the
    /// first one that does not fit the taxonomy.
    pub fn restore(taxonomy: &CategoryTaxonomy, main: &str, sub: &str, child: &str) -> Self {
        let mut selection = Self::default();
        selection.set_main(taxonomy, main);
        if !sub.is_empty() {
            selection.set_sub(taxonomy, sub);
        }
        if !child.is_empty() {
            selection.set_child(taxonomy, child);
        }
        selection
    }

    /// Levels below main that must be filled before the product can be saved.
    pub fn required_levels(&self, taxonomy: &CategoryTaxonomy) -> RequiredLevels {
        RequiredLevels {
            sub: !taxonomy.sub_categories_for(&self.main_category).is_empty(),
            child: !taxonomy
                .options_for(&self.main_category, &self.sub_category)
                .is_empty(),
        }
    }
}

fn reject(level: &str, value: &str) {
    if !value.is_empty() {
        log::warn!("[Category] `{}` is not a valid {} category here", value, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAXONOMY: CategoryTaxonomy = CategoryTaxonomy;

    fn chairs_selection() -> CategorySelection {
        let mut selection = CategorySelection::default();
        selection.set_main(&TAXONOMY, "living-room");
        selection.set_sub(&TAXONOMY, "chairs");
        selection.set_child(&TAXONOMY, "kids-chair");
        selection
    }

    #[test]
    fn full_path_is_accepted() {
        let selection = chairs_selection();
        assert_eq!(selection.main_category(), "living-room");
        assert_eq!(selection.sub_category(), "chairs");
        assert_eq!(selection.child_category(), "kids-chair");
    }

    #[test]
    fn changing_main_clears_descendants() {
        let mut selection = chairs_selection();
        selection.set_main(&TAXONOMY, "bedroom");
        assert_eq!(selection.main_category(), "bedroom");
        assert_eq!(selection.sub_category(), "");
        assert_eq!(selection.child_category(), "");
    }

    #[test]
    fn any_sequence_of_main_changes_leaves_descendants_empty() {
        let mut selection = chairs_selection();
        for main in ["living-room", "bedroom", "nowhere", "", "living-room"] {
            selection.set_main(&TAXONOMY, main);
            assert!(selection.sub_category().is_empty());
            assert!(selection.child_category().is_empty());
        }
    }

    #[test]
    fn reselecting_same_main_still_clears() {
        let mut selection = chairs_selection();
        selection.set_main(&TAXONOMY, "living-room");
        assert_eq!(selection.sub_category(), "");
    }

    #[test]
    fn changing_sub_clears_child() {
        let mut selection = chairs_selection();
        selection.set_sub(&TAXONOMY, "sofas");
        assert_eq!(selection.sub_category(), "sofas");
        assert_eq!(selection.child_category(), "");
    }

    #[test]
    fn invalid_values_are_not_stored() {
        let mut selection = CategorySelection::default();
        selection.set_main(&TAXONOMY, "garage");
        assert_eq!(selection.main_category(), "");

        selection.set_main(&TAXONOMY, "bedroom");
        selection.set_sub(&TAXONOMY, "chairs");
        assert_eq!(selection.sub_category(), "");

        selection.set_sub(&TAXONOMY, "wardrobes");
        selection.set_child(&TAXONOMY, "kids-chair");
        assert_eq!(selection.child_category(), "");
    }

    #[test]
    fn required_levels_follow_taxonomy() {
        let mut selection = CategorySelection::default();
        selection.set_main(&TAXONOMY, "bedroom");
        assert_eq!(
            selection.required_levels(&TAXONOMY),
            RequiredLevels {
                sub: true,
                child: false
            }
        );

        selection.set_main(&TAXONOMY, "living-room");
        selection.set_sub(&TAXONOMY, "chairs");
        assert!(selection.required_levels(&TAXONOMY).child);
    }

    #[test]
    fn restore_drops_orphaned_levels() {
        let selection = CategorySelection::restore(&TAXONOMY, "bedroom", "chairs", "kids-chair");
        assert_eq!(selection.main_category(), "bedroom");
        assert_eq!(selection.sub_category(), "");
        assert_eq!(selection.child_category(), "");

        let selection =
            CategorySelection::restore(&TAXONOMY, "living-room", "chairs", "plastic-chair");
        assert_eq!(selection.child_category(), "plastic-chair");
    }
}
