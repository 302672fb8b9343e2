//! Static furniture category taxonomy.
//!
//! Three levels: main category -> sub-category -> child options. Lookups
//! never fail; an unknown key simply has no further choices.

/// `(sub_category, child options)` pairs under one main category.
type SubTable = &'static [(&'static str, &'static [&'static str])];

const TAXONOMY: &[(&str, SubTable)] = &[
    (
        "living-room",
        &[("chairs", &["kids-chair", "plastic-chair"]), ("sofas", &[])],
    ),
    ("bedroom", &[("wardrobes", &[])]),
];

/// Read-only view of the category table. Zero-sized; copy it freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTaxonomy;

impl CategoryTaxonomy {
    /// Main categories in display order.
    pub fn main_categories(&self) -> Vec<&'static str> {
        TAXONOMY.iter().map(|(main, _)| *main).collect()
    }

    /// Sub-category keys under `main`, in display order. Empty if unknown.
    pub fn sub_categories_for(&self, main: &str) -> Vec<&'static str> {
        self.sub_table(main)
            .map(|subs| subs.iter().map(|(sub, _)| *sub).collect())
            .unwrap_or_default()
    }

    /// Child options for `(main, sub)`. Empty when the pair has no further
    /// nesting or either key is unknown.
    pub fn options_for(&self, main: &str, sub: &str) -> &'static [&'static str] {
        self.sub_table(main)
            .and_then(|subs| subs.iter().find(|(key, _)| *key == sub))
            .map(|(_, children)| *children)
            .unwrap_or(&[])
    }

    pub fn is_main(&self, main: &str) -> bool {
        self.sub_table(main).is_some()
    }

    pub fn is_sub_of(&self, main: &str, sub: &str) -> bool {
        self.sub_table(main)
            .is_some_and(|subs| subs.iter().any(|(key, _)| *key == sub))
    }

    pub fn is_child_of(&self, main: &str, sub: &str, child: &str) -> bool {
        self.options_for(main, sub).contains(&child)
    }

    fn sub_table(&self, main: &str) -> Option<SubTable> {
        TAXONOMY
            .iter()
            .find(|(key, _)| *key == main)
            .map(|(_, subs)| *subs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn living_room_chairs_have_two_children_in_order() {
        let taxonomy = CategoryTaxonomy;
        assert_eq!(
            taxonomy.options_for("living-room", "chairs"),
            &["kids-chair", "plastic-chair"]
        );
    }

    #[test]
    fn leaf_sub_categories_have_no_children() {
        let taxonomy = CategoryTaxonomy;
        assert!(taxonomy.options_for("bedroom", "wardrobes").is_empty());
        assert!(taxonomy.options_for("living-room", "sofas").is_empty());
    }

    #[test]
    fn unknown_pairs_yield_empty_lists() {
        let taxonomy = CategoryTaxonomy;
        let pairs = [
            ("kitchen", "chairs"),
            ("bedroom", "chairs"),
            ("living-room", "wardrobes"),
            ("", ""),
            ("living-room", ""),
        ];
        for (main, sub) in pairs {
            assert!(
                taxonomy.options_for(main, sub).is_empty(),
                "{main}/{sub} should have no options"
            );
        }
        assert!(taxonomy.sub_categories_for("garage").is_empty());
    }

    #[test]
    fn sub_categories_follow_table_order() {
        let taxonomy = CategoryTaxonomy;
        assert_eq!(
            taxonomy.sub_categories_for("living-room"),
            vec!["chairs", "sofas"]
        );
        assert_eq!(taxonomy.main_categories(), vec!["living-room", "bedroom"]);
    }

    #[test]
    fn membership_checks() {
        let taxonomy = CategoryTaxonomy;
        assert!(taxonomy.is_main("bedroom"));
        assert!(!taxonomy.is_main("chairs"));
        assert!(taxonomy.is_sub_of("living-room", "sofas"));
        assert!(!taxonomy.is_sub_of("bedroom", "sofas"));
        assert!(taxonomy.is_child_of("living-room", "chairs", "kids-chair"));
        assert!(!taxonomy.is_child_of("living-room", "sofas", "kids-chair"));
    }
}
