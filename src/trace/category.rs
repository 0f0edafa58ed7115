use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub color: &'static str,
    pub subcategories: &'static [&'static str],
}

/// Fixed vocabulary; a category's id is its position.
pub const CATEGORIES: [Category; 5] = [
    Category {
        name: "none",
        color: "grey",
        subcategories: &["Other"],
    },
    Category {
        name: "fetches",
        color: "purple",
        subcategories: &["Other"],
    },
    Category {
        name: "vcs",
        color: "orange",
        subcategories: &["Other"],
    },
    Category {
        name: "setup",
        color: "lightblue",
        subcategories: &["Other"],
    },
    Category {
        name: "taskcluster",
        color: "green",
        subcategories: &["Other"],
    },
];

/// Exact match on the component name; unknown or empty components are `none` (0).
pub fn category_index(component: &str) -> usize {
    CATEGORIES
        .iter()
        .position(|c| c.name == component)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_components() {
        assert_eq!(category_index("none"), 0);
        assert_eq!(category_index("fetches"), 1);
        assert_eq!(category_index("vcs"), 2);
        assert_eq!(category_index("setup"), 3);
        assert_eq!(category_index("taskcluster"), 4);
    }

    #[test]
    fn unknown_components_fall_back_to_none() {
        assert_eq!(category_index(""), 0);
        assert_eq!(category_index("Taskcluster"), 0);
        assert_eq!(category_index("marian"), 0);
    }
}
