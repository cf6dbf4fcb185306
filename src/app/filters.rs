use super::data::{Title, TitleKind};
use super::utils::contains_ci;

/// Active facets of the search view. Unset facets match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetFilter {
    pub kind: Option<TitleKind>,
    pub year: Option<i32>,
    /// Inclusive release-year bounds.
    pub year_range: Option<(i32, i32)>,
    /// Exact genre, matched against the exploded `listed_in` values.
    pub category: Option<String>,
    /// Free text looked up in title, director, cast and description.
    /// Surrounding whitespace is trimmed; a blank query matches everything.
    pub text: String,
}

impl FacetFilter {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.year.is_none()
            && self.year_range.is_none()
            && self.category.is_none()
            && self.text.trim().is_empty()
    }

    pub fn matches(&self, t: &Title) -> bool {
        self.matches_with_needle(t, &self.needle())
    }

    /// Indices of matching titles, in catalog order.
    pub fn apply(&self, titles: &[Title]) -> Vec<usize> {
        let needle = self.needle();
        titles
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches_with_needle(t, &needle))
            .map(|(i, _)| i)
            .collect()
    }

    fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }

    fn matches_with_needle(&self, t: &Title, needle: &str) -> bool {
        if self.kind.is_some_and(|k| k != t.kind) {
            return false;
        }
        if self.year.is_some_and(|y| y != t.release_year) {
            return false;
        }
        if let Some((lo, hi)) = self.year_range {
            if !(lo..=hi).contains(&t.release_year) {
                return false;
            }
        }
        if let Some(cat) = &self.category {
            if !t.has_genre(cat) {
                return false;
            }
        }
        needle.is_empty() || text_matches(t, needle)
    }
}

fn text_matches(t: &Title, needle_lower: &str) -> bool {
    [
        Some(t.title.as_str()),
        t.director.as_deref(),
        t.cast.as_deref(),
        t.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| contains_ci(field, needle_lower))
}
