// src/app/types.rs
use std::sync::Arc;

use super::data::{Catalog, TitleKind};
use super::stats::{
    country_frequencies, distinct_categories, distinct_years, genre_frequencies,
    mean_movie_duration_by_year, rating_frequencies, releases_per_year,
    releases_per_year_by_kind, FrequencyTable, Overview, YearKindCount,
};

// ---- cross-thread messages ----
pub enum LoadMsg {
    Done(Arc<Catalog>),
    Error(String),
}

// ---- app phases ----
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootPhase {
    Starting,
    Loading,
    Ready,
    Failed(String),
}

// ---- UI controls ----
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Visuals,
    Search,
    Timeline,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Visuals, Tab::Search, Tab::Timeline];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Visuals => "Visualisations",
            Self::Search => "Advanced search",
            Self::Timeline => "Temporal analysis",
        }
    }
}

/// Type selector of the search tab ("All" or one kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindChoice {
    All,
    Only(TitleKind),
}

impl KindChoice {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(k) => k.as_str(),
        }
    }

    pub const fn kind(self) -> Option<TitleKind> {
        match self {
            Self::All => None,
            Self::Only(k) => Some(k),
        }
    }
}

/// Tables derived once from an immutable catalog.
pub struct Dashboard {
    pub overview: Overview,
    pub countries: FrequencyTable,
    pub genres: FrequencyTable,
    pub ratings: FrequencyTable,
    pub per_year: Vec<(i32, usize)>,
    pub per_year_kind: Vec<YearKindCount>,
    pub movie_duration: Vec<(i32, f64)>,
    /// Ascending.
    pub years: Vec<i32>,
    pub categories: Vec<String>,
}

impl Dashboard {
    pub fn build(catalog: &Catalog) -> Self {
        let titles = catalog.titles();
        Self {
            overview: Overview::compute(titles),
            countries: country_frequencies(titles),
            genres: genre_frequencies(titles),
            ratings: rating_frequencies(titles),
            per_year: releases_per_year(titles),
            per_year_kind: releases_per_year_by_kind(titles),
            movie_duration: mean_movie_duration_by_year(titles),
            years: distinct_years(titles),
            categories: distinct_categories(titles),
        }
    }
}
