// src/app/stats.rs
//! Summary tables derived from the catalog: frequency tables over exploded
//! multi-value fields, headline counts, and per-year series.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;
use thiserror::Error;

use crate::app::data::{Title, TitleKind};

/// Distinct value -> occurrence count, most frequent first.
/// Ties are ordered by value so the table is stable between runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<&'a str, usize> = HashMap::new();
        for v in values {
            *counts.entry(v).or_insert(0) += 1;
        }
        let entries = counts
            .into_iter()
            .map(|(v, n)| (v.to_string(), n))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The first `n` entries (all of them when there are fewer).
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.entries[..n.min(self.entries.len())]
    }

    #[cfg(test)]
    pub(crate) fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| *n)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

pub fn country_frequencies(titles: &[Title]) -> FrequencyTable {
    FrequencyTable::from_values(titles.iter().flat_map(Title::countries))
}

pub fn genre_frequencies(titles: &[Title]) -> FrequencyTable {
    FrequencyTable::from_values(titles.iter().flat_map(Title::genres))
}

/// Ratings are single-valued; titles without one are left out.
pub fn rating_frequencies(titles: &[Title]) -> FrequencyTable {
    FrequencyTable::from_values(titles.iter().filter_map(|t| t.rating.as_deref()))
}

/// Headline numbers for the overview tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overview {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
    pub distinct_countries: usize,
    pub year_span: Option<(i32, i32)>,
}

impl Overview {
    pub fn compute(titles: &[Title]) -> Self {
        let movies = titles.iter().filter(|t| t.kind == TitleKind::Movie).count();
        let tv_shows = titles.iter().filter(|t| t.kind == TitleKind::TvShow).count();
        let distinct_countries = titles
            .iter()
            .flat_map(Title::countries)
            .collect::<BTreeSet<_>>()
            .len();
        let year_span = titles
            .iter()
            .map(|t| t.release_year)
            .minmax()
            .into_option();

        Self {
            total: titles.len(),
            movies,
            tv_shows,
            distinct_countries,
            year_span,
        }
    }

    pub fn count_of(&self, kind: TitleKind) -> usize {
        match kind {
            TitleKind::Movie => self.movies,
            TitleKind::TvShow => self.tv_shows,
        }
    }
}

/// Number of releases per year, ascending by year.
pub fn releases_per_year(titles: &[Title]) -> Vec<(i32, usize)> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for t in titles {
        *by_year.entry(t.release_year).or_insert(0) += 1;
    }
    by_year.into_iter().collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearKindCount {
    pub year: i32,
    pub kind: TitleKind,
    pub count: usize,
}

/// Releases per (year, type), ascending by year then type. Only combinations
/// that occur are listed, so the counts add up to `titles.len()`.
pub fn releases_per_year_by_kind(titles: &[Title]) -> Vec<YearKindCount> {
    titles
        .iter()
        .map(|t| (t.release_year, t.kind))
        .counts()
        .into_iter()
        .map(|((year, kind), count)| YearKindCount { year, kind, count })
        .sorted_by_key(|c| (c.year, c.kind))
        .collect()
}

/// `(year, count)` series for one type, taken from the cross tabulation.
pub fn year_series_for(counts: &[YearKindCount], kind: TitleKind) -> Vec<(i32, usize)> {
    counts
        .iter()
        .filter(|c| c.kind == kind)
        .map(|c| (c.year, c.count))
        .collect()
}

/// Mean film duration (minutes) per release year. Films whose duration has no
/// leading number are skipped; years left without any value are omitted.
pub fn mean_movie_duration_by_year(titles: &[Title]) -> Vec<(i32, f64)> {
    let mut acc: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for t in titles.iter().filter(|t| t.kind == TitleKind::Movie) {
        if let Some(minutes) = t.duration_minutes() {
            let slot = acc.entry(t.release_year).or_insert((0.0, 0));
            slot.0 += minutes;
            slot.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("start year ({start}) must be less than or equal to end year ({end})")]
    Inverted { start: i32, end: i32 },
}

/// Genre frequencies over titles released in `start..=end`.
pub fn genre_frequencies_between(
    titles: &[Title],
    start: i32,
    end: i32,
) -> Result<FrequencyTable, PeriodError> {
    if start > end {
        return Err(PeriodError::Inverted { start, end });
    }
    Ok(FrequencyTable::from_values(
        titles
            .iter()
            .filter(|t| (start..=end).contains(&t.release_year))
            .flat_map(Title::genres),
    ))
}

/// Distinct release years, ascending.
pub fn distinct_years(titles: &[Title]) -> Vec<i32> {
    titles
        .iter()
        .map(|t| t.release_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct genres across all titles, sorted.
pub fn distinct_categories(titles: &[Title]) -> Vec<String> {
    titles
        .iter()
        .flat_map(Title::genres)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::tests::title;

    fn with_country(mut t: Title, c: &str) -> Title {
        t.country = Some(c.into());
        t
    }

    fn with_genres(mut t: Title, g: &str) -> Title {
        t.listed_in = Some(g.into());
        t
    }

    fn with_duration(mut t: Title, d: &str) -> Title {
        t.duration = Some(d.into());
        t
    }

    #[test]
    fn explodes_countries_across_records() {
        let titles = vec![
            with_country(title("s1", TitleKind::Movie, 2020), "USA, France"),
            with_country(title("s2", TitleKind::Movie, 2020), "France, Canada"),
        ];
        let table = country_frequencies(&titles);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("USA"), Some(1));
        assert_eq!(table.get("France"), Some(2));
        assert_eq!(table.get("Canada"), Some(1));
        assert_eq!(table.total(), 4);
        assert_eq!(table.entries()[0], ("France".to_string(), 2));
    }

    #[test]
    fn top_orders_by_count_then_value() {
        let table = FrequencyTable::from_values(["b", "a", "c", "c", "b", "c"]);
        assert_eq!(
            table.top(2),
            &[("c".to_string(), 3), ("b".to_string(), 2)]
        );
        assert_eq!(table.top(10).len(), 3);

        let ties = FrequencyTable::from_values(["z", "y", "x"]);
        let order: Vec<&str> = ties.entries().iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn ratings_skip_missing_values() {
        let mut a = title("s1", TitleKind::Movie, 2020);
        a.rating = Some("TV-MA".into());
        let b = title("s2", TitleKind::Movie, 2020);
        let mut c = title("s3", TitleKind::TvShow, 2021);
        c.rating = Some("TV-MA".into());
        let table = rating_frequencies(&[a, b, c]);
        assert_eq!(table.entries(), &[("TV-MA".to_string(), 2)]);
    }

    #[test]
    fn overview_counts_and_span() {
        let titles = vec![
            with_country(title("s1", TitleKind::Movie, 1999), "USA, France"),
            with_country(title("s2", TitleKind::TvShow, 2021), "France"),
            title("s3", TitleKind::Movie, 2010),
        ];
        let o = Overview::compute(&titles);
        assert_eq!(o.total, 3);
        assert_eq!(o.movies, 2);
        assert_eq!(o.tv_shows, 1);
        assert_eq!(o.count_of(TitleKind::TvShow), 1);
        assert_eq!(o.distinct_countries, 2);
        assert_eq!(o.year_span, Some((1999, 2021)));

        assert_eq!(Overview::compute(&[]).year_span, None);
    }

    #[test]
    fn year_and_type_counts_sum_to_total() {
        let titles = vec![
            title("s1", TitleKind::Movie, 2019),
            title("s2", TitleKind::Movie, 2020),
            title("s3", TitleKind::TvShow, 2020),
            title("s4", TitleKind::Movie, 2020),
            title("s5", TitleKind::TvShow, 2021),
        ];
        let counts = releases_per_year_by_kind(&titles);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), titles.len());
        assert_eq!(
            counts[1],
            YearKindCount { year: 2020, kind: TitleKind::Movie, count: 2 }
        );
        assert_eq!(
            year_series_for(&counts, TitleKind::TvShow),
            vec![(2020, 1), (2021, 1)]
        );
        assert_eq!(releases_per_year(&titles), vec![(2019, 1), (2020, 3), (2021, 1)]);
    }

    #[test]
    fn mean_duration_ignores_series_and_unparsed() {
        let titles = vec![
            with_duration(title("s1", TitleKind::Movie, 2020), "90 min"),
            with_duration(title("s2", TitleKind::Movie, 2020), "110 min"),
            with_duration(title("s3", TitleKind::Movie, 2020), "unknown"),
            with_duration(title("s4", TitleKind::TvShow, 2020), "3 Seasons"),
            with_duration(title("s5", TitleKind::Movie, 2018), "n/a"),
            title("s6", TitleKind::Movie, 2019),
        ];
        let means = mean_movie_duration_by_year(&titles);
        assert_eq!(means, vec![(2020, 100.0)]);
    }

    #[test]
    fn period_genres_respect_bounds() {
        let titles = vec![
            with_genres(title("s1", TitleKind::Movie, 2000), "Dramas, Comedies"),
            with_genres(title("s2", TitleKind::Movie, 2005), "Dramas"),
            with_genres(title("s3", TitleKind::Movie, 2010), "Horror Movies"),
        ];
        let t = genre_frequencies_between(&titles, 2000, 2005).unwrap();
        assert_eq!(t.get("Dramas"), Some(2));
        assert_eq!(t.get("Horror Movies"), None);

        let err = genre_frequencies_between(&titles, 2010, 2000).unwrap_err();
        assert_eq!(err, PeriodError::Inverted { start: 2010, end: 2000 });
        assert!(genre_frequencies_between(&titles, 2005, 2005).is_ok());
    }

    #[test]
    fn selector_values_are_sorted_and_distinct() {
        let titles = vec![
            with_genres(title("s1", TitleKind::Movie, 2020), "Dramas, Comedies"),
            with_genres(title("s2", TitleKind::Movie, 2001), "Comedies"),
            title("s3", TitleKind::TvShow, 2020),
        ];
        assert_eq!(distinct_years(&titles), vec![2001, 2020]);
        assert_eq!(distinct_categories(&titles), vec!["Comedies", "Dramas"]);
    }
}
