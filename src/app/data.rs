// src/app/data.rs
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::app::utils::{parse_date_added, parse_duration_minutes, split_multi};

/// Columns a catalog file cannot do without. The rest may be absent.
pub const REQUIRED_COLUMNS: [&str; 4] = ["show_id", "type", "title", "release_year"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TitleKind {
    Movie,
    TvShow,
}

impl TitleKind {
    pub const ALL: [TitleKind; 2] = [TitleKind::Movie, TitleKind::TvShow];

    /// Label used in the CSV file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::TvShow => "TV Show",
        }
    }

    /// Label used on screen.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Movie => "Films",
            Self::TvShow => "TV series",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Movie" => Some(Self::Movie),
            "TV Show" => Some(Self::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    pub show_id: String,
    pub kind: TitleKind,
    pub title: String,
    pub director: Option<String>,
    /// Comma-separated cast list, as found in the file.
    pub cast: Option<String>,
    /// Comma-separated producing countries.
    pub country: Option<String>,
    pub date_added_raw: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: Option<String>,
    /// Free text, "90 min" for films or "2 Seasons" for series.
    pub duration: Option<String>,
    /// Comma-separated genres ("listed_in").
    pub listed_in: Option<String>,
    pub description: Option<String>,
}

impl Title {
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        split_multi(self.country.as_deref().unwrap_or(""))
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        split_multi(self.listed_in.as_deref().unwrap_or(""))
    }

    pub fn cast_members(&self) -> impl Iterator<Item = &str> {
        split_multi(self.cast.as_deref().unwrap_or(""))
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres().any(|g| g == genre)
    }

    /// Leading number of the duration label; minutes for films.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration.as_deref().and_then(parse_duration_minutes)
    }
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    show_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    release_year: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    listed_in: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl RawTitle {
    fn into_title(self, line: u64) -> Result<Title, LoadError> {
        let malformed = |reason: String| LoadError::Malformed { line, reason };

        let show_id = non_blank(self.show_id).ok_or_else(|| malformed("empty show_id".into()))?;
        let title = non_blank(self.title).ok_or_else(|| malformed("empty title".into()))?;

        let kind_raw = non_blank(self.kind).unwrap_or_default();
        let kind = TitleKind::from_str(&kind_raw)
            .ok_or_else(|| malformed(format!("unknown type `{kind_raw}`")))?;

        let year_raw = non_blank(self.release_year).unwrap_or_default();
        let release_year = year_raw
            .parse::<i32>()
            .map_err(|_| malformed(format!("release_year `{year_raw}` is not a year")))?;

        let date_added_raw = non_blank(self.date_added);
        let date_added = date_added_raw.as_deref().and_then(parse_date_added);

        Ok(Title {
            show_id,
            kind,
            title,
            director: non_blank(self.director),
            cast: non_blank(self.cast),
            country: non_blank(self.country),
            date_added_raw,
            date_added,
            release_year,
            rating: non_blank(self.rating),
            duration: non_blank(self.duration),
            listed_in: non_blank(self.listed_in),
            description: non_blank(self.description),
        })
    }
}

/// The whole dataset, immutable once loaded.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    source: Option<PathBuf>,
    titles: Vec<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        Self { source: None, titles }
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        info!("loaded {} titles from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == col) {
                return Err(LoadError::MissingColumn(col));
            }
        }
        let headers = csv::StringRecord::from(headers.iter().map(str::trim).collect::<Vec<_>>());

        let mut titles = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let raw: RawTitle = record.deserialize(Some(&headers)).map_err(|e| {
                LoadError::Malformed {
                    line,
                    reason: e.to_string(),
                }
            })?;
            titles.push(raw.into_title(line)?);
        }
        debug!("parsed {} catalog rows", titles.len());

        Ok(Self::new(titles))
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Title> {
        self.titles.get(idx)
    }

    pub fn find_by_show_id(&self, show_id: &str) -> Option<(usize, &Title)> {
        self.titles
            .iter()
            .enumerate()
            .find(|(_, t)| t.show_id == show_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const HEADER: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

    pub(crate) fn title(id: &str, kind: TitleKind, year: i32) -> Title {
        Title {
            show_id: id.into(),
            kind,
            title: format!("Title {id}"),
            director: None,
            cast: None,
            country: None,
            date_added_raw: None,
            date_added: None,
            release_year: year,
            rating: None,
            duration: None,
            listed_in: None,
            description: None,
        }
    }

    #[test]
    fn reads_full_rows_with_missing_cells() {
        let csv = format!(
            "{HEADER}\n\
             s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,\"As her father nears the end of his life, filmmaker Kirsten Johnson stages his death.\"\n\
             s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas, TV Mysteries\",\"After crossing paths at a party, a Cape Town teen sets out to prove whether a private-school swimming star is her sister.\"\n"
        );
        let cat = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(cat.len(), 2);

        let first = cat.get(0).unwrap();
        assert_eq!(first.kind, TitleKind::Movie);
        assert_eq!(first.cast, None);
        assert_eq!(first.duration_minutes(), Some(90.0));
        assert_eq!(first.date_added, NaiveDate::from_ymd_opt(2021, 9, 25));

        let (idx, second) = cat.find_by_show_id("s2").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(second.kind, TitleKind::TvShow);
        assert_eq!(second.director, None);
        assert_eq!(
            second.genres().collect::<Vec<_>>(),
            vec!["International TV Shows", "TV Dramas", "TV Mysteries"]
        );
        assert_eq!(second.cast_members().count(), 2);
        assert!(second.has_genre("TV Dramas"));
        assert!(!second.has_genre("Dramas"));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "show_id,type,title,release_year\ns9,Movie,Lone,1999\n";
        let cat = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(cat.titles()[0].release_year, 1999);
        assert_eq!(cat.titles()[0].country, None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "show_id,type,title\ns1,Movie,X\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("release_year")));
    }

    #[test]
    fn bad_release_year_names_the_line() {
        let csv = format!("{HEADER}\ns1,Movie,A,,,,,2020,,,,\ns2,Movie,B,,,,,soon,,,,\n");
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::Malformed { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("soon"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_type_is_malformed() {
        let csv = format!("{HEADER}\ns1,Podcast,A,,,,,2020,,,,\n");
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
    }

    #[test]
    fn blank_id_or_title_is_malformed() {
        let blank_title = format!("{HEADER}\ns1,Movie,   ,,,,,2020,,,,\n");
        let err = Catalog::from_reader(blank_title.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("title"));

        let blank_id = format!("{HEADER}\n,Movie,A,,,,,2020,,,,\n");
        let err = Catalog::from_reader(blank_id.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("show_id"));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let csv = format!("{HEADER}\ns1,Movie,A,,,,,2020\n");
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn from_path_records_source() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{HEADER}").unwrap();
        writeln!(f, "s1,Movie,A,,,,,2020,,,,").unwrap();
        let cat = Catalog::from_path(f.path()).unwrap();
        assert_eq!(cat.source(), Some(f.path()));
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn bundled_sample_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/netflix_titles.csv");
        let cat = Catalog::from_path(&path).unwrap();
        assert_eq!(cat.len(), 10);
        assert!(cat.titles().iter().all(|t| t.date_added.is_some()));
        let (_, brazil) = cat.find_by_show_id("s9").unwrap();
        assert_eq!(brazil.country.as_deref(), Some("Brazil"));
        assert!(brazil.description.as_deref().unwrap_or("").contains("São Paulo"));
    }
}
