//! Country-level port congestion from published port-call statistics.
//!
//! The loader reads the UNCTAD port-calls CSV, keeps one reporting year and
//! the `All ships` market, and maps each economy to its median time in port.
//! Lookups answer in hours so the table plugs straight into the core
//! congestion model as a [`PortDelayLookup`].

use std::collections::HashMap;
use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use portwise_core::PortDelayLookup;
use thiserror::Error;

/// Reporting year kept when none is specified.
pub const DEFAULT_YEAR: &str = "2023";
/// Market segment kept from the statistics.
pub const ALL_SHIPS_MARKET: &str = "All ships";
/// Economy used when a country has no row of its own.
pub const WORLD_ECONOMY: &str = "World";

const YEAR_COLUMN: &str = "Year";
const ECONOMY_COLUMN: &str = "Economy Label";
const MARKET_COLUMN: &str = "CommercialMarket Label";
const MEDIAN_DAYS_COLUMN: &str = "Median time in port (days)";

/// Errors raised while loading a [`CongestionTable`].
#[derive(Debug, Error)]
pub enum CongestionTableError {
    /// The CSV file could not be opened.
    #[error("failed to open congestion data at {path}: {source}")]
    Open {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CSV could not be read.
    #[error("failed to read congestion CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is absent from the header row.
    #[error("congestion CSV is missing the {0:?} column")]
    MissingColumn(&'static str),
}

/// Median port time per economy, in days.
///
/// Entries keep the order of the source rows; partial matches return the
/// first matching economy in that order.
///
/// # Examples
///
/// ```
/// use portwise_data::congestion::CongestionTable;
///
/// let table = CongestionTable::from_entries([("Netherlands", 1.0), ("World", 1.5)]);
/// assert_eq!(table.hours_for("Netherlands"), Some(24.0));
/// assert_eq!(table.hours_for("netherlands (kingdom of the)"), Some(24.0));
/// assert_eq!(table.hours_for("Atlantis"), Some(36.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CongestionTable {
    economies: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CongestionTable {
    /// Build a table from `(economy, median days)` pairs.
    ///
    /// A repeated economy keeps its first position and its last value.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (economy, days) in entries {
            table.insert(economy.into(), days);
        }
        table
    }

    fn insert(&mut self, economy: String, days: f64) {
        if let Some(&position) = self.index.get(&economy) {
            if let Some(entry) = self.economies.get_mut(position) {
                entry.1 = days;
            }
            return;
        }
        self.index.insert(economy.clone(), self.economies.len());
        self.economies.push((economy, days));
    }

    /// Load the table from a CSV file for `year`.
    ///
    /// # Errors
    /// Returns [`CongestionTableError`] when the file cannot be opened or
    /// read, or lacks a required column.
    pub fn from_path(path: &Utf8Path, year: &str) -> Result<Self, CongestionTableError> {
        let file = portwise_fs::open_utf8_file(path).map_err(|source| CongestionTableError::Open {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::from_reader(file, year)?;
        info!(
            "loaded {year} congestion data for {} economies from {path}",
            table.len()
        );
        Ok(table)
    }

    /// Load the table from CSV text for `year`.
    ///
    /// Rows for other years or markets, and rows without a usable median,
    /// are skipped.
    ///
    /// # Errors
    /// Returns [`CongestionTableError`] when the CSV is malformed or lacks a
    /// required column.
    pub fn from_reader<R: Read>(reader: R, year: &str) -> Result<Self, CongestionTableError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let columns = Columns::resolve(&headers)?;

        let mut table = Self::default();
        let mut skipped = 0_usize;
        for record in rdr.records() {
            let record = record?;
            match columns.parse(&record, year) {
                Some((economy, days)) => table.insert(economy.to_owned(), days),
                None => skipped += 1,
            }
        }
        debug!("kept {} congestion rows, skipped {skipped}", table.len());
        Ok(table)
    }

    /// Number of economies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.economies.len()
    }

    /// Whether the table has no economies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.economies.is_empty()
    }

    /// Median port time in days for `country`.
    ///
    /// Tries an exact match, then a case-insensitive match where either name
    /// contains the other, then the `World` row.
    #[must_use]
    pub fn median_days(&self, country: &str) -> Option<f64> {
        let country = country.trim();
        if let Some(&position) = self.index.get(country) {
            return self.economies.get(position).map(|(_, days)| *days);
        }
        if !country.is_empty() {
            let wanted = country.to_lowercase();
            let partial = self.economies.iter().find(|(economy, _)| {
                let economy = economy.to_lowercase();
                economy.contains(&wanted) || wanted.contains(&economy)
            });
            if let Some((economy, days)) = partial {
                debug!("matched {country:?} with {economy:?}: {days} days");
                return Some(*days);
            }
        }
        let world = self
            .index
            .get(WORLD_ECONOMY)
            .and_then(|&position| self.economies.get(position))
            .map(|(_, days)| *days);
        if let Some(days) = world {
            debug!("using {WORLD_ECONOMY} median for {country:?}: {days} days");
        }
        world
    }

    /// Median port time in hours for `country`.
    #[must_use]
    pub fn hours_for(&self, country: &str) -> Option<f64> {
        self.median_days(country).map(|days| days * 24.0)
    }
}

impl PortDelayLookup for CongestionTable {
    fn delay_hours(&self, country: &str) -> Option<f64> {
        self.hours_for(country)
    }
}

/// Header positions of the columns the loader reads.
struct Columns {
    year: usize,
    economy: usize,
    market: usize,
    median_days: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, CongestionTableError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
                .ok_or(CongestionTableError::MissingColumn(name))
        };
        Ok(Self {
            year: find(YEAR_COLUMN)?,
            economy: find(ECONOMY_COLUMN)?,
            market: find(MARKET_COLUMN)?,
            median_days: find(MEDIAN_DAYS_COLUMN)?,
        })
    }

    fn parse<'r>(&self, record: &'r StringRecord, year: &str) -> Option<(&'r str, f64)> {
        if record.get(self.year)? != year || record.get(self.market)? != ALL_SHIPS_MARKET {
            return None;
        }
        let economy = record.get(self.economy).filter(|economy| !economy.is_empty())?;
        let days = record
            .get(self.median_days)?
            .parse::<f64>()
            .ok()
            .filter(|days| days.is_finite() && *days >= 0.0)?;
        Some((economy, days))
    }
}
