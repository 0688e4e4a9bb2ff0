use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::info;

const REFERENCE_REGIONS_CSV: &str = include_str!("../../data/regions.csv");

static REFERENCE_TABLE: OnceLock<Arc<RegionDistanceTable>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum RegionTableError {
    #[error("failed to read region table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid region table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("region table line {line} has an empty region name")]
    EmptyRegion { line: usize },
    #[error("region '{0}' appears more than once in the region table")]
    DuplicateRegion(String),
    #[error("region table contains no regions")]
    Empty,
}

/// Road distance from the shipping origin to a single region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDistance {
    pub region: String,
    pub distance_km: u32,
}

/// Immutable region name to kilometre lookup, kept in source row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDistanceTable {
    entries: Vec<RegionDistance>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    region: String,
    distance_km: u32,
}

impl RegionDistanceTable {
    /// The table shipped with the crate. Parsed once per process.
    pub fn reference() -> Result<Arc<Self>, RegionTableError> {
        if let Some(table) = REFERENCE_TABLE.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(Self::from_reader(REFERENCE_REGIONS_CSV.as_bytes())?);
        Ok(Arc::clone(REFERENCE_TABLE.get_or_init(|| table)))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegionTableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), regions = table.len(), "loaded region distance table");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegionTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (position, record) in csv_reader.deserialize::<RegionRow>().enumerate() {
            let row = record?;
            if row.region.is_empty() {
                // header occupies line 1
                return Err(RegionTableError::EmptyRegion { line: position + 2 });
            }
            entries.push(RegionDistance {
                region: row.region,
                distance_km: row.distance_km,
            });
        }

        Self::from_entries(entries)
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, RegionTableError>
    where
        I: IntoIterator<Item = RegionDistance>,
    {
        let entries: Vec<RegionDistance> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(RegionTableError::Empty);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.region.trim().is_empty() {
                return Err(RegionTableError::EmptyRegion { line: position + 2 });
            }
            if index.insert(entry.region.clone(), position).is_some() {
                return Err(RegionTableError::DuplicateRegion(entry.region.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    pub fn get(&self, region: &str) -> Option<&RegionDistance> {
        self.index.get(region).map(|&position| &self.entries[position])
    }

    pub fn distance(&self, region: &str) -> Option<u32> {
        self.get(region).map(|entry| entry.distance_km)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    /// The zero-distance region, if the table declares one.
    pub fn origin(&self) -> Option<&RegionDistance> {
        self.entries.iter().find(|entry| entry.distance_km == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionDistance> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.region.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
