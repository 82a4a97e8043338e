//! Game catalog
//!
//! Tabular ROM metadata (one row per game) plus the lookup that turns a ROM
//! file name into the [`GameRecord`] a scene is built from.
//!
//! Expected columns: `rom_name`, `game_name`, `description`, `genre`,
//! `players`, `rating` and optional asset columns named after image slots
//! (`cover`, `wheel`, `screenshot`, `logo`, `marquee`).

pub mod matching;
mod record;

pub use record::GameRecord;

use crate::scene::rating;
use std::path::Path;
use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record had an unusable shape
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// In-memory game catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<GameRecord>,
}

impl Catalog {
    /// Build a catalog from records
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Load a CSV catalog with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        log::info!("Loaded {} catalog records from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Read CSV from any reader
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let record: GameRecord = headers
                .iter()
                .zip(row.iter())
                .filter(|(_, value)| !value.is_empty())
                .collect();
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Load a JSON array of flat objects
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        let rows = value
            .as_array()
            .ok_or_else(|| CatalogError::InvalidRecord("catalog must be a JSON array".to_string()))?;
        let records = rows
            .iter()
            .map(GameRecord::from_json_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Load by extension: `.csv` or `.json`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(path)
        } else {
            Self::from_csv(path)
        }
    }

    /// All records
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the record for a ROM file name
    ///
    /// Tries, in order: exact lowercase stem against `rom_name`, the same
    /// after [`matching::normalize_name`], then the nearest cleaned title.
    pub fn lookup(&self, rom_file_name: &str) -> Option<&GameRecord> {
        let stem = matching::rom_stem(rom_file_name);

        let exact = self
            .records
            .iter()
            .find(|record| record.get("rom_name").is_some_and(|rom| rom.trim().to_lowercase() == stem));
        if let Some(record) = exact {
            log::debug!("Exact catalog match for '{}'", rom_file_name);
            return Some(record);
        }

        let normalized = matching::normalize_name(&stem);
        if !normalized.is_empty() {
            let loose = self.records.iter().find(|record| {
                record
                    .get("rom_name")
                    .is_some_and(|rom| matching::normalize_name(rom) == normalized)
            });
            if let Some(record) = loose {
                log::debug!("Normalized catalog match for '{}'", rom_file_name);
                return Some(record);
            }
        }

        let (idx, score) = matching::nearest(&stem, self.records.iter().map(GameRecord::title))?;
        log::debug!(
            "Similarity match for '{}' -> '{}' ({:.2})",
            rom_file_name,
            self.records[idx].title(),
            score
        );
        self.records.get(idx)
    }

    /// Records whose genre contains any of `genres` (case-insensitive)
    pub fn filter_by_genre(&self, genres: &[String]) -> Vec<&GameRecord> {
        self.records
            .iter()
            .filter(|record| genre_matches(record.text("genre"), genres))
            .collect()
    }

    /// The `n` best rated records, by normalised score
    pub fn top_rated(&self, n: usize) -> Vec<&GameRecord> {
        let mut scored: Vec<(f64, &GameRecord)> = self
            .records
            .iter()
            .map(|record| (rating::normalize_score(rating::parse_rating(record.rating())), record))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(n).map(|(_, record)| record).collect()
    }
}

/// Case-insensitive substring test of a genre against a filter list
///
/// An empty filter list matches everything.
pub fn genre_matches(genre: &str, genres: &[String]) -> bool {
    let wanted: Vec<String> = genres
        .iter()
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect();
    if wanted.is_empty() {
        return true;
    }
    let genre = genre.to_lowercase();
    wanted.iter().any(|g| genre.contains(g.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
rom_name,game_name,genre,players,rating,cover
smw,Super Mario World,Platform,2,0.9,covers/smw.png
contra,Contra,Shooter / Run and gun,2,8,
zelda3,The Legend of Zelda: A Link to the Past,Action RPG,1,95,
";

    fn catalog() -> Catalog {
        Catalog::from_csv_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_csv_rows_become_records() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        let contra = &catalog.records()[1];
        assert_eq!(contra.title(), "Contra");
        assert_eq!(contra.asset_path("cover"), None);
        assert_eq!(catalog.records()[0].asset_path("cover"), Some("covers/smw.png"));
    }

    #[test]
    fn test_lookup_exact_normalized_and_similar() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("roms/SMW.zip").map(GameRecord::title), Some("Super Mario World"));
        assert_eq!(catalog.lookup("Contra (USA) [!].zip").map(GameRecord::title), Some("Contra"));
        assert_eq!(
            catalog.lookup("Legend of Zelda, The - A Link to the Past.sfc").map(GameRecord::title),
            Some("The Legend of Zelda: A Link to the Past")
        );
        assert!(catalog.lookup("tetris.zip").is_none());
    }

    #[test]
    fn test_genre_filter() {
        let catalog = catalog();
        let shooters = catalog.filter_by_genre(&["shooter".to_string()]);
        assert_eq!(shooters.len(), 1);
        assert_eq!(catalog.filter_by_genre(&[]).len(), 3);
        assert!(genre_matches("Action RPG", &[" rpg ".to_string(), "sports".to_string()]));
    }

    #[test]
    fn test_top_rated() {
        let catalog = catalog();
        let top = catalog.top_rated(2);
        // 95 -> 5.0, 0.9 -> 4.5, 8 -> 4.0
        assert_eq!(top.iter().map(|r| r.title()).collect::<Vec<_>>(), vec![
            "The Legend of Zelda: A Link to the Past",
            "Super Mario World"
        ]);
    }
}
