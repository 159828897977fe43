use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::error::{LocatorError, Result};

pub const STATE_COLUMN: &str = "state_name_english";
pub const DISTRICT_COLUMN: &str = "district_name_english";

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "state_name_english")]
    state: Option<String>,
    #[serde(rename = "district_name_english")]
    district: Option<String>,
}

/// State name to district names, as read from the location asset.
///
/// Both levels are ordered sets, so the dropdown contents do not depend on
/// the order of rows in the file and a district appears once per state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationIndex {
    states: BTreeMap<String, BTreeSet<String>>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv_text(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Builds the index from CSV with a header row.
    ///
    /// Rows that fail to decode, or that carry no state, are skipped. Only a
    /// missing header column fails the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        for column in [STATE_COLUMN, DISTRICT_COLUMN] {
            if !headers
                .iter()
                .any(|header| header.trim_start_matches('\u{feff}') == column)
            {
                return Err(LocatorError::MissingColumn(column));
            }
        }

        let mut index = Self::new();
        let mut skipped = 0_usize;
        for result in reader.deserialize::<LocationRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::debug!("Skipping malformed location row: {e}");
                    skipped += 1;
                    continue;
                }
            };
            let Some(state) = row.state.as_deref().filter(|s| !s.is_empty()) else {
                skipped += 1;
                continue;
            };
            index.insert(state, row.district.as_deref());
        }

        if skipped > 0 {
            log::warn!("Skipped {skipped} location rows without a usable state");
        }
        log::debug!("Loaded location index with {} states", index.len());

        Ok(index)
    }

    /// Registers `state`, and `district` under it when present.
    pub fn insert(&mut self, state: &str, district: Option<&str>) {
        let districts = self.states.entry(state.to_string()).or_default();
        if let Some(district) = district.filter(|d| !d.is_empty()) {
            districts.insert(district.to_string());
        }
    }

    /// State names in lexicographic order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// District names of `state` in lexicographic order, or `None` for an
    /// unknown state.
    pub fn districts(&self, state: &str) -> Option<impl Iterator<Item = &str>> {
        self.states
            .get(state)
            .map(|districts| districts.iter().map(String::as_str))
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
state_code,state_name_english,district_name_english
29,Karnataka,Mysuru
29,Karnataka,Bengaluru Urban
33,Tamil Nadu,Chennai
29,Karnataka,Mysuru

33,Tamil Nadu,Madurai
";

    fn states(index: &LocationIndex) -> Vec<&str> {
        index.states().collect()
    }

    fn districts<'a>(index: &'a LocationIndex, state: &str) -> Vec<&'a str> {
        index
            .districts(state)
            .map(Iterator::collect)
            .unwrap_or_default()
    }

    #[test]
    fn test_builds_sorted_deduplicated_index() -> Result<()> {
        let index = LocationIndex::from_csv_text(SAMPLE)?;

        assert_eq!(states(&index), vec!["Karnataka", "Tamil Nadu"]);
        assert_eq!(
            districts(&index, "Karnataka"),
            vec!["Bengaluru Urban", "Mysuru"]
        );
        assert_eq!(districts(&index, "Tamil Nadu"), vec!["Chennai", "Madurai"]);
        assert!(index.districts("Goa").is_none());
        Ok(())
    }

    #[test]
    fn test_row_order_does_not_change_the_index() -> Result<()> {
        let header = "state_name_english,district_name_english";
        let rows = [
            "Kerala,Kollam",
            "Assam,Dhubri",
            "Kerala,Alappuzha",
            "Assam,Cachar",
            "Kerala,Kollam",
        ];

        let forward = format!("{header}\n{}", rows.join("\n"));
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let reversed = format!("{header}\n{}", reversed_rows.join("\n"));
        let mut rotated_rows = rows;
        rotated_rows.rotate_left(2);
        let rotated = format!("{header}\n{}", rotated_rows.join("\n"));

        let expected = LocationIndex::from_csv_text(&forward)?;
        assert_eq!(LocationIndex::from_csv_text(&reversed)?, expected);
        assert_eq!(LocationIndex::from_csv_text(&rotated)?, expected);
        assert_eq!(districts(&expected, "Kerala"), vec!["Alappuzha", "Kollam"]);
        Ok(())
    }

    #[test]
    fn test_skips_rows_without_state() -> Result<()> {
        let text = "state_name_english,district_name_english\n,Orphan\n  Goa , North Goa \nGoa\n";
        let index = LocationIndex::from_csv_text(text)?;

        assert_eq!(states(&index), vec!["Goa"]);
        assert_eq!(districts(&index, "Goa"), vec!["North Goa"]);
        Ok(())
    }

    #[test]
    fn test_state_without_district_is_still_listed() -> Result<()> {
        let text = "state_name_english,district_name_english\nLadakh,\n";
        let index = LocationIndex::from_csv_text(text)?;

        assert!(index.contains_state("Ladakh"));
        assert!(districts(&index, "Ladakh").is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() -> Result<()> {
        let mut bytes = b"state_name_english,district_name_english\nPunjab,Amritsar\n".to_vec();
        bytes.extend_from_slice(b"Punjab,\xff\xfe\n");
        let index = LocationIndex::from_reader(bytes.as_slice())?;

        assert_eq!(districts(&index, "Punjab"), vec!["Amritsar"]);
        Ok(())
    }

    #[test]
    fn test_missing_column_fails_the_load() {
        let result = LocationIndex::from_csv_text("state,district\nGoa,North Goa\n");
        assert!(matches!(
            result,
            Err(LocatorError::MissingColumn(STATE_COLUMN))
        ));

        let result = LocationIndex::from_csv_text("");
        assert!(result.is_err());
    }
}
