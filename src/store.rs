//! The persistent CSV store: the existing-record index (read pass) and the appender (write pass).
//!
//! Columns: `Item, Description, Brand, Calories, Serving Size, Nutrients`. Rows are only ever
//! appended; no-duplication relies on the caller consulting [`ExistingIndex`] first.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::format::FormattedRecord;

pub const HEADER: [&str; 6] = [
    "Item",
    "Description",
    "Brand",
    "Calories",
    "Serving Size",
    "Nutrients",
];

/// Case-insensitive set of item names already in the store. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ExistingIndex {
    items: HashSet<String>,
}

impl ExistingIndex {
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(&item.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExistingIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
        }
    }
}

/// Builds the index from the store at `path`. A missing or empty file is an empty store.
pub fn read_existing_items<P: AsRef<Path>>(path: P) -> Result<ExistingIndex, StoreError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "Store not found, treating as empty");
            return Ok(ExistingIndex::default());
        }
        Err(e) => {
            error!(error = ?e, path = %path.display(), "Failed to open store");
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let csv_err = |e: csv::Error| {
        error!(error = ?e, path = %path.display(), "Failed to parse store CSV");
        StoreError::Csv {
            path: path.to_path_buf(),
            source: e,
        }
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        info!(path = %path.display(), "Store is empty");
        return Ok(ExistingIndex::default());
    }
    let item_col = headers
        .iter()
        .position(|h| h == "Item")
        .ok_or_else(|| StoreError::MissingItemColumn {
            path: path.to_path_buf(),
        })?;

    let mut items = HashSet::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        if let Some(item) = row.get(item_col) {
            items.insert(item.to_lowercase());
        }
    }

    info!(path = %path.display(), count = items.len(), "Indexed existing store items");
    Ok(ExistingIndex { items })
}

/// Appends one row per record, in order. Writes the header first only when the store is empty.
/// Returns the number of data rows written.
pub fn append_records<P: AsRef<Path>>(
    path: P,
    records: &[(String, FormattedRecord)],
) -> Result<usize, StoreError> {
    let path = path.as_ref();
    let io_err = |e: io::Error| {
        error!(error = ?e, path = %path.display(), "Store I/O failed");
        StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    };
    let csv_err = |e: csv::Error| {
        error!(error = ?e, path = %path.display(), "Failed to write store CSV");
        StoreError::Csv {
            path: path.to_path_buf(),
            source: e,
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    let is_new = file.metadata().map_err(io_err)?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        debug!(path = %path.display(), "Writing store header");
        writer.write_record(HEADER).map_err(csv_err)?;
    }

    for (item, record) in records {
        writer.write_record(store_row(item, record)).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), rows = records.len(), header = is_new, "Appended records to store");
    Ok(records.len())
}

fn store_row(item: &str, record: &FormattedRecord) -> [String; 6] {
    [
        item.to_owned(),
        record.description.clone().unwrap_or_default(),
        record.brand.clone(),
        record.calories.clone().unwrap_or_default(),
        record.serving(),
        record.nutrients.flatten(),
    ]
}
