//! Persistence Module
//!
//! Moves records between the store and a durable byte stream.
//!
//! ## Responsibilities
//! - Save: one encoded line per record, in store order, full overwrite
//! - Load: line-by-line decode feeding the store's conflict-aware insert,
//!   with the same case folding as interactive entry
//! - Report what a load did (inserted / replaced / skipped / defaulted)
//!
//! A source that cannot be opened fails before any line is read, so the
//! store is left exactly as it was.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::codec;
use crate::config::Strictness;
use crate::error::Result;
use crate::record::RecordKey;
use crate::store::{InsertOutcome, Store};

/// What a load pass did, line by line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Non-blank lines read from the source
    pub lines: usize,

    /// Records appended without conflict
    pub inserted: usize,

    /// Records that replaced an existing key after confirmation
    pub replaced: usize,

    /// Lines dropped: conflict declined, or rejected under strict decode
    pub skipped: usize,

    /// Numeric fields defaulted to zero by the lenient decode
    pub defaulted_fields: usize,
}

impl LoadReport {
    /// Records that ended up in the store
    pub fn loaded(&self) -> usize {
        self.inserted + self.replaced
    }
}

// =============================================================================
// Save
// =============================================================================

/// Encode every record to the sink, one per line, in store order
pub fn save<W: Write>(store: &Store, sink: W) -> Result<()> {
    let mut writer = BufWriter::new(sink);
    for record in store.iter() {
        writeln!(writer, "{}", codec::encode(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Save to a file path, replacing the previous contents entirely
pub fn save_to_path(store: &Store, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    save(store, file)?;
    tracing::info!("saved {} cities to {}", store.len(), path.display());
    Ok(())
}

// =============================================================================
// Load
// =============================================================================

/// Read the source line by line, decoding each and feeding the store
///
/// Blank lines are skipped. A line that fails a strict decode is skipped
/// with a warning and counted; the rest of the source still loads. Key
/// conflicts go through the `confirm` callback exactly as interactive
/// inserts do.
pub fn load<R, F>(
    store: &mut Store,
    source: R,
    strictness: Strictness,
    confirm: &mut F,
) -> Result<LoadReport>
where
    R: BufRead,
    F: FnMut(&RecordKey) -> bool,
{
    let mut report = LoadReport::default();

    for line in source.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        report.lines += 1;

        let decoded = match codec::decode(&line, strictness) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("skipping malformed line {}: {}", report.lines, e);
                report.skipped += 1;
                continue;
            }
        };
        if decoded.defaulted > 0 {
            tracing::warn!(
                "line {}: {} numeric field(s) defaulted to zero",
                report.lines,
                decoded.defaulted
            );
            report.defaulted_fields += decoded.defaulted;
        }

        match store.insert_or_confirm(decoded.record, confirm) {
            InsertOutcome::Inserted => report.inserted += 1,
            InsertOutcome::Replaced => report.replaced += 1,
            InsertOutcome::Skipped => report.skipped += 1,
        }
    }

    Ok(report)
}

/// Load from a file path
///
/// An unopenable path is an `Io` error and the store is untouched.
pub fn load_from_path<F>(
    store: &mut Store,
    path: &Path,
    strictness: Strictness,
    confirm: &mut F,
) -> Result<LoadReport>
where
    F: FnMut(&RecordKey) -> bool,
{
    let file = File::open(path)?;
    let report = load(store, BufReader::new(file), strictness, confirm)?;
    tracing::info!(
        "loaded {} cities from {} ({} replaced, {} skipped)",
        report.loaded(),
        path.display(),
        report.replaced,
        report.skipped
    );
    Ok(report)
}
