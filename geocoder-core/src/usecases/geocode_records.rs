use super::{geocode_address::*, prelude::*, sync_fields::sync_fields};
use itertools::Itertools;

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of records after which cached records are released.
    pub batch_size: usize,
    /// Maximum number of records (`None` = unlimited).
    pub limit: Option<usize>,
    /// Geocode records that already have coordinates.
    pub force: bool,
    /// Only report which records would be geocoded.
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            limit: None,
            force: false,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub geocoded: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchItem {
    Skipped,
    /// Dry run: the record would have been geocoded.
    Pending(String),
    Geocoded(GeocodeResult),
    Failed,
}

pub fn geocode_records<R, G>(repo: &R, geocoder: &G, opts: &BatchOptions) -> Result<BatchReport>
where
    R: RecordRepo,
    G: AddressGeocoding,
{
    geocode_records_with_progress(repo, geocoder, opts, |_, _| {})
}

/// Geocodes all candidate records one after another.
///
/// `on_progress` is invoked once for each record.
/// Only a failed selection of the candidates aborts the run,
/// failures of single records are counted.
pub fn geocode_records_with_progress<R, G, F>(
    repo: &R,
    geocoder: &G,
    opts: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchReport>
where
    R: RecordRepo,
    G: AddressGeocoding,
    F: FnMut(RecordId, &BatchItem),
{
    if opts.batch_size == 0 {
        return Err(Error::InvalidBatchSize);
    }
    let ids = repo.find_geocoding_candidates(opts.force, opts.limit)?;
    let mut report = BatchReport {
        total: ids.len(),
        ..Default::default()
    };
    if ids.is_empty() {
        log::info!("No records to geocode");
        return Ok(report);
    }
    log::info!("Found {} records to geocode", ids.len());
    if opts.dry_run {
        log::info!("Dry run: no records will be modified");
    }
    for chunk in ids.chunks(opts.batch_size) {
        for &id in chunk {
            let item = geocode_record(repo, geocoder, id, opts.dry_run);
            match item {
                BatchItem::Skipped => report.skipped += 1,
                BatchItem::Pending(_) | BatchItem::Geocoded(_) => report.geocoded += 1,
                BatchItem::Failed => report.failed += 1,
            }
            on_progress(id, &item);
        }
        repo.clear_cache();
    }
    log::info!(
        "Geocoded {} of {} records ({} failed, {} skipped)",
        report.geocoded,
        report.total,
        report.failed,
        report.skipped
    );
    Ok(report)
}

fn geocode_record<R, G>(repo: &R, geocoder: &G, id: RecordId, dry_run: bool) -> BatchItem
where
    R: RecordRepo,
    G: AddressGeocoding,
{
    let mut record = match repo.get_record(id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::debug!("Record {id} does not exist anymore");
            return BatchItem::Skipped;
        }
        Err(err) => {
            log::error!("Failed to load record {id}: {err}");
            return BatchItem::Failed;
        }
    };
    if !record.has_address() {
        return BatchItem::Skipped;
    }
    if dry_run {
        let summary = address_summary(&record);
        log::info!("Would geocode {id}: {summary}");
        return BatchItem::Pending(summary);
    }
    let Some(result) = geocoder.geocode_record(&record, InvocationMode::Batch) else {
        log::info!("No position found for record {id}");
        return BatchItem::Failed;
    };
    sync_fields(&mut record, &result);
    match repo.save_record(&mut record, SaveScope::SuppressGeocoding) {
        Ok(()) => {
            log::debug!("Geocoded record {id} to {}", result.pos);
            BatchItem::Geocoded(result)
        }
        Err(err) => {
            log::error!("Failed to geocode record {id}: {err}");
            BatchItem::Failed
        }
    }
}

// e.g. "Lotusbloemweg 88, 1338ZA Almere"
fn address_summary(record: &Record) -> String {
    let locality = format!(
        "{} {}",
        record.get(fields::ZIPCODE).trim(),
        record.get(fields::CITY).trim()
    );
    let summary = [record.get(fields::ADDRESS1).trim(), locality.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(", ");
    summary
}
