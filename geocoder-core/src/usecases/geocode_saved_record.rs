use super::{geocode_address::*, prelude::*, sync_fields::sync_fields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has been saved by the geocoding itself.
    Suppressed,
    Disabled,
    OnlyCoordinatesChanged,
    NoAddress,
    HasCoordinates,
    AddressUnchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Skipped(SkipReason),
    NotFound,
    Geocoded(GeocodeResult),
    /// The record could not be updated.
    Failed,
}

fn skip_reason(
    event: &RecordSaved,
    scope: SaveScope,
    settings: &crate::settings::FeatureSettings,
) -> Option<SkipReason> {
    if scope.suppresses_geocoding() {
        return Some(SkipReason::Suppressed);
    }
    if !settings.is_enabled() {
        return Some(SkipReason::Disabled);
    }
    if event.only_coordinates_changed() {
        return Some(SkipReason::OnlyCoordinatesChanged);
    }
    let record = &event.record;
    if !record.has_address() {
        return Some(SkipReason::NoAddress);
    }
    let overwrite = settings.overwrite_existing.unwrap_or(false);
    if record.has_coordinates() && !overwrite {
        return Some(SkipReason::HasCoordinates);
    }
    if !event.is_new && !event.address_changed() {
        return Some(SkipReason::AddressUnchanged);
    }
    None
}

/// Post-save hook: geocode a created or modified record.
///
/// The updated record is saved with [`SaveScope::SuppressGeocoding`],
/// the host has to pass this scope on to the post-save hooks so that
/// the update does not trigger another lookup.
///
/// Failures are logged and never propagated, the save
/// operation that emitted the event must not be affected.
pub fn geocode_saved_record<R, G>(
    repo: &R,
    geocoder: &G,
    event: &RecordSaved,
    scope: SaveScope,
) -> TriggerOutcome
where
    R: RecordRepo,
    G: AddressGeocoding,
{
    let settings = geocoder.feature_settings();
    if let Some(reason) = skip_reason(event, scope, &settings) {
        log::debug!("Skip geocoding of record {}: {reason:?}", event.record.id);
        return TriggerOutcome::Skipped(reason);
    }
    let Some(result) = geocoder.geocode_record(&event.record, InvocationMode::Interactive) else {
        return TriggerOutcome::NotFound;
    };
    let mut record = event.record.clone();
    sync_fields(&mut record, &result);
    match repo.save_record(&mut record, SaveScope::SuppressGeocoding) {
        Ok(()) => {
            log::info!("Geocoded record {} to {}", record.id, result.pos);
            TriggerOutcome::Geocoded(result)
        }
        Err(err) => {
            log::error!("Failed to geocode record {}: {err}", record.id);
            TriggerOutcome::Failed
        }
    }
}
