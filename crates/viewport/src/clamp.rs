use foundation::{GeofenceBounds, Region, ValidationError, differs};
use serde::Serialize;

/// Result of constraining a candidate viewport to the geofence.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampOutcome {
    pub region: Region,
    /// The center had to move, so the map should animate toward `region`.
    /// Span-only corrections never set this.
    pub animation_required: bool,
}

/// Constrain `candidate` to `bounds` with spans capped at `max_delta`.
///
/// Spans have no lower bound; zooming in is unrestricted. The operation is
/// idempotent and rejects non-finite input instead of propagating it.
pub fn clamp(
    candidate: &Region,
    bounds: &GeofenceBounds,
    max_delta: f64,
) -> Result<ClampOutcome, ValidationError> {
    candidate.validate()?;
    bounds.validate()?;
    if !(max_delta.is_finite() && max_delta > 0.0) {
        return Err(ValidationError::MaxDeltaNotPositive(max_delta));
    }

    let latitude = bounds.clamp_latitude(candidate.latitude);
    let longitude = bounds.clamp_longitude(candidate.longitude);
    let region = Region::new(
        latitude,
        longitude,
        candidate.latitude_delta.min(max_delta),
        candidate.longitude_delta.min(max_delta),
    );

    let animation_required =
        differs(latitude, candidate.latitude) || differs(longitude, candidate.longitude);

    Ok(ClampOutcome {
        region,
        animation_required,
    })
}
