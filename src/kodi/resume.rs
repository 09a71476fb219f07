//! Resume-progress normalization
//!
//! Movies and episodes report progress as `resume: {position, total}`;
//! seasons and shows report `watchedepisodes` out of `episode`. Both are
//! folded into `resume.percentage`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::kodi::models::MediaRecord;

const RESUME_LOG_TARGET: &str = "kodi_controller::kodi::resume";

pub const RESUME_FIELD: &str = "resume";
pub const PERCENTAGE_FIELD: &str = "percentage";

/// `100 * position / total`, or `0` when either side is zero.
///
/// Out-of-range inputs are passed through unclamped. A ratio that does not
/// fit in an `f64` yields `0`, since JSON has no infinity.
pub fn percentage(position: f64, total: f64) -> f64 {
    if position == 0.0 || total == 0.0 {
        return 0.0;
    }
    let value = 100.0 * position / total;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Numeric field as `f64`; numeric strings are accepted too.
fn number(record: &Map<String, Value>, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Set `resume.percentage` on `record`.
pub fn normalize(record: &mut MediaRecord) {
    let progress = match record.get(RESUME_FIELD) {
        Some(Value::Object(resume)) => number(resume, "position").zip(number(resume, "total")),
        _ => None,
    }
    .or_else(|| number(record, "watchedepisodes").zip(number(record, "episode")));

    let value = match progress {
        Some((position, total)) => percentage(position, total),
        None => {
            debug!(target: RESUME_LOG_TARGET, "Unable to get values to calculate resume percentage");
            0.0
        }
    };

    if !matches!(record.get(RESUME_FIELD), Some(Value::Object(_))) {
        record.insert(RESUME_FIELD.to_string(), Value::Object(Map::new()));
    }

    if let Some(Value::Object(resume)) = record.get_mut(RESUME_FIELD) {
        resume.insert(PERCENTAGE_FIELD.to_string(), Value::from(value));
    }
}

/// [`normalize`] every record in place.
pub fn normalize_all(records: &mut [MediaRecord]) {
    records.iter_mut().for_each(normalize);
}

/// `resume.percentage` of a normalized record.
pub fn percentage_of(record: &MediaRecord) -> Option<f64> {
    record.get(RESUME_FIELD)?.get(PERCENTAGE_FIELD)?.as_f64()
}
