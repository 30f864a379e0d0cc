//! Human-readable renderings of the registered time claims.
//!
//! This is a display aid, not a validator: values that are not JSON numbers,
//! or that fall outside the representable date range, are left alone.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Claims holding Unix-second timestamps
pub const TIME_CLAIMS: [&str; 3] = ["iat", "exp", "nbf"];

/// Largest magnitude a millisecond timestamp may have (ECMAScript date range)
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

/// Render Unix seconds as ISO-8601 with millisecond precision, e.g.
/// `2023-11-14T22:13:20.000Z`.
///
/// Fractional milliseconds are truncated. Years outside `0000..=9999` use the
/// six-digit signed form, e.g. `+010000-01-01T00:00:00.000Z`. Returns `None`
/// for non-finite or out-of-range values.
#[must_use]
pub fn format_timestamp(seconds: f64) -> Option<String> {
    let millis = (seconds * 1000.0).trunc();
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return None;
    }

    // Range checked above, the cast is exact
    #[allow(clippy::cast_possible_truncation)]
    let millis = millis as i64;

    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| match dt.year() {
        0..=9999 => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        year => format!(
            "{}{:06}{}",
            if year < 0 { '-' } else { '+' },
            year.unsigned_abs(),
            dt.format("-%m-%dT%H:%M:%S%.3fZ")
        ),
    })
}

/// Copy of `payload` with a `<claim>_human` sibling for each numeric time claim
///
/// Running it again overwrites the same keys with the same values.
#[must_use]
pub fn annotate_timestamps(payload: &Map<String, Value>) -> Map<String, Value> {
    let mut annotated = payload.clone();

    for claim in TIME_CLAIMS {
        let Some(Value::Number(number)) = payload.get(claim) else {
            continue;
        };
        let Some(human) = number.as_f64().and_then(format_timestamp) else {
            tracing::debug!(claim, "time claim outside representable range, not annotated");
            continue;
        };
        annotated.insert(format!("{claim}_human"), Value::String(human));
    }

    annotated
}
