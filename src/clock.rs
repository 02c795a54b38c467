//! Current local time for the few cities the office agent knows about.

mod response;

pub use response::TimeResponse;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Maps a city name to its timezone. Only a small fixed set of cities is known.
fn timezone_for(city: &str) -> Option<Tz> {
    match city.trim().to_lowercase().as_str() {
        "new york" => Some(chrono_tz::America::New_York),
        "bogota" | "colombia" => Some(chrono_tz::America::Bogota),
        _ => None,
    }
}

/// Returns the current time in the given city.
pub fn get_current_time(city: &str) -> TimeResponse {
    time_at(city, Utc::now())
}

/// Formats `now` as wall-clock time in the given city.
///
/// # Arguments
/// * `city` - City name, matched case-insensitively (e.g., "New York", "bogota")
/// * `now` - The instant to convert
///
/// # Returns
/// * `TimeResponse::Success` with the formatted local time
/// * `TimeResponse::Error` naming the city, as given, when its timezone is unknown
pub fn time_at(city: &str, now: DateTime<Utc>) -> TimeResponse {
    info!("Looking up time for city: {}", city);

    match timezone_for(city) {
        Some(tz) => {
            let report = now.with_timezone(&tz).format(TIME_FORMAT).to_string();
            debug!("Resolved {} to {}: {}", city, tz, report);
            TimeResponse::Success { report }
        }
        None => TimeResponse::Error {
            error_message: format!("Timezone for {} not available.", city),
        },
    }
}
