//! Display formatting shared by the list and map views.

const FEET_PER_MILE: f64 = 5280.0;

/// `0.4` → `"2112 feet"`, `3.25` → `"3.2 miles"`.
#[must_use]
pub fn format_distance(miles: f64) -> String {
    if miles < 1.0 {
        format!("{:.0} feet", (miles * FEET_PER_MILE).round())
    } else {
        format!("{miles:.1} miles")
    }
}

/// `45` → `"45 min"`, `75` → `"1h 15m"`.
#[must_use]
pub fn format_travel_time(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// `3.456` → `"$3.46"`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// `4.5` → `"4.5/5.0"`.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating}/5.0")
}
