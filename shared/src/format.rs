//! Display strings for the info overlay.

pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{} hrs {} mins", hours, minutes % 60)
    } else {
        format!("{} mins", minutes)
    }
}
