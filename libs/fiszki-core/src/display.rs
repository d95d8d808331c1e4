//! Display formatting shared by server and UI layers.

/// Human-readable rendering of an interval in days.
///
/// A zero interval means the card comes back within the same short-term
/// window. Weeks and months truncate, matching how grade buttons caption
/// their intervals.
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        return "<10m".to_string();
    }
    if days == 1 {
        return "1 day".to_string();
    }
    if days < 7 {
        return format!("{days} days");
    }
    if days < 30 {
        let weeks = days / 7;
        return if weeks == 1 {
            "1 week".to_string()
        } else {
            format!("{weeks} weeks")
        };
    }
    let months = days / 30;
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{months} months")
    }
}
