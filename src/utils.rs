use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / KIB
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// `1.50 KB`, always two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes_to_kb(bytes))
}

/// `12.34 MB`, always two decimals.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes_to_mb(bytes))
}

/// Must be called before any worker threads exist; on Unix the lookup
/// refuses to run in a multi-threaded process and we fall back to UTC.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn format_timestamp(timestamp: OffsetDateTime, offset: UtcOffset) -> String {
    let local = timestamp.to_offset(offset);
    local
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| local.to_string())
}

pub fn format_human_elapsed(elapsed: std::time::Duration) -> String {
    let elapsed_secs = elapsed.as_secs();
    let elapsed_subsec_millis = elapsed.subsec_millis();
    if elapsed_secs >= 3600 {
        let hours = elapsed_secs / 3600;
        let minutes = (elapsed_secs % 3600) / 60;
        let seconds = elapsed_secs % 60;
        format!("{hours}:{minutes:02}:{seconds:02}.{elapsed_subsec_millis:03} (h:mm:ss.mmm)")
    } else if elapsed_secs >= 60 {
        let minutes = elapsed_secs / 60;
        let seconds = elapsed_secs % 60;
        format!("{minutes}:{seconds:02}.{elapsed_subsec_millis:03} (m:ss.mmm)")
    } else {
        format!("{}.{:03} seconds", elapsed_secs, elapsed_subsec_millis)
    }
}
