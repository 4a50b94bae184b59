//! 6-byte packed-BCD timestamps
//!
//! The wire format carries wall-clock time as `YY MM DD HH MM SS`, one
//! decimal digit per nibble. Outbound frames are stamped with the
//! platform's current local time; device-reported timestamps are
//! formatted for property output.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

/// Length of a packed timestamp on the wire
pub const TIMESTAMP_LEN: usize = 6;

/// Current platform time as packed BCD
pub fn now_bcd() -> [u8; TIMESTAMP_LEN] {
    from_datetime(&Local::now())
}

/// Pack a datetime into the 6-byte BCD wire form (two-digit year)
pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> [u8; TIMESTAMP_LEN] {
    [
        to_bcd((dt.year().rem_euclid(100)) as u8),
        to_bcd(dt.month() as u8),
        to_bcd(dt.day() as u8),
        to_bcd(dt.hour() as u8),
        to_bcd(dt.minute() as u8),
        to_bcd(dt.second() as u8),
    ]
}

/// Render a packed timestamp as `20YY-MM-DD HH:MM:SS`
///
/// BCD nibbles print directly as hex digits, so no unpacking is needed.
pub fn format(ts: &[u8; TIMESTAMP_LEN]) -> String {
    format!(
        "20{:02x}-{:02x}-{:02x} {:02x}:{:02x}:{:02x}",
        ts[0], ts[1], ts[2], ts[3], ts[4], ts[5]
    )
}

fn to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}
