//! Multi-timezone countdown calculator
//!
//! Recomputed once per second by the host. Pure and deterministic given
//! `now`; all arithmetic is integer milliseconds since the Unix epoch.

/// The instant everything counts toward: 2025-09-09T00:00:00 UTC
pub const TARGET_MS: i64 = 1_757_376_000_000;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// A display timezone: abbreviation, UTC offset in hours, city label
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub name: &'static str,
    /// Offsets may be fractional (IST is +5.5)
    pub offset_hours: f64,
    pub label: &'static str,
}

/// Display zones, in grid order
pub const ZONES: &[Zone] = &[
    Zone { name: "GMT", offset_hours: 0.0, label: "London" },
    Zone { name: "EST", offset_hours: -5.0, label: "New York" },
    Zone { name: "PST", offset_hours: -8.0, label: "Los Angeles" },
    Zone { name: "CST", offset_hours: -6.0, label: "Chicago" },
    Zone { name: "MST", offset_hours: -7.0, label: "Denver" },
    Zone { name: "WAT", offset_hours: 1.0, label: "Lagos" },
    Zone { name: "CET", offset_hours: 1.0, label: "Paris" },
    Zone { name: "EET", offset_hours: 2.0, label: "Athens" },
    Zone { name: "MSK", offset_hours: 3.0, label: "Moscow" },
    Zone { name: "GST", offset_hours: 4.0, label: "Dubai" },
    Zone { name: "IST", offset_hours: 5.5, label: "Mumbai" },
    Zone { name: "BST", offset_hours: 6.0, label: "Dhaka" },
    Zone { name: "ICT", offset_hours: 7.0, label: "Bangkok" },
    Zone { name: "CST", offset_hours: 8.0, label: "Beijing" },
    Zone { name: "JST", offset_hours: 9.0, label: "Tokyo" },
    Zone { name: "KST", offset_hours: 9.0, label: "Seoul" },
    Zone { name: "AEST", offset_hours: 10.0, label: "Sydney" },
    Zone { name: "NZST", offset_hours: 12.0, label: "Auckland" },
    Zone { name: "BRT", offset_hours: -3.0, label: "São Paulo" },
    Zone { name: "ART", offset_hours: -3.0, label: "Buenos Aires" },
    Zone { name: "EST", offset_hours: -5.0, label: "Toronto" },
    Zone { name: "CST", offset_hours: -6.0, label: "Mexico City" },
    Zone { name: "SAST", offset_hours: 2.0, label: "Cape Town" },
    Zone { name: "SGT", offset_hours: 8.0, label: "Singapore" },
];

/// Days/hours/minutes/seconds decomposition of the remaining duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Per-zone countdown record handed to the display layer
#[derive(Debug, Clone, Copy)]
pub struct ZoneCountdown {
    pub name: &'static str,
    pub label: &'static str,
    /// The target has already passed in this zone
    pub is_past: bool,
    pub time: TimeParts,
}

/// Compute the countdown for every zone at `now` (epoch ms), in `ZONES`
/// order.
pub fn recompute(now_ms: i64) -> Vec<ZoneCountdown> {
    ZONES.iter().map(|zone| zone_countdown(zone, now_ms)).collect()
}

fn zone_countdown(zone: &Zone, now_ms: i64) -> ZoneCountdown {
    // Shift the absolute target so comparing against UTC `now` yields the
    // wall-clock-equivalent remaining duration for this zone
    let target_local = TARGET_MS - (zone.offset_hours * MS_PER_HOUR as f64) as i64;
    let delta = target_local - now_ms;
    let is_past = delta < 0;
    let abs = delta.abs();

    ZoneCountdown {
        name: zone.name,
        label: zone.label,
        is_past,
        time: TimeParts {
            days: abs / MS_PER_DAY,
            hours: abs % MS_PER_DAY / MS_PER_HOUR,
            minutes: abs % MS_PER_HOUR / MS_PER_MINUTE,
            seconds: abs % MS_PER_MINUTE / MS_PER_SECOND,
        },
    }
}
