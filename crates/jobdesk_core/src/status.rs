//! Single status → badge table shared by every view.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge<'a> {
    pub label: &'a str,
    pub color: Rgb,
}

pub const UNKNOWN_COLOR: Rgb = Rgb(0x99, 0x99, 0x99);

// Job and file lifecycles share the `error` entry.
const BADGES: &[(&str, &str, Rgb)] = &[
    ("pending", "Pending", Rgb(0xFF, 0xA5, 0x00)),
    ("processing", "Processing", Rgb(0x21, 0x96, 0xF3)),
    ("completed", "Completed", Rgb(0x4C, 0xAF, 0x50)),
    ("init", "Init", Rgb(0x9E, 0x9E, 0x9E)),
    ("active", "Active", Rgb(0x21, 0x96, 0xF3)),
    ("success", "Success", Rgb(0x4C, 0xAF, 0x50)),
    ("error", "Error", Rgb(0xF4, 0x43, 0x36)),
];

/// Looks up the badge for a wire status; unknown values keep their raw text.
pub fn badge(wire: &str) -> Badge<'_> {
    BADGES
        .iter()
        .find(|(key, _, _)| *key == wire)
        .map(|&(_, label, color)| Badge { label, color })
        .unwrap_or(Badge {
            label: wire,
            color: UNKNOWN_COLOR,
        })
}
