//! Static catalogs exposed to the UI: lyric styles and backing beats.

use serde::Serialize;

/// A lyric style the client can request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Style {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A backing beat preset
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Beat {
    pub id: &'static str,
    pub name: &'static str,
    pub bpm: u16,
    pub description: &'static str,
}

pub const STYLES: &[Style] = &[
    Style {
        id: "rap",
        name: "Classic Rap",
        description: "Straightforward bars with a steady flow",
    },
    Style {
        id: "melodic",
        name: "Melodic",
        description: "Sung hooks and smoother cadence",
    },
    Style {
        id: "trap",
        name: "Trap",
        description: "Triplet flows and heavy ad-libs",
    },
    Style {
        id: "boom-bap",
        name: "Boom Bap",
        description: "Old-school punchlines over hard drums",
    },
    Style {
        id: "drill",
        name: "Drill",
        description: "Dark, aggressive delivery",
    },
];

pub const BEATS: &[Beat] = &[
    Beat {
        id: "boom-bap",
        name: "Boom Bap",
        bpm: 90,
        description: "Classic hip-hop style",
    },
    Beat {
        id: "trap",
        name: "Trap",
        bpm: 140,
        description: "Modern trap beats",
    },
    Beat {
        id: "lo-fi",
        name: "Lo-Fi",
        bpm: 85,
        description: "Chill lo-fi vibes",
    },
    Beat {
        id: "drill",
        name: "Drill",
        bpm: 150,
        description: "Aggressive drill style",
    },
    Beat {
        id: "melodic",
        name: "Melodic",
        bpm: 120,
        description: "Melodic rap style",
    },
];

/// Style used when the request leaves it out
pub const DEFAULT_STYLE: &str = "rap";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_exists() {
        assert!(STYLES.iter().any(|s| s.id == DEFAULT_STYLE));
        assert!(!STYLES.iter().any(|s| s.id == "polka"));
    }

    #[test]
    fn test_beat_ids_unique() {
        let mut ids: Vec<_> = BEATS.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BEATS.len());
    }
}
