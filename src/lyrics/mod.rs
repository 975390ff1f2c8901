//! Lyric post-processing: line splitting, verse grouping and filler ad-libs.
//!
//! Rhyme schemes are carried as metadata only. A scheme is validated and
//! echoed back to the caller but does not reorder or select lines.

pub mod catalog;
pub mod generator;

pub use catalog::{Beat, Style, BEATS, STYLES};
pub use generator::{GenerateOutcome, LyricsSource, RapGenerator, SummaryOutcome};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ad-libs appended to lines at random
pub const DEFAULT_FILLERS: &[&str] = &[
    "yeah",
    "uh",
    "yo",
    "check it",
    "listen",
    "word",
    "straight up",
    "no cap",
    "facts",
    "real talk",
    "you know",
    "like that",
    "for real",
];

/// Separator placed between verses in rendered lyrics
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Rhyme scheme requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RhymeScheme {
    #[serde(rename = "AABB")]
    Aabb,
    #[default]
    #[serde(rename = "ABAB")]
    Abab,
    #[serde(rename = "ABCB")]
    Abcb,
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RhymeScheme {
    pub const ALL: [RhymeScheme; 4] = [Self::Aabb, Self::Abab, Self::Abcb, Self::Aaaa];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Aabb => "AABB",
            Self::Abab => "ABAB",
            Self::Abcb => "ABCB",
            Self::Aaaa => "AAAA",
        }
    }

    /// Line-by-line rhyme letters for a four line verse
    pub fn pattern(&self) -> [char; 4] {
        match self {
            Self::Aabb => ['A', 'A', 'B', 'B'],
            Self::Abab => ['A', 'B', 'A', 'B'],
            Self::Abcb => ['A', 'B', 'C', 'B'],
            Self::Aaaa => ['A', 'A', 'A', 'A'],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Aabb => "Couplets",
            Self::Abab => "Alternating",
            Self::Abcb => "Ballad",
            Self::Aaaa => "Monorhyme",
        }
    }
}

impl std::fmt::Display for RhymeScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Knobs for [`structure_lyrics`]
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Lines per verse; zero is treated as one
    pub verse_lines: usize,
    /// Chance that a line gets an ad-lib appended
    pub filler_probability: f64,
    pub fillers: Vec<String>,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            verse_lines: 4,
            filler_probability: 0.3,
            fillers: DEFAULT_FILLERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StructureOptions {
    pub fn from_config(config: &crate::config::GenerationConfig) -> Self {
        Self {
            verse_lines: config.verse_lines,
            filler_probability: config.filler_probability,
            fillers: config.fillers.clone(),
        }
    }

    fn clamped_probability(&self) -> f64 {
        if self.filler_probability.is_finite() {
            self.filler_probability.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Lyrics grouped into verses of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredLyrics {
    pub verses: Vec<Vec<String>>,
}

impl StructuredLyrics {
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn line_count(&self) -> usize {
        self.verses.iter().map(Vec::len).sum()
    }

    /// Lines joined by newlines, verses separated by a blank line
    pub fn render(&self) -> String {
        self.verses
            .iter()
            .map(|verse| verse.join("\n"))
            .collect::<Vec<_>>()
            .join(VERSE_SEPARATOR)
    }
}

/// Split text into trimmed, non-empty lines. A single-line block is further
/// split into sentences so model output without line breaks still forms verses.
pub fn split_lines(raw: &str) -> Vec<String> {
    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() == 1 {
        split_sentences(&lines[0])
    } else {
        lines
    }
}

/// Split at `.`, `!` or `?` followed by whitespace, keeping the punctuation
fn split_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    let end = idx + c.len_utf8();
                    let sentence = line[start..end].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    start = end;
                }
            }
        }
    }

    let tail = line[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Group raw text into verses and sprinkle in filler ad-libs.
///
/// Never fails; text with no usable lines yields an empty structure.
pub fn structure_lyrics<R: Rng + ?Sized>(
    raw: &str,
    options: &StructureOptions,
    rng: &mut R,
) -> StructuredLyrics {
    let lines = split_lines(raw);
    let verse_lines = options.verse_lines.max(1);
    let probability = options.clamped_probability();

    let verses = lines
        .chunks(verse_lines)
        .map(|chunk| {
            chunk
                .iter()
                .map(|line| {
                    if !rng.gen_bool(probability) {
                        return line.clone();
                    }
                    match options.fillers.choose(&mut *rng) {
                        Some(filler) => format!("{line} ({filler})"),
                        None => line.clone(),
                    }
                })
                .collect()
        })
        .collect();

    StructuredLyrics { verses }
}

/// Deterministic lyrics built from the input's longer words, used whenever the
/// generation model is unavailable. Always returns at least one verse.
pub fn fallback_lyrics(content: &str) -> String {
    let keywords: Vec<&str> = content
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(8)
        .collect();

    let pairs: Vec<(&str, &str)> = if keywords.is_empty() {
        vec![("knowledge", "power")]
    } else {
        keywords
            .chunks(2)
            .map(|pair| (pair[0], pair.get(1).copied().unwrap_or("power")))
            .collect()
    };

    let mut verses = Vec::with_capacity(pairs.len() * 4);
    for (first, second) in pairs {
        verses.push(format!("Talking 'bout {first}, that's the way I flow"));
        verses.push(format!("{second} in my mind, watch my skills grow"));
        verses.push("Breaking down the facts, make it all clear".to_string());
        verses.push("Spitting knowledge like a pro, year after year".to_string());
    }

    verses.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn no_fillers(verse_lines: usize) -> StructureOptions {
        StructureOptions {
            verse_lines,
            filler_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_split_lines_drops_blank_lines() {
        let lines = split_lines("one\n\n  two  \n\t\nthree");
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_single_line_split_into_sentences() {
        let lines = split_lines("I came. I saw! Did I conquer? Maybe");
        assert_eq!(lines, vec!["I came.", "I saw!", "Did I conquer?", "Maybe"]);
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        let lines = split_lines("Version 2.5 is out. Go get it.");
        assert_eq!(lines, vec!["Version 2.5 is out.", "Go get it."]);
    }

    #[test]
    fn test_groups_into_verses_of_four() {
        let raw = (1..=10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let lyrics = structure_lyrics(&raw, &no_fillers(4), &mut StepRng::new(0, 0));

        assert_eq!(lyrics.verse_count(), 3);
        assert_eq!(lyrics.verses[0].len(), 4);
        assert_eq!(lyrics.verses[2], vec!["line 9", "line 10"]);
        assert_eq!(lyrics.line_count(), 10);
    }

    #[test]
    fn test_verse_size_of_two() {
        let raw = "a\nb\nc\nd";
        let lyrics = structure_lyrics(raw, &no_fillers(2), &mut StepRng::new(0, 0));
        assert_eq!(lyrics.render(), "a\nb\n\nc\nd");
    }

    #[test]
    fn test_zero_verse_lines_treated_as_one() {
        let lyrics = structure_lyrics("a\nb", &no_fillers(0), &mut StepRng::new(0, 0));
        assert_eq!(lyrics.verse_count(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_structure() {
        let lyrics = structure_lyrics("  \n \n", &StructureOptions::default(), &mut StepRng::new(0, 0));
        assert!(lyrics.is_empty());
        assert_eq!(lyrics.render(), "");
    }

    #[test]
    fn test_blank_line_split_reproduces_verse_count() {
        let raw = (1..=13).map(|i| format!("bar number {i}")).collect::<Vec<_>>().join("\n");
        let mut rng = StdRng::seed_from_u64(7);
        let options = StructureOptions {
            filler_probability: 0.5,
            ..Default::default()
        };

        let lyrics = structure_lyrics(&raw, &options, &mut rng);
        let rendered = lyrics.render();

        assert_eq!(rendered.split(VERSE_SEPARATOR).count(), lyrics.verse_count());
    }

    #[test]
    fn test_restructuring_rendered_output_is_stable() {
        let raw = "one\ntwo\nthree\nfour\nfive";
        let options = no_fillers(4);
        let first = structure_lyrics(raw, &options, &mut StepRng::new(0, 0)).render();
        let second = structure_lyrics(&first, &options, &mut StepRng::new(0, 0)).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_always_filler_appends_from_set() {
        let options = StructureOptions {
            filler_probability: 1.0,
            ..Default::default()
        };
        let lyrics = structure_lyrics("first\nsecond", &options, &mut StepRng::new(0, 1));

        for line in lyrics.verses.iter().flatten() {
            let (_, filler) = line.split_once(" (").expect("filler missing");
            let filler = filler.trim_end_matches(')');
            assert!(DEFAULT_FILLERS.contains(&filler), "unexpected filler {filler}");
        }
    }

    #[test]
    fn test_empty_filler_set_leaves_lines_untouched() {
        let options = StructureOptions {
            filler_probability: 1.0,
            fillers: Vec::new(),
            ..Default::default()
        };
        let lyrics = structure_lyrics("first\nsecond", &options, &mut StepRng::new(0, 0));
        assert_eq!(lyrics.render(), "first\nsecond");
    }

    #[test]
    fn test_out_of_range_probability_does_not_panic() {
        for p in [-1.0, 2.0, f64::NAN, f64::INFINITY] {
            let options = StructureOptions {
                filler_probability: p,
                ..Default::default()
            };
            let lyrics = structure_lyrics("a\nb", &options, &mut StepRng::new(0, 0));
            assert_eq!(lyrics.line_count(), 2);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let raw = "alpha\nbeta\ngamma\ndelta\nepsilon\nzeta";
        let options = StructureOptions::default();
        let a = structure_lyrics(raw, &options, &mut StdRng::seed_from_u64(42));
        let b = structure_lyrics(raw, &options, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_lyrics_uses_long_words() {
        let lyrics = fallback_lyrics("The mitochondria is the powerhouse of a cat");
        let lines: Vec<&str> = lyrics.lines().collect();

        // "mitochondria" and "powerhouse" are the only words longer than 3 chars
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Talking 'bout mitochondria, that's the way I flow");
        assert_eq!(lines[1], "powerhouse in my mind, watch my skills grow");
    }

    #[test]
    fn test_fallback_lyrics_caps_keywords() {
        let text = "alpha bravo charlie delta echoes foxtrot golfer hotel india juliet";
        assert_eq!(fallback_lyrics(text).lines().count(), 16);
    }

    #[test]
    fn test_fallback_lyrics_odd_keyword_uses_default_partner() {
        let lyrics = fallback_lyrics("rhythm");
        assert!(lyrics.contains("power in my mind"));
    }

    #[test]
    fn test_fallback_lyrics_never_empty() {
        let lyrics = fallback_lyrics("a an the");
        assert!(lyrics.starts_with("Talking 'bout knowledge"));
        assert_eq!(lyrics.lines().count(), 4);
    }

    #[test]
    fn test_rhyme_scheme_serde() {
        let scheme: RhymeScheme = serde_json::from_str("\"ABCB\"").unwrap();
        assert_eq!(scheme, RhymeScheme::Abcb);
        assert_eq!(serde_json::to_string(&RhymeScheme::Aabb).unwrap(), "\"AABB\"");
        assert!(serde_json::from_str::<RhymeScheme>("\"XYZ\"").is_err());
        assert_eq!(RhymeScheme::default(), RhymeScheme::Abab);
    }

    #[test]
    fn test_rhyme_scheme_patterns() {
        assert_eq!(RhymeScheme::Abcb.pattern(), ['A', 'B', 'C', 'B']);
        for scheme in RhymeScheme::ALL {
            assert_eq!(scheme.pattern().iter().collect::<String>(), scheme.id());
        }
    }
}
