//! Built-in rhyme suffix table.
//!
//! Entries are matched in declaration order and the first suffix a word ends
//! with wins, so more specific endings must come before broader ones.

/// A word ending and the words that rhyme on it
#[derive(Debug, Clone, Copy)]
pub struct RhymeGroup {
    /// Lowercase ending matched with `ends_with`
    pub suffix: &'static str,
    /// Candidate rhymes, lowercase, in presentation order
    pub words: &'static [&'static str],
}

pub const IGHT: RhymeGroup = RhymeGroup {
    suffix: "ight",
    words: &[
        "night", "light", "right", "sight", "bright", "fight", "tight", "might", "height",
        "flight",
    ],
};

pub const OW: RhymeGroup = RhymeGroup {
    suffix: "ow",
    words: &["flow", "show", "know", "grow", "blow", "slow", "glow", "throw"],
};

pub const IND: RhymeGroup = RhymeGroup {
    suffix: "ind",
    words: &["mind", "find", "kind", "blind", "grind", "bind", "behind", "rewind"],
};

pub const EAL: RhymeGroup = RhymeGroup {
    suffix: "eal",
    words: &["real", "deal", "steal", "heal", "meal", "seal", "reveal", "appeal"],
};

pub const EEL: RhymeGroup = RhymeGroup {
    suffix: "eel",
    words: &["feel", "steel", "wheel", "reel", "heel", "kneel"],
};

pub const IME: RhymeGroup = RhymeGroup {
    suffix: "ime",
    words: &["time", "crime", "dime", "prime", "chime", "lime", "sublime", "overtime"],
};

pub const AY: RhymeGroup = RhymeGroup {
    suffix: "ay",
    words: &["way", "say", "play", "day", "stay", "pay", "display", "today", "okay"],
};

pub const AME: RhymeGroup = RhymeGroup {
    suffix: "ame",
    words: &["game", "fame", "name", "same", "flame", "frame", "blame", "came"],
};

pub const EAT: RhymeGroup = RhymeGroup {
    suffix: "eat",
    words: &["beat", "heat", "seat", "treat", "repeat", "defeat", "cheat"],
};

pub const EET: RhymeGroup = RhymeGroup {
    suffix: "eet",
    words: &["street", "meet", "feet", "sweet", "fleet", "sheet", "greet"],
};

pub const AIN: RhymeGroup = RhymeGroup {
    suffix: "ain",
    words: &["brain", "pain", "rain", "gain", "chain", "main", "train", "remain"],
};

pub const ESS: RhymeGroup = RhymeGroup {
    suffix: "ess",
    words: &["success", "stress", "bless", "less", "press", "mess", "progress", "express"],
};

pub const ING: RhymeGroup = RhymeGroup {
    suffix: "ing",
    words: &["king", "ring", "bring", "sing", "thing", "swing", "sting", "spring"],
};

pub const AR: RhymeGroup = RhymeGroup {
    suffix: "ar",
    words: &["bar", "star", "car", "far", "scar", "guitar", "jar"],
};

/// Every built-in group, in match order
pub const BUILTIN_GROUPS: &[RhymeGroup] = &[
    IGHT, OW, IND, EAL, EEL, IME, AY, AME, EAT, EET, AIN, ESS, ING, AR,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for group in BUILTIN_GROUPS {
            assert!(seen.insert(group.suffix), "duplicate suffix {}", group.suffix);
        }
    }

    #[test]
    fn test_words_are_lowercase_and_non_empty() {
        for group in BUILTIN_GROUPS {
            assert!(!group.suffix.is_empty());
            assert!(!group.words.is_empty(), "group {} has no words", group.suffix);
            for word in group.words {
                assert_eq!(*word, word.to_lowercase(), "word {word} is not lowercase");
            }
        }
    }

    #[test]
    fn test_every_word_ends_with_its_suffix() {
        for group in BUILTIN_GROUPS {
            for word in group.words {
                assert!(
                    word.ends_with(group.suffix),
                    "{word} does not end with {}",
                    group.suffix
                );
            }
        }
    }
}
