//! Kana folding and syllabary row bucketing for champion names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const KATAKANA_START: u32 = 0x30A1;
const KATAKANA_END: u32 = 0x30F6;
const HIRAGANA_START: u32 = 0x3041;
const HIRAGANA_END: u32 = 0x3096;
/// Distance between a katakana letter and its hiragana counterpart.
const KANA_OFFSET: u32 = 0x60;

const HIRAGANA_VU: char = '\u{3094}';
const KATAKANA_VU: char = '\u{30F4}';

/// Fold one katakana letter onto hiragana; anything else is returned as-is.
pub fn katakana_char_to_hiragana(ch: char) -> char {
    let code = ch as u32;
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

fn hiragana_char_to_katakana(ch: char) -> char {
    let code = ch as u32;
    if (HIRAGANA_START..=HIRAGANA_END).contains(&code) {
        char::from_u32(code + KANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(katakana_char_to_hiragana).collect()
}

pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars().map(hiragana_char_to_katakana).collect()
}

/// Canonical form used for every text comparison in search.
///
/// ASCII letters are lowercased and katakana is folded onto hiragana. Other
/// characters pass through untouched, so the result is idempotent.
pub fn normalize_for_search(s: &str) -> String {
    s.chars()
        .map(|ch| katakana_char_to_hiragana(ch.to_ascii_lowercase()))
        .collect()
}

/// The ten consonant rows of the gojūon ordering, plus a catch-all.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum KanaRow {
    A,
    Ka,
    Sa,
    Ta,
    Na,
    Ha,
    Ma,
    Ya,
    Ra,
    Wa,
    Other,
}

/// Inclusive upper codepoint of each row inside the hiragana block.
const ROW_BOUNDS: [(u32, KanaRow); 10] = [
    (0x304A, KanaRow::A),
    (0x3054, KanaRow::Ka),
    (0x305E, KanaRow::Sa),
    (0x3069, KanaRow::Ta),
    (0x306E, KanaRow::Na),
    (0x307D, KanaRow::Ha),
    (0x3082, KanaRow::Ma),
    (0x3088, KanaRow::Ya),
    (0x308D, KanaRow::Ra),
    (0x3093, KanaRow::Wa),
];

impl KanaRow {
    pub const ALL: [KanaRow; 11] = [
        KanaRow::A,
        KanaRow::Ka,
        KanaRow::Sa,
        KanaRow::Ta,
        KanaRow::Na,
        KanaRow::Ha,
        KanaRow::Ma,
        KanaRow::Ya,
        KanaRow::Ra,
        KanaRow::Wa,
        KanaRow::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KanaRow::A => "あ行",
            KanaRow::Ka => "か行",
            KanaRow::Sa => "さ行",
            KanaRow::Ta => "た行",
            KanaRow::Na => "な行",
            KanaRow::Ha => "は行",
            KanaRow::Ma => "ま行",
            KanaRow::Ya => "や行",
            KanaRow::Ra => "ら行",
            KanaRow::Wa => "わ行",
            KanaRow::Other => "その他",
        }
    }

    /// Bucket a single character. Total over every `char`.
    ///
    /// `ゔ`/`ヴ` sit past the わ row in codepoint order but read as a voiced
    /// `う`, so they are pinned to the あ row. The small `ゕ`/`ゖ` at the tail
    /// of the block fall through to [`KanaRow::Other`].
    pub fn classify(ch: char) -> KanaRow {
        if ch == HIRAGANA_VU || ch == KATAKANA_VU {
            return KanaRow::A;
        }
        let code = katakana_char_to_hiragana(ch) as u32;
        if !(HIRAGANA_START..=HIRAGANA_END).contains(&code) {
            return KanaRow::Other;
        }
        ROW_BOUNDS
            .iter()
            .find(|(upper, _)| code <= *upper)
            .map(|(_, row)| *row)
            .unwrap_or(KanaRow::Other)
    }

    /// Row of a display name, decided by its first character.
    pub fn of_name(name: &str) -> KanaRow {
        name.chars().next().map(KanaRow::classify).unwrap_or(KanaRow::Other)
    }
}

impl std::fmt::Display for KanaRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
