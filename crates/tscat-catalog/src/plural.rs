//! Numerus form selection for different languages
//!
//! Each rule family maps a count to the index of the `<numerusform>` that a
//! translator filled in for that language, in the order Qt Linguist presents
//! the forms.

use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Plural rule family of a target language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// One form for every count (Japanese, Chinese, Korean, ...)
    Single,
    /// `1` / other (English, German, Italian, ...)
    OneOther,
    /// `0` and `1` / other (French, Brazilian Portuguese)
    ZeroOneOther,
    /// Lithuanian: ends in 1 except 11 / ends in 2-9 except 12-19 / other
    Lithuanian,
    /// Latvian: ends in 1 except 11 / non-zero / zero
    Latvian,
    /// Russian, Ukrainian, Serbian, Croatian, ...
    EastSlavic,
    /// Czech and Slovak: 1 / 2-4 / other
    CzechSlovak,
    /// Polish: 1 / ends in 2-4 except 12-14 / other
    Polish,
    /// Slovenian: ends in 01 / 02 / 03-04 / other
    Slovenian,
    /// Romanian: 1 / 0 and ends in 01-19 / other
    Romanian,
    /// Irish: 1 / 2 / other
    Irish,
    /// Arabic: 0 / 1 / 2 / 3-10 / 11-99 / other (all modulo 100)
    Arabic,
}

impl Default for PluralRule {
    fn default() -> Self {
        Self::OneOther
    }
}

impl PluralRule {
    /// Rule for a language tag such as `lt`, `lt_LT` or `pt-BR`.
    ///
    /// Unparseable tags and unknown languages get [`PluralRule::OneOther`].
    pub fn for_tag(tag: &str) -> Self {
        match tag.replace('_', "-").parse::<LanguageIdentifier>() {
            Ok(language) => Self::for_language(&language),
            Err(e) => {
                warn!("Cannot parse language tag '{}' for plural rules: {}", tag, e);
                Self::default()
            }
        }
    }

    /// Rule for a parsed language identifier
    pub fn for_language(language: &LanguageIdentifier) -> Self {
        let region = language.region.as_ref().map(|region| region.as_str());
        match (language.language.as_str(), region) {
            ("ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms", _) => Self::Single,
            ("pt", Some("BR")) | ("fr", _) => Self::ZeroOneOther,
            ("lt", _) => Self::Lithuanian,
            ("lv", _) => Self::Latvian,
            ("ru" | "uk" | "be" | "sr" | "hr" | "bs", _) => Self::EastSlavic,
            ("cs" | "sk", _) => Self::CzechSlovak,
            ("pl", _) => Self::Polish,
            ("sl", _) => Self::Slovenian,
            ("ro", _) => Self::Romanian,
            ("ga", _) => Self::Irish,
            ("ar", _) => Self::Arabic,
            _ => Self::OneOther,
        }
    }

    /// Number of numerus forms a translation should provide
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::Lithuanian
            | Self::Latvian
            | Self::EastSlavic
            | Self::CzechSlovak
            | Self::Polish
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian => 4,
            Self::Arabic => 6,
        }
    }

    /// Index of the numerus form to use for `count`
    pub fn form_index(self, count: i64) -> usize {
        let n = count.unsigned_abs();
        let mod10 = n % 10;
        let mod100 = n % 100;
        let not_teen = !(10..20).contains(&mod100);

        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOneOther => usize::from(n > 1),
            Self::Lithuanian => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if mod10 >= 2 && not_teen {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::EastSlavic => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if (2..=4).contains(&mod10) && not_teen {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&mod10) && not_teen {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match mod100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..20).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Arabic => match (n, mod100) {
                (0, _) => 0,
                (1, _) => 1,
                (2, _) => 2,
                (_, 3..=10) => 3,
                (_, 11..=99) => 4,
                _ => 5,
            },
        }
    }
}
