//! Text sources and initials extraction.
//!
//! A [`TextSource`] yields two projections through [`TextSource::extract`]:
//! the short initials that get drawn, and the long text that feeds the color
//! hash. Hashing the long text keeps "Ada Lovelace" and "Al Lopez" apart
//! even though both render as "AL".

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::{Graphemes, UnicodeSegmentation};

// ============================================================================
// TextSource
// ============================================================================

/// Default number of initials taken from a name.
pub const DEFAULT_MAX_INITIALS: usize = 2;

/// Maximum number of characters kept from an abbreviated structured name.
const MAX_COMPONENT_INITIALS: usize = 2;

/// The text an avatar is labeled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Initials given directly, drawn as-is.
    Initials(String),

    /// A full display name. Initials are derived from at most `max` words.
    Name { name: String, max: usize },

    /// Structured name components.
    Components(PersonName),
}

impl TextSource {
    /// Uses `initials` verbatim.
    pub fn initials(initials: impl Into<String>) -> Self {
        Self::Initials(initials.into())
    }

    /// Derives initials from a display name, taking at most two.
    pub fn name(name: impl Into<String>) -> Self {
        Self::name_with_max(name, DEFAULT_MAX_INITIALS)
    }

    /// Derives initials from a display name, taking at most `max`.
    pub fn name_with_max(name: impl Into<String>, max: usize) -> Self {
        Self::Name {
            name: name.into(),
            max,
        }
    }

    /// Derives initials from structured name components.
    pub fn components(name: PersonName) -> Self {
        Self::Components(name)
    }

    /// Extracts the drawn initials and the hashed long text.
    pub fn extract(&self) -> Initials {
        match self {
            Self::Initials(initials) => Initials {
                short: initials.clone(),
                long: initials.clone(),
            },
            Self::Name { name, max } => Initials {
                short: name_initials(name, *max),
                long: name.clone(),
            },
            Self::Components(components) => Initials {
                short: clusters(&components.abbreviated())
                    .take(MAX_COMPONENT_INITIALS)
                    .collect(),
                long: components.long(),
            },
        }
    }
}

impl From<PersonName> for TextSource {
    fn from(name: PersonName) -> Self {
        Self::Components(name)
    }
}

/// The two projections of a [`TextSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Initials {
    /// Short text drawn inside the avatar.
    pub short: String,

    /// Full text used only to perturb the color hash.
    pub long: String,
}

impl Initials {
    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.short.is_empty()
    }
}

/// Initials for a display name.
///
/// A single word contributes its first `max` characters, uppercased.
/// Several words contribute the first character of each of the first `max`
/// words, in their original case.
fn name_initials(name: &str, max: usize) -> String {
    let words: Vec<&str> = words(name).collect();

    match words.as_slice() {
        [word] => clusters(word).take(max).collect::<String>().to_uppercase(),
        _ => words
            .iter()
            .take(max)
            .filter_map(|word| clusters(word).next())
            .collect(),
    }
}

// ============================================================================
// PersonName
// ============================================================================

/// Display order of structured name components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrder {
    /// Pick from the script of the given and family names.
    #[default]
    Auto,
    /// "Ada Lovelace".
    GivenFirst,
    /// "山田太郎".
    FamilyFirst,
}

/// Structured components of a person's name.
///
/// Empty or whitespace-only components are treated as absent.
///
/// # Example
///
/// ```
/// use initials_avatar::{PersonName, TextSource};
///
/// let name = PersonName::new().given("Ada").middle("King").family("Lovelace");
/// let initials = TextSource::components(name).extract();
///
/// assert_eq!(initials.short, "AL");
/// assert_eq!(initials.long, "Ada King Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonName {
    pub name_prefix: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub family_name: Option<String>,
    pub name_suffix: Option<String>,
    pub nickname: Option<String>,
    pub order: NameOrder,
}

impl PersonName {
    /// Creates an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn given(mut self, given: impl Into<String>) -> Self {
        self.given_name = Some(given.into());
        self
    }

    pub fn middle(mut self, middle: impl Into<String>) -> Self {
        self.middle_name = Some(middle.into());
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family_name = Some(family.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = Some(suffix.into());
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn order(mut self, order: NameOrder) -> Self {
        self.order = order;
        self
    }

    /// Resolves [`NameOrder::Auto`] to a concrete order.
    pub fn resolved_order(&self) -> NameOrder {
        match self.order {
            NameOrder::Auto => {
                let east_asian = [&self.given_name, &self.family_name]
                    .into_iter()
                    .filter_map(|part| part.as_deref())
                    .any(|part| part.chars().any(is_east_asian));
                if east_asian {
                    NameOrder::FamilyFirst
                } else {
                    NameOrder::GivenFirst
                }
            }
            order => order,
        }
    }

    /// Abbreviated form: one character per displayed name part.
    ///
    /// Falls back to the nickname, then the middle name, when neither a
    /// given nor a family name is present.
    pub fn abbreviated(&self) -> String {
        let given = component(&self.given_name);
        let family = component(&self.family_name);

        let ordered = match self.resolved_order() {
            NameOrder::FamilyFirst => [family, given],
            _ => [given, family],
        };

        let abbreviated: String = ordered
            .into_iter()
            .flatten()
            .filter_map(|part| clusters(part).next())
            .collect();

        if !abbreviated.is_empty() {
            return abbreviated;
        }

        [component(&self.nickname), component(&self.middle_name)]
            .into_iter()
            .flatten()
            .find_map(|part| clusters(part).next())
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Long form: every present component in display order.
    pub fn long(&self) -> String {
        match self.resolved_order() {
            NameOrder::FamilyFirst => [&self.family_name, &self.given_name, &self.middle_name]
                .into_iter()
                .filter_map(component)
                .collect(),
            _ => [
                &self.name_prefix,
                &self.given_name,
                &self.middle_name,
                &self.family_name,
                &self.name_suffix,
            ]
            .into_iter()
            .filter_map(component)
            .collect::<Vec<_>>()
            .join(" "),
        }
    }
}

fn component(part: &Option<String>) -> Option<&str> {
    part.as_deref().map(str::trim).filter(|part| !part.is_empty())
}

// ============================================================================
// Unicode Helpers
// ============================================================================

/// Splits on whitespace and punctuation, skipping empty words.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || is_punctuation(c))
        .filter(|word| !word.is_empty())
}

/// Iterates over user-perceived characters (extended grapheme clusters).
fn clusters(text: &str) -> Graphemes<'_> {
    text.graphemes(true)
}

/// Unicode punctuation (general category P*).
fn is_punctuation(c: char) -> bool {
    matches!(
        c.general_category_group(),
        GeneralCategoryGroup::Punctuation
    )
}

/// Han, kana and Hangul scripts, which display family names first.
const EAST_ASIAN: &[(u32, u32)] = &[
    (0x1100, 0x11FF),
    (0x3040, 0x30FF),
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xAC00, 0xD7AF),
    (0xF900, 0xFAFF),
    (0x20000, 0x2FA1F),
];

fn is_east_asian(c: char) -> bool {
    let c = u32::from(c);
    EAST_ASIAN
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn short(source: TextSource) -> String {
        source.extract().short
    }

    #[test]
    fn verbatim_initials() {
        let initials = TextSource::initials("xYz").extract();
        assert_eq!(initials.short, "xYz");
        assert_eq!(initials.long, "xYz");
    }

    // A single word is uppercased and cut to `max` characters; several
    // words keep the case of each first character. The asymmetry is
    // intentional.
    #[rstest]
    #[case("Zoe", 2, "ZO")]
    #[case("Zoe", 5, "ZOE")]
    #[case("zoe", 1, "Z")]
    #[case("ada lovelace", 2, "al")]
    #[case("Ada Lovelace", 2, "AL")]
    #[case("Ada King Lovelace", 2, "AK")]
    #[case("Ada King Lovelace", 3, "AKL")]
    #[case("  Zoe  ", 2, "ZO")]
    #[case("O'Brien", 2, "OB")]
    #[case("jean-luc picard", 2, "jl")]
    #[case("Ada,Lovelace", 2, "AL")]
    #[case("ada\tlovelace\n", 2, "al")]
    #[case("Zoe", 0, "")]
    #[case("", 2, "")]
    #[case("  ...  ", 2, "")]
    fn name_initials_cases(#[case] name: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(short(TextSource::name_with_max(name, max)), expected);
    }

    #[test]
    fn name_defaults_to_two_initials() {
        assert_eq!(TextSource::name("Zoe"), TextSource::name_with_max("Zoe", 2));
        assert_eq!(short(TextSource::name("Grace Brewster Hopper")), "GB");
    }

    #[test]
    fn name_long_text_is_unmodified() {
        for name in ["Zoe", "ada lovelace", "", "  O'Brien  "] {
            assert_eq!(TextSource::name(name).extract().long, name);
        }
    }

    #[test]
    fn unicode_punctuation_separates_words() {
        assert_eq!(short(TextSource::name("Anna—Maria")), "AM");
        assert_eq!(short(TextSource::name("«Émile» Zola")), "ÉZ");
        assert_eq!(short(TextSource::name("山田、太郎")), "山太");
    }

    #[test]
    fn symbols_are_not_separators() {
        // '+' and '$' are symbols, not punctuation.
        assert_eq!(short(TextSource::name("a+b")), "A+");
        assert_eq!(short(TextSource::name("$ cash")), "$c");
    }

    #[test]
    fn single_word_uppercasing_is_full_unicode() {
        assert_eq!(short(TextSource::name("émile")), "ÉM");
        assert_eq!(short(TextSource::name("straße")), "ST");
        assert_eq!(short(TextSource::name_with_max("ßa", 1)), "SS");
    }

    #[test]
    fn combining_marks_stay_with_their_base() {
        let decomposed = "e\u{301}mile zola";
        assert_eq!(short(TextSource::name(decomposed)), "e\u{301}z");
        assert_eq!(
            short(TextSource::name_with_max("e\u{301}mile", 1)),
            "E\u{301}"
        );
    }

    #[test]
    fn emoji_sequences_are_single_characters() {
        let family = "👩\u{200D}👩\u{200D}👧";
        assert_eq!(clusters(family).count(), 1);
        assert_eq!(clusters("🇫🇷🇩🇪").collect::<Vec<_>>(), vec!["🇫🇷", "🇩🇪"]);
        assert_eq!(clusters("👍🏽x").collect::<Vec<_>>(), vec!["👍🏽", "x"]);
        assert_eq!(short(TextSource::name(format!("{family} team"))), format!("{family}t"));
    }

    #[test]
    fn components_given_first() {
        let name = PersonName::new()
            .prefix("Dr.")
            .given("Grace")
            .middle("Brewster")
            .family("Hopper")
            .suffix("PhD");
        let initials = TextSource::components(name).extract();
        assert_eq!(initials.short, "GH");
        assert_eq!(initials.long, "Dr. Grace Brewster Hopper PhD");
    }

    #[test]
    fn components_family_first_for_east_asian_names() {
        let name = PersonName::new().given("太郎").family("山田");
        assert_eq!(name.resolved_order(), NameOrder::FamilyFirst);

        let initials = TextSource::from(name).extract();
        assert_eq!(initials.short, "山太");
        assert_eq!(initials.long, "山田太郎");
    }

    #[test]
    fn components_explicit_order_wins() {
        let name = PersonName::new()
            .given("Ada")
            .family("Lovelace")
            .order(NameOrder::FamilyFirst);
        let initials = TextSource::components(name).extract();
        assert_eq!(initials.short, "LA");
        assert_eq!(initials.long, "LovelaceAda");
    }

    #[test]
    fn components_fallbacks() {
        let only_family = PersonName::new().family("Hopper");
        assert_eq!(short(TextSource::components(only_family)), "H");

        let nickname = PersonName::new().nickname("amazing grace").middle("Brewster");
        assert_eq!(short(TextSource::components(nickname)), "a");

        let blank = PersonName::new().given("  ").family("");
        let initials = TextSource::components(blank).extract();
        assert!(initials.is_empty());
        assert_eq!(initials.long, "");
    }

    #[test]
    fn components_short_is_capped_at_two() {
        let name = PersonName::new()
            .given("e\u{301}mile")
            .family("zola")
            .order(NameOrder::GivenFirst);
        assert_eq!(short(TextSource::components(name)), "e\u{301}z");
    }

    #[test]
    fn east_asian_table_is_sorted() {
        for pair in EAST_ASIAN.windows(2) {
            assert!(pair[0].1 < pair[1].0, "{:x?} overlaps {:x?}", pair[0], pair[1]);
        }
    }

    // Vowel signs, viramas and conjoining jamo belong to the character
    // before them.
    #[rstest]
    #[case("ராஜா குமார்", 2, "ராகு")]
    #[case("রাহুল", 1, "রা")]
    #[case("সুমন দাস", 2, "সুদা")]
    #[case("सीता राम", 2, "सीरा")]
    #[case("ਗੁਰਮੀਤ ਸਿੰਘ", 2, "ਗੁਸਿੰ")]
    #[case("కిరణ్ రెడ్డి", 2, "కిరె")]
    #[case("\u{1112}\u{1161}\u{11AB}\u{1100}\u{1173}\u{11AF}", 1, "\u{1112}\u{1161}\u{11AB}")]
    #[case(
        "\u{1100}\u{1175}\u{11B7} \u{1109}\u{1175}\u{11AB}",
        2,
        "\u{1100}\u{1175}\u{11B7}\u{1109}\u{1175}\u{11AB}"
    )]
    fn marks_stay_with_their_base(#[case] name: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(short(TextSource::name_with_max(name, max)), expected);
    }

    #[test]
    fn indic_structured_names() {
        let name = PersonName::new().given("ராஜா").family("குமார்");
        let initials = TextSource::components(name).extract();
        assert_eq!(initials.short, "ராகு");
        assert_eq!(initials.long, "ராஜா குமார்");
    }

    // Punctuation outside Latin and CJK still separates words.
    #[rstest]
    #[case("Aung\u{104A}Kyaw", "AK")]
    #[case("Bat\u{1802}Erdene", "BE")]
    #[case("Ab\u{0700}Cd", "AC")]
    #[case("Tashi\u{0F0D}Delek", "TD")]
    #[case("Mary\u{1400}Ann", "MA")]
    #[case("Ana\u{05BE}Lea", "AL")]
    #[case("Ivan\u{2E17}Petrov", "IP")]
    fn script_punctuation_separates_words(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(short(TextSource::name(name)), expected);
    }

    #[test]
    fn punctuation_classification() {
        for c in [
            '!', '.', ',', '-', '_', '¿', '—', '、', '。', '！', '\u{104A}', '\u{1806}', '\u{0F04}',
            '\u{070D}', '\u{1400}',
        ] {
            assert!(is_punctuation(c), "{c:?} should be punctuation");
        }
        for c in ['a', '+', '$', '^', '|', '~', '5', '山', ' '] {
            assert!(!is_punctuation(c), "{c:?} should not be punctuation");
        }
    }
}
