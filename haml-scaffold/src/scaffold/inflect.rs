//! Inflection helpers for resource naming
//!
//! Number inflection follows the Rails rule tables: uncountable words are
//! left alone, irregular words are resolved from a fixed table, and the
//! remaining words go through ordered suffix rules where the last matching
//! rule wins. Casing follows Rails as well, so digits never start a new
//! word (`v1`, `page3s`).

use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

/// Irregular singular/plural pairs, matched against the last `_`-separated word
///
/// Forms of at least [`SUFFIX_MATCH_LEN`] letters also match as a suffix
/// (`salesperson`, `grandchildren`). Shorter forms only match a whole word so
/// that `box` and `human` keep their regular plurals.
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("ox", "oxen"),
    ("mouse", "mice"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
    ("criterion", "criteria"),
];

const SUFFIX_MATCH_LEN: usize = 5;

/// Words with a single form, matched against the last `_`-separated word
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// Plural rules, lowest priority first
const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)$", "s"),
    (r"(?i)s$", "s"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(buffal|tomat|potat|her|ech|torped|volcan)o$", "${1}oes"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)sis$", "ses"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(quiz)$", "${1}zes"),
];

/// Singular rules, lowest priority first
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)s$", ""),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)([ti])a$", "${1}um"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(database)s$", "${1}"),
];

static PLURALS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| compile(PLURAL_RULES));

static SINGULARS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| compile(SINGULAR_RULES));

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("Invalid regex"));

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("Invalid regex"));

fn compile(rules: &'static [(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .rev()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("Invalid regex"), *replacement))
        .collect()
}

/// Naming rules used to derive class, file and table names
pub struct Inflections;

impl Inflections {
    /// Pluralize a word
    ///
    /// # Examples
    ///
    /// ```
    /// # use haml_scaffold::scaffold::inflect::Inflections;
    /// assert_eq!(Inflections::pluralize("post"), "posts");
    /// assert_eq!(Inflections::pluralize("category"), "categories");
    /// assert_eq!(Inflections::pluralize("person"), "people");
    /// assert_eq!(Inflections::pluralize("salesperson"), "salespeople");
    /// assert_eq!(Inflections::pluralize("wolf"), "wolves");
    /// ```
    #[must_use]
    pub fn pluralize(word: &str) -> String {
        Self::inflect(word, |_, plural| plural, &PLURALS)
    }

    /// Singularize a word
    ///
    /// # Examples
    ///
    /// ```
    /// # use haml_scaffold::scaffold::inflect::Inflections;
    /// assert_eq!(Inflections::singularize("posts"), "post");
    /// assert_eq!(Inflections::singularize("heroes"), "hero");
    /// assert_eq!(Inflections::singularize("media"), "medium");
    /// assert_eq!(Inflections::singularize("People"), "Person");
    /// ```
    #[must_use]
    pub fn singularize(word: &str) -> String {
        Self::inflect(word, |singular, _| singular, &SINGULARS)
    }

    /// Convert an underscored word to `PascalCase`
    ///
    /// Each `_`-separated piece gets an upper-case first letter; the rest of
    /// the piece is kept as is.
    ///
    /// # Examples
    ///
    /// ```
    /// # use haml_scaffold::scaffold::inflect::Inflections;
    /// assert_eq!(Inflections::camelize("blog_post"), "BlogPost");
    /// assert_eq!(Inflections::camelize("page3s"), "Page3s");
    /// ```
    #[must_use]
    pub fn camelize(word: &str) -> String {
        word.split('_')
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let mut chars = piece.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect()
    }

    /// Convert a word to `snake_case`
    ///
    /// Splits before an upper-case letter that follows a lower-case letter or
    /// digit, and inside acronyms (`HTMLParser`). Digits stay attached to the
    /// word they follow.
    ///
    /// # Examples
    ///
    /// ```
    /// # use haml_scaffold::scaffold::inflect::Inflections;
    /// assert_eq!(Inflections::underscore("BlogPost"), "blog_post");
    /// assert_eq!(Inflections::underscore("V1"), "v1");
    /// ```
    #[must_use]
    pub fn underscore(word: &str) -> String {
        let split = ACRONYM_BOUNDARY.replace_all(word, "${1}_${2}");
        let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
        split.replace('-', "_").to_lowercase()
    }

    /// Human-readable form of an attribute name
    ///
    /// A trailing `_id` is dropped, underscores become spaces and the first
    /// letter is capitalized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use haml_scaffold::scaffold::inflect::Inflections;
    /// assert_eq!(Inflections::humanize("first_name"), "First name");
    /// assert_eq!(Inflections::humanize("author_id"), "Author");
    /// ```
    #[must_use]
    pub fn humanize(attribute: &str) -> String {
        let trimmed = attribute.strip_suffix("_id").unwrap_or(attribute);
        trimmed.to_sentence_case()
    }

    fn inflect(
        word: &str,
        pick: impl Fn(&'static str, &'static str) -> &'static str,
        rules: &[(Regex, &'static str)],
    ) -> String {
        if word.is_empty() || Self::uncountable(word) {
            return word.to_string();
        }
        if let Some(irregular) = Self::irregular(word, pick) {
            return irregular;
        }
        rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(word))
            .map_or_else(
                || word.to_string(),
                |(pattern, replacement)| pattern.replace(word, *replacement).into_owned(),
            )
    }

    fn uncountable(word: &str) -> bool {
        let last = word.rsplit('_').next().unwrap_or(word).to_ascii_lowercase();
        UNCOUNTABLES.contains(&last.as_str())
    }

    /// Resolve the last word of `word` through the irregular table
    fn irregular(
        word: &str,
        pick: impl Fn(&'static str, &'static str) -> &'static str,
    ) -> Option<String> {
        let split = word.rfind('_').map_or(0, |idx| idx + 1);
        let (prefix, last) = word.split_at(split);
        let lowered = last.to_ascii_lowercase();

        let matches = |form: &str| {
            lowered == form || (form.len() >= SUFFIX_MATCH_LEN && lowered.ends_with(form))
        };
        let (matched, entry) = IRREGULARS
            .iter()
            .flat_map(|entry| [(entry.1, entry), (entry.0, entry)])
            .filter(|(form, _)| matches(*form))
            .max_by_key(|(form, _)| form.len())?;

        let (stem, suffix) = last.split_at(last.len() - matched.len());
        let replacement = pick(entry.0, entry.1);
        let replacement = if suffix.chars().next().is_some_and(char::is_uppercase) {
            Self::capitalize(replacement)
        } else {
            replacement.to_string()
        };

        Some(format!("{prefix}{stem}{replacement}"))
    }

    /// Upper-case the first character, lower-case the rest
    pub(crate) fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(Inflections::pluralize("post"), "posts");
        assert_eq!(Inflections::pluralize("category"), "categories");
        assert_eq!(Inflections::pluralize("comment"), "comments");
        assert_eq!(Inflections::pluralize("blog_post"), "blog_posts");
        assert_eq!(Inflections::pluralize("address"), "addresses");
        assert_eq!(Inflections::pluralize("box"), "boxes");
        assert_eq!(Inflections::pluralize("human"), "humans");
    }

    #[test]
    fn test_irregulars_both_directions() {
        assert_eq!(Inflections::pluralize("person"), "people");
        assert_eq!(Inflections::pluralize("people"), "people");
        assert_eq!(Inflections::singularize("people"), "person");
        assert_eq!(Inflections::singularize("person"), "person");
        assert_eq!(Inflections::pluralize("child"), "children");
        assert_eq!(Inflections::singularize("children"), "child");
        assert_eq!(Inflections::pluralize("criterion"), "criteria");
        assert_eq!(Inflections::singularize("criteria"), "criterion");
    }

    #[test]
    fn test_irregular_applies_to_last_word() {
        assert_eq!(Inflections::pluralize("sales_man"), "sales_men");
        assert_eq!(Inflections::singularize("field_mice"), "field_mouse");
    }

    #[test]
    fn test_irregular_matches_word_suffix() {
        assert_eq!(Inflections::pluralize("salesperson"), "salespeople");
        assert_eq!(Inflections::singularize("salespeople"), "salesperson");
        assert_eq!(Inflections::pluralize("grandchild"), "grandchildren");
        assert_eq!(Inflections::pluralize("chairwoman"), "chairwomen");
        assert_eq!(Inflections::pluralize("SalesPerson"), "SalesPeople");
    }

    #[test]
    fn test_irregular_preserves_capital() {
        assert_eq!(Inflections::pluralize("Person"), "People");
        assert_eq!(Inflections::singularize("Children"), "Child");
    }

    #[test]
    fn test_singularize_regular() {
        assert_eq!(Inflections::singularize("posts"), "post");
        assert_eq!(Inflections::singularize("categories"), "category");
        assert_eq!(Inflections::singularize("post"), "post");
        assert_eq!(Inflections::singularize("addresses"), "address");
        assert_eq!(Inflections::singularize("statuses"), "status");
    }

    #[test]
    fn test_suffix_rules_round_trip_resource_words() {
        for (singular, plural) in [
            ("hero", "heroes"),
            ("potato", "potatoes"),
            ("wolf", "wolves"),
            ("half", "halves"),
            ("knife", "knives"),
            ("medium", "media"),
            ("datum", "data"),
            ("analysis", "analyses"),
            ("matrix", "matrices"),
            ("quiz", "quizzes"),
        ] {
            assert_eq!(Inflections::singularize(plural), singular, "singular of {plural}");
            assert_eq!(Inflections::pluralize(singular), plural, "plural of {singular}");
        }
    }

    #[test]
    fn test_uncountables() {
        assert_eq!(Inflections::pluralize("sheep"), "sheep");
        assert_eq!(Inflections::singularize("series"), "series");
        assert_eq!(Inflections::singularize("news"), "news");
        assert_eq!(Inflections::pluralize("company_equipment"), "company_equipment");
    }

    #[test]
    fn test_casing() {
        assert_eq!(Inflections::camelize("user_profile"), "UserProfile");
        assert_eq!(Inflections::underscore("UserProfile"), "user_profile");
        assert_eq!(Inflections::underscore("admin"), "admin");
        assert_eq!(Inflections::underscore("HTMLParser"), "html_parser");
    }

    #[test]
    fn test_digits_stay_in_their_word() {
        assert_eq!(Inflections::underscore("v1"), "v1");
        assert_eq!(Inflections::underscore("V1"), "v1");
        assert_eq!(Inflections::underscore("page3"), "page3");
        assert_eq!(Inflections::underscore("Post2Comment"), "post2_comment");
        assert_eq!(Inflections::camelize("v1"), "V1");
        assert_eq!(Inflections::camelize("post2s"), "Post2s");
        assert_eq!(Inflections::pluralize("page3"), "page3s");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(Inflections::humanize("title"), "Title");
        assert_eq!(Inflections::humanize("published_at"), "Published at");
        assert_eq!(Inflections::humanize("author_id"), "Author");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(Inflections::capitalize("depot"), "Depot");
        assert_eq!(Inflections::capitalize("MyApp"), "Myapp");
        assert_eq!(Inflections::capitalize(""), "");
    }
}
