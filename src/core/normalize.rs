//! Canonicalization of raw attribute and preference values.
//!
//! Every raw value is folded into a lowercase `snake_case` token, sentinels
//! collapse to [`ANY`], and historical spellings are rewritten through static
//! alias tables. Unrecognized values pass through as their token. The function
//! is total and idempotent: normalizing a canonical token returns it unchanged.

use crate::models::{AttributeRecord, Category};

/// Canonical "no constraint" token
pub const ANY: &str = "any";

/// Placeholder meaning "the same value as the seeker's own attribute"
pub const SAME_AS_MINE: &str = "same_as_mine";

/// Tokens that mean "no constraint", after [`canonical_token`]
const SENTINELS: &[&str] = &[
    "",
    ANY,
    "doesnt_matter",
    "does_not_matter",
    "dont_care",
    "no_preference",
    "open_to_all",
    "not_specified",
    "null",
];

const GLOBAL_ALIASES: &[(&str, &str)] = &[
    ("same_as_me", SAME_AS_MINE),
    ("same_as_my_own", SAME_AS_MINE),
];

const EDUCATION_ALIASES: &[(&str, &str)] = &[
    ("12th", "high_school"),
    ("hsc", "high_school"),
    ("higher_secondary", "high_school"),
    ("secondary", "high_school"),
    ("polytechnic", "diploma"),
    ("bachelor", "undergrad"),
    ("ba", "undergrad"),
    ("bsc", "undergrad"),
    ("bcom", "undergrad"),
    ("bachelors", "undergrad"),
    ("graduate", "undergrad"),
    ("ug", "undergrad"),
    ("eng_bachelor", "undergrad_eng"),
    ("btech", "undergrad_eng"),
    ("be", "undergrad_eng"),
    ("cs_bachelor", "undergrad_cs"),
    ("bca", "undergrad_cs"),
    ("medical_bachelor", "mbbs"),
    ("master", "masters"),
    ("masters_degree", "masters"),
    ("ma", "masters"),
    ("msc", "masters"),
    ("mcom", "masters"),
    ("postgraduate", "masters"),
    ("pg", "masters"),
    ("eng_master", "masters_eng"),
    ("mtech", "masters_eng"),
    ("cs_master", "masters_cs"),
    ("mca", "masters_cs"),
    ("medical_master", "md"),
    ("ms_medical", "md"),
    ("doctorate", "phd"),
    ("medical_doctorate", "dm_mch"),
    ("dm", "dm_mch"),
    ("mch", "dm_mch"),
];

const DIET_ALIASES: &[(&str, &str)] = &[
    ("veg", "vegetarian"),
    ("pure_veg", "vegetarian"),
    ("non_veg", "non_vegetarian"),
    ("nonveg", "non_vegetarian"),
    ("nonvegetarian", "non_vegetarian"),
    ("egg", "eggetarian"),
    ("veg_with_egg", "eggetarian"),
    ("plant_based", "vegan"),
];

const SMOKING_ALIASES: &[(&str, &str)] = &[
    ("non_smoker", "no"),
    ("nonsmoker", "no"),
    ("never", "no"),
    ("smoker", "yes"),
    ("regularly", "yes"),
    ("socially", "occasionally"),
    ("sometimes", "occasionally"),
];

const DRINKING_ALIASES: &[(&str, &str)] = &[
    ("non_drinker", "no"),
    ("teetotaler", "no"),
    ("never", "no"),
    ("drinker", "yes"),
    ("regularly", "yes"),
    ("socially", "occasionally"),
    ("social_drinker", "occasionally"),
    ("sometimes", "occasionally"),
];

const MARITAL_ALIASES: &[(&str, &str)] = &[
    ("single", "never_married"),
    ("unmarried", "never_married"),
    ("divorcee", "divorced"),
    ("widow", "widowed"),
    ("widower", "widowed"),
    ("separated", "awaiting_divorce"),
];

const RELIGION_ALIASES: &[(&str, &str)] = &[
    ("hinduism", "hindu"),
    ("islam", "muslim"),
    ("christianity", "christian"),
    ("sikhism", "sikh"),
    ("jainism", "jain"),
    ("buddhism", "buddhist"),
    ("zoroastrian", "parsi"),
    ("judaism", "jewish"),
];

const RELOCATION_ALIASES: &[(&str, &str)] = &[
    ("yes", "willing"),
    ("open_to_relocate", "willing"),
    ("no", "not_willing"),
    ("unwilling", "not_willing"),
    ("maybe", "open"),
];

const GOTRA_ALIASES: &[(&str, &str)] = &[
    ("not_same", "not_same_as_mine"),
    ("different", "not_same_as_mine"),
    ("different_gotra", "not_same_as_mine"),
    ("other_than_mine", "not_same_as_mine"),
];

fn aliases(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Education => EDUCATION_ALIASES,
        Category::Diet => DIET_ALIASES,
        Category::Smoking => SMOKING_ALIASES,
        Category::Drinking => DRINKING_ALIASES,
        Category::MaritalStatus => MARITAL_ALIASES,
        Category::Religion => RELIGION_ALIASES,
        Category::Relocation => RELOCATION_ALIASES,
        Category::Gotra => GOTRA_ALIASES,
        _ => &[],
    }
}

fn lookup(table: &[(&str, &'static str)], token: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(legacy, _)| *legacy == token)
        .map(|(_, canonical)| *canonical)
}

/// Fold free text into a lowercase `snake_case` token
///
/// Apostrophes and dots are dropped ("doesn't" -> "doesnt", "Ph.D." -> "phd");
/// any other run of non-alphanumeric characters becomes a single underscore.
pub fn canonical_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.chars() {
        if matches!(ch, '\'' | '\u{2019}' | '.') {
            continue;
        }
        if !ch.is_alphanumeric() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        out.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
    }

    out
}

/// Whether a canonical token is the "no constraint" sentinel
#[inline]
pub fn is_any(token: &str) -> bool {
    token == ANY
}

/// Map a raw value to its canonical token for a category
pub fn normalize(category: Category, raw: Option<&str>) -> String {
    let token = match raw {
        Some(raw) => canonical_token(raw),
        None => return ANY.to_string(),
    };

    if SENTINELS.contains(&token.as_str()) {
        return ANY.to_string();
    }

    lookup(aliases(category), &token)
        .or_else(|| lookup(GLOBAL_ALIASES, &token))
        .map(str::to_string)
        .unwrap_or(token)
}

/// Normalize a comma-separated list into a deduplicated, ordered token list
///
/// An explicit sentinel entry makes the whole list unconstrained (empty).
/// With `own` given, `same_as_mine` entries are expanded to the seeker's own
/// values before deduplication; entries with nothing to substitute are dropped.
pub fn normalize_list(
    category: Category,
    raw: Option<&str>,
    own: Option<&AttributeRecord>,
) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut tokens: Vec<String> = Vec::new();
    for entry in raw.split(',').filter(|e| !canonical_token(e).is_empty()) {
        let token = normalize(category, Some(entry));
        if is_any(&token) {
            return Vec::new();
        }

        if token == SAME_AS_MINE {
            if let Some(own) = own {
                for value in normalize_list(category, own_source(category, own), None) {
                    if value != SAME_AS_MINE && !tokens.contains(&value) {
                        tokens.push(value);
                    }
                }
            }
            continue;
        }

        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    tokens
}

/// Replace a `same_as_mine` token with the seeker's own canonical value
///
/// Degrades to [`ANY`] when the seeker has no value to substitute.
pub fn resolve_same_as_mine(category: Category, token: String, own: &AttributeRecord) -> String {
    if token != SAME_AS_MINE {
        return token;
    }

    let resolved = normalize(category, own_source(category, own));
    if resolved == SAME_AS_MINE {
        ANY.to_string()
    } else {
        resolved
    }
}

/// Where a `same_as_mine` preference reads the seeker's own value from
fn own_source(category: Category, own: &AttributeRecord) -> Option<&str> {
    match category {
        // Country of birth falls back to where the seeker lives now
        Category::GrewUpIn => {
            non_empty(own.grew_up_in.as_deref()).or(non_empty(own.current_location.as_deref()))
        }
        Category::FamilyLocation => non_empty(own.family_location.as_deref())
            .or(non_empty(own.current_location.as_deref())),
        _ => non_empty(own.text(category)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_token() {
        assert_eq!(canonical_token("  Non-Vegetarian "), "non_vegetarian");
        assert_eq!(canonical_token("Doesn't Matter"), "doesnt_matter");
        assert_eq!(canonical_token("Mumbai, India"), "mumbai_india");
        assert_eq!(canonical_token("---"), "");
        assert_eq!(canonical_token("Ph.D."), "phd");
        assert_eq!(canonical_token("M.B.B.S"), "mbbs");
        assert_eq!(canonical_token("St. Thomas Mount"), "st_thomas_mount");
    }

    #[test]
    fn test_sentinel_family() {
        for raw in ["", "  ", "doesnt_matter", "Doesn't Matter", "ANY", "No Preference", "null"] {
            assert_eq!(normalize(Category::Diet, Some(raw)), ANY, "raw {:?}", raw);
        }
        assert_eq!(normalize(Category::Diet, None), ANY);
    }

    #[test]
    fn test_legacy_education_tokens() {
        assert_eq!(normalize(Category::Education, Some("Bachelors")), "undergrad");
        assert_eq!(normalize(Category::Education, Some("eng_bachelor")), "undergrad_eng");
        assert_eq!(normalize(Category::Education, Some("medical_master")), "md");
        assert_eq!(normalize(Category::Education, Some("PhD")), "phd");
    }

    #[test]
    fn test_aliases_are_category_scoped() {
        assert_eq!(normalize(Category::Smoking, Some("Never")), "no");
        assert_eq!(normalize(Category::Relocation, Some("No")), "not_willing");
        assert_eq!(normalize(Category::Location, Some("Never")), "never");
    }

    #[test]
    fn test_unknown_values_pass_through() {
        assert_eq!(normalize(Category::Occupation, Some("Astronaut")), "astronaut");
    }

    #[test]
    fn test_alias_targets_are_fixed_points() {
        for category in Category::ALL {
            for (_, canonical) in aliases(category).iter().chain(GLOBAL_ALIASES) {
                assert_eq!(normalize(category, Some(*canonical)), *canonical);
            }
        }
    }

    #[test]
    fn test_same_as_mine_substitution() {
        let own = AttributeRecord {
            diet: Some("Veg".to_string()),
            ..Default::default()
        };

        let token = normalize(Category::Diet, Some("Same as mine"));
        assert_eq!(token, SAME_AS_MINE);
        assert_eq!(resolve_same_as_mine(Category::Diet, token, &own), "vegetarian");
    }

    #[test]
    fn test_same_as_mine_without_source_degrades_to_any() {
        let own = AttributeRecord::default();
        let resolved = resolve_same_as_mine(Category::Diet, SAME_AS_MINE.to_string(), &own);
        assert_eq!(resolved, ANY);
    }

    #[test]
    fn test_grew_up_in_falls_back_to_current_location() {
        let own = AttributeRecord {
            current_location: Some("India".to_string()),
            ..Default::default()
        };
        let resolved = resolve_same_as_mine(Category::GrewUpIn, SAME_AS_MINE.to_string(), &own);
        assert_eq!(resolved, "india");
    }

    #[test]
    fn test_list_normalization() {
        let own = AttributeRecord {
            mother_tongue: Some("Tamil, Telugu".to_string()),
            ..Default::default()
        };

        let tokens = normalize_list(
            Category::MotherTongue,
            Some("Hindi, same as mine, tamil,,Hindi"),
            Some(&own),
        );
        assert_eq!(tokens, vec!["hindi", "tamil", "telugu"]);
    }

    #[test]
    fn test_list_with_sentinel_entry_is_unconstrained() {
        let tokens = normalize_list(Category::Religion, Some("Hindu, Any"), None);
        assert!(tokens.is_empty());
    }
}
