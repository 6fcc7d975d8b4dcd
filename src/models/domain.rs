use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// A preference category
///
/// Variant order is the order the dealbreaker gate walks categories in, so the
/// first failing category it reports is stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Age,
    Height,
    MaritalStatus,
    Community,
    Gotra,
    Diet,
    Smoking,
    Drinking,
    Location,
    Citizenship,
    GrewUpIn,
    Relocation,
    Education,
    WorkArea,
    Income,
    Occupation,
    FamilyValues,
    FamilyLocation,
    MotherTongue,
    Pets,
    Religion,
}

/// Which matching strategy a category is evaluated with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Range,
    Ordinal,
    Hierarchical,
    Set,
    Negated,
    Contains,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::Age,
        Category::Height,
        Category::MaritalStatus,
        Category::Community,
        Category::Gotra,
        Category::Diet,
        Category::Smoking,
        Category::Drinking,
        Category::Location,
        Category::Citizenship,
        Category::GrewUpIn,
        Category::Relocation,
        Category::Education,
        Category::WorkArea,
        Category::Income,
        Category::Occupation,
        Category::FamilyValues,
        Category::FamilyLocation,
        Category::MotherTongue,
        Category::Pets,
        Category::Religion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Age => "age",
            Category::Height => "height",
            Category::MaritalStatus => "marital_status",
            Category::Community => "community",
            Category::Gotra => "gotra",
            Category::Diet => "diet",
            Category::Smoking => "smoking",
            Category::Drinking => "drinking",
            Category::Location => "location",
            Category::Citizenship => "citizenship",
            Category::GrewUpIn => "grew_up_in",
            Category::Relocation => "relocation",
            Category::Education => "education",
            Category::WorkArea => "work_area",
            Category::Income => "income",
            Category::Occupation => "occupation",
            Category::FamilyValues => "family_values",
            Category::FamilyLocation => "family_location",
            Category::MotherTongue => "mother_tongue",
            Category::Pets => "pets",
            Category::Religion => "religion",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Age | Category::Height => CategoryKind::Range,
            Category::Education => CategoryKind::Ordinal,
            Category::Community => CategoryKind::Hierarchical,
            Category::Religion | Category::MotherTongue => CategoryKind::Set,
            Category::Gotra => CategoryKind::Negated,
            _ => CategoryKind::Contains,
        }
    }

    /// Location-like categories accept proximity phrasings ("within 50 km")
    /// as satisfied without resolving distances.
    pub fn is_location(&self) -> bool {
        matches!(self, Category::Location | Category::FamilyLocation)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A profile's own factual traits
///
/// Every field is optional; list-valued fields (mother tongue) are stored
/// comma-separated, the way the profile store keeps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeRecord {
    pub age: Option<u16>,
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: Option<u16>,
    pub marital_status: Option<String>,
    pub community: Option<String>,
    pub sub_community: Option<String>,
    pub gotra: Option<String>,
    pub diet: Option<String>,
    pub smoking: Option<String>,
    pub drinking: Option<String>,
    pub current_location: Option<String>,
    pub citizenship: Option<String>,
    pub grew_up_in: Option<String>,
    pub relocation: Option<String>,
    pub qualification: Option<String>,
    pub work_area: Option<String>,
    pub income: Option<String>,
    pub occupation: Option<String>,
    pub family_values: Option<String>,
    pub family_location: Option<String>,
    pub mother_tongue: Option<String>,
    pub pets: Option<String>,
    pub religion: Option<String>,
}

impl AttributeRecord {
    /// Age on the given date, derived from date of birth when known
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u16> {
        match self.date_of_birth {
            Some(dob) => {
                let mut years = as_of.year() - dob.year();
                if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
                    years -= 1;
                }
                u16::try_from(years).ok()
            }
            None => self.age,
        }
    }

    /// Raw text value for a category; `None` for the numeric range categories
    pub fn text(&self, category: Category) -> Option<&str> {
        let value = match category {
            Category::Age | Category::Height => return None,
            Category::MaritalStatus => &self.marital_status,
            Category::Community => &self.community,
            Category::Gotra => &self.gotra,
            Category::Diet => &self.diet,
            Category::Smoking => &self.smoking,
            Category::Drinking => &self.drinking,
            Category::Location => &self.current_location,
            Category::Citizenship => &self.citizenship,
            Category::GrewUpIn => &self.grew_up_in,
            Category::Relocation => &self.relocation,
            Category::Education => &self.qualification,
            Category::WorkArea => &self.work_area,
            Category::Income => &self.income,
            Category::Occupation => &self.occupation,
            Category::FamilyValues => &self.family_values,
            Category::FamilyLocation => &self.family_location,
            Category::MotherTongue => &self.mother_tongue,
            Category::Pets => &self.pets,
            Category::Religion => &self.religion,
        };
        value.as_deref()
    }
}

/// Desired values, one expression per category
///
/// Text fields hold the raw stored value: free text, legacy spellings,
/// sentinels such as "Doesn't Matter", or the `same_as_mine` placeholder.
/// Religion and mother tongue are comma-separated OR-lists; gotra is an
/// exclusion ("Not Kashyapa").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    pub age_min: Option<u16>,
    pub age_max: Option<u16>,
    pub height_min_cm: Option<u16>,
    pub height_max_cm: Option<u16>,
    pub marital_status: Option<String>,
    pub community: Option<String>,
    pub sub_community: Option<String>,
    pub gotra: Option<String>,
    pub diet: Option<String>,
    pub smoking: Option<String>,
    pub drinking: Option<String>,
    pub location: Option<String>,
    pub citizenship: Option<String>,
    pub grew_up_in: Option<String>,
    pub relocation: Option<String>,
    pub education: Option<String>,
    pub work_area: Option<String>,
    pub income: Option<String>,
    pub occupation: Option<String>,
    pub family_values: Option<String>,
    pub family_location: Option<String>,
    pub mother_tongue: Option<String>,
    pub pets: Option<String>,
    pub religion: Option<String>,
}

impl PreferenceRecord {
    /// `(min, max)` bounds for a range category
    pub fn bounds(&self, category: Category) -> (Option<u16>, Option<u16>) {
        match category {
            Category::Age => (self.age_min, self.age_max),
            Category::Height => (self.height_min_cm, self.height_max_cm),
            _ => (None, None),
        }
    }

    /// Raw text value for a category; `None` for the range categories
    pub fn text(&self, category: Category) -> Option<&str> {
        let value = match category {
            Category::Age | Category::Height => return None,
            Category::MaritalStatus => &self.marital_status,
            Category::Community => &self.community,
            Category::Gotra => &self.gotra,
            Category::Diet => &self.diet,
            Category::Smoking => &self.smoking,
            Category::Drinking => &self.drinking,
            Category::Location => &self.location,
            Category::Citizenship => &self.citizenship,
            Category::GrewUpIn => &self.grew_up_in,
            Category::Relocation => &self.relocation,
            Category::Education => &self.education,
            Category::WorkArea => &self.work_area,
            Category::Income => &self.income,
            Category::Occupation => &self.occupation,
            Category::FamilyValues => &self.family_values,
            Category::FamilyLocation => &self.family_location,
            Category::MotherTongue => &self.mother_tongue,
            Category::Pets => &self.pets,
            Category::Religion => &self.religion,
        };
        value.as_deref()
    }
}

/// Which categories the profile owner treats as mandatory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealbreakerFlags {
    pub age: bool,
    pub height: bool,
    pub marital_status: bool,
    pub community: bool,
    pub gotra: bool,
    pub diet: bool,
    pub smoking: bool,
    pub drinking: bool,
    pub location: bool,
    pub citizenship: bool,
    pub grew_up_in: bool,
    pub relocation: bool,
    pub education: bool,
    pub work_area: bool,
    pub income: bool,
    pub occupation: bool,
    pub family_values: bool,
    pub family_location: bool,
    pub mother_tongue: bool,
    pub pets: bool,
    pub religion: bool,
}

impl DealbreakerFlags {
    pub fn is_dealbreaker(&self, category: Category) -> bool {
        let mut flags = *self;
        *flags.flag_mut(category)
    }

    pub fn set(&mut self, category: Category, dealbreaker: bool) {
        *self.flag_mut(category) = dealbreaker;
    }

    /// Builder-style variant of [`DealbreakerFlags::set`]
    pub fn with(mut self, category: Category) -> Self {
        self.set(category, true);
        self
    }

    fn flag_mut(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Age => &mut self.age,
            Category::Height => &mut self.height,
            Category::MaritalStatus => &mut self.marital_status,
            Category::Community => &mut self.community,
            Category::Gotra => &mut self.gotra,
            Category::Diet => &mut self.diet,
            Category::Smoking => &mut self.smoking,
            Category::Drinking => &mut self.drinking,
            Category::Location => &mut self.location,
            Category::Citizenship => &mut self.citizenship,
            Category::GrewUpIn => &mut self.grew_up_in,
            Category::Relocation => &mut self.relocation,
            Category::Education => &mut self.education,
            Category::WorkArea => &mut self.work_area,
            Category::Income => &mut self.income,
            Category::Occupation => &mut self.occupation,
            Category::FamilyValues => &mut self.family_values,
            Category::FamilyLocation => &mut self.family_location,
            Category::MotherTongue => &mut self.mother_tongue,
            Category::Pets => &mut self.pets,
            Category::Religion => &mut self.religion,
        }
    }
}

/// Immutable snapshot of one profile as served by the profile store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub attributes: AttributeRecord,
    #[serde(default)]
    pub preferences: PreferenceRecord,
    #[serde(default)]
    pub dealbreakers: DealbreakerFlags,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Outcome of one category matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Credit the category contributes to the score numerator (0..=1)
    pub confidence: f64,
}

/// Result of the dealbreaker gate for one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    pub passed: bool,
    pub failed_category: Option<Category>,
}

impl GateResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            failed_category: None,
        }
    }

    pub fn blocked(category: Category) -> Self {
        Self {
            passed: false,
            failed_category: Some(category),
        }
    }
}

/// Full one-direction evaluation: gate, score and per-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub passed: bool,
    pub failed_category: Option<Category>,
    pub score: u8,
    /// Outcomes for every category with an actual preference
    pub breakdown: BTreeMap<Category, MatchOutcome>,
}

/// Bidirectional verdict for a pair of profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualMatchResult {
    pub mutual: bool,
    pub block_reason: Option<Category>,
    /// Id of the profile whose dealbreaker blocked the pairing
    pub blocked_by: Option<String>,
    /// How well the second profile satisfies the first one's preferences
    pub seeker_as_viewer_score: Option<u8>,
    /// How well the first profile satisfies the second one's preferences
    pub seeker_as_candidate_score: Option<u8>,
}

/// A mutual match found in a candidate pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub candidate_id: String,
    pub seeker_as_viewer_score: u8,
    pub seeker_as_candidate_score: u8,
}

/// A candidate that could not be evaluated because of malformed input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateError {
    pub candidate_id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_declaration() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn test_age_from_date_of_birth() {
        let attrs = AttributeRecord {
            age: Some(99),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 6, 15),
            ..Default::default()
        };

        let before_birthday = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        assert_eq!(attrs.age_on(before_birthday), Some(29));
        assert_eq!(attrs.age_on(on_birthday), Some(30));
    }

    #[test]
    fn test_age_falls_back_to_stored_value() {
        let attrs = AttributeRecord {
            age: Some(31),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(attrs.age_on(today), Some(31));
    }

    #[test]
    fn test_dealbreaker_flags() {
        let mut flags = DealbreakerFlags::default().with(Category::Gotra);
        assert!(flags.is_dealbreaker(Category::Gotra));
        assert!(!flags.is_dealbreaker(Category::Diet));

        flags.set(Category::Gotra, false);
        assert!(!flags.is_dealbreaker(Category::Gotra));
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let json = r#"{"id":"p1","attributes":{"diet":"Veg","heightCm":170}}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.id, "p1");
        assert_eq!(profile.attributes.diet.as_deref(), Some("Veg"));
        assert_eq!(profile.attributes.height_cm, Some(170));
        assert_eq!(profile.preferences, PreferenceRecord::default());
        assert!(!profile.dealbreakers.is_dealbreaker(Category::Age));
    }
}
