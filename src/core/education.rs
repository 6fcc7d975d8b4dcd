//! Ordinal qualification table used by the education matcher.

/// Education levels, ordered so that a higher level satisfies a lower requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationLevel {
    Unknown = 0,
    Secondary = 1,
    Undergraduate = 2,
    Postgraduate = 3,
    Doctoral = 4,
}

/// Field a qualification belongs to, for domain-qualified requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Medical,
    Engineering,
    ComputerScience,
    Business,
    Law,
}

/// A canonical qualification: level plus optional domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qualification {
    pub level: EducationLevel,
    pub domain: Option<Domain>,
}

use Domain::*;
use EducationLevel::*;

const QUALIFICATIONS: &[(&str, EducationLevel, Option<Domain>)] = &[
    ("high_school", Secondary, None),
    ("diploma", Secondary, None),
    ("undergrad", Undergraduate, None),
    ("undergrad_eng", Undergraduate, Some(Engineering)),
    ("undergrad_cs", Undergraduate, Some(ComputerScience)),
    ("mbbs", Undergraduate, Some(Medical)),
    ("bba", Undergraduate, Some(Business)),
    ("llb", Undergraduate, Some(Law)),
    ("masters", Postgraduate, None),
    ("masters_eng", Postgraduate, Some(Engineering)),
    ("masters_cs", Postgraduate, Some(ComputerScience)),
    ("mba", Postgraduate, Some(Business)),
    ("md", Postgraduate, Some(Medical)),
    ("llm", Postgraduate, Some(Law)),
    ("phd", Doctoral, None),
    ("dm_mch", Doctoral, Some(Medical)),
];

/// Domain prefixes accepted on requirement tokens such as `medical_masters`
const DOMAIN_PREFIXES: &[(&str, Domain)] = &[
    ("medical", Medical),
    ("medicine", Medical),
    ("engineering", Engineering),
    ("eng", Engineering),
    ("computer_science", ComputerScience),
    ("cs", ComputerScience),
    ("business", Business),
    ("law", Law),
];

/// Look up a canonical qualification token
pub fn qualification(token: &str) -> Option<Qualification> {
    QUALIFICATIONS
        .iter()
        .find(|(name, _, _)| *name == token)
        .map(|&(_, level, domain)| Qualification { level, domain })
}

/// Level of a candidate's qualification; `Unknown` when unparseable
pub fn level_of(token: &str) -> EducationLevel {
    qualification(token).map_or(Unknown, |q| q.level)
}

/// What an education preference asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EducationRequirement {
    pub min_level: EducationLevel,
    pub domain: Option<Domain>,
}

impl EducationRequirement {
    /// Parse a canonical preference token
    ///
    /// Plain qualification tokens ("undergrad", "md") carry their own level and
    /// domain. A domain prefix on a qualification ("medical_masters") pins the
    /// domain explicitly, and a bare domain ("medical") accepts any known
    /// qualification in that field.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(q) = qualification(token) {
            return Some(Self {
                min_level: q.level,
                domain: q.domain,
            });
        }

        DOMAIN_PREFIXES.iter().find_map(|&(prefix, domain)| {
            let rest = token.strip_prefix(prefix)?;
            if rest.is_empty() {
                return Some(Self {
                    min_level: Secondary,
                    domain: Some(domain),
                });
            }
            let rest = rest.strip_prefix('_')?;
            let q = qualification(rest)?;
            Some(Self {
                min_level: q.level,
                domain: Some(domain),
            })
        })
    }

    pub fn is_satisfied_by(&self, candidate: Qualification) -> bool {
        candidate.level >= self.min_level
            && self.domain.map_or(true, |d| candidate.domain == Some(d))
    }
}
