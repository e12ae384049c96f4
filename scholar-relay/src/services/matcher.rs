//! Rule-based scholarship matching.
//!
//! Every criterion in a [`FilterQuery`] is an independent predicate and a
//! record must satisfy all of them. State and major restrictions only bite
//! when the student names a state or major; ethnicity and gender exclude any
//! record lacking the named tag.

use crate::models::{FilterQuery, ScholarshipRecord};

/// Upper bound on the number of records a search returns.
pub const MAX_RESULTS: usize = 15;

/// Tag accepted in place of a specific ethnicity.
const UNDERREPRESENTED_TAG: &str = "underrepresented";

/// Boolean eligibility flags and the tags that satisfy each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityFlag {
    LowIncome,
    FirstGen,
    Volunteer,
    Veteran,
    Disability,
}

impl EligibilityFlag {
    pub const ALL: [EligibilityFlag; 5] = [
        EligibilityFlag::LowIncome,
        EligibilityFlag::FirstGen,
        EligibilityFlag::Volunteer,
        EligibilityFlag::Veteran,
        EligibilityFlag::Disability,
    ];

    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            EligibilityFlag::LowIncome => &["low-income", "financial-need"],
            EligibilityFlag::FirstGen => &["first-gen", "first-generation"],
            EligibilityFlag::Volunteer => &["volunteer", "community-service"],
            EligibilityFlag::Veteran => &["veteran", "military"],
            EligibilityFlag::Disability => &["disability"],
        }
    }

    pub fn is_requested(self, query: &FilterQuery) -> bool {
        match self {
            EligibilityFlag::LowIncome => query.low_income,
            EligibilityFlag::FirstGen => query.first_gen,
            EligibilityFlag::Volunteer => query.volunteer,
            EligibilityFlag::Veteran => query.veteran,
            EligibilityFlag::Disability => query.disability,
        }
    }

    fn is_satisfied_by(self, record: &ScholarshipRecord) -> bool {
        self.synonyms().iter().any(|tag| record.has_tag(tag))
    }
}

/// Returns the records matching `query`, in dataset order, capped at
/// [`MAX_RESULTS`]. An empty query yields the head of the dataset.
pub fn find_matches<'a>(
    records: &'a [ScholarshipRecord],
    query: &FilterQuery,
) -> Vec<&'a ScholarshipRecord> {
    if query.is_empty() {
        return records.iter().take(MAX_RESULTS).collect();
    }

    records
        .iter()
        .filter(|record| matches(record, query))
        .take(MAX_RESULTS)
        .collect()
}

pub fn matches(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    satisfies_flags(record, query)
        && meets_gpa(record, query)
        && covers_state(record, query)
        && covers_major(record, query)
        && covers_ethnicity(record, query)
        && covers_gender(record, query)
}

fn satisfies_flags(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    EligibilityFlag::ALL
        .iter()
        .filter(|flag| flag.is_requested(query))
        .all(|flag| flag.is_satisfied_by(record))
}

fn meets_gpa(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    match (query.gpa, record.minimum_gpa()) {
        (Some(held), Some(required)) => required <= held,
        _ => true,
    }
}

fn covers_state(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    let Some(state) = query.state.as_deref() else {
        return true;
    };

    let mut states = record.listed_states().peekable();
    if states.peek().is_none() {
        return true;
    }
    states.any(|s| s.eq_ignore_ascii_case(state))
}

fn covers_major(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    let Some(major) = query.major.as_deref() else {
        return true;
    };
    let wanted = major.to_lowercase();

    let mut majors = record.listed_majors().peekable();
    if majors.peek().is_none() {
        return true;
    }
    majors.any(|m| {
        let listed = m.to_lowercase();
        listed.contains(&wanted) || wanted.contains(&listed)
    })
}

fn covers_ethnicity(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    match query.ethnicity.as_deref() {
        Some(ethnicity) => record.has_tag(ethnicity) || record.has_tag(UNDERREPRESENTED_TAG),
        None => true,
    }
}

fn covers_gender(record: &ScholarshipRecord, query: &FilterQuery) -> bool {
    match query.gender.as_deref() {
        Some(gender) => record.has_tag(gender),
        None => true,
    }
}
