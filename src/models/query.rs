use mongodb::bson::{doc, Document};

use super::Company;

/// Filters supported against the `companies` collection.
///
/// Every text filter is an unanchored, case-insensitive substring match. The
/// user-supplied text is escaped, so it always matches literally. Array fields
/// match when any element matches.
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyFilter {
    All,
    NameContains(String),
    LocationContains(String),
    SkillContains(String),
    BenefitContains(String),
    HeadcountBetween { min: i64, max: Option<i64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySort {
    SalaryDescending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyQuery {
    pub filter: CompanyFilter,
    pub sort: Option<CompanySort>,
    pub limit: Option<i64>,
}

impl CompanyFilter {
    /// Build the MongoDB filter document for this filter.
    pub fn to_document(&self) -> Document {
        match self {
            CompanyFilter::All => Document::new(),
            CompanyFilter::NameContains(name) => doc! { "name": contains_pattern(name) },
            CompanyFilter::LocationContains(location) => {
                doc! { "location": contains_pattern(location) }
            }
            CompanyFilter::SkillContains(skill) => {
                doc! { "hiringCriteria.skills": contains_pattern(skill) }
            }
            CompanyFilter::BenefitContains(benefit) => {
                doc! { "benefits": contains_pattern(benefit) }
            }
            CompanyFilter::HeadcountBetween { min, max } => {
                let mut range = doc! { "$gte": *min };
                if let Some(max) = max {
                    range.insert("$lte", *max);
                }
                doc! { "headcount": range }
            }
        }
    }

    /// Evaluate the filter against an already-loaded company, with the same
    /// semantics the database applies to `to_document`.
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            CompanyFilter::All => true,
            CompanyFilter::NameContains(name) => contains_ignore_case(&company.name, name),
            CompanyFilter::LocationContains(location) => {
                contains_ignore_case(&company.location, location)
            }
            CompanyFilter::SkillContains(skill) => company
                .hiring_criteria
                .skills
                .iter()
                .any(|s| contains_ignore_case(s, skill)),
            CompanyFilter::BenefitContains(benefit) => company
                .benefits
                .iter()
                .any(|b| contains_ignore_case(b, benefit)),
            CompanyFilter::HeadcountBetween { min, max } => {
                company.headcount >= *min && max.map_or(true, |max| company.headcount <= max)
            }
        }
    }
}

impl CompanySort {
    pub fn to_document(self) -> Document {
        match self {
            CompanySort::SalaryDescending => doc! { "salaryBand.base": -1 },
        }
    }

    pub fn sort(self, companies: &mut [Company]) {
        match self {
            CompanySort::SalaryDescending => companies
                .sort_by(|a, b| b.salary_band.base.total_cmp(&a.salary_band.base)),
        }
    }
}

impl CompanyQuery {
    pub fn new(filter: CompanyFilter) -> Self {
        Self {
            filter,
            sort: None,
            limit: None,
        }
    }

    pub fn sorted_by(mut self, sort: CompanySort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limited_to(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn contains_pattern(needle: &str) -> Document {
    doc! { "$regex": regex::escape(needle), "$options": "i" }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
