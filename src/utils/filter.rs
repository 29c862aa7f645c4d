use crate::models::vacancy::Vacancy;
use crate::utils::salary::parse_salary;

/// Narrowing criteria for the vacancy board. Empty fields match everything,
/// so the default filter is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyFilter {
    /// Case-insensitive substring match against the title.
    pub term: String,
    /// Case-insensitive substring match against the description.
    pub keyword: String,
    /// Minimum parsed salary; 0 disables the check.
    pub min_salary: u64,
}

impl VacancyFilter {
    pub fn matches_title(&self, vacancy: &Vacancy) -> bool {
        contains_ci(&vacancy.title, &self.term)
    }

    pub fn matches_keyword(&self, vacancy: &Vacancy) -> bool {
        contains_ci(&vacancy.description, &self.keyword)
    }

    /// A salary with no digits parses to 0, so any positive threshold
    /// excludes it. That permissive exclusion is intended.
    pub fn matches_salary(&self, vacancy: &Vacancy) -> bool {
        self.min_salary == 0 || parse_salary(&vacancy.salary) >= self.min_salary
    }

    pub fn matches(&self, vacancy: &Vacancy) -> bool {
        self.matches_title(vacancy) && self.matches_keyword(vacancy) && self.matches_salary(vacancy)
    }

    /// Order-preserving subsequence of the input; re-applying the same
    /// filter to its own output changes nothing.
    pub fn apply(&self, vacancies: &[Vacancy]) -> Vec<Vacancy> {
        vacancies
            .iter()
            .filter(|v| self.matches(v))
            .cloned()
            .collect()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
