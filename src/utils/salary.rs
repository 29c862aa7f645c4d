/// Normalizes a free-text salary ("150 000 руб", "от 80000", "договорная")
/// to a number by keeping its decimal digits. Text without digits, or a
/// digit run too large for u64, normalizes to 0.
pub fn parse_salary(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
