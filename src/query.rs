/// Removes every whitespace character, including those inside the keyword.
#[must_use]
pub fn strip_whitespace(keyword: &str) -> String {
    keyword.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Appends the stripped keyword to `api_base`. No other characters are encoded.
#[must_use]
pub fn request_url(api_base: &str, keyword: &str) -> String {
    format!("{api_base}{}", strip_whitespace(keyword))
}
