use url::Url;

const X_HOSTS: &[&str] = &["x.com", "twitter.com", "mobile.twitter.com", "www.x.com", "www.twitter.com"];

/// Accept either a bare list id or a list URL and return the id.
///
/// ```
/// use roundup_social::twitter::normalize_list_id;
///
/// assert_eq!(normalize_list_id("https://x.com/i/lists/1234").as_deref(), Some("1234"));
/// assert_eq!(normalize_list_id(" 1234 ").as_deref(), Some("1234"));
/// assert_eq!(normalize_list_id("   "), None);
/// ```
pub fn normalize_list_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !looks_like_url(trimmed) {
        return Some(trimmed.to_string());
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).ok()?;
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn looks_like_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    X_HOSTS
        .iter()
        .any(|host| without_scheme.starts_with(&format!("{host}/")))
}
