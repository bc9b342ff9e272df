//! Remote URL parsing

/// Extract `owner/name` from a GitHub remote URL
///
/// Accepts `https://github.com/owner/name(.git)` and `git@github.com:owner/name(.git)`.
/// The name may not contain `.` apart from the `.git` suffix.
pub fn github_slug(remote_url: &str) -> Option<String> {
    let trimmed = remote_url.trim();
    let start = trimmed.find("github.com")? + "github.com".len();
    let rest = trimmed[start..]
        .strip_prefix(':')
        .or_else(|| trimmed[start..].strip_prefix('/'))?;
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    let (owner, name) = rest.split_once('/')?;
    let valid = |part: &str| !part.is_empty() && !part.contains('/');
    if !valid(owner) || !valid(name) || name.contains('.') {
        return None;
    }
    Some(format!("{owner}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_and_scp_urls() {
        for url in [
            "https://github.com/sovereign/armory",
            "https://github.com/sovereign/armory.git",
            "git@github.com:sovereign/armory.git",
            "ssh://git@github.com/sovereign/armory",
        ] {
            assert_eq!(github_slug(url).as_deref(), Some("sovereign/armory"), "{url}");
        }
    }

    #[test]
    fn test_rejects_other_shapes() {
        for url in [
            "https://gitlab.com/sovereign/armory",
            "https://github.com/sovereign",
            "https://github.com/sovereign/armory/tree/main",
            "https://github.com/sovereign/armory.rs",
            "",
        ] {
            assert_eq!(github_slug(url), None, "{url}");
        }
    }
}
