//! URL slug generation

/// Turn a title into a URL slug
///
/// Lowercases ASCII letters, keeps ASCII alphanumerics and collapses every
/// other run of characters into a single `-`. Leading and trailing dashes
/// are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kailash Mansarovar Yatra"), "kailash-mansarovar-yatra");
        assert_eq!(slugify("  Everest Base Camp (14 Days)! "), "everest-base-camp-14-days");
        assert_eq!(slugify("Lhasa -- Tingri"), "lhasa-tingri");
        assert_eq!(slugify("---"), "");
    }
}
