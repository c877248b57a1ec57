//! Pure helpers for rendering the signed-in profile.

/// Background colours for generated avatars.
pub const AVATAR_PALETTE: [&str; 6] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe",
];

/// Shown when the identity has no usable display name.
pub const FALLBACK_DISPLAY_NAME: &str = "Welcome!";

/// Initials for a generated avatar.
///
/// First letter of the first and last words, uppercased. A single word gives
/// one letter and an empty name gives `?`.
///
/// # Examples
///
/// ```
/// use signin_core::profile::initials;
///
/// assert_eq!(initials("Ann Lee"), "AL");
/// assert_eq!(initials("Cher"), "C");
/// assert_eq!(initials("  "), "?");
/// ```
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };

    let first_letter = first.chars().next();
    let last_letter = words.last().and_then(|w| w.chars().next());

    first_letter
        .into_iter()
        .chain(last_letter)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Deterministic avatar colour keyed by the first character of the name.
pub fn avatar_color(name: &str) -> &'static str {
    let index = name
        .chars()
        .next()
        .map(|c| c as usize % AVATAR_PALETTE.len())
        .unwrap_or(0);
    AVATAR_PALETTE[index]
}

/// Name to render, falling back when the provider gave none.
pub fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        FALLBACK_DISPLAY_NAME
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_and_last_words() {
        assert_eq!(initials("Ann Lee"), "AL");
        assert_eq!(initials("ann maria lee"), "AL");
        assert_eq!(initials("  Demo   GitHub User "), "DU");
    }

    #[test]
    fn initials_single_word() {
        assert_eq!(initials("cher"), "C");
    }

    #[test]
    fn initials_empty_name() {
        assert_eq!(initials(""), "?");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn initials_handle_non_ascii() {
        assert_eq!(initials("émile zola"), "ÉZ");
    }

    #[test]
    fn avatar_color_is_deterministic() {
        assert_eq!(avatar_color("Ann Lee"), avatar_color("Andrew"));
        // 'A' is 65, 65 % 6 == 5
        assert_eq!(avatar_color("Ann Lee"), "#00f2fe");
        // 'B' is 66, 66 % 6 == 0
        assert_eq!(avatar_color("Bob"), "#667eea");
    }

    #[test]
    fn avatar_color_for_empty_name() {
        assert_eq!(avatar_color(""), AVATAR_PALETTE[0]);
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(display_name("Ann Lee"), "Ann Lee");
        assert_eq!(display_name(""), FALLBACK_DISPLAY_NAME);
    }
}
