//! Profile panel view model.

use signin_core::auth::Identity;
use signin_core::profile::{avatar_color, display_name, initials};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Provider-supplied picture URL.
    Picture(String),
    /// Generated avatar: initials over a palette colour.
    Initials { text: String, color: &'static str },
}

impl Avatar {
    fn generated(name: &str) -> Self {
        Self::Initials {
            text: initials(name),
            color: avatar_color(name),
        }
    }
}

/// What the profile panel shows for the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    /// Hidden when the provider did not share an email.
    pub email: Option<String>,
    pub avatar: Avatar,
    /// "Signed in with Google" / "Signed in with GitHub".
    pub provider_label: String,
    /// Used if the picture fails to load.
    fallback: Avatar,
}

impl ProfileView {
    pub fn from_identity(identity: &Identity) -> Self {
        let fallback = Avatar::generated(&identity.name);
        let avatar = identity
            .picture_url
            .clone()
            .map(Avatar::Picture)
            .unwrap_or_else(|| fallback.clone());

        Self {
            name: display_name(&identity.name).to_string(),
            email: identity.email.clone(),
            avatar,
            provider_label: format!("Signed in with {}", identity.provider.display_name()),
            fallback,
        }
    }

    /// Swap a picture that failed to load for the generated avatar.
    pub fn picture_failed(&mut self) {
        if matches!(self.avatar, Avatar::Picture(_)) {
            self.avatar = self.fallback.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signin_core::auth::ProviderKind;

    fn identity(name: &str, picture: Option<&str>) -> Identity {
        Identity {
            id: "u1".to_string(),
            name: name.to_string(),
            email: None,
            picture_url: picture.map(String::from),
            provider: ProviderKind::GitHub,
        }
    }

    #[test]
    fn test_initials_avatar_without_picture() {
        let view = ProfileView::from_identity(&identity("Ann Lee", None));

        assert_eq!(
            view.avatar,
            Avatar::Initials {
                text: "AL".to_string(),
                // 'A' is 65, 65 % 6 == 5
                color: "#00f2fe",
            }
        );
        assert_eq!(view.provider_label, "Signed in with GitHub");
        assert_eq!(view.email, None);
    }

    #[test]
    fn test_picture_falls_back_to_initials() {
        let mut view =
            ProfileView::from_identity(&identity("Ann Lee", Some("https://x.example/a.png")));
        assert_eq!(
            view.avatar,
            Avatar::Picture("https://x.example/a.png".to_string())
        );

        view.picture_failed();

        assert!(matches!(view.avatar, Avatar::Initials { ref text, .. } if text == "AL"));
    }

    #[test]
    fn test_empty_name_uses_fallbacks() {
        let view = ProfileView::from_identity(&identity("", None));
        assert_eq!(view.name, "Welcome!");
        assert_eq!(
            view.avatar,
            Avatar::Initials {
                text: "?".to_string(),
                color: "#667eea",
            }
        );
    }
}
