use url::Url;

/// What the current navigation carries, as far as sign-in is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackParams {
    /// The provider redirected back with an `error` parameter.
    Error {
        error: String,
        description: Option<String>,
    },
    /// Authorization-code callback.
    Code { code: String, state: String },
    /// Nothing sign-in related in the address.
    None,
}

impl CallbackParams {
    /// Classify the query parameters of a URL.
    ///
    /// `error` takes precedence over `code`/`state`. Empty values count as
    /// absent, and a code without a state (or the reverse) is not a callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use signin_core::auth::CallbackParams;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://localhost:3000/?code=abc&state=S1").unwrap();
    /// assert_eq!(
    ///     CallbackParams::from_url(&url),
    ///     CallbackParams::Code { code: "abc".into(), state: "S1".into() }
    /// );
    /// ```
    pub fn from_url(url: &Url) -> Self {
        let param = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(error) = param("error") {
            return Self::Error {
                error,
                description: param("error_description"),
            };
        }

        match (param("code"), param("state")) {
            (Some(code), Some(state)) => Self::Code { code, state },
            _ => Self::None,
        }
    }
}

/// Message surfaced for a provider `error` redirect.
pub fn provider_error_message(error: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("OAuth error: {error}: {description}"),
        None => format!("OAuth error: {error}"),
    }
}

/// Remove the query string from an address, keeping path and fragment.
///
/// Returns `None` when there was nothing to remove.
pub fn scrub_query(url: &Url) -> Option<Url> {
    url.query()?;
    let mut scrubbed = url.clone();
    scrubbed.set_query(None);
    Some(scrubbed)
}

/// Build the authorization-code request URL.
pub fn authorization_url(
    authorize_endpoint: &Url,
    client_id: &str,
    redirect_uri: &Url,
    scope: &str,
    state: &str,
) -> Url {
    let mut url = authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri.as_str())
        .append_pair("scope", scope)
        .append_pair("state", state);
    url
}
