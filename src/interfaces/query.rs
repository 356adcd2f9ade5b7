use reqwest::Url;

/// Extracts the `session_id` query parameter from the payment provider's
/// return URL.
///
/// Returns `None` for unparseable URLs and for absent or empty parameters;
/// an empty value counts as no session.
pub fn session_id_from_url(return_url: &str) -> Option<String> {
    let url = Url::parse(return_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "session_id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
