use reqwest::Url;

/// Parses `s` as an absolute `http` or `https` URL with a host.
pub fn parse_http_url(s: &str) -> Option<Url> {
    let url = Url::parse(s).ok()?;
    (matches!(url.scheme(), "http" | "https") && url.has_host()).then_some(url)
}
