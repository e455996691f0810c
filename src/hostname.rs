use log::warn;
use url::Url;

/// Derive the domain facet key from a URL-like string. Total: never
/// fails, never raises. Strips the scheme (anything before `//`), then
/// the port and query. Validation is advisory only; a hostname the
/// `url` crate rejects is logged and still returned as-is.
pub fn extract_hostname(source: &str) -> String {
    let host = if source.contains("//") {
        source.split('/').nth(2).unwrap_or_default()
    } else {
        source.split('/').next().unwrap_or_default()
    };

    let host = host.split(':').next().unwrap_or_default();
    let host = host.split('?').next().unwrap_or_default();

    if let Err(error) = Url::parse(&format!("https://{host}")) {
        warn!("hostname {host:?} derived from {source:?} failed validation: {error}");
    }

    host.to_string()
}

#[cfg(test)]
mod tests {
    use super::extract_hostname;

    #[test]
    fn strips_scheme_and_query() {
        assert_eq!(
            extract_hostname("https://example.com/page?x=1"),
            "example.com"
        );
    }

    #[test]
    fn strips_port_without_scheme() {
        assert_eq!(extract_hostname("example.com:8080/path"), "example.com");
    }

    #[test]
    fn bare_host_passes_through() {
        assert_eq!(extract_hostname("example.com"), "example.com");
        assert_eq!(extract_hostname("example.com/deep/path"), "example.com");
    }

    #[test]
    fn total_on_degenerate_input() {
        assert_eq!(extract_hostname(""), "");
        assert_eq!(extract_hostname("//"), "");
        assert_eq!(extract_hostname("http://"), "");
        assert_eq!(extract_hostname("not a url at all"), "not a url at all");
    }
}
