/// Mask the `user:password@` part of a connection URL, for logging
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_are_masked() {
        assert_eq!(
            redact_url("postgresql://app:s3cret@db:5432/items"),
            "postgresql://***@db:5432/items"
        );
        assert_eq!(
            redact_url("mongodb://admin:p@ss@db:27017/?tls=true"),
            "mongodb://***@db:27017/?tls=true"
        );
    }

    #[test]
    fn test_urls_without_credentials_are_unchanged() {
        assert_eq!(redact_url("mongodb://localhost:27017"), "mongodb://localhost:27017");
        assert_eq!(redact_url("not a url @ all"), "not a url @ all");
    }
}
