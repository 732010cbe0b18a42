//! Endpoint URLs derived from the loaded settings.
//!
//! Path segments and query values are percent-encoded by [`Url`], so package
//! and dimension ids may contain any character. A trailing slash on a base URL
//! does not produce an empty segment.
//!
//! Characters that are legal in a path segment (such as `:` in `abc:boost`)
//! are left as-is, and query values are form-encoded (a space becomes `+`).

use reqwest::Url;

use crate::config::Settings;
use crate::error::{ApiError, ApiResult};

/// Page size requested from the search endpoint.
pub const SEARCH_PAGE_SIZE: u32 = 10000;

/// `<search>?size=10000[&jwt=<token>]`
pub fn search(settings: &Settings, auth_token: Option<&str>) -> ApiResult<String> {
    let mut url = parse_base(settings.search_url()?)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("size", &SEARCH_PAGE_SIZE.to_string());
        if let Some(token) = auth_token.filter(|t| !t.is_empty()) {
            query.append_pair("jwt", token);
        }
    }
    Ok(url.into())
}

/// `<api>/info/<package>/package`
pub fn package_info(settings: &Settings, package_id: &str) -> ApiResult<String> {
    api_path(settings, &["info", package_id, "package"])
}

/// `<api>/cubes/<package>/model`
pub fn cube_model(settings: &Settings, package_id: &str) -> ApiResult<String> {
    api_path(settings, &["cubes", package_id, "model"])
}

/// `<api>/cubes/<package>/members/<dimension>`
pub fn members(settings: &Settings, package_id: &str, dimension: &str) -> ApiResult<String> {
    api_path(settings, &["cubes", package_id, "members", dimension])
}

fn api_path(settings: &Settings, segments: &[&str]) -> ApiResult<String> {
    let base = settings.api_url()?;
    let mut url = parse_base(base)?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl {
            url: base.to_string(),
            reason: "cannot be a base URL".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

fn parse_base(url: &str) -> ApiResult<Url> {
    Url::parse(url).map_err(|e| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new(
            "http://next.openspending.org/api/3",
            "http://next.openspending.org/search/package",
        )
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            search(&settings(), None).unwrap(),
            "http://next.openspending.org/search/package?size=10000"
        );
    }

    #[test]
    fn test_search_url_with_token() {
        assert_eq!(
            search(&settings(), Some("a b&c")).unwrap(),
            "http://next.openspending.org/search/package?size=10000&jwt=a+b%26c"
        );
    }

    #[test]
    fn test_search_url_keeps_existing_query() {
        let settings = Settings::new("http://api", "http://search.example.org/q?lang=en");
        assert_eq!(
            search(&settings, None).unwrap(),
            "http://search.example.org/q?lang=en&size=10000"
        );
    }

    #[test]
    fn test_api_paths() {
        let settings = settings();
        assert_eq!(
            package_info(&settings, "abc:boost").unwrap(),
            "http://next.openspending.org/api/3/info/abc:boost/package"
        );
        assert_eq!(
            cube_model(&settings, "abc:boost").unwrap(),
            "http://next.openspending.org/api/3/cubes/abc:boost/model"
        );
        assert_eq!(
            members(&settings, "abc:boost", "admin").unwrap(),
            "http://next.openspending.org/api/3/cubes/abc:boost/members/admin"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        assert_eq!(
            members(&settings(), "a/b c", "d?e").unwrap(),
            "http://next.openspending.org/api/3/cubes/a%2Fb%20c/members/d%3Fe"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let settings = Settings::new("http://api.example.org/api/3/", "http://search");
        assert_eq!(
            cube_model(&settings, "pkg").unwrap(),
            "http://api.example.org/api/3/cubes/pkg/model"
        );
    }

    #[test]
    fn test_missing_and_invalid_base() {
        assert_eq!(
            cube_model(&Settings::default(), "pkg"),
            Err(ApiError::MissingSetting("api.url"))
        );

        let settings = Settings::new("/relative/api", "http://search");
        assert!(matches!(
            cube_model(&settings, "pkg"),
            Err(ApiError::InvalidUrl { .. })
        ));

        let settings = Settings::new("mailto:someone@example.org", "http://search");
        assert!(matches!(
            cube_model(&settings, "pkg"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
