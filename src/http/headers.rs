//! Request header templates.
//!
//! Every call to the service carries the site Origin/Referer pair; calls made
//! "from the browser" (directory, chat) add a desktop Chrome identity.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN,
    REFERER, USER_AGENT,
};
use thiserror::Error;

use crate::config::{BrowserConfig, EndpointConfig};

/// A configured value is not a legal header value.
#[derive(Debug, Error)]
#[error("invalid value for header {name}: {source}")]
pub struct HeaderError {
    pub name: &'static str,
    #[source]
    pub source: InvalidHeaderValue,
}

/// Build a header value, naming the header on failure.
pub fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, HeaderError> {
    HeaderValue::from_str(value).map_err(|source| HeaderError { name, source })
}

/// Value of `Sec-Fetch-Site` for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSite {
    SameSite,
    CrossSite,
}

impl FetchSite {
    fn as_str(self) -> &'static str {
        match self {
            FetchSite::SameSite => "same-site",
            FetchSite::CrossSite => "cross-site",
        }
    }
}

/// Pre-validated header sets, cloned per request.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
    site: HeaderMap,
    identity: HeaderMap,
}

impl HeaderTemplate {
    pub fn new(endpoints: &EndpointConfig, browser: &BrowserConfig) -> Result<Self, HeaderError> {
        let mut site = HeaderMap::new();
        site.insert(ORIGIN, header_value("Origin", &endpoints.origin)?);
        site.insert(REFERER, header_value("Referer", &endpoints.referer)?);

        let sec_ch_ua = format!(
            "\"Google Chrome\";v=\"{}\", \"Not_A_Brand\";v=\"{}\"",
            browser.chrome_version, browser.brand_version
        );
        let platform = format!("\"{}\"", browser.platform);

        let mut identity = HeaderMap::new();
        identity.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        identity.insert(
            HeaderName::from_static("sec-ch-ua"),
            header_value("Sec-Ch-Ua", &sec_ch_ua)?,
        );
        identity.insert(
            HeaderName::from_static("sec-ch-ua-mobile"),
            HeaderValue::from_static("?0"),
        );
        identity.insert(
            HeaderName::from_static("sec-ch-ua-platform"),
            header_value("Sec-Ch-Ua-Platform", &platform)?,
        );
        identity.insert(
            HeaderName::from_static("sec-fetch-dest"),
            HeaderValue::from_static("empty"),
        );
        identity.insert(
            HeaderName::from_static("sec-fetch-mode"),
            HeaderValue::from_static("cors"),
        );
        identity.insert(USER_AGENT, header_value("User-Agent", &browser.user_agent)?);

        Ok(Self { site, identity })
    }

    /// Origin and Referer only.
    pub fn site(&self) -> HeaderMap {
        self.site.clone()
    }

    /// Origin/Referer plus the browser identity, accepting JSON.
    pub fn browser(&self, fetch_site: FetchSite) -> HeaderMap {
        let mut headers = self.site.clone();
        headers.extend(self.identity.clone());
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static(fetch_site.as_str()),
        );
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> HeaderTemplate {
        HeaderTemplate::new(&EndpointConfig::default(), &BrowserConfig::default()).unwrap()
    }

    #[test]
    fn test_site_headers() {
        let headers = template().site();
        assert_eq!(headers[ORIGIN], "https://www.gaianet.ai");
        assert_eq!(headers[REFERER], "https://www.gaianet.ai/");
        assert!(headers.get(USER_AGENT).is_none());
    }

    #[test]
    fn test_browser_headers() {
        let headers = template().browser(FetchSite::CrossSite);
        assert_eq!(
            headers["sec-ch-ua"],
            "\"Google Chrome\";v=\"131\", \"Not_A_Brand\";v=\"24\""
        );
        assert_eq!(headers["sec-ch-ua-platform"], "\"Windows\"");
        assert_eq!(headers["sec-fetch-site"], "cross-site");
        assert_eq!(headers[ACCEPT], "application/json");
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Chrome/131"));
    }

    #[test]
    fn test_invalid_value_names_header() {
        let mut browser = BrowserConfig::default();
        browser.user_agent = "bad\nagent".to_string();
        let err = HeaderTemplate::new(&EndpointConfig::default(), &browser).unwrap_err();
        assert_eq!(err.name, "User-Agent");
    }
}
