use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Statuses the game server answers successfully with. Redirects count as
/// success because the page treated them that way.
pub fn is_success_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// GET `url` and decode the JSON body.
pub fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    log::debug!("GET {}", url);
    let response = reqwest::blocking::get(url)?;
    let status = response.status().as_u16();
    if !is_success_status(status) {
        return Err(FetchError::Status { url: url.to_string(), status });
    }
    let body = response.text()?;
    log::trace!("{} answered {} with {} bytes", url, status, body.len());
    Ok(serde_json::from_str(&body)?)
}

/// GET `url` and hand the decoded body to `callback`. On any failure the
/// callback is not invoked; the failure is logged and dropped.
pub fn make_get_request<T, F>(url: &str, callback: F) -> bool
where
    T: DeserializeOwned,
    F: FnOnce(T),
{
    match get_json(url) {
        Ok(data) => {
            callback(data);
            true
        }
        Err(e) => {
            log::warn!("Dropping response from {}: {}", url, e);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use crate::fetch::{is_success_status, make_get_request};

    #[test]
    fn test_success_range() {
        assert!(!is_success_status(199));
        assert!(is_success_status(200));
        assert!(is_success_status(304));
        assert!(is_success_status(399));
        assert!(!is_success_status(400));
        assert!(!is_success_status(500));
    }

    #[test]
    fn test_unreachable_host_skips_callback() {
        let mut called = false;
        let delivered = make_get_request("http://127.0.0.1:1/board", |_: serde_json::Value| called = true);
        assert!(!delivered);
        assert!(!called);
    }
}
