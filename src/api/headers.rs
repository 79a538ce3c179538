//! Content negotiation defaults applied to every outgoing request.
//!
//! The backend expects JSON unless a caller says otherwise, so the client fills
//! in `Content-Type` and `Accept` when they are missing. Headers a caller set
//! explicitly (for example the form encoding used by password reset) are left
//! alone.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM: &str = "application/x-www-form-urlencoded";

/// Sets JSON `Content-Type` and `Accept` headers only where none are present.
pub fn augment(headers: &mut HeaderMap) {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    }
}
