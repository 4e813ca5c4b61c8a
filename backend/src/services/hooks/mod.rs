//! # Capture Receivers
//!
//! Local stand-ins for the two webhooks a lead submission goes to, so the
//! form can be exercised end to end without touching the real endpoints.
//! Each receiver logs what arrived and answers with an empty HTML page, the
//! way a catch hook does. Nothing is stored.
//!
//! ## Registered Routes:
//!
//! *   **`POST /hooks/details`**:
//!     - **Handler**: `details::process`
//!     - **Description**: Phase-1 receiver. Parses the url-encoded body, fills
//!       missing keys from the query-string backup and decodes the
//!       `properties_json` field back into property records.
//!
//! *   **`POST /hooks/files`**:
//!     - **Handler**: `files::process`
//!     - **Description**: Phase-2 receiver. Streams the multipart body and logs
//!       every file with its size next to the correlation fields.

mod details;
mod files;

use actix_web::web::{post, scope};
use actix_web::{HttpResponse, Scope};
use common::payload::FormFields;
use url::form_urlencoded;

const API_PATH: &str = "/hooks";

pub const DETAILS_PATH: &str = "/hooks/details";
pub const FILES_PATH: &str = "/hooks/files";

/// Body limit for the url-encoded details request.
pub const MAX_DETAILS_BODY: usize = 2 * 1024 * 1024;

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/details", post().to(details::process))
        .route("/files", post().to(files::process))
}

/// What a catch hook answers with.
fn empty_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("")
}

/// Adds query-string pairs whose key the body did not carry. Returns how
/// many were taken from the query.
fn merge_query_backup(fields: &mut FormFields, query: &str) -> usize {
    let mut recovered = 0;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !fields.contains(&key) {
            fields.set(key.into_owned(), value.into_owned());
            recovered += 1;
        }
    }
    recovered
}
