//! Response mapping for list endpoints.
//!
//! | Function | `None` | `Some` |
//! |----------|--------|--------|
//! | [`object`] | 404, empty body | 200, JSON body |
//! | [`table`] | 404, empty body | 200, `{"rows": [...], "total": n}` |
//! | [`no_content`] | | 204 |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagewise::Page;
use serde::{Deserialize, Serialize};

/// Body of a table response: one page of rows and the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub total: usize,
}

impl<T> From<Page<T>> for Table<T> {
    fn from(page: Page<T>) -> Self {
        Table {
            rows: page.content,
            total: page.total,
        }
    }
}

/// An empty 204 response.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// 200 with `value` as JSON, or 404 when there is nothing to return.
pub fn object<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => (StatusCode::OK, Json(value)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// 200 with the page as a [`Table`], or 404 when there is no page.
pub fn table<T: Serialize>(page: Option<Page<T>>) -> Response {
    object(page.map(Table::from))
}
