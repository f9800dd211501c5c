//! Axum glue for pagewise list endpoints.
//!
//! `pagewise-web` maps the results of the `pagewise` engine onto HTTP
//! responses and provides a one-shot server-sent event sender.
//!
//! # Features
//!
//! - **Response mapping**: [`object`], [`table`] and [`no_content`] turn
//!   optional results into 200, 204 or 404 responses
//! - **Error responses**: [`ApiError`] renders engine errors as 400 JSON bodies
//! - **Event streams**: [`send`] runs a producer once and streams what it emits
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum::{response::Response, Json};
//! use pagewise::{filter_items, page, sorted_by_property, Inspect, PageFilter};
//! use pagewise_web::{table, ApiResult};
//!
//! async fn list(Json(request): Json<PageFilter<TaskFilter>>) -> ApiResult<Response> {
//!     let tasks = load_tasks();
//!     let filter = request.filter.as_ref().map(|f| f as &dyn Inspect);
//!     let found: Vec<Task> = filter_items(&tasks, filter, &[]).into_iter().cloned().collect();
//!
//!     let pageable = request.pageable.unwrap_or_default();
//!     let sorted = sorted_by_property(found, &pageable.sort(), None)?;
//!     Ok(table(Some(page(sorted, &pageable))))
//! }
//! ```

mod error;
mod event;
mod response;

pub use error::{ApiError, ApiResult};

pub use event::{send, send_on, send_with_timeout, EmitError, Emitter, EventStream, Executor};

pub use response::{no_content, object, table, Table};
