//! Authenticated request pipeline towards the upstream APIs.
//!
//! Flow Overview:
//! 1. A handler builds an [`ApiRequest`] (endpoint, method, optional body and headers).
//! 2. [`dispatch`] hands it to an [`ApiClient`] bound to one backend.
//! 3. The client reads the bearer token from the [`SessionStore`](crate::session::SessionStore),
//!    sends the request and clears the session when the backend answers `401`.
//! 4. [`dispatch`] classifies the outcome into a [`RequestResult`]; it never fails.

mod client;
mod dispatch;
mod error;
mod request;

pub use client::{ApiClient, ApiResponse, Backend, DEFAULT_TIMEOUT};
pub use dispatch::{dispatch, Failure, FailureKind, RequestResult, UNKNOWN_ERROR_MESSAGE};
pub use error::ClientError;
pub use request::{ApiRequest, HttpMethod, MultipartBody, MultipartField, RequestBody};
