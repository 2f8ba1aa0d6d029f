//! Client-side session lifecycle and admin API wrappers for the social-video
//! platform's `/api/v1` backend.
//!
//! The pieces are wired explicitly: one [`session::SessionContext`] is shared by
//! the [`remote::ApiClient`], the [`session::AuthStore`] and the
//! [`guard::SessionGuard`].

pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod upload;

/// Application-level success code embedded in every response body.
pub const SUCCESS_CODE: i64 = 1000;
