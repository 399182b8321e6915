// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The callback boundary of the no-fault divorce case API.
//!
//! This crate owns the wire format the case management platform speaks,
//! authenticates each callback and dispatches it to the event handlers in
//! the core crate. It has no HTTP server of its own.

mod callback;
pub mod definitions;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use callback::{CallbackPhase, CallbackService, Credentials};
pub use error::{ApiError, translate_auth_error, translate_core_error, translate_domain_error};
pub use request_response::{
    AboutToStartOrSubmitResponse, CallbackRequest, CallbackResponse, CaseDetailsDto,
    SubmittedCallbackResponse,
};
