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

//! Case events for no-fault divorce and dissolution cases.
//!
//! Each event is a [`CcdEvent`] with a static [`EventDefinition`] and
//! handlers for the callbacks it registers. Handlers reach external
//! services only through the traits in [`ports`].

mod context;
mod error;
mod event;
mod events;
pub mod ports;
mod registry;

#[cfg(test)]
mod tests;

pub use context::{EventContext, Services};
pub use error::CoreError;
pub use event::{CallbackHook, CallbackOutcome, CcdEvent, EventDefinition, SubmittedOutcome};
pub use ports::UserDetails;
pub use registry::EventRegistry;
