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

pub mod content;
mod dispatcher;
mod error;
mod template;

#[cfg(test)]
mod tests;

pub use content::{CommonContent, format_date, partner_noun};
pub use dispatcher::{EmailNotification, NotificationClient, NotificationDispatcher};
pub use error::NotificationError;
pub use template::{EmailTemplateName, TemplateRegistry};
