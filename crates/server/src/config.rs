// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server settings read from the environment.

use nfdiv_notification::CommonContent;

const DEFAULT_AUTHORISED_SERVICES: &str = "ccd_data";
const DEFAULT_DIVORCE_SIGN_IN_URL: &str = "https://nfdiv-apply-for-divorce.platform.hmcts.net/";
const DEFAULT_DISSOLUTION_SIGN_IN_URL: &str =
    "https://nfdiv-end-civil-partnership.platform.hmcts.net/";

/// Settings the callback server needs beyond the outbound clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// S2S service names allowed to call back.
    pub authorised_services: Vec<String>,
    /// Sign-in link for divorce applicants.
    pub divorce_sign_in_url: String,
    /// Sign-in link for civil partnership applicants.
    pub dissolution_sign_in_url: String,
}

impl ServerConfig {
    /// Reads the settings from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings through `lookup`, falling back to defaults.
    ///
    /// `S2S_AUTHORISED_SERVICES` is a comma-separated list.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str, default: &str| -> String {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            authorised_services: value("S2S_AUTHORISED_SERVICES", DEFAULT_AUTHORISED_SERVICES)
                .split(',')
                .map(str::trim)
                .filter(|service| !service.is_empty())
                .map(String::from)
                .collect(),
            divorce_sign_in_url: value("DIVORCE_SIGN_IN_URL", DEFAULT_DIVORCE_SIGN_IN_URL),
            dissolution_sign_in_url: value(
                "DISSOLUTION_SIGN_IN_URL",
                DEFAULT_DISSOLUTION_SIGN_IN_URL,
            ),
        }
    }

    /// Email variables shared by every notification.
    #[must_use]
    pub fn common_content(&self) -> CommonContent {
        CommonContent::new(
            self.divorce_sign_in_url.clone(),
            self.dissolution_sign_in_url.clone(),
        )
    }
}
