// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(dead_code, clippy::unwrap_used)]

use nfdiv_clients::{ClientConfig, HmctsClients};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NOTIFY_KEY: &str =
    "nfdiv_test-26785a09-ab16-4eb0-8407-a37497a57506-3d844edf-8d35-48ac-975b-e847b4f122b0";
pub const USER_TOKEN: &str = "user-token";
pub const SERVICE_TOKEN: &str = "Bearer leased-service-token";

/// Clients pointed at `server` for every service.
pub fn clients(server: &MockServer) -> HmctsClients {
    let config: ClientConfig = ClientConfig::single_host(&server.uri().parse().unwrap(), NOTIFY_KEY);
    HmctsClients::new(&config).unwrap()
}

/// Stubs the S2S lease every authenticated call makes.
pub async fn mount_lease(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/lease"))
        .respond_with(ResponseTemplate::new(200).set_body_string("leased-service-token"))
        .mount(server)
        .await;
}
