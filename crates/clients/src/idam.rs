// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::{IdamLookup, UserDetails};
use serde::Deserialize;
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{bearer, decode, endpoint, send};

/// The `/o/userinfo` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<UserInfo> for UserDetails {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.uid,
            email: info.sub,
            forename: info.given_name,
            surname: info.family_name,
            roles: info.roles,
        }
    }
}

/// Client for IDAM.
#[derive(Debug, Clone)]
pub struct IdamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IdamClient {
    pub(super) const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Returns the user owning `auth_token`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 if IDAM does not recognise
    /// the token.
    pub async fn user_info(&self, auth_token: &str) -> Result<UserInfo, ClientError> {
        let url: Url = endpoint(&self.base_url, "/o/userinfo")?;
        let request = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, bearer(auth_token));
        let response = send("idam userinfo", request).await?;
        decode("idam userinfo", response).await
    }
}

#[async_trait]
impl IdamLookup for IdamClient {
    async fn user_details(&self, auth_token: &str) -> Result<UserDetails, CoreError> {
        self.user_info(auth_token)
            .await
            .map(UserDetails::from)
            .map_err(|e| translate_client_error("idam", &e))
    }
}
