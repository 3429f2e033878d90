//! Types for the external profile endpoint.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Success body of `GET /api/profile`. A missing or `null` `user` is allowed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub user: Option<UserProfile>,
}
