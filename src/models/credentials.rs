//! Login payload.

use serde::Deserialize;
use utoipa::ToSchema;

/// Credentials posted to `/login`. Only used to decide whether a token is
/// issued; never stored and never copied into the token.
#[derive(Deserialize, Clone, ToSchema)]
#[schema(example = json!({ "email": "daparamo", "password": "1234" }))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
