use serde::{Deserialize, Serialize};

/// A row of the `users` table, serialized with camelCase keys.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,  // PRIMARY KEY
    pub name: String,
    pub email: String,
    pub card_id: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        card_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            card_id: card_id.into(),
        }
    }
}
