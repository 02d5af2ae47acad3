use crate::models::User;
use crate::utils::AppResult;
use async_trait::async_trait;
use sqlx::postgres::PgPool;

const FIND_USER_BY_ID: &str = "SELECT user_id, name, email, card_id FROM users WHERE user_id = $1";

/// Read access to the `users` table.
#[async_trait]
pub trait UserAccessor: Send + Sync {
    /// Returns the row whose `user_id` equals `user_id`, if any.
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>>;
}

pub struct PgUserAccessor {
    pool: PgPool,
}

impl PgUserAccessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAccessor for PgUserAccessor {
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(FIND_USER_BY_ID)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::utils::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory accessor that records every id it is asked for.
    #[derive(Default)]
    pub struct RecordingAccessor {
        rows: HashMap<String, User>,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingAccessor {
        pub fn with_rows(rows: Vec<User>) -> Self {
            Self {
                rows: rows.into_iter().map(|u| (u.user_id.clone(), u)).collect(),
                ..Default::default()
            }
        }

        /// Every call fails as if the pool could not hand out a connection.
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserAccessor for RecordingAccessor {
        async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
            self.calls.lock().unwrap().push(user_id.to_string());
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.rows.get(user_id).cloned())
        }
    }
}
