use crate::database::UserAccessor;
use crate::models::User;
use crate::utils::{AppError, AppResult};
use actix_web::http::StatusCode;
use std::sync::Arc;

/// Outcome of a single user lookup.
#[derive(Debug)]
pub enum UserLookup {
    Found(User),
    NotFound { user_id: String },
    Failed(AppError),
}

impl UserLookup {
    /// HTTP status for this outcome. Every non-found outcome maps to 404,
    /// accessor failures included.
    pub fn status(&self) -> StatusCode {
        match self {
            UserLookup::Found(_) => StatusCode::OK,
            UserLookup::NotFound { .. } => StatusCode::NOT_FOUND,
            UserLookup::Failed(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn into_result(self) -> AppResult<User> {
        match self {
            UserLookup::Found(user) => Ok(user),
            UserLookup::NotFound { user_id } => Err(AppError::user_not_found(&user_id)),
            UserLookup::Failed(e) => Err(e),
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    accessor: Arc<dyn UserAccessor>,
}

impl UserService {
    pub fn new(accessor: Arc<dyn UserAccessor>) -> Self {
        Self { accessor }
    }

    pub async fn lookup(&self, user_id: &str) -> UserLookup {
        match self.accessor.find_by_id(user_id).await {
            Ok(Some(user)) => UserLookup::Found(user),
            Ok(None) => UserLookup::NotFound {
                user_id: user_id.to_string(),
            },
            Err(e) => UserLookup::Failed(e),
        }
    }
}
