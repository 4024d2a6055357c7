use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
    services::google::GoogleClaims,
    utils::{encode_token, hash_password, verify_password},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr,
};

pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new account with a locally chosen password.
    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<UserModel> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        self.insert_user(full_name, email, &password_hash).await
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error; which one
    /// it was is visible only at debug log level.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email, "login rejected: unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = encode_token(&user.id.to_string())?;
        Ok(token)
    }

    /// Resolve a verified Google identity to a local account,
    /// provisioning one on first sign-in.
    ///
    /// The generated password is random and never surfaced anywhere, so
    /// the account stays reachable only through the identity-token path.
    pub async fn google_sign_in(&self, claims: &GoogleClaims) -> AppResult<UserModel> {
        if let Some(user) = self.find_by_email(&claims.email).await? {
            return Ok(user);
        }

        let throwaway = uuid::Uuid::new_v4().simple().to_string();
        let password_hash = hash_password(&throwaway)?;
        let full_name = claims.name.clone().unwrap_or_else(|| claims.email.clone());

        self.insert_user(&full_name, &claims.email, &password_hash)
            .await
    }

    pub async fn get_user_by_id(&self, id: i32) -> AppResult<UserModel> {
        let user = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserModel>> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<UserModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            full_name: sea_orm::ActiveValue::Set(full_name.to_string()),
            email: sea_orm::ActiveValue::Set(email.to_string()),
            password_hash: sea_orm::ActiveValue::Set(password_hash.to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        // Two concurrent signups for one email race at the unique index;
        // the loser gets Conflict, not a silent overwrite.
        new_user.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("User already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }
}
