use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role_id)
                SELECT $1, $2, $3, $4, role_id
                FROM roles
                WHERE role_name = 'User'
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(hashed_password)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role: Role::User,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT
                    u.user_id,
                    u.user_name,
                    u.email,
                    r.role_name
                FROM users AS u
                INNER JOIN roles AS r ON u.role_id = r.role_id
                WHERE u.user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT
                    u.user_id,
                    u.user_name,
                    u.email,
                    r.role_name
                FROM users AS u
                INNER JOIN roles AS r ON u.role_id = r.role_id
                ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    // 初期管理者の登録用。メールアドレスをキーに upsert するため、
    // 起動のたびに呼んでも増殖しない
    async fn ensure_admin(&self, event: CreateUser) -> AppResult<()> {
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role_id)
                SELECT $1, $2, $3, $4, role_id
                FROM roles
                WHERE role_name = 'Admin'
                ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(UserId::new())
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(hashed_password)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_and_find_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create(CreateUser {
                user_name: "taro".into(),
                email: "taro@example.com".into(),
                password: "password".into(),
            })
            .await?;
        assert_eq!(created.role, Role::User);

        let found = repo.find_current_user(created.user_id).await?;
        assert_eq!(found, Some(created));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_ensure_admin_is_idempotent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let admin = || CreateUser {
            user_name: "admin".into(),
            email: "admin@example.com".into(),
            password: "passw0rd".into(),
        };
        repo.ensure_admin(admin()).await?;
        repo.ensure_admin(admin()).await?;

        let users = repo.find_all().await?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);

        Ok(())
    }
}
