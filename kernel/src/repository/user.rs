use crate::model::{id::UserId, user::event::CreateUser, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    // 初期管理者を登録する。登録済みなら何もしない
    async fn ensure_admin(&self, event: CreateUser) -> AppResult<()>;
}
