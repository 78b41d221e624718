use crate::model::{
    id::RoomId,
    room::{
        event::{RegisterRoom, UpdateRoomContact},
        Room,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    // ルーム一式を登録する。登録済みの名前はスキップし、
    // 実際に追加した件数を返す
    async fn seed(&self, events: Vec<RegisterRoom>) -> AppResult<u64>;
    // すべてのルームを取得する
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    // ルームの担当者名を更新する
    async fn update_contact(&self, event: UpdateRoomContact) -> AppResult<()>;
}
