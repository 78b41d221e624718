use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約操作を行う。同一ルームに近接する予約があれば失敗する
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    // ユーザー ID に紐づく予約一覧を開始時刻の新しい順に取得する
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    // ルーム ID に紐づく予約のうち、開始時刻が範囲内のものを取得する
    async fn find_by_room_in_range(
        &self,
        room_id: RoomId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;
    // 予約を取り消す。予約の所有者のみが実行できる
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
}
