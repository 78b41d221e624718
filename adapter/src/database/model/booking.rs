use kernel::model::{
    booking::{Booking, BookingRoom},
    id::{BookingId, RoomId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧を取得する際に使う型。rooms と JOIN した結果を受ける
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub room_name: String,
    pub capacity: i32,
    pub contact_person: String,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            room_id,
            user_id,
            start_at,
            end_at,
            title,
            description,
            room_name,
            capacity,
            contact_person,
        } = value;
        Booking {
            id: booking_id,
            booked_by: user_id,
            start_at,
            end_at,
            title,
            description,
            room: BookingRoom {
                room_id,
                room_name,
                capacity,
                contact_person,
            },
        }
    }
}
