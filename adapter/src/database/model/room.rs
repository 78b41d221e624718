use kernel::model::{id::RoomId, room::Room};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub description: String,
    pub image_url: String,
    pub contact_person: String,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            room_name,
            capacity,
            description,
            image_url,
            contact_person,
        } = value;
        Room {
            id: room_id,
            room_name,
            capacity,
            description,
            image_url,
            contact_person,
        }
    }
}
