use garde::Validate;
use kernel::model::{id::RoomId, room::Room};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub description: String,
    pub image_url: String,
    pub contact_person: String,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            id,
            room_name,
            capacity,
            description,
            image_url,
            contact_person,
        } = value;
        Self {
            id,
            room_name,
            capacity,
            description,
            image_url,
            contact_person,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRoomsResponse {
    pub registered: u64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomContactRequest {
    #[garde(length(min = 1))]
    pub contact_person: String,
}
