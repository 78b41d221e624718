use crate::model::id::RoomId;

pub struct RegisterRoom {
    pub room_name: String,
    pub capacity: i32,
    pub description: String,
    pub image_url: String,
    pub contact_person: String,
}

#[derive(Debug)]
pub struct UpdateRoomContact {
    pub room_id: RoomId,
    pub contact_person: String,
}
