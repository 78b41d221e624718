pub mod event;

use crate::model::id::RoomId;

use self::event::RegisterRoom;

#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub description: String,
    pub image_url: String,
    pub contact_person: String,
}

// 初期投入するルーム一式。ルーム名をキーに upsert されるため
// 何度流しても増殖しない。
pub fn preset_rooms() -> Vec<RegisterRoom> {
    vec![
        RegisterRoom {
            room_name: "Everest".into(),
            capacity: 12,
            description: "Large conference room".into(),
            image_url: "https://images.unsplash.com/photo-1431440869543-efaf3388c585?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "Sarah Johnson".into(),
        },
        RegisterRoom {
            room_name: "Kilimanjaro".into(),
            capacity: 8,
            description: "Medium meeting room".into(),
            image_url: "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "Michael Chen".into(),
        },
        RegisterRoom {
            room_name: "Alps".into(),
            capacity: 6,
            description: "Cozy meeting space".into(),
            image_url: "https://images.unsplash.com/photo-1497366811353-6870744d04b2?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "Emma Davis".into(),
        },
        RegisterRoom {
            room_name: "Andes".into(),
            capacity: 10,
            description: "Presentation room".into(),
            image_url: "https://images.unsplash.com/photo-1497366754035-f200968a6e72?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "Alex Martinez".into(),
        },
        RegisterRoom {
            room_name: "Rockies".into(),
            capacity: 4,
            description: "Small meeting room".into(),
            image_url: "https://images.unsplash.com/photo-1497366412874-3415097a27e7?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "Lisa Wong".into(),
        },
        RegisterRoom {
            room_name: "Himalayas".into(),
            capacity: 15,
            description: "Board room".into(),
            image_url: "https://images.unsplash.com/photo-1497366858526-0766cadbe8fa?auto=format&fit=crop&w=1000&q=80".into(),
            contact_person: "David Smith".into(),
        },
    ]
}
