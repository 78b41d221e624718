use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{create_booking, show_room_bookings};
use crate::handler::room::{seed_rooms, show_room, show_room_list, update_room_contact};

pub fn build_room_routers() -> Router<AppRegistry> {
    let rooms_routers = Router::new()
        .route("/", get(show_room_list))
        .route("/seed", post(seed_rooms))
        .route("/:room_id", get(show_room))
        .route("/:room_id/contact", put(update_room_contact))
        .route("/:room_id/bookings", post(create_booking).get(show_room_bookings));

    Router::new().nest("/rooms", rooms_routers)
}
