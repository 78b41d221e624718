use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{cancel_booking, show_my_bookings};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/me", get(show_my_bookings))
        .route("/:booking_id", delete(cancel_booking));

    Router::new().nest("/bookings", bookings_routers)
}
