use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{register_user, show_current_user, show_user_list};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", post(register_user).get(show_user_list))
        .route("/me", get(show_current_user));

    Router::new().nest("/users", users_routers)
}
