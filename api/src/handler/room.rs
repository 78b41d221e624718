use crate::{
    extractor::AuthorizedUser,
    model::room::{RoomResponse, RoomsResponse, SeedRoomsResponse, UpdateRoomContactRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{event::UpdateRoomContact, preset_rooms},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// ルーム一覧は認証なしで参照できる
pub async fn show_room_list(State(registry): State<AppRegistry>) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

pub async fn seed_rooms(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SeedRoomsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .room_repository()
        .seed(preset_rooms())
        .await
        .map(|registered| Json(SeedRoomsResponse { registered }))
}

pub async fn update_room_contact(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomContactRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let event = UpdateRoomContact {
        room_id,
        contact_person: req.contact_person,
    };
    registry
        .room_repository()
        .update_contact(event)
        .await
        .map(|_| StatusCode::OK)
}
