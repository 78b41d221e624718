use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingsResponse, CreateBookingRequest, CreateBookingRequestWithIds,
        CreateBookingResponse, RoomBookingListQuery,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::event::{CancelBooking, CreateBooking},
    id::{BookingId, RoomId},
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn create_booking(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let event = CreateBooking::try_from(CreateBookingRequestWithIds::new(room_id, user.id(), req))?;
    let booking_id = registry.booking_repository().create(event).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse { booking_id }),
    ))
}

pub async fn show_my_bookings(
    user: Option<AuthorizedUser>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    // 未認証の場合はエラーにせず空の一覧を返す
    let Some(user) = user else {
        return Ok(Json(BookingsResponse { items: vec![] }));
    };

    registry
        .booking_repository()
        .find_all_by_user(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_room_bookings(
    Path(room_id): Path<RoomId>,
    Query(query): Query<RoomBookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    let (start_at, end_at) = query.range()?;

    registry
        .booking_repository()
        .find_by_room_in_range(room_id, start_at, end_at)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let event = CancelBooking::new(booking_id, user.id());
    registry
        .booking_repository()
        .cancel(event)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
