use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking, BookingRoom},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

// 時刻はエポックミリ秒で受け渡しする
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub start_time: i64,
    #[garde(skip)]
    pub end_time: i64,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
}

#[derive(new)]
pub struct CreateBookingRequestWithIds(RoomId, UserId, CreateBookingRequest);

impl TryFrom<CreateBookingRequestWithIds> for CreateBooking {
    type Error = AppError;

    fn try_from(value: CreateBookingRequestWithIds) -> Result<Self, Self::Error> {
        let CreateBookingRequestWithIds(
            room_id,
            user_id,
            CreateBookingRequest {
                start_time,
                end_time,
                title,
                description,
            },
        ) = value;
        let start_at = epoch_ms_to_datetime(start_time)?;
        let end_at = epoch_ms_to_datetime(end_time)?;
        if start_at >= end_at {
            return Err(AppError::UnprocessableEntity(
                "startTime must be before endTime".into(),
            ));
        }
        Ok(CreateBooking::new(
            room_id,
            user_id,
            start_at,
            end_at,
            title,
            description,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking_id: BookingId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBookingListQuery {
    pub start_time: i64,
    pub end_time: i64,
}

impl RoomBookingListQuery {
    pub fn range(&self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            epoch_ms_to_datetime(self.start_time)?,
            epoch_ms_to_datetime(self.end_time)?,
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub start_time: i64,
    pub end_time: i64,
    pub title: String,
    pub description: Option<String>,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            id,
            booked_by,
            start_at,
            end_at,
            title,
            description,
            room,
        } = value;
        Self {
            booking_id: id,
            booked_by,
            start_time: start_at.timestamp_millis(),
            end_time: end_at.timestamp_millis(),
            title,
            description,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub contact_person: String,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            room_name,
            capacity,
            contact_person,
        } = value;
        Self {
            room_id,
            room_name,
            capacity,
            contact_person,
        }
    }
}

fn epoch_ms_to_datetime(ms: i64) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::UnprocessableEntity(format!("timestamp out of range: {ms}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_ms_round_trips_through_datetime() {
        let ms = 1_743_500_400_000; // 2025-04-01T09:40:00Z
        let dt = epoch_ms_to_datetime(ms).unwrap();
        assert_eq!(dt.timestamp_millis(), ms);
    }

    #[test]
    fn out_of_range_epoch_ms_is_rejected() {
        let res = epoch_ms_to_datetime(i64::MAX);
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn create_request_with_reversed_times_is_rejected() {
        let req = CreateBookingRequest {
            start_time: 1_743_500_400_000,
            end_time: 1_743_496_800_000,
            title: "Sync".into(),
            description: None,
        };
        let res = CreateBooking::try_from(CreateBookingRequestWithIds::new(
            RoomId::new(),
            UserId::new(),
            req,
        ));
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn create_request_converts_to_event() {
        let req = CreateBookingRequest {
            start_time: 1_743_496_800_000, // 2025-04-01T08:40:00Z
            end_time: 1_743_500_400_000,   // 2025-04-01T09:40:00Z
            title: "Sync".into(),
            description: Some("weekly".into()),
        };
        let room_id = RoomId::new();
        let user_id = UserId::new();
        let event =
            CreateBooking::try_from(CreateBookingRequestWithIds::new(room_id, user_id, req))
                .unwrap();
        assert_eq!(event.room_id, room_id);
        assert_eq!(event.booked_by, user_id);
        assert_eq!(event.start_at.timestamp_millis(), 1_743_496_800_000);
        assert_eq!(event.end_at.timestamp_millis(), 1_743_500_400_000);
        assert_eq!(event.title, "Sync");
    }
}
