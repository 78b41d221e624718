pub mod event;

use crate::model::id::{BookingId, RoomId, UserId};
use chrono::{DateTime, Duration, Utc};

// 同一ルームの予約同士に要求される最小の間隔（分）
pub const BOOKING_GAP_MINUTES: i64 = 30;

#[derive(Debug)]
pub struct Booking {
    pub id: BookingId,
    pub booked_by: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub room: BookingRoom,
}

#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub contact_person: String,
}

// 予約の時間帯。重なり判定はこの型に集約し、
// adapter 側の SQL は同じ条件をそのまま写す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPeriod {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl BookingPeriod {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self { start_at, end_at }
    }

    pub fn required_gap() -> Duration {
        Duration::minutes(BOOKING_GAP_MINUTES)
    }

    // 2 つの時間帯は、間隔が 30 分未満なら衝突とみなす。
    // [s1, e1] と [s2, e2] が衝突 ⇔ s1 < e2 + 30min かつ s2 < e1 + 30min
    pub fn conflicts_with(&self, other: &BookingPeriod) -> bool {
        let gap = Self::required_gap();
        other.start_at < self.end_at + gap && self.start_at < other.end_at + gap
    }

    pub fn padded_start(&self) -> DateTime<Utc> {
        self.start_at - Self::required_gap()
    }

    pub fn padded_end(&self) -> DateTime<Utc> {
        self.end_at + Self::required_gap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn slot_inside_existing_booking_window_conflicts() {
        let existing = BookingPeriod::new(t(10, 0), t(11, 0));
        let proposed = BookingPeriod::new(t(10, 15), t(10, 45));
        assert!(proposed.conflicts_with(&existing));
        assert!(existing.conflicts_with(&proposed));
    }

    #[test]
    fn slot_more_than_gap_before_does_not_conflict() {
        // 既存 10:00-11:00 に対し 8:00-9:15 は 45 分空いているので予約可能
        let existing = BookingPeriod::new(t(10, 0), t(11, 0));
        let proposed = BookingPeriod::new(t(8, 0), t(9, 15));
        assert!(!proposed.conflicts_with(&existing));
        assert!(!existing.conflicts_with(&proposed));
    }

    #[test]
    fn slot_enclosed_by_long_booking_conflicts() {
        let existing = BookingPeriod::new(t(9, 0), t(12, 0));
        let proposed = BookingPeriod::new(t(10, 0), t(10, 30));
        assert!(proposed.conflicts_with(&existing));
    }

    #[test]
    fn slot_starting_before_and_ending_inside_conflicts() {
        let existing = BookingPeriod::new(t(10, 0), t(11, 0));
        let proposed = BookingPeriod::new(t(9, 0), t(10, 10));
        assert!(proposed.conflicts_with(&existing));
    }

    #[test]
    fn slot_within_gap_after_existing_conflicts() {
        let existing = BookingPeriod::new(t(10, 0), t(11, 0));
        let proposed = BookingPeriod::new(t(11, 15), t(12, 0));
        assert!(proposed.conflicts_with(&existing));
    }

    #[test]
    fn slot_exactly_gap_apart_does_not_conflict() {
        let existing = BookingPeriod::new(t(10, 0), t(11, 0));
        let proposed = BookingPeriod::new(t(11, 30), t(12, 0));
        assert!(!proposed.conflicts_with(&existing));
        assert!(!existing.conflicts_with(&proposed));
    }

    #[test]
    fn padded_bounds_extend_both_ends_by_gap() {
        let period = BookingPeriod::new(t(10, 0), t(11, 0));
        assert_eq!(period.padded_start(), t(9, 30));
        assert_eq!(period.padded_end(), t(11, 30));
    }
}
