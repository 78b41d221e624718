use crate::database::{model::booking::BookingRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking, BookingPeriod,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let period = BookingPeriod::new(event.start_at, event.end_at);

        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する。
        // 重なりチェックと INSERT を 1 つのトランザクションで実行することで、
        // 同時刻帯への同時リクエストが両方成功することはない
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のルーム ID をもつルームが存在するか
        // - 存在した場合、前後のバッファを含めて重なる予約が無いか
        //
        // 上記の両方が Yes だった場合、このブロック以降の処理に進む
        {
            //
            // ① ルームの存在確認
            //
            let room_row = sqlx::query(
                r#"
                SELECT room_id
                FROM rooms
                WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if room_row.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "room ({}) was not found",
                    event.room_id
                )));
            }

            //
            // ② 希望時間帯が既存予約と重なっていないか確認
            //    衝突条件（前後 30 分のバッファ込み）:
            //        existing.start_at < new.end_at + 30min
            //        AND existing.end_at > new.start_at - 30min
            //
            let conflict = sqlx::query(
                r#"
                SELECT booking_id
                FROM bookings
                WHERE room_id = $1
                  AND start_at < $2
                  AND end_at > $3
                LIMIT 1
                "#,
            )
            .bind(event.room_id)
            .bind(period.padded_end())
            .bind(period.padded_start())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if conflict.is_some() {
                return Err(AppError::BookingConflict(format!(
                    "room ({}) is already booked around the requested time slot",
                    event.room_id
                )));
            }
        }

        // チェックを通過したので bookings テーブルにレコードを追加する
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, room_id, user_id, start_at, end_at, title, description)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking_id)
        .bind(event.room_id)
        .bind(event.booked_by)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(&event.title)
        .bind(&event.description)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    // ユーザー ID に紐づく予約一覧を取得する
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        // rooms テーブルと INNER JOIN し、ルームの情報も一緒に抽出する。
        // 出力するレコードは、開始時刻の新しい順に並べる
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.room_id,
                    b.user_id,
                    b.start_at,
                    b.end_at,
                    b.title,
                    b.description,
                    r.room_name,
                    r.capacity,
                    r.contact_person
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
                ORDER BY b.start_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    // ルーム ID に紐づく予約のうち、開始時刻が範囲内のものを取得する
    async fn find_by_room_in_range(
        &self,
        room_id: RoomId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.room_id,
                    b.user_id,
                    b.start_at,
                    b.end_at,
                    b.title,
                    b.description,
                    r.room_name,
                    r.capacity,
                    r.contact_person
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.room_id = $1
                  AND b.start_at BETWEEN $2 AND $3
                ORDER BY b.start_at ASC
            "#,
        )
        .bind(room_id)
        .bind(start_at)
        .bind(end_at)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    // 予約を取り消す
    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 取り消し操作時は事前のチェックとして、以下を調べる。
        // - 指定の予約 ID をもつ予約が存在するか
        // - 存在した場合、予約したユーザーが指定のユーザーと同じか
        {
            let owner: Option<UserId> = sqlx::query_scalar(
                r#"
                SELECT user_id
                FROM bookings
                WHERE booking_id = $1
                "#,
            )
            .bind(event.booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some(owner) = owner else {
                return Err(AppError::EntityNotFound(format!(
                    "booking ({}) was not found",
                    event.booking_id
                )));
            };

            if owner != event.requested_user {
                return Err(AppError::ForbiddenOperation);
            }
        }

        let res = sqlx::query(
            r#"
                DELETE FROM bookings WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl BookingRepositoryImpl {
    // create メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{room::RoomRepositoryImpl, user::UserRepositoryImpl};
    use chrono::TimeZone;
    use kernel::model::{room::event::RegisterRoom, user::event::CreateUser};
    use kernel::repository::{room::RoomRepository, user::UserRepository};

    fn t(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, hour, min, 0).unwrap()
    }

    async fn prepare_room(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<RoomId> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        repo.seed(vec![RegisterRoom {
            room_name: name.into(),
            capacity: 8,
            description: "Test room".into(),
            image_url: "https://example.com/room.png".into(),
            contact_person: "Test Contact".into(),
        }])
        .await?;
        let room = repo
            .find_all()
            .await?
            .into_iter()
            .find(|r| r.room_name == name)
            .unwrap();
        Ok(room.id)
    }

    async fn prepare_user(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: name.into(),
                email: format!("{name}@example.com"),
                password: "password".into(),
            })
            .await?;
        Ok(user.user_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_and_list_bookings(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let room_id = prepare_room(&pool, "Fuji").await?;
        let user_id = prepare_user(&pool, "taro").await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateBooking::new(
            room_id,
            user_id,
            t(10, 0),
            t(11, 0),
            "Weekly sync".into(),
            None,
        ))
        .await?;
        repo.create(CreateBooking::new(
            room_id,
            user_id,
            t(13, 0),
            t(14, 0),
            "Planning".into(),
            Some("Q2 roadmap".into()),
        ))
        .await?;

        // 開始時刻の新しい順
        let bookings = repo.find_all_by_user(user_id).await?;
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].title, "Planning");
        assert_eq!(bookings[0].start_at, t(13, 0));
        assert_eq!(bookings[0].room.room_name, "Fuji");
        assert_eq!(bookings[1].title, "Weekly sync");

        // 開始時刻が範囲内のものだけが対象になる
        let in_range = repo.find_by_room_in_range(room_id, t(9, 0), t(12, 0)).await?;
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].title, "Weekly sync");

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_overlapping_booking_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let room_id = prepare_room(&pool, "Fuji").await?;
        let other_room_id = prepare_room(&pool, "Aso").await?;
        let user_id = prepare_user(&pool, "taro").await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateBooking::new(
            room_id,
            user_id,
            t(10, 0),
            t(11, 0),
            "Weekly sync".into(),
            None,
        ))
        .await?;

        // 既存予約の時間帯の内側
        let inside = repo
            .create(CreateBooking::new(
                room_id,
                user_id,
                t(10, 15),
                t(10, 45),
                "Overlap".into(),
                None,
            ))
            .await;
        assert!(matches!(inside, Err(AppError::BookingConflict(_))));

        // 既存予約を完全に包含する時間帯
        let enclosing = repo
            .create(CreateBooking::new(
                room_id,
                user_id,
                t(9, 0),
                t(12, 0),
                "Enclosing".into(),
                None,
            ))
            .await;
        assert!(matches!(enclosing, Err(AppError::BookingConflict(_))));

        // 終了から 30 分未満しか空いていない時間帯
        let too_close = repo
            .create(CreateBooking::new(
                room_id,
                user_id,
                t(11, 15),
                t(12, 0),
                "Too close".into(),
                None,
            ))
            .await;
        assert!(matches!(too_close, Err(AppError::BookingConflict(_))));

        // 45 分前に終わる時間帯は予約できる
        repo.create(CreateBooking::new(
            room_id,
            user_id,
            t(8, 0),
            t(9, 15),
            "Morning".into(),
            None,
        ))
        .await?;

        // 別ルームなら同時刻でも予約できる
        repo.create(CreateBooking::new(
            other_room_id,
            user_id,
            t(10, 0),
            t(11, 0),
            "Other room".into(),
            None,
        ))
        .await?;

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_booking_for_missing_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = prepare_user(&pool, "taro").await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .create(CreateBooking::new(
                RoomId::new(),
                user_id,
                t(10, 0),
                t(11, 0),
                "Nowhere".into(),
                None,
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_cancel_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let room_id = prepare_room(&pool, "Fuji").await?;
        let owner_id = prepare_user(&pool, "taro").await?;
        let other_id = prepare_user(&pool, "hanako").await?;
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool));

        let booking_id = repo
            .create(CreateBooking::new(
                room_id,
                owner_id,
                t(10, 0),
                t(11, 0),
                "Weekly sync".into(),
                None,
            ))
            .await?;

        // 所有者以外は取り消せず、予約は残る
        let denied = repo.cancel(CancelBooking::new(booking_id, other_id)).await;
        assert!(matches!(denied, Err(AppError::ForbiddenOperation)));
        assert_eq!(repo.find_all_by_user(owner_id).await?.len(), 1);

        // 所有者は取り消せる
        repo.cancel(CancelBooking::new(booking_id, owner_id)).await?;
        assert!(repo.find_all_by_user(owner_id).await?.is_empty());
        assert!(repo
            .find_by_room_in_range(room_id, t(0, 0), t(23, 59))
            .await?
            .is_empty());

        // 存在しない予約 ID
        let missing = repo.cancel(CancelBooking::new(BookingId::new(), owner_id)).await;
        assert!(matches!(missing, Err(AppError::EntityNotFound(_))));

        Ok(())
    }
}
