use crate::database::{model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{RegisterRoom, UpdateRoomContact},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    // ルーム名をキーに upsert するため、同じ一式を何度流しても
    // レコードは増えない
    async fn seed(&self, events: Vec<RegisterRoom>) -> AppResult<u64> {
        let mut registered = 0;
        for event in events {
            let res = sqlx::query(
                r#"
                    INSERT INTO rooms (room_name, capacity, description, image_url, contact_person)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (room_name) DO NOTHING
                "#,
            )
            .bind(event.room_name)
            .bind(event.capacity)
            .bind(event.description)
            .bind(event.image_url)
            .bind(event.contact_person)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

            registered += res.rows_affected();
        }

        Ok(registered)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    room_name,
                    capacity,
                    description,
                    image_url,
                    contact_person
                FROM rooms
                ORDER BY room_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    room_name,
                    capacity,
                    description,
                    image_url,
                    contact_person
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn update_contact(&self, event: UpdateRoomContact) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    contact_person = $1,
                    updated_at = CURRENT_TIMESTAMP
                WHERE room_id = $2
            "#,
        )
        .bind(event.contact_person)
        .bind(event.room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified room not found".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::room::preset_rooms;

    #[sqlx::test(migrations = "../migrations")]
    async fn test_seed_and_find_rooms(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        let registered = repo.seed(preset_rooms()).await?;
        assert_eq!(registered, 6);

        let rooms = repo.find_all().await?;
        assert_eq!(rooms.len(), 6);
        // ORDER BY room_name
        assert_eq!(rooms[0].room_name, "Alps");
        assert_eq!(rooms[0].capacity, 6);

        let room_id = rooms[0].id;
        let found = repo.find_by_id(room_id).await?;
        assert!(found.is_some());
        assert_eq!(found.unwrap().contact_person, "Emma Davis");

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_seed_twice_does_not_duplicate(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        repo.seed(preset_rooms()).await?;
        let registered_again = repo.seed(preset_rooms()).await?;
        assert_eq!(registered_again, 0);

        let rooms = repo.find_all().await?;
        assert_eq!(rooms.len(), 6);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_update_contact(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ConnectionPool::new(pool));

        repo.seed(preset_rooms()).await?;
        let rooms = repo.find_all().await?;
        let room_id = rooms[0].id;

        repo.update_contact(UpdateRoomContact {
            room_id,
            contact_person: "New Contact".into(),
        })
        .await?;

        let room = repo.find_by_id(room_id).await?.unwrap();
        assert_eq!(room.contact_person, "New Contact");

        let missing = repo
            .update_contact(UpdateRoomContact {
                room_id: RoomId::new(),
                contact_person: "Nobody".into(),
            })
            .await;
        assert!(matches!(missing, Err(AppError::EntityNotFound(_))));

        Ok(())
    }
}
