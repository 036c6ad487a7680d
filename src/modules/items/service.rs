use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use gearlend_core::file_storage::store_image;
use gearlend_core::{AppError, DomainError, FileStorage};

use crate::modules::items::model::{
    CreateItemDto, Item, ItemFilter, ItemResponse, UpdateItemDto, UploadedImage,
};

const ITEM_COLUMNS: &str =
    "id, name, image, quantity, available, teacher_id, created_at, updated_at";

pub struct ItemService;

impl ItemService {
    /// Stores the image (if any) and inserts the item owned by `teacher_id`.
    ///
    /// When the insert fails the stored image is removed again.
    #[instrument(skip(db, storage, dto, image), fields(name = %dto.name, quantity = dto.quantity))]
    pub async fn create_item(
        db: &SqlitePool,
        storage: &dyn FileStorage,
        teacher_id: i64,
        dto: CreateItemDto,
        image: Option<UploadedImage>,
    ) -> Result<Item, AppError> {
        let handle = match &image {
            Some(upload) => Some(store_image(storage, &upload.filename, &upload.bytes).await?),
            None => None,
        };

        let now = Utc::now();
        let inserted = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, image, quantity, available, teacher_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&handle)
        .bind(dto.quantity)
        .bind(dto.available)
        .bind(teacher_id)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(item) => {
                tracing::info!(item_id = item.id, "item created");
                Ok(item)
            }
            Err(e) => {
                if let Some(handle) = handle {
                    if let Err(cleanup) = storage.delete(&handle).await {
                        tracing::warn!(handle = %handle, error = %cleanup, "failed to remove orphaned image");
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Lists items by id. `Available` applies the borrowable rule.
    #[instrument(skip(db))]
    pub async fn list_items(db: &SqlitePool, filter: ItemFilter) -> Result<Vec<Item>, AppError> {
        let sql = match filter {
            ItemFilter::All => format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id"),
            ItemFilter::Available => format!(
                "SELECT {ITEM_COLUMNS} FROM items WHERE available AND quantity > 0 ORDER BY id"
            ),
        };

        let items = sqlx::query_as::<_, Item>(&sql).fetch_all(db).await?;
        Ok(items)
    }

    #[instrument(skip(db))]
    pub async fn get_item(db: &SqlitePool, id: i64) -> Result<Item, AppError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(DomainError::not_found("Item", id))?;

        Ok(item)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_item(
        db: &SqlitePool,
        id: i64,
        dto: UpdateItemDto,
    ) -> Result<Item, AppError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = COALESCE(?, name),
                quantity = COALESCE(?, quantity),
                available = COALESCE(?, available),
                updated_at = ?
            WHERE id = ?
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(dto.name)
        .bind(dto.quantity)
        .bind(dto.available)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(DomainError::not_found("Item", id))?;

        Ok(item)
    }

    /// Deletes an item that has never been lent, then its stored image.
    #[instrument(skip(db, storage))]
    pub async fn delete_item(
        db: &SqlitePool,
        storage: &dyn FileStorage,
        id: i64,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let deleted: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            DELETE FROM items
            WHERE id = ? AND NOT EXISTS (SELECT 1 FROM loans WHERE loans.item_id = items.id)
            RETURNING image
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((image,)) = deleted else {
            let (found, loans): (i64, i64) = sqlx::query_as(
                r#"
                SELECT EXISTS (SELECT 1 FROM items WHERE id = ?1),
                       (SELECT COUNT(*) FROM loans WHERE item_id = ?1)
                "#,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if found > 0 {
                DomainError::Conflict(format!(
                    "Item {} has {} loan record(s) and cannot be deleted",
                    id, loans
                ))
            } else {
                DomainError::not_found("Item", id)
            }
            .into());
        };

        tx.commit().await?;

        if let Some(handle) = image {
            if let Err(e) = storage.delete(&handle).await {
                tracing::warn!(item_id = id, handle = %handle, error = %e, "failed to delete item image");
            }
        }

        tracing::info!(item_id = id, "item deleted");
        Ok(())
    }

    /// Resolves the public image URL for an item.
    pub fn to_response(storage: &dyn FileStorage, item: Item) -> ItemResponse {
        let image_url = item
            .image
            .as_deref()
            .and_then(|handle| storage.get_url(handle).ok());
        ItemResponse::new(item, image_url)
    }
}
