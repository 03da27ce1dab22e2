use crate::types::{DateTime, ModelId, UserId, WishId, WishRow};
use crate::{Db, Error};
use mkt_core::models::{CreateWishFailure, PriceRange, WishRecord, WishStatus};
use mkt_core::ports::WishRepository;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

impl WishRepository for Db {
    async fn create_wish(
        &self,
        wish_id: WishId,
        user_id: UserId,
        model_id: ModelId,
        range: PriceRange,
        as_of: DateTime,
    ) -> Result<Result<WishRecord<WishId, UserId, ModelId, DateTime>, CreateWishFailure>, Error>
    {
        let mut tx = self.writer.begin().await?;

        let duplicate = sqlx::query_scalar::<_, i64>(
            "select 1 from wish where user_id = $1 and model_id = $2",
        )
        .bind(user_id)
        .bind(model_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Ok(Err(CreateWishFailure::Duplicate));
        }

        // an unsold listing already in range makes the wish available
        // immediately; otherwise it waits for the listing-side promotion
        let matched = sqlx::query_scalar::<_, i64>(
            r#"
            select
                1
            from
                listing
            where
                model_id = $1
            and
                buyer_id is null
            and
                active = 1
            and
                price between $2 and $3
            limit 1
            "#,
        )
        .bind(model_id)
        .bind(range.lower())
        .bind(range.upper())
        .fetch_optional(&mut *tx)
        .await?;

        let status = if matched.is_some() {
            WishStatus::Available
        } else {
            WishStatus::Pending
        };

        let inserted = sqlx::query(
            r#"
            insert into
                wish (id, user_id, model_id, lower_bound, upper_bound, status, created_at)
            values
                ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(wish_id)
        .bind(user_id)
        .bind(model_id)
        .bind(range.lower())
        .bind(range.upper())
        .bind(status.as_str())
        .bind(as_of)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            // a racing insert can still slip past the pre-check
            Err(err) if is_unique_violation(&err) => {
                return Ok(Err(CreateWishFailure::Duplicate));
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit().await?;

        tracing::debug!(%wish_id, status = status.as_str(), "wish created");

        Ok(Ok(WishRecord {
            id: wish_id,
            user_id,
            model_id,
            range,
            status,
            created_at: as_of,
        }))
    }

    async fn get_wish(
        &self,
        wish_id: WishId,
    ) -> Result<Option<WishRecord<WishId, UserId, ModelId, DateTime>>, Error> {
        let row = sqlx::query_as::<_, WishRow>(
            r#"
            select
                id, user_id, model_id, lower_bound, upper_bound, status, created_at
            from
                wish
            where
                id = $1
            "#,
        )
        .bind(wish_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_wish_owner(&self, wish_id: WishId) -> Result<Option<UserId>, Error> {
        let owner = sqlx::query_scalar::<_, UserId>("select user_id from wish where id = $1")
            .bind(wish_id)
            .fetch_optional(&self.reader)
            .await?;

        Ok(owner)
    }

    async fn query_wishes(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishRecord<WishId, UserId, ModelId, DateTime>>, Error> {
        let rows = sqlx::query_as::<_, WishRow>(
            r#"
            select
                id, user_id, model_id, lower_bound, upper_bound, status, created_at
            from
                wish
            where
                user_id = $1
            order by
                created_at desc
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_wish(&self, wish_id: WishId) -> Result<bool, Error> {
        let deleted = sqlx::query("delete from wish where id = $1")
            .bind(wish_id)
            .execute(&self.writer)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
