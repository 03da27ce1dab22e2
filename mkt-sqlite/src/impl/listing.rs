use crate::types::{DateTime, ListingId, ListingRow, ModelId, RoomId, UserId};
use crate::{Db, Error};
use mkt_core::models::{Amount, DeleteListingFailure, ListingCreated, ListingRecord};
use mkt_core::ports::ListingRepository;

impl ListingRepository for Db {
    async fn create_listing(
        &self,
        listing_id: ListingId,
        room_id: RoomId,
        seller_id: UserId,
        model_id: ModelId,
        price: Amount,
        closes_at: DateTime,
        as_of: DateTime,
    ) -> Result<ListingCreated<ListingId, RoomId, UserId, ModelId, DateTime>, Error> {
        let mut tx = self.writer.begin().await?;

        sqlx::query(
            r#"
            insert into
                listing (id, seller_id, model_id, price, active, created_at)
            values
                ($1, $2, $3, $4, 1, $5)
            "#,
        )
        .bind(listing_id)
        .bind(seller_id)
        .bind(model_id)
        .bind(price)
        .bind(as_of)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            insert into
                room (id, listing_id, closes_at)
            values
                ($1, $2, $3)
            "#,
        )
        .bind(room_id)
        .bind(listing_id)
        .bind(closes_at)
        .execute(&mut *tx)
        .await?;

        // Promote standing wishes in the same transaction: nobody observes
        // the listing without the transitions, or the transitions without the
        // listing. Only pending rows are touched, so a retry is a no-op.
        let wishes_promoted = sqlx::query(
            r#"
            update
                wish
            set
                status = 'available'
            where
                model_id = $1
            and
                status = 'pending'
            and
                lower_bound <= $2
            and
                upper_bound >= $2
            "#,
        )
        .bind(model_id)
        .bind(price)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(%listing_id, %room_id, wishes_promoted, "listing created");

        Ok(ListingCreated {
            listing: ListingRecord {
                id: listing_id,
                seller_id,
                model_id,
                price,
                buyer_id: None,
                active: true,
                created_at: as_of,
            },
            room_id,
            closes_at,
            wishes_promoted,
        })
    }

    async fn get_listing(
        &self,
        listing_id: ListingId,
    ) -> Result<Option<ListingRecord<ListingId, UserId, ModelId, DateTime>>, Error> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            select
                id, seller_id, model_id, price, buyer_id, active, created_at
            from
                listing
            where
                id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_listing(
        &self,
        listing_id: ListingId,
        acting_user_id: UserId,
    ) -> Result<Result<(), DeleteListingFailure>, Error> {
        let mut tx = self.writer.begin().await?;

        let Some(listing) = sqlx::query_as::<_, ListingRow>(
            r#"
            select
                id, seller_id, model_id, price, buyer_id, active, created_at
            from
                listing
            where
                id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(Err(DeleteListingFailure::NotFound));
        };

        if listing.seller_id != acting_user_id {
            return Ok(Err(DeleteListingFailure::NotOwner));
        }
        if listing.buyer_id.is_some() {
            return Ok(Err(DeleteListingFailure::AlreadySold));
        }

        let bids: i64 = sqlx::query_scalar(
            r#"
            select
                count(*)
            from
                bid
            join
                room on room.id = bid.room_id
            where
                room.listing_id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_one(&mut *tx)
        .await?;
        if bids > 0 {
            return Ok(Err(DeleteListingFailure::HasBids));
        }

        sqlx::query("delete from room where listing_id = $1")
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("delete from listing where id = $1")
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(%listing_id, "listing deleted");

        Ok(Ok(()))
    }
}
