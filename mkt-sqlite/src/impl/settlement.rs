use crate::types::{BidId, DateTime, ListingId, RoomId, UserId};
use crate::{Db, Error};
use mkt_core::models::SettleOutcome;
use mkt_core::ports::SettlementRepository;

#[derive(sqlx::FromRow)]
struct SettleRow {
    listing_id: ListingId,
    closes_at: DateTime,
    settled_at: Option<DateTime>,
    highest_bid_id: Option<BidId>,
    buyer_id: Option<UserId>,
}

impl SettlementRepository for Db {
    async fn settle(
        &self,
        room_id: RoomId,
        as_of: DateTime,
    ) -> Result<Option<SettleOutcome<UserId>>, Error> {
        let mut tx = self.writer.begin().await?;

        let Some(room) = sqlx::query_as::<_, SettleRow>(
            r#"
            select
                room.listing_id as listing_id,
                room.closes_at as closes_at,
                room.settled_at as settled_at,
                room.highest_bid_id as highest_bid_id,
                listing.buyer_id as buyer_id
            from
                room
            join
                listing on listing.id = room.listing_id
            where
                room.id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        // idempotent: a second invocation changes nothing
        if room.buyer_id.is_some() || room.settled_at.is_some() {
            return Ok(Some(SettleOutcome::AlreadySettled));
        }
        if as_of < room.closes_at {
            return Ok(Some(SettleOutcome::NotYetDue));
        }

        let outcome = match room.highest_bid_id {
            Some(bid_id) => {
                let buyer_id =
                    sqlx::query_scalar::<_, UserId>("select bidder_id from bid where id = $1")
                        .bind(bid_id)
                        .fetch_one(&mut *tx)
                        .await?;

                sqlx::query("update listing set buyer_id = $1, active = 0 where id = $2")
                    .bind(buyer_id)
                    .bind(room.listing_id)
                    .execute(&mut *tx)
                    .await?;

                SettleOutcome::Settled { buyer_id }
            }
            None => SettleOutcome::Unsold,
        };

        sqlx::query("update room set settled_at = $1 where id = $2")
            .bind(as_of)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        match &outcome {
            SettleOutcome::Settled { buyer_id } => {
                tracing::info!(%room_id, %buyer_id, "room settled")
            }
            _ => tracing::info!(%room_id, "room settled unsold"),
        }

        Ok(Some(outcome))
    }

    async fn due_rooms(&self, as_of: DateTime, limit: usize) -> Result<Vec<RoomId>, Error> {
        let rooms = sqlx::query_scalar::<_, RoomId>(
            r#"
            select
                id
            from
                room
            where
                settled_at is null
            and
                closes_at <= $1
            order by
                closes_at asc
            limit $2
            "#,
        )
        .bind(as_of)
        .bind(limit as i64)
        .fetch_all(&self.reader)
        .await?;

        Ok(rooms)
    }
}
