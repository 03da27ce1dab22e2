use crate::types::{BidId, BidRow, DateTime, RoomId, RoomRow, UserId};
use crate::{Db, Error};
use mkt_core::models::{
    Amount, BidRecord, DateTimeRangeQuery, DateTimeRangeResponse, PlaceBidFailure, RoomRecord,
};
use mkt_core::ports::BidRepository;

/// Bounded retry for the check-and-swap; with a single-connection writer the
/// swap cannot actually lose, so this only matters if the backend ever gains
/// a second writer.
const MAX_ATTEMPTS: u32 = 8;

/// Everything admission needs to know about a room and its listing, read in
/// one statement inside the admission transaction.
#[derive(sqlx::FromRow)]
struct AdmissionRow {
    closes_at: DateTime,
    settled_at: Option<DateTime>,
    highest_bid_id: Option<BidId>,
    seller_id: UserId,
    buyer_id: Option<UserId>,
    floor: Amount,
}

impl BidRepository for Db {
    async fn place_bid(
        &self,
        room_id: RoomId,
        bid_id: BidId,
        bidder_id: UserId,
        price: Amount,
        as_of: DateTime,
    ) -> Result<Result<BidRecord<BidId, RoomId, UserId, DateTime>, PlaceBidFailure>, Error> {
        for attempt in 0..MAX_ATTEMPTS {
            let mut tx = self.writer.begin().await?;

            let Some(room) = sqlx::query_as::<_, AdmissionRow>(
                r#"
                select
                    room.closes_at as closes_at,
                    room.settled_at as settled_at,
                    room.highest_bid_id as highest_bid_id,
                    listing.seller_id as seller_id,
                    listing.buyer_id as buyer_id,
                    listing.price as floor
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
                return Ok(Err(PlaceBidFailure::RoomNotFound));
            };

            if room.buyer_id.is_some() {
                return Ok(Err(PlaceBidFailure::AlreadySold));
            }
            // a bid arriving exactly at the deadline is already too late,
            // whether or not settlement has run
            if room.settled_at.is_some() || as_of >= room.closes_at {
                return Ok(Err(PlaceBidFailure::RoomClosed));
            }
            if room.seller_id == bidder_id {
                return Ok(Err(PlaceBidFailure::SelfBid));
            }

            let current = match room.highest_bid_id {
                Some(highest) => Some(
                    sqlx::query_scalar::<_, Amount>("select price from bid where id = $1")
                        .bind(highest)
                        .fetch_one(&mut *tx)
                        .await?,
                ),
                None => None,
            };
            let to_beat = current.unwrap_or(room.floor);
            if price <= to_beat {
                return Ok(Err(PlaceBidFailure::BidTooLow {
                    minimum: to_beat + 1,
                }));
            }

            sqlx::query(
                r#"
                insert into
                    bid (id, room_id, bidder_id, price, placed_at)
                values
                    ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(bid_id)
            .bind(room_id)
            .bind(bidder_id)
            .bind(price)
            .bind(as_of)
            .execute(&mut *tx)
            .await?;

            // Check-and-swap: install the new highest bid only if the pointer
            // still references the one this transaction validated against.
            let swapped = match room.highest_bid_id {
                Some(previous) => sqlx::query(
                    "update room set highest_bid_id = $1 where id = $2 and highest_bid_id = $3",
                )
                .bind(bid_id)
                .bind(room_id)
                .bind(previous),
                None => sqlx::query(
                    "update room set highest_bid_id = $1 where id = $2 and highest_bid_id is null",
                )
                .bind(bid_id)
                .bind(room_id),
            }
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if swapped == 1 {
                tx.commit().await?;
                tracing::debug!(%room_id, %bid_id, price, "bid admitted");
                return Ok(Ok(BidRecord {
                    id: bid_id,
                    room_id,
                    bidder_id,
                    price,
                    placed_at: as_of,
                }));
            }

            // Lost the swap. Dropping the transaction rolls the bid row back;
            // re-validate from scratch, since the price may no longer beat
            // the new highest bid.
            drop(tx);
            tracing::warn!(%room_id, attempt, "bid admission lost its check-and-swap; retrying");
        }

        Err(Error::Contention)
    }

    async fn get_room(
        &self,
        room_id: RoomId,
    ) -> Result<Option<RoomRecord<RoomId, crate::types::ListingId, BidId, UserId, DateTime>>, Error>
    {
        let Some(room) = sqlx::query_as::<_, RoomRow>(
            r#"
            select
                id, listing_id, closes_at, highest_bid_id, settled_at
            from
                room
            where
                id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.reader)
        .await?
        else {
            return Ok(None);
        };

        let highest_bid = match room.highest_bid_id {
            Some(bid_id) => sqlx::query_as::<_, BidRow>(
                "select id, room_id, bidder_id, price, placed_at from bid where id = $1",
            )
            .bind(bid_id)
            .fetch_optional(&self.reader)
            .await?
            .map(Into::into),
            None => None,
        };

        Ok(Some(RoomRecord {
            id: room.id,
            listing_id: room.listing_id,
            closes_at: room.closes_at,
            settled_at: room.settled_at,
            highest_bid,
        }))
    }

    async fn get_bids(
        &self,
        room_id: RoomId,
        query: DateTimeRangeQuery<DateTime>,
        limit: usize,
    ) -> Result<DateTimeRangeResponse<BidRecord<BidId, RoomId, UserId, DateTime>, DateTime>, Error>
    {
        let mut rows = sqlx::query_as::<_, BidRow>(
            r#"
            select
                id, room_id, bidder_id, price, placed_at
            from
                bid
            where
                room_id = $1
            and
                ($2 is null or placed_at <= $2)
            and
                ($3 is null or placed_at >= $3)
            order by
                seq desc
            limit $4
            "#,
        )
        .bind(room_id)
        .bind(query.before)
        .bind(query.after)
        .bind((limit + 1) as i64)
        .fetch_all(&self.reader)
        .await?;

        // limit + 1 probe: an extra row means there is an older page
        let more = if rows.len() == limit + 1 {
            let extra = rows.pop().expect("probe row");
            Some(DateTimeRangeQuery {
                before: Some(extra.placed_at),
                after: query.after,
            })
        } else {
            None
        };

        Ok(DateTimeRangeResponse {
            results: rows.into_iter().map(Into::into).collect(),
            more,
        })
    }
}
