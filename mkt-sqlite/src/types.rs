//! SQLite-specific types: strongly-typed identifiers, the storage `DateTime`,
//! and row structs mapped by `sqlx` before conversion into `mkt-core`
//! records.

mod datetime;
mod ids;

pub use datetime::DateTime;
pub use ids::{BidId, ListingId, ModelId, RoomId, UserId, WishId};

use mkt_core::models::{
    Amount, BidRecord, ListingRecord, PriceRange, WishRecord, WishStatus,
};

#[derive(sqlx::FromRow)]
pub(crate) struct ListingRow {
    pub id: ListingId,
    pub seller_id: UserId,
    pub model_id: ModelId,
    pub price: Amount,
    pub buyer_id: Option<UserId>,
    pub active: bool,
    pub created_at: DateTime,
}

impl From<ListingRow> for ListingRecord<ListingId, UserId, ModelId, DateTime> {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            seller_id: row.seller_id,
            model_id: row.model_id,
            price: row.price,
            buyer_id: row.buyer_id,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RoomRow {
    pub id: RoomId,
    pub listing_id: ListingId,
    pub closes_at: DateTime,
    pub highest_bid_id: Option<BidId>,
    pub settled_at: Option<DateTime>,
}

#[derive(sqlx::FromRow)]
pub(crate) struct BidRow {
    pub id: BidId,
    pub room_id: RoomId,
    pub bidder_id: UserId,
    pub price: Amount,
    pub placed_at: DateTime,
}

impl From<BidRow> for BidRecord<BidId, RoomId, UserId, DateTime> {
    fn from(row: BidRow) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            bidder_id: row.bidder_id,
            price: row.price,
            placed_at: row.placed_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct WishRow {
    pub id: WishId,
    pub user_id: UserId,
    pub model_id: ModelId,
    pub lower_bound: Amount,
    pub upper_bound: Amount,
    pub status: String,
    pub created_at: DateTime,
}

impl From<WishRow> for WishRecord<WishId, UserId, ModelId, DateTime> {
    fn from(row: WishRow) -> Self {
        let status = match row.status.as_str() {
            "available" => WishStatus::Available,
            _ => WishStatus::Pending,
        };
        Self {
            id: row.id,
            user_id: row.user_id,
            model_id: row.model_id,
            // the table's check constraint guarantees the ordering
            range: PriceRange::new_unchecked(row.lower_bound, row.upper_bound),
            status,
            created_at: row.created_at,
        }
    }
}
