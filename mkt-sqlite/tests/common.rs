use mkt_core::models::Amount;
use mkt_core::ports::ListingRepository as _;
use mkt_sqlite::types::{DateTime, ListingId, ModelId, RoomId, UserId};
use mkt_sqlite::{Db, config::SqliteConfig};

/// A fresh in-memory database with migrations applied.
pub async fn open_db() -> Db {
    Db::open(&SqliteConfig::default())
        .await
        .expect("open in-memory database")
}

/// A timestamp `offset_secs` away from the test's wall clock.
///
/// Every repository operation takes its `as_of` explicitly, so the tests
/// steer the clock by handing out whatever instants they need.
pub fn at(offset_secs: i64) -> DateTime {
    (time::OffsetDateTime::now_utc() + time::Duration::seconds(offset_secs)).into()
}

/// Create a listing and its room, panicking on infrastructure failure.
pub async fn seed_listing(
    db: &Db,
    seller_id: UserId,
    model_id: ModelId,
    price: Amount,
    closes_at: DateTime,
    as_of: DateTime,
) -> (ListingId, RoomId) {
    let listing_id = ListingId::random();
    let room_id = RoomId::random();
    db.create_listing(
        listing_id, room_id, seller_id, model_id, price, closes_at, as_of,
    )
    .await
    .expect("create listing");
    (listing_id, room_id)
}
