mod bid;
mod datetime;
mod listing;
mod room;
mod wish;

pub use bid::{BidRecord, PlaceBidFailure};
pub use datetime::{DateTimeRangeQuery, DateTimeRangeResponse};
pub use listing::{DeleteListingFailure, ListingCreated, ListingRecord};
pub use room::{RoomPhase, RoomRecord, SettleOutcome};
pub use wish::{CreateWishFailure, InvalidPriceRange, PriceRange, WishRecord, WishStatus};

/// A price in integer minor units of the platform currency.
///
/// All bid and floor comparisons are strict (`>`); there is no fractional
/// money anywhere in the engine.
pub type Amount = i64;
