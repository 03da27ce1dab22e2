use crate::Db;
use crate::types::{BidId, DateTime, ListingId, ModelId, RoomId, UserId, WishId};
use mkt_core::ports::Repository;

mod bid;
mod listing;
mod settlement;
mod wish;

impl Repository for Db {
    type Error = crate::Error;
    type DateTime = DateTime;
    type UserId = UserId;
    type ModelId = ModelId;
    type ListingId = ListingId;
    type RoomId = RoomId;
    type BidId = BidId;
    type WishId = WishId;
}
