use crate::models::{
    Amount, BidRecord, DateTimeRangeQuery, DateTimeRangeResponse, PlaceBidFailure, RoomRecord,
};

/// Repository interface for bid admission and the per-room ledger.
pub trait BidRepository: super::Repository {
    /// Validate and admit a bid into a room.
    ///
    /// Checks run in a fixed order: the room and its listing must exist, the
    /// listing must be unsold, the deadline must not have passed (bids
    /// arriving exactly at `closes_at` are refused even before settlement
    /// runs), the bidder must not be the seller, and the price must strictly
    /// exceed both the floor and the current highest bid.
    ///
    /// The read of the current highest bid and the write installing the new
    /// one execute as one serializable unit: two concurrently validated bids
    /// can never both become highest. A conflicting interleaving is retried
    /// internally a bounded number of times, re-validating from scratch each
    /// time (the price may no longer beat the new highest) before the
    /// infrastructure error surfaces.
    fn place_bid(
        &self,
        room_id: Self::RoomId,
        bid_id: Self::BidId,
        bidder_id: Self::UserId,
        price: Amount,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            Result<BidRecord<Self::BidId, Self::RoomId, Self::UserId, Self::DateTime>, PlaceBidFailure>,
            Self::Error,
        >,
    > + Send;

    /// Fetch a room with its current highest bid, or `None` if it does not
    /// exist.
    fn get_room(
        &self,
        room_id: Self::RoomId,
    ) -> impl Future<
        Output = Result<
            Option<
                RoomRecord<Self::RoomId, Self::ListingId, Self::BidId, Self::UserId, Self::DateTime>,
            >,
            Self::Error,
        >,
    > + Send;

    /// Page through a room's admitted-bid ledger, newest first.
    fn get_bids(
        &self,
        room_id: Self::RoomId,
        query: DateTimeRangeQuery<Self::DateTime>,
        limit: usize,
    ) -> impl Future<
        Output = Result<
            DateTimeRangeResponse<
                BidRecord<Self::BidId, Self::RoomId, Self::UserId, Self::DateTime>,
                Self::DateTime,
            >,
            Self::Error,
        >,
    > + Send;
}
