use super::Amount;
use serde::{Deserialize, Serialize};

/// One admitted bid in a room's append-only ledger.
///
/// Bids are never mutated or deleted; a superseded bid simply stops being
/// referenced as the room's highest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord<BidId, RoomId, UserId, DateTime> {
    /// Unique identifier of the bid
    pub id: BidId,
    /// The room the bid was admitted to
    pub room_id: RoomId,
    /// The buyer who placed it
    pub bidder_id: UserId,
    /// The offered price
    pub price: Amount,
    /// When admission accepted the bid
    pub placed_at: DateTime,
}

/// Why a bid was refused admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PlaceBidFailure {
    /// No such room, or its listing is gone
    RoomNotFound,
    /// The listing already has a buyer
    AlreadySold,
    /// The deadline has passed; terminal whether or not settlement ran yet
    RoomClosed,
    /// Sellers do not bid on their own listings
    SelfBid,
    /// The price does not strictly beat the floor and the current highest bid
    BidTooLow {
        /// The least price that would currently be admitted
        minimum: Amount,
    },
}

impl PlaceBidFailure {
    /// Whether retrying with a different price could possibly succeed.
    ///
    /// Terminal refusals (`RoomNotFound`, `AlreadySold`, `RoomClosed`) should
    /// be surfaced as such; only `BidTooLow` is actionable for the bidder.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::BidTooLow { .. } | Self::SelfBid)
    }
}
