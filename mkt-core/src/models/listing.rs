use super::Amount;
use serde::{Deserialize, Serialize};

/// A seller's listing, the single item its bidding room is attached to.
///
/// The listed `price` doubles as the bidding floor. `buyer_id` is set exactly
/// once, by settlement; a listing with a buyer admits no further bids and can
/// no longer be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord<ListingId, UserId, ModelId, DateTime> {
    /// Unique identifier of the listing
    pub id: ListingId,
    /// The seller who created the listing
    pub seller_id: UserId,
    /// Catalog model the listed item is an instance of
    pub model_id: ModelId,
    /// The seller's ask, and the floor every bid must strictly exceed
    pub price: Amount,
    /// The winning bidder, set only by settlement
    pub buyer_id: Option<UserId>,
    /// Whether the listing is still browsable; cleared when it sells
    pub active: bool,
    /// When the listing was created
    pub created_at: DateTime,
}

impl<ListingId, UserId, ModelId, DateTime> ListingRecord<ListingId, UserId, ModelId, DateTime> {
    /// Whether settlement has assigned a buyer.
    pub fn is_sold(&self) -> bool {
        self.buyer_id.is_some()
    }
}

/// The result of creating a listing together with its room.
///
/// `wishes_promoted` counts the standing wishes flipped pending → available
/// in the same transaction that inserted the listing; callers never observe
/// the listing without the corresponding wish transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCreated<ListingId, RoomId, UserId, ModelId, DateTime> {
    /// The newly created listing
    pub listing: ListingRecord<ListingId, UserId, ModelId, DateTime>,
    /// The bidding room opened for it
    pub room_id: RoomId,
    /// The room's immutable bidding deadline
    pub closes_at: DateTime,
    /// How many pending wishes this listing made available
    pub wishes_promoted: u64,
}

/// Why a listing could not be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteListingFailure {
    /// No such listing
    NotFound,
    /// Only the seller may delete their listing
    NotOwner,
    /// The listing already has a buyer
    AlreadySold,
    /// At least one bid was admitted to its room
    HasBids,
}
