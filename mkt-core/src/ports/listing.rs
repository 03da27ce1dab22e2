use crate::models::{Amount, DeleteListingFailure, ListingCreated, ListingRecord};

/// Repository interface for listings and their 1:1 bidding rooms.
///
/// A listing and its room are created together and deleted together; no code
/// path produces one without the other.
pub trait ListingRepository: super::Repository {
    /// Create a listing and open its bidding room in one atomic unit.
    ///
    /// Standing wishes for `model_id` whose range covers `price` are promoted
    /// pending → available inside the same transaction, so an observer never
    /// sees the new listing without the corresponding wish transitions (nor
    /// the transitions without the listing). Safe to retry: promotion only
    /// touches rows still pending.
    fn create_listing(
        &self,
        listing_id: Self::ListingId,
        room_id: Self::RoomId,
        seller_id: Self::UserId,
        model_id: Self::ModelId,
        price: Amount,
        closes_at: Self::DateTime,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            ListingCreated<Self::ListingId, Self::RoomId, Self::UserId, Self::ModelId, Self::DateTime>,
            Self::Error,
        >,
    > + Send;

    /// Fetch a listing, or `None` if it does not exist.
    fn get_listing(
        &self,
        listing_id: Self::ListingId,
    ) -> impl Future<
        Output = Result<
            Option<ListingRecord<Self::ListingId, Self::UserId, Self::ModelId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;

    /// Remove an unsold listing with an empty ledger, along with its room.
    ///
    /// Refused once any bid exists, once a buyer is assigned, or for anyone
    /// but the seller.
    fn delete_listing(
        &self,
        listing_id: Self::ListingId,
        acting_user_id: Self::UserId,
    ) -> impl Future<Output = Result<Result<(), DeleteListingFailure>, Self::Error>> + Send;
}
