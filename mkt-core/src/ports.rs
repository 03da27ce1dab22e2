mod application;
mod bid;
mod listing;
mod settlement;
mod wish;

pub use application::Application;
pub use bid::BidRepository;
pub use listing::ListingRepository;
pub use settlement::SettlementRepository;
pub use wish::WishRepository;

/// Associated types shared by every repository port.
///
/// Backends choose their own identifier and timestamp representations; the
/// engine only requires that timestamps are ordered (deadlines) and that
/// identifiers compare for equality (self-bid and ownership checks).
pub trait Repository {
    /// Infrastructure failure of the backing store. Expected business
    /// outcomes are never reported through this type.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Point in time, totally ordered
    type DateTime: Clone + PartialOrd + Send + Sync + 'static;
    /// An authenticated principal (buyer or seller)
    type UserId: Clone + Eq + Send + Sync + 'static;
    /// A catalog model, owned by the catalog collaborator
    type ModelId: Clone + Eq + Send + Sync + 'static;
    /// A listing
    type ListingId: Clone + Eq + Send + Sync + 'static;
    /// A bidding room
    type RoomId: Clone + Eq + Send + Sync + 'static;
    /// An admitted bid
    type BidId: Clone + Eq + Send + Sync + 'static;
    /// A standing wish
    type WishId: Clone + Eq + Send + Sync + 'static;
}

/// The marker trait implied by a complete backend.
pub trait MarketRepository:
    ListingRepository + BidRepository + SettlementRepository + WishRepository
{
}

impl<T> MarketRepository for T where
    T: ListingRepository + BidRepository + SettlementRepository + WishRepository
{
}
