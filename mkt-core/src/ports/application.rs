use super::{MarketRepository, Repository};

/// The application hosting the engine.
///
/// Everything the engine consumes from the outside world but does not own
/// flows through this port: the clock, identifier generation, and the
/// authentication facts produced by the session-management collaborator.
/// Request handlers thread the credential [`Application::Context`] explicitly
/// into every call; there is no ambient session state anywhere below this
/// trait.
pub trait Application: Clone + Send + Sync + 'static {
    /// Credential material extracted from a request, e.g. a bearer token.
    type Context: Send + Sync;
    /// The storage backend.
    type Repository: MarketRepository + Clone + Send + Sync + 'static;

    /// The backing repository.
    fn database(&self) -> &Self::Repository;

    /// The current instant, used as `as_of` for every operation.
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// A fresh listing identifier.
    fn generate_listing_id(&self) -> <Self::Repository as Repository>::ListingId;

    /// A fresh room identifier.
    fn generate_room_id(&self) -> <Self::Repository as Repository>::RoomId;

    /// A fresh bid identifier.
    fn generate_bid_id(&self) -> <Self::Repository as Repository>::BidId;

    /// A fresh wish identifier.
    fn generate_wish_id(&self) -> <Self::Repository as Repository>::WishId;

    /// Resolve the calling principal, or `None` for an unauthenticated
    /// request.
    fn authenticate(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<<Self::Repository as Repository>::UserId>> + Send;

    /// Whether the principal may run administrative operations, such as
    /// triggering settlement by hand.
    fn can_manage_market(&self, context: &Self::Context) -> impl Future<Output = bool> + Send;
}
