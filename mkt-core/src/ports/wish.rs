use crate::models::{CreateWishFailure, PriceRange, WishRecord};

/// Repository interface for standing wishes.
///
/// Wish promotion at listing-creation time lives on
/// [`super::ListingRepository::create_listing`]; this trait covers the
/// wish-side lifecycle. Matching is a best-effort read at a point in time: a
/// listing and a wish created concurrently for the same model may miss each
/// other, since each path only scans the other side's committed rows.
pub trait WishRepository: super::Repository {
    /// Register a standing wish for a model within a price range.
    ///
    /// Existing unsold listings of that model are scanned first: the wish is
    /// inserted `available` if one falls inside the range, `pending`
    /// otherwise. At most one wish may exist per `(user, model)` pair;
    /// violations report [`CreateWishFailure::Duplicate`].
    fn create_wish(
        &self,
        wish_id: Self::WishId,
        user_id: Self::UserId,
        model_id: Self::ModelId,
        range: PriceRange,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            Result<
                WishRecord<Self::WishId, Self::UserId, Self::ModelId, Self::DateTime>,
                CreateWishFailure,
            >,
            Self::Error,
        >,
    > + Send;

    /// Fetch a wish, or `None` if it does not exist.
    fn get_wish(
        &self,
        wish_id: Self::WishId,
    ) -> impl Future<
        Output = Result<
            Option<WishRecord<Self::WishId, Self::UserId, Self::ModelId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;

    /// The owner of a wish, without fetching the record.
    ///
    /// Wishes are readable and deletable only by their owner; callers gate on
    /// this before touching the record itself.
    fn get_wish_owner(
        &self,
        wish_id: Self::WishId,
    ) -> impl Future<Output = Result<Option<Self::UserId>, Self::Error>> + Send;

    /// All wishes registered by a user, newest first.
    fn query_wishes(
        &self,
        user_id: Self::UserId,
    ) -> impl Future<
        Output = Result<
            Vec<WishRecord<Self::WishId, Self::UserId, Self::ModelId, Self::DateTime>>,
            Self::Error,
        >,
    > + Send;

    /// Remove a wish. Returns `false` if no such wish existed.
    fn delete_wish(
        &self,
        wish_id: Self::WishId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
