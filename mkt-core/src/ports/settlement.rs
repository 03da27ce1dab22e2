use crate::models::SettleOutcome;

/// Repository interface for finalizing rooms past their deadline.
///
/// Settlement is decoupled from admission: a periodic sweep (or an explicit
/// administrative call) drives it, and invoking it redundantly is harmless.
/// The first due call assigns the buyer or marks the room settled-unsold;
/// every later call reports [`SettleOutcome::AlreadySettled`] without
/// touching state.
pub trait SettlementRepository: super::Repository {
    /// Finalize a room at or after its deadline.
    ///
    /// Returns `None` for an unknown room. The winning bidder, if any, is
    /// written as the listing's buyer inside the same transaction that marks
    /// the room settled; a `place_bid` racing the deadline either commits
    /// before this transaction and is honored, or is refused. The highest-bid
    /// pointer is never corrupted either way.
    fn settle(
        &self,
        room_id: Self::RoomId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<SettleOutcome<Self::UserId>>, Self::Error>> + Send;

    /// Rooms past their deadline with no settlement yet, oldest deadline
    /// first. Feed for the periodic sweep.
    fn due_rooms(
        &self,
        as_of: Self::DateTime,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Self::RoomId>, Self::Error>> + Send;
}
