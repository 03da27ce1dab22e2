use super::BidRecord;
use serde::{Deserialize, Serialize};

/// The lifecycle phase of a room, derived from its deadline and settlement
/// state.
///
/// `Open` → `Closed` is driven purely by the clock; `Settled` is reached once
/// the settlement service has run. Neither transition ever reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomPhase {
    /// Before the deadline, accepting bids
    Open,
    /// Past the deadline, awaiting settlement
    Closed,
    /// Settlement has run (with or without a buyer)
    Settled,
}

/// A bidding room, bound 1:1 to a listing.
///
/// `highest_bid` is the currently winning bid. It always strictly exceeds the
/// listing's floor and every other bid in the room; admission maintains that
/// invariant, settlement consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord<RoomId, ListingId, BidId, UserId, DateTime> {
    /// Unique identifier of the room
    pub id: RoomId,
    /// The listing this room auctions
    pub listing_id: ListingId,
    /// The immutable bidding deadline
    pub closes_at: DateTime,
    /// When settlement ran, if it has (also set for settled-unsold rooms)
    pub settled_at: Option<DateTime>,
    /// The currently winning bid, if any
    pub highest_bid: Option<BidRecord<BidId, RoomId, UserId, DateTime>>,
}

impl<RoomId, ListingId, BidId, UserId, DateTime: PartialOrd>
    RoomRecord<RoomId, ListingId, BidId, UserId, DateTime>
{
    /// The room's phase as of `now`.
    ///
    /// A buyer can only appear through settlement, which also stamps
    /// `settled_at`, so "listing already sold" is subsumed by `Settled` here.
    pub fn phase(&self, now: &DateTime) -> RoomPhase {
        if self.settled_at.is_some() {
            RoomPhase::Settled
        } else if *now >= self.closes_at {
            RoomPhase::Closed
        } else {
            RoomPhase::Open
        }
    }

    /// Whether admission would still consider bids as of `now`.
    pub fn is_open(&self, now: &DateTime) -> bool {
        matches!(self.phase(now), RoomPhase::Open)
    }
}

/// The disposition of a settlement attempt.
///
/// Settlement is idempotent: the first due invocation produces `Settled` or
/// `Unsold`, every later one `AlreadySettled`, and the listing's buyer never
/// changes after the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettleOutcome<UserId> {
    /// The room had a highest bid; its bidder now owns the listing
    Settled {
        /// The winning bidder
        buyer_id: UserId,
    },
    /// The deadline passed with no admitted bid
    Unsold,
    /// The deadline has not passed yet; nothing was changed
    NotYetDue,
    /// A previous settlement already ran; nothing was changed
    AlreadySettled,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(closes_at: i64, settled_at: Option<i64>) -> RoomRecord<u8, u8, u8, u8, i64> {
        RoomRecord {
            id: 0,
            listing_id: 0,
            closes_at,
            settled_at,
            highest_bid: None,
        }
    }

    #[test]
    fn phase_is_open_strictly_before_the_deadline() {
        let room = room(100, None);
        assert_eq!(room.phase(&99), RoomPhase::Open);
        assert!(room.is_open(&99));
    }

    #[test]
    fn phase_closes_exactly_at_the_deadline() {
        let room = room(100, None);
        assert_eq!(room.phase(&100), RoomPhase::Closed);
        assert_eq!(room.phase(&101), RoomPhase::Closed);
        assert!(!room.is_open(&100));
    }

    #[test]
    fn settlement_wins_over_the_clock() {
        let room = room(100, Some(100));
        assert_eq!(room.phase(&50), RoomPhase::Settled);
        assert_eq!(room.phase(&150), RoomPhase::Settled);
    }
}
