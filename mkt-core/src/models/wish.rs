use super::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standing-wish lifecycle, as far as the engine is concerned.
///
/// A wish starts `Pending` and becomes `Available` the moment a matching
/// unsold listing exists. Fulfillment and expiry of available wishes belong
/// to the order-management collaborator and are not modeled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishStatus {
    /// Waiting for a matching listing
    Pending,
    /// A matching listing exists (or existed when the wish was created)
    Available,
}

impl WishStatus {
    /// Stable storage/wire spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Available => "available",
        }
    }
}

/// Rejected price range: the lower bound exceeds the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lower bound {lower} exceeds upper bound {upper}")]
pub struct InvalidPriceRange {
    /// The offending lower bound
    pub lower: Amount,
    /// The offending upper bound
    pub upper: Amount,
}

/// The closed price interval a wished-for listing must fall into.
///
/// Construction enforces `lower ≤ upper`; both ends are inclusive when
/// matching against a listing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceRangeDto", into = "PriceRangeDto")]
pub struct PriceRange {
    lower: Amount,
    upper: Amount,
}

impl PriceRange {
    /// Build a range, rejecting `lower > upper`.
    pub fn new(lower: Amount, upper: Amount) -> Result<Self, InvalidPriceRange> {
        if lower > upper {
            Err(InvalidPriceRange { lower, upper })
        } else {
            Ok(Self { lower, upper })
        }
    }

    /// Build a range without checking the bounds.
    ///
    /// The caller asserts `lower ≤ upper`, e.g. when rehydrating rows from a
    /// store whose check constraint already enforces it.
    pub fn new_unchecked(lower: Amount, upper: Amount) -> Self {
        Self { lower, upper }
    }

    /// The inclusive lower bound.
    pub fn lower(&self) -> Amount {
        self.lower
    }

    /// The inclusive upper bound.
    pub fn upper(&self) -> Amount {
        self.upper
    }

    /// Whether a listing at `price` satisfies the wish.
    pub fn contains(&self, price: Amount) -> bool {
        self.lower <= price && price <= self.upper
    }
}

// Serde detour so deserialization runs the bounds check.

#[derive(Serialize, Deserialize)]
struct PriceRangeDto {
    lower: Amount,
    upper: Amount,
}

impl TryFrom<PriceRangeDto> for PriceRange {
    type Error = InvalidPriceRange;

    fn try_from(value: PriceRangeDto) -> Result<Self, Self::Error> {
        Self::new(value.lower, value.upper)
    }
}

impl From<PriceRange> for PriceRangeDto {
    fn from(value: PriceRange) -> Self {
        Self {
            lower: value.lower,
            upper: value.upper,
        }
    }
}

/// A buyer's standing wish for a catalog model within a price range.
///
/// At most one wish exists per `(user_id, model_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishRecord<WishId, UserId, ModelId, DateTime> {
    /// Unique identifier of the wish
    pub id: WishId,
    /// The buyer who registered the wish
    pub user_id: UserId,
    /// The catalog model wished for
    pub model_id: ModelId,
    /// Acceptable price interval, both ends inclusive
    pub range: PriceRange,
    /// Current lifecycle status
    pub status: WishStatus,
    /// When the wish was registered
    pub created_at: DateTime,
}

/// Why a wish could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CreateWishFailure {
    /// The price range is inverted
    InvalidRange {
        /// The offending lower bound
        lower: Amount,
        /// The offending upper bound
        upper: Amount,
    },
    /// A wish for this `(user, model)` pair already exists
    Duplicate,
}

impl From<InvalidPriceRange> for CreateWishFailure {
    fn from(value: InvalidPriceRange) -> Self {
        Self::InvalidRange {
            lower: value.lower,
            upper: value.upper,
        }
    }
}
