//! Strongly-typed identifiers for the marketplace entities.
//!
//! Each identifier is a newtype over a UUID, so listings, rooms, bids,
//! wishes, users, and catalog models cannot be confused at compile time.
//! Identifiers serialize as transparent UUIDs and are stored in SQLite as
//! their string form.

macro_rules! new_id {
    ($struct:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $struct(pub uuid::Uuid);

        impl $struct {
            /// A freshly generated random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl From<uuid::Uuid> for $struct {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for uuid::Uuid {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $struct {
            type Err = <uuid::Uuid as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl sqlx::Type<sqlx::Sqlite> for $struct {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <String as sqlx::Type<sqlx::Sqlite>>::type_info()
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $struct {
            fn encode_by_ref(
                &self,
                args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.to_string(), args)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $struct {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let string = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
                Ok(string.parse()?)
            }
        }
    };
}

new_id!(UserId, "Unique identifier for a marketplace user (buyer or seller)");
new_id!(
    ModelId,
    "Unique identifier for a catalog model, owned by the catalog collaborator"
);
new_id!(ListingId, "Unique identifier for a listing");
new_id!(RoomId, "Unique identifier for a bidding room");
new_id!(BidId, "Unique identifier for an admitted bid");
new_id!(WishId, "Unique identifier for a standing wish");
