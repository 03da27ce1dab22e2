//! Application implementation with JWT-based identity.
//!
//! The engine consumes the calling user's identity as a fact; here that fact
//! comes from the standard `sub:` claim of an HS256-signed bearer token, and
//! administrative rights from an `admin: true` custom claim.

use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::JWTClaims,
    prelude::{HS256Key, MACLike},
};
use mkt_core::ports::Application;
use mkt_sqlite::{
    Db,
    types::{BidId, DateTime, ListingId, RoomId, UserId, WishId},
};
use serde::{Deserialize, Serialize};

/// Main application implementation combining all system components.
#[derive(Clone)]
pub struct MarketApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// HMAC key for JWT token verification
    pub key: HS256Key,
}

impl MarketApp {
    /// Extract and verify JWT claims from the authorization header.
    fn claims(&self, context: &Authorization<Bearer>) -> Option<JWTClaims<MarketClaims>> {
        let token = context.0.token();
        self.key.verify_token::<MarketClaims>(token, None).ok()
    }
}

impl Application for MarketApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_listing_id(&self) -> ListingId {
        ListingId::random()
    }

    fn generate_room_id(&self) -> RoomId {
        RoomId::random()
    }

    fn generate_bid_id(&self) -> BidId {
        BidId::random()
    }

    fn generate_wish_id(&self) -> WishId {
        WishId::random()
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<UserId> {
        // the standard sub: claim is the user id
        self.claims(context)?.subject?.parse().ok()
    }

    async fn can_manage_market(&self, context: &Self::Context) -> bool {
        // manual settlement requires an `admin: true` custom claim
        self.claims(context)
            .map(|claims| claims.custom.admin)
            .unwrap_or(false)
    }
}

/// Custom claims structure for JWT tokens.
#[derive(Serialize, Deserialize)]
pub struct MarketClaims {
    /// Indicates whether the token holder has admin privileges.
    #[serde(default)]
    pub admin: bool,
}
