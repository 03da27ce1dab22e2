//! A test application whose bearer tokens are plain-text identities: a user
//! token is the user's UUID, and the fixed token `admin` grants market
//! management without an identity of its own.

use headers::{Authorization, authorization::Bearer};
use mkt_core::ports::Application;
use mkt_sqlite::{
    Db,
    types::{BidId, DateTime, ListingId, RoomId, UserId, WishId},
};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Db {
        &self.0
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
        context.0.token().parse().ok()
    }

    async fn can_manage_market(&self, context: &Self::Context) -> bool {
        context.0.token() == "admin"
    }
}
