mod common;

use common::{at, open_db, seed_listing};
use mkt_core::models::SettleOutcome;
use mkt_core::ports::{BidRepository as _, ListingRepository as _, SettlementRepository as _};
use mkt_sqlite::types::{BidId, ModelId, RoomId, UserId};

#[tokio::test]
async fn settlement_before_the_deadline_is_refused() -> anyhow::Result<()> {
    let db = open_db().await;
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(3600),
        at(0),
    )
    .await;

    let outcome = db.settle(room_id, at(60)).await?;
    assert_eq!(outcome, Some(SettleOutcome::NotYetDue));

    Ok(())
}

#[tokio::test]
async fn settlement_assigns_the_highest_bidder_exactly_once() -> anyhow::Result<()> {
    let db = open_db().await;
    let (listing_id, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(60),
        at(0),
    )
    .await;

    let buyer_a = UserId::random();
    let buyer_b = UserId::random();
    db.place_bid(room_id, BidId::random(), buyer_a, 1100, at(1))
        .await?
        .expect("bid admitted");
    db.place_bid(room_id, BidId::random(), buyer_b, 1200, at(2))
        .await?
        .expect("bid admitted");

    let outcome = db.settle(room_id, at(120)).await?;
    assert_eq!(outcome, Some(SettleOutcome::Settled { buyer_id: buyer_b }));

    let listing = db.get_listing(listing_id).await?.expect("listing exists");
    assert_eq!(listing.buyer_id, Some(buyer_b));
    assert!(!listing.active);

    // idempotent: the second call is a no-op and the buyer never changes
    let again = db.settle(room_id, at(180)).await?;
    assert_eq!(again, Some(SettleOutcome::AlreadySettled));
    let listing = db.get_listing(listing_id).await?.expect("listing exists");
    assert_eq!(listing.buyer_id, Some(buyer_b));

    Ok(())
}

#[tokio::test]
async fn settlement_without_bids_marks_the_room_unsold() -> anyhow::Result<()> {
    let db = open_db().await;
    let (listing_id, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(60),
        at(0),
    )
    .await;

    let outcome = db.settle(room_id, at(120)).await?;
    assert_eq!(outcome, Some(SettleOutcome::Unsold));

    let listing = db.get_listing(listing_id).await?.expect("listing exists");
    assert_eq!(listing.buyer_id, None);

    let again = db.settle(room_id, at(180)).await?;
    assert_eq!(again, Some(SettleOutcome::AlreadySettled));

    Ok(())
}

#[tokio::test]
async fn settling_an_unknown_room_reports_nothing() -> anyhow::Result<()> {
    let db = open_db().await;

    let outcome = db.settle(RoomId::random(), at(0)).await?;
    assert_eq!(outcome, None);

    Ok(())
}

#[tokio::test]
async fn the_sweep_only_sees_expired_unsettled_rooms() -> anyhow::Result<()> {
    let db = open_db().await;
    let seller = UserId::random();

    let (_, expired) = seed_listing(&db, seller, ModelId::random(), 100, at(60), at(0)).await;
    let (_, still_open) = seed_listing(&db, seller, ModelId::random(), 100, at(3600), at(0)).await;
    let (_, already_done) = seed_listing(&db, seller, ModelId::random(), 100, at(30), at(0)).await;
    db.settle(already_done, at(15)).await?; // not yet due, no effect
    db.settle(already_done, at(90)).await?; // settles unsold

    let due = db.due_rooms(at(120), 10).await?;
    assert_eq!(due, vec![expired]);
    assert!(!due.contains(&still_open));

    // draining the sweep leaves nothing due
    for room_id in due {
        db.settle(room_id, at(120)).await?;
    }
    assert!(db.due_rooms(at(120), 10).await?.is_empty());

    Ok(())
}
