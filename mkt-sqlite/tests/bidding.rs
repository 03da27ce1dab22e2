mod common;

use common::{at, open_db, seed_listing};
use mkt_core::models::{Amount, DateTimeRangeQuery, PlaceBidFailure};
use mkt_core::ports::{BidRepository as _, SettlementRepository as _};
use mkt_sqlite::types::{BidId, ModelId, RoomId, UserId};
use rstest::rstest;

#[rstest]
#[case::below_floor(999)]
#[case::equal_to_floor(1000)]
#[tokio::test]
async fn floor_enforcement_is_strict(#[case] price: Amount) -> anyhow::Result<()> {
    let db = open_db().await;
    let now = at(0);
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(3600),
        now,
    )
    .await;

    let refused = db
        .place_bid(room_id, BidId::random(), UserId::random(), price, now)
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::BidTooLow { minimum: 1001 }));

    Ok(())
}

#[tokio::test]
async fn highest_bid_sequence_is_strictly_increasing() -> anyhow::Result<()> {
    let db = open_db().await;
    let now = at(0);
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(3600),
        now,
    )
    .await;

    let buyer_a = UserId::random();
    let buyer_b = UserId::random();

    // A opens at 1100
    let first = db
        .place_bid(room_id, BidId::random(), buyer_a, 1100, at(1))
        .await?
        .expect("first bid admitted");
    assert_eq!(first.price, 1100);

    // B undercuts the current highest and is told what to beat
    let refused = db
        .place_bid(room_id, BidId::random(), buyer_b, 1050, at(2))
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::BidTooLow { minimum: 1101 }));

    // B tops A; A's bid is superseded but stays in the ledger
    let second = db
        .place_bid(room_id, BidId::random(), buyer_b, 1200, at(3))
        .await?
        .expect("second bid admitted");

    let room = db.get_room(room_id).await?.expect("room exists");
    let highest = room.highest_bid.expect("has a highest bid");
    assert_eq!(highest.id, second.id);
    assert_eq!(highest.price, 1200);
    assert_eq!(highest.bidder_id, buyer_b);

    let ledger = db
        .get_bids(room_id, DateTimeRangeQuery::default(), 10)
        .await?;
    let mut prices: Vec<_> = ledger.results.iter().map(|bid| bid.price).collect();
    prices.reverse(); // newest-first → admission order
    assert_eq!(prices, vec![1100, 1200]);

    Ok(())
}

#[tokio::test]
async fn sellers_cannot_bid_on_their_own_listing() -> anyhow::Result<()> {
    let db = open_db().await;
    let now = at(0);
    let seller = UserId::random();
    let (_, room_id) = seed_listing(&db, seller, ModelId::random(), 1000, at(3600), now).await;

    let refused = db
        .place_bid(room_id, BidId::random(), seller, 5000, now)
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::SelfBid));

    Ok(())
}

#[tokio::test]
async fn bids_at_or_after_the_deadline_are_refused() -> anyhow::Result<()> {
    let db = open_db().await;
    let closes_at = at(60);
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        closes_at,
        at(0),
    )
    .await;

    // exactly at the deadline, before any settlement ran
    let refused = db
        .place_bid(room_id, BidId::random(), UserId::random(), 2000, closes_at)
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::RoomClosed));

    let refused = db
        .place_bid(room_id, BidId::random(), UserId::random(), 2000, at(120))
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::RoomClosed));

    Ok(())
}

#[tokio::test]
async fn bids_after_the_sale_are_refused_as_sold() -> anyhow::Result<()> {
    let db = open_db().await;
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(60),
        at(0),
    )
    .await;

    db.place_bid(room_id, BidId::random(), UserId::random(), 1100, at(1))
        .await?
        .expect("bid admitted");
    db.settle(room_id, at(120)).await?.expect("room settled");

    let refused = db
        .place_bid(room_id, BidId::random(), UserId::random(), 9000, at(130))
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::AlreadySold));

    Ok(())
}

#[tokio::test]
async fn unknown_rooms_are_reported_as_missing() -> anyhow::Result<()> {
    let db = open_db().await;

    let refused = db
        .place_bid(
            RoomId::random(),
            BidId::random(),
            UserId::random(),
            1000,
            at(0),
        )
        .await?;
    assert_eq!(refused, Err(PlaceBidFailure::RoomNotFound));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bids_elect_a_single_winner() -> anyhow::Result<()> {
    let db = open_db().await;
    let now = at(0);
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        1000,
        at(3600),
        now,
    )
    .await;

    let mut tasks = tokio::task::JoinSet::new();
    for price in 1001..=1008 {
        let db = db.clone();
        tasks.spawn(async move {
            db.place_bid(room_id, BidId::random(), UserId::random(), price, at(1))
                .await
        });
    }

    let mut admitted = 0;
    while let Some(result) = tasks.join_next().await {
        if result.expect("task completes")?.is_ok() {
            admitted += 1;
        }
    }
    assert!(admitted >= 1);

    // exactly one final highest bid, and it is the maximum price offered
    let room = db.get_room(room_id).await?.expect("room exists");
    let highest = room.highest_bid.expect("has a highest bid");
    assert_eq!(highest.price, 1008);

    // the ledger only ever grew: admitted prices are strictly increasing
    let ledger = db
        .get_bids(room_id, DateTimeRangeQuery::default(), 50)
        .await?;
    assert_eq!(ledger.results.len(), admitted);
    let mut prices: Vec<_> = ledger.results.iter().map(|bid| bid.price).collect();
    prices.reverse();
    assert!(prices.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(prices.last(), Some(&1008));

    Ok(())
}

#[tokio::test]
async fn ledger_pages_newest_first() -> anyhow::Result<()> {
    let db = open_db().await;
    let (_, room_id) = seed_listing(
        &db,
        UserId::random(),
        ModelId::random(),
        100,
        at(3600),
        at(0),
    )
    .await;

    for (i, price) in [101, 102, 103, 104, 105].into_iter().enumerate() {
        db.place_bid(
            room_id,
            BidId::random(),
            UserId::random(),
            price,
            at(1 + i as i64),
        )
        .await?
        .expect("bid admitted");
    }

    let first_page = db
        .get_bids(room_id, DateTimeRangeQuery::default(), 2)
        .await?;
    assert_eq!(
        first_page
            .results
            .iter()
            .map(|bid| bid.price)
            .collect::<Vec<_>>(),
        vec![105, 104]
    );

    let next = first_page.more.expect("an older page remains");
    let second_page = db.get_bids(room_id, next, 2).await?;
    assert_eq!(second_page.results.first().map(|bid| bid.price), Some(103));

    Ok(())
}
