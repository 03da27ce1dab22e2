mod common;

use common::{at, open_db, seed_listing};
use mkt_core::models::{CreateWishFailure, PriceRange, WishStatus};
use mkt_core::ports::{
    BidRepository as _, ListingRepository as _, SettlementRepository as _, WishRepository as _,
};
use mkt_sqlite::types::{BidId, ListingId, ModelId, RoomId, UserId, WishId};
use rstest::rstest;

#[rstest]
#[case::inside(400, 600, WishStatus::Available)]
#[case::at_lower_edge(500, 700, WishStatus::Available)]
#[case::at_upper_edge(300, 500, WishStatus::Available)]
#[case::above(600, 700, WishStatus::Pending)]
#[case::below(300, 400, WishStatus::Pending)]
#[tokio::test]
async fn a_new_wish_matches_existing_unsold_listings(
    #[case] lower: i64,
    #[case] upper: i64,
    #[case] expected: WishStatus,
) -> anyhow::Result<()> {
    let db = open_db().await;
    let model = ModelId::random();
    seed_listing(&db, UserId::random(), model, 500, at(3600), at(0)).await;

    let wish = db
        .create_wish(
            WishId::random(),
            UserId::random(),
            model,
            PriceRange::new(lower, upper)?,
            at(1),
        )
        .await?
        .expect("wish created");
    assert_eq!(wish.status, expected);

    Ok(())
}

#[tokio::test]
async fn sold_listings_do_not_satisfy_a_new_wish() -> anyhow::Result<()> {
    let db = open_db().await;
    let model = ModelId::random();
    let (_, room_id) = seed_listing(&db, UserId::random(), model, 500, at(60), at(0)).await;

    db.place_bid(room_id, BidId::random(), UserId::random(), 600, at(1))
        .await?
        .expect("bid admitted");
    db.settle(room_id, at(120)).await?.expect("room settled");

    let wish = db
        .create_wish(
            WishId::random(),
            UserId::random(),
            model,
            PriceRange::new(400, 600)?,
            at(130),
        )
        .await?
        .expect("wish created");
    assert_eq!(wish.status, WishStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn one_wish_per_user_and_model() -> anyhow::Result<()> {
    let db = open_db().await;
    let user = UserId::random();
    let model = ModelId::random();

    db.create_wish(
        WishId::random(),
        user,
        model,
        PriceRange::new(100, 200)?,
        at(0),
    )
    .await?
    .expect("wish created");

    let duplicate = db
        .create_wish(
            WishId::random(),
            user,
            model,
            PriceRange::new(300, 400)?,
            at(1),
        )
        .await?;
    assert_eq!(duplicate, Err(CreateWishFailure::Duplicate));

    // the same user may wish for a different model
    db.create_wish(
        WishId::random(),
        user,
        ModelId::random(),
        PriceRange::new(100, 200)?,
        at(2),
    )
    .await?
    .expect("wish created");

    Ok(())
}

#[rstest]
#[case::inside(550, true)]
#[case::at_lower_edge(400, true)]
#[case::at_upper_edge(600, true)]
#[case::above(700, false)]
#[tokio::test]
async fn a_new_listing_promotes_matching_pending_wishes(
    #[case] price: i64,
    #[case] promoted: bool,
) -> anyhow::Result<()> {
    let db = open_db().await;
    let model = ModelId::random();
    let wish_id = WishId::random();

    let wish = db
        .create_wish(
            wish_id,
            UserId::random(),
            model,
            PriceRange::new(400, 600)?,
            at(0),
        )
        .await?
        .expect("wish created");
    assert_eq!(wish.status, WishStatus::Pending);

    let created = db
        .create_listing(
            ListingId::random(),
            RoomId::random(),
            UserId::random(),
            model,
            price,
            at(3600),
            at(1),
        )
        .await?;
    assert_eq!(created.wishes_promoted, u64::from(promoted));

    let wish = db.get_wish(wish_id).await?.expect("wish exists");
    let expected = if promoted {
        WishStatus::Available
    } else {
        WishStatus::Pending
    };
    assert_eq!(wish.status, expected);

    Ok(())
}

#[tokio::test]
async fn promotion_only_touches_pending_wishes_for_the_model() -> anyhow::Result<()> {
    let db = open_db().await;
    let model = ModelId::random();
    let other_model = ModelId::random();

    // already available: a matching listing existed at creation time
    seed_listing(&db, UserId::random(), model, 500, at(3600), at(0)).await;
    let available = db
        .create_wish(
            WishId::random(),
            UserId::random(),
            model,
            PriceRange::new(400, 600)?,
            at(1),
        )
        .await?
        .expect("wish created");
    assert_eq!(available.status, WishStatus::Available);

    // pending, but for a different model
    let unrelated = db
        .create_wish(
            WishId::random(),
            UserId::random(),
            other_model,
            PriceRange::new(400, 600)?,
            at(2),
        )
        .await?
        .expect("wish created");

    // only fresh pending wishes for this model count toward the promotion
    let created = db
        .create_listing(
            ListingId::random(),
            RoomId::random(),
            UserId::random(),
            model,
            450,
            at(3600),
            at(3),
        )
        .await?;
    assert_eq!(created.wishes_promoted, 0);

    let unrelated = db.get_wish(unrelated.id).await?.expect("wish exists");
    assert_eq!(unrelated.status, WishStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn wishes_are_owned_reads_and_deletes() -> anyhow::Result<()> {
    let db = open_db().await;
    let owner = UserId::random();
    let wish_id = WishId::random();

    db.create_wish(
        wish_id,
        owner,
        ModelId::random(),
        PriceRange::new(100, 200)?,
        at(0),
    )
    .await?
    .expect("wish created");

    assert_eq!(db.get_wish_owner(wish_id).await?, Some(owner));
    assert_eq!(db.get_wish_owner(WishId::random()).await?, None);

    let mine = db.query_wishes(owner).await?;
    assert_eq!(mine.len(), 1);
    assert!(db.query_wishes(UserId::random()).await?.is_empty());

    assert!(db.delete_wish(wish_id).await?);
    assert!(!db.delete_wish(wish_id).await?);
    assert_eq!(db.get_wish(wish_id).await?, None);

    Ok(())
}
