/// Album like and cache-aside count tests
mod common;

use common::*;
use std::sync::Arc;
use tuneshelf_core::{CacheGateway, CacheLookup, CoreError};
use tuneshelf_server::services::album_likes::cache_key;
use tuneshelf_server::InProcessQueue;

#[tokio::test]
async fn test_count_is_read_through_then_served_from_cache() {
    let ctx = create_test_context().await;
    let album = create_album(ctx.db(), "Cached").await;
    let fan = create_user(ctx.db(), "fan").await;
    let likes = &ctx.state.album_likes;

    let first = likes.get_like_count(&album).await.unwrap();
    assert_eq!(first.value, 0);
    assert!(!first.from_cache);

    likes.like(&album, &fan).await.unwrap();

    let after_like = likes.get_like_count(&album).await.unwrap();
    assert_eq!(after_like.value, 1);
    assert!(!after_like.from_cache);
    assert_eq!(
        ctx.cache.get(&cache_key(&album)).await.unwrap(),
        CacheLookup::Hit("1".to_string())
    );

    let cached = likes.get_like_count(&album).await.unwrap();
    assert_eq!(cached.value, 1);
    assert!(cached.from_cache);
}

#[tokio::test]
async fn test_like_and_unlike_invalidate_the_count() {
    let ctx = create_test_context().await;
    let album = create_album(ctx.db(), "Popular").await;
    let fan = create_user(ctx.db(), "fan").await;
    let key = cache_key(&album);
    let likes = &ctx.state.album_likes;

    likes.get_like_count(&album).await.unwrap();
    assert!(matches!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Hit(_)));

    likes.like(&album, &fan).await.unwrap();
    assert_eq!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Miss);

    likes.get_like_count(&album).await.unwrap();
    likes.unlike(&album, &fan).await.unwrap();
    assert_eq!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Miss);

    let count = likes.get_like_count(&album).await.unwrap();
    assert_eq!(count.value, 0);
}

#[tokio::test]
async fn test_double_like_and_phantom_unlike_are_invariant() {
    let ctx = create_test_context().await;
    let album = create_album(ctx.db(), "Once").await;
    let fan = create_user(ctx.db(), "fan").await;
    let likes = &ctx.state.album_likes;

    likes.like(&album, &fan).await.unwrap();
    let second = likes.like(&album, &fan).await;
    match second {
        Err(CoreError::Invariant(msg)) => assert_eq!(msg, "Failed to like the album"),
        other => panic!("expected Invariant, got {:?}", other),
    }

    let stranger = create_user(ctx.db(), "stranger").await;
    let phantom = likes.unlike(&album, &stranger).await;
    assert!(matches!(phantom, Err(CoreError::Invariant(_))));

    assert_eq!(likes.get_like_count(&album).await.unwrap().value, 1);
}

#[tokio::test]
async fn test_rejected_like_and_unlike_still_drop_the_cached_count() {
    let ctx = create_test_context().await;
    let album = create_album(ctx.db(), "Stale").await;
    let fan = create_user(ctx.db(), "fan").await;
    let stranger = create_user(ctx.db(), "stranger").await;
    let key = cache_key(&album);
    let likes = &ctx.state.album_likes;

    likes.like(&album, &fan).await.unwrap();
    likes.get_like_count(&album).await.unwrap();
    assert_eq!(
        ctx.cache.get(&key).await.unwrap(),
        CacheLookup::Hit("1".to_string())
    );

    let again = likes.like(&album, &fan).await;
    assert!(matches!(again, Err(CoreError::Invariant(_))));
    assert_eq!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Miss);

    likes.get_like_count(&album).await.unwrap();
    assert!(matches!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Hit(_)));

    let phantom = likes.unlike(&album, &stranger).await;
    assert!(matches!(phantom, Err(CoreError::Invariant(_))));
    assert_eq!(ctx.cache.get(&key).await.unwrap(), CacheLookup::Miss);

    let count = likes.get_like_count(&album).await.unwrap();
    assert_eq!(count.value, 1);
    assert!(!count.from_cache);
}

#[tokio::test]
async fn test_unparsable_cached_value_falls_back_to_database() {
    let ctx = create_test_context().await;
    let album = create_album(ctx.db(), "Garbled").await;
    let key = cache_key(&album);

    ctx.cache.set(&key, "not-a-number".to_string()).await.unwrap();

    let count = ctx.state.album_likes.get_like_count(&album).await.unwrap();
    assert_eq!(count.value, 0);
    assert!(!count.from_cache);
    assert_eq!(
        ctx.cache.get(&key).await.unwrap(),
        CacheLookup::Hit("0".to_string())
    );
}

#[tokio::test]
async fn test_cache_read_failure_falls_back_to_database() {
    let (state, _dir) =
        create_test_state_with(Arc::new(FailingCache), Arc::new(InProcessQueue::new())).await;
    let album = create_album(&state.db, "Unreachable").await;

    let count = state.album_likes.get_like_count(&album).await.unwrap();
    assert_eq!(count.value, 0);
    assert!(!count.from_cache);
}

#[tokio::test]
async fn test_cache_write_failure_does_not_fail_the_read() {
    let (state, _dir) =
        create_test_state_with(Arc::new(ReadOnlyCache), Arc::new(InProcessQueue::new())).await;
    let album = create_album(&state.db, "Replica").await;
    let fan = create_user(&state.db, "fan").await;

    state.album_likes.like(&album, &fan).await.unwrap();

    let count = state.album_likes.get_like_count(&album).await.unwrap();
    assert_eq!(count.value, 1);
    assert!(!count.from_cache);
}

#[tokio::test]
async fn test_like_fails_when_invalidation_fails() {
    let (state, _dir) =
        create_test_state_with(Arc::new(FailingCache), Arc::new(InProcessQueue::new())).await;
    let album = create_album(&state.db, "Stuck").await;
    let fan = create_user(&state.db, "fan").await;

    let result = state.album_likes.like(&album, &fan).await;
    assert!(matches!(result, Err(CoreError::Cache(_))));
}
