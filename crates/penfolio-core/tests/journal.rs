mod common;

use crate::common::{PlainHasher, setup_db};
use penfolio_core::error::CoreError;
use penfolio_core::{account, journal};
use penfolio_entity::journal::MoodTag as DbMoodTag;
use penfolio_model::journal::MoodTag;
use penfolio_model::journal::partial::{JournalChanges, NewJournal};
use penfolio_test_helpers::user::{create_test_account, create_test_journal, create_test_user};
use test_log::test;
use uuid::Uuid;

fn new_journal(title: &str, content: &str, mood_tag: MoodTag) -> NewJournal {
    NewJournal {
        title: title.to_owned(),
        content: content.to_owned(),
        mood_tag,
    }
}

#[test(tokio::test)]
async fn test_get_redacts_covert_content() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    let covert = create_test_journal(&db, user.id, "hidden", "the secret", DbMoodTag::Covert).await;

    let journal = journal::get(&db, user.id, covert.id).await.unwrap();
    assert!(journal.is_covert);
    assert_eq!(journal.content, None, "covert content must never leak through get");

    let merry = create_test_journal(&db, user.id, "open", "plain text", DbMoodTag::Merry).await;
    let journal = journal::get(&db, user.id, merry.id).await.unwrap();
    assert!(!journal.is_covert);
    assert_eq!(journal.content.as_deref(), Some("plain text"));
}

#[test(tokio::test)]
async fn test_get_foreign_journal_is_not_found() {
    let db = setup_db().await;
    let (owner, _) = create_test_account(&db).await;
    let (stranger, _) = create_test_account(&db).await;
    let journal = create_test_journal(&db, owner.id, "mine", "body", DbMoodTag::Merry).await;

    let res = journal::get(&db, stranger.id, journal.id).await;
    assert!(matches!(res, Err(CoreError::NotFound(_))));
}

#[test(tokio::test)]
async fn test_reveal_roundtrip() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    account::set_pin(&db, &PlainHasher, user.id, "1234").await.unwrap();
    let covert = create_test_journal(&db, user.id, "hidden", "the secret", DbMoodTag::Covert).await;

    let revealed = journal::reveal(&db, &PlainHasher, user.id, covert.id, "1234").await.unwrap();
    assert!(revealed.is_covert);
    assert_eq!(revealed.content.as_deref(), Some("the secret"));

    let res = journal::reveal(&db, &PlainHasher, user.id, covert.id, "0000").await;
    assert!(matches!(res, Err(CoreError::Forbidden(_))));
}

#[test(tokio::test)]
async fn test_reveal_non_covert_is_a_validation_error() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    account::set_pin(&db, &PlainHasher, user.id, "1234").await.unwrap();
    let merry = create_test_journal(&db, user.id, "open", "body", DbMoodTag::Merry).await;

    let res = journal::reveal(&db, &PlainHasher, user.id, merry.id, "1234").await;
    assert!(matches!(res, Err(CoreError::Validation(_))));
}

#[test(tokio::test)]
async fn test_create_covert_requires_pin() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;

    let res = journal::create(&db, user.id, new_journal("h", "s", MoodTag::Covert)).await;
    assert!(matches!(res, Err(CoreError::Forbidden(_))));

    // Same call succeeds once a PIN exists.
    account::set_pin(&db, &PlainHasher, user.id, "Abcd123!").await.unwrap();
    let journal = journal::create(&db, user.id, new_journal("h", "s", MoodTag::Covert))
        .await
        .unwrap();
    assert!(journal.is_covert);
    assert_eq!(journal.content, None, "the create echo is redacted like any read");
}

#[test(tokio::test)]
async fn test_create_records_streak() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;

    journal::create(&db, user.id, new_journal("a", "b", MoodTag::Merry))
        .await
        .unwrap();
    journal::create(&db, user.id, new_journal("c", "d", MoodTag::Gloomy))
        .await
        .unwrap();

    let (_, profile) = account::profile(&db, user.id).await.unwrap();
    assert_eq!(profile.current_streak, 1, "two entries on one day count once");
    assert_eq!(profile.longest_streak, 1);
    assert!(profile.last_content_date.is_some());
}

#[test(tokio::test)]
async fn test_create_without_profile_still_succeeds() {
    let db = setup_db().await;
    // No profile row: the streak tick is skipped, the journal still lands.
    let user = create_test_user(&db).await;

    let journal = journal::create(&db, user.id, new_journal("a", "b", MoodTag::Merry))
        .await
        .unwrap();
    assert_eq!(journal.title, "a");
}

#[test(tokio::test)]
async fn test_list_visible_never_contains_covert() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    create_test_journal(&db, user.id, "one", "x", DbMoodTag::Merry).await;
    create_test_journal(&db, user.id, "two", "x", DbMoodTag::Gloomy).await;
    create_test_journal(&db, user.id, "three", "x", DbMoodTag::Covert).await;

    for filter in [None, Some(MoodTag::Covert)] {
        let page = journal::list_visible(&db, user.id, filter, 1, 10).await.unwrap();
        assert_eq!(page.count, 2);
        assert!(page.items.iter().all(|journal| !journal.is_covert));
    }

    let page = journal::list_visible(&db, user.id, Some(MoodTag::Gloomy), 1, 10)
        .await
        .unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].title, "two");
}

#[test(tokio::test)]
async fn test_list_covert_requires_pin() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    account::set_pin(&db, &PlainHasher, user.id, "1234").await.unwrap();
    create_test_journal(&db, user.id, "open", "x", DbMoodTag::Merry).await;
    create_test_journal(&db, user.id, "hidden", "secret body", DbMoodTag::Covert).await;

    let res = journal::list_covert(&db, &PlainHasher, user.id, "9999", 1, 10).await;
    assert!(matches!(res, Err(CoreError::Forbidden(_))));

    let page = journal::list_covert(&db, &PlainHasher, user.id, "1234", 1, 10)
        .await
        .unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].content.as_deref(), Some("secret body"));
}

#[test(tokio::test)]
async fn test_list_covert_without_profile_is_forbidden() {
    let db = setup_db().await;
    // No profile at all must look exactly like a wrong PIN.
    let user = create_test_user(&db).await;

    let res = journal::list_covert(&db, &PlainHasher, user.id, "0000", 1, 10).await;
    assert!(matches!(res, Err(CoreError::Forbidden(_))));
}

#[test(tokio::test)]
async fn test_update_is_partial() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    let journal = create_test_journal(&db, user.id, "old title", "old body", DbMoodTag::Merry).await;

    let updated = journal::update(
        &db,
        user.id,
        journal.id,
        JournalChanges {
            title: Some("new title".to_owned()),
            ..JournalChanges::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "new title");
    assert_eq!(updated.content.as_deref(), Some("old body"));
    assert_eq!(updated.mood_tag, MoodTag::Merry);
}

#[test(tokio::test)]
async fn test_update_into_covert_requires_pin() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    let journal = create_test_journal(&db, user.id, "t", "b", DbMoodTag::Merry).await;

    let changes = || JournalChanges {
        mood_tag: Some(MoodTag::Covert),
        ..JournalChanges::default()
    };

    let res = journal::update(&db, user.id, journal.id, changes()).await;
    assert!(matches!(res, Err(CoreError::Forbidden(_))));

    account::set_pin(&db, &PlainHasher, user.id, "1234").await.unwrap();
    let updated = journal::update(&db, user.id, journal.id, changes()).await.unwrap();
    assert!(updated.is_covert);
    assert_eq!(updated.content, None);
}

#[test(tokio::test)]
async fn test_update_of_already_covert_entry_needs_no_pin() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    account::set_pin(&db, &PlainHasher, user.id, "1234").await.unwrap();
    let journal = create_test_journal(&db, user.id, "t", "b", DbMoodTag::Covert).await;
    account::set_pin(&db, &PlainHasher, user.id, "5678").await.unwrap();

    // Covert stays covert, no transition, no PIN gate.
    let updated = journal::update(
        &db,
        user.id,
        journal.id,
        JournalChanges {
            title: Some("renamed".to_owned()),
            mood_tag: Some(MoodTag::Covert),
            ..JournalChanges::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "renamed");
    assert!(updated.is_covert);
}

#[test(tokio::test)]
async fn test_delete_is_permanent_and_keeps_streaks() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    let journal = journal::create(&db, user.id, new_journal("t", "b", MoodTag::Merry))
        .await
        .unwrap();

    journal::delete(&db, user.id, journal.id).await.unwrap();
    let res = journal::get(&db, user.id, journal.id).await;
    assert!(matches!(res, Err(CoreError::NotFound(_))));

    let res = journal::delete(&db, user.id, journal.id).await;
    assert!(matches!(res, Err(CoreError::NotFound(_))));

    let (_, profile) = account::profile(&db, user.id).await.unwrap();
    assert_eq!(profile.current_streak, 1, "deletion does not rewind the streak");
}

#[test(tokio::test)]
async fn test_delete_unknown_journal_is_not_found() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;

    let res = journal::delete(&db, user.id, Uuid::new_v4()).await;
    assert!(matches!(res, Err(CoreError::NotFound(_))));
}

#[test(tokio::test)]
async fn test_search_is_case_insensitive_and_covert_free() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    create_test_journal(&db, user.id, "Morning Pages", "slept well", DbMoodTag::Merry).await;
    create_test_journal(&db, user.id, "errands", "buy SLEEPing bag", DbMoodTag::Gloomy).await;
    create_test_journal(&db, user.id, "hidden", "sleep secrets", DbMoodTag::Covert).await;

    let hits = journal::search(&db, user.id, "SLEEP").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|journal| !journal.is_covert));

    let hits = journal::search(&db, user.id, "morning").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Morning Pages");
}

#[test(tokio::test)]
async fn test_search_blank_query_is_empty() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;
    create_test_journal(&db, user.id, "t", "b", DbMoodTag::Merry).await;

    assert!(journal::search(&db, user.id, "").await.unwrap().is_empty());
    assert!(journal::search(&db, user.id, "   ").await.unwrap().is_empty());
}
