use crate::error::CoreError;
use crate::secret::SecretHasher;
use crate::streak;
use chrono::Utc;
use penfolio_db::journal::{MoodSelection, Mutation, Query};
use penfolio_db::user_profile;
use penfolio_db::util::{FlattenTransactionResultExt, RequireRecord};
use penfolio_entity::journal as journal_entity;
use penfolio_model::journal::partial::{JournalChanges, NewJournal};
use penfolio_model::journal::{Journal, MoodTag, Page};
use penfolio_model_tools::convert::journal::Revealed;
use penfolio_model_tools::convert::{FromDbModel, IntoDbModel};
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use uuid::Uuid;

/// List a user's journals, newest first. Covert journals never show up
/// here: a request that filters by the covert mood is served the
/// covert-free view instead of the covert slice.
pub async fn list_visible<C: ConnectionTrait>(
    conn: &C,
    owner: Uuid,
    mood_filter: Option<MoodTag>,
    page: u64,
    per_page: u64,
) -> Result<Page<Journal>, CoreError> {
    let selection = match mood_filter {
        Some(MoodTag::Covert) | None => MoodSelection::ExceptCovert,
        Some(mood_tag) => MoodSelection::Only(mood_tag.into_db_model()),
    };

    let (journals, count) = Query::get_user_journals(conn, owner, selection, page, per_page).await?;
    Ok(Page {
        items: journals.into_iter().map(Journal::from_db_model).collect(),
        count,
    })
}

/// List the covert journals, content included. Requires a fresh PIN check.
pub async fn list_covert<C: ConnectionTrait>(
    conn: &C,
    hasher: &dyn SecretHasher,
    owner: Uuid,
    pin: &str,
    page: u64,
    per_page: u64,
) -> Result<Page<Journal>, CoreError> {
    verify_pin(conn, hasher, owner, pin).await?;

    let selection = MoodSelection::Only(journal_entity::MoodTag::Covert);
    let (journals, count) = Query::get_user_journals(conn, owner, selection, page, per_page).await?;
    Ok(Page {
        items: journals
            .into_iter()
            .map(|journal| Journal::from_db_model(Revealed(journal)))
            .collect(),
        count,
    })
}

/// Fetch one journal. Covert journals come back redacted; the caller has
/// to go through [`reveal`] to read their content.
pub async fn get<C: ConnectionTrait>(conn: &C, owner: Uuid, journal_id: Uuid) -> Result<Journal, CoreError> {
    let journal = Query::get_user_journal(conn, owner, journal_id)
        .await?
        .ok_or(CoreError::NotFound("Journal not found".into()))?;

    Ok(Journal::from_db_model(journal))
}

pub async fn reveal<C: ConnectionTrait>(
    conn: &C,
    hasher: &dyn SecretHasher,
    owner: Uuid,
    journal_id: Uuid,
    pin: &str,
) -> Result<Journal, CoreError> {
    let journal = Query::get_user_journal(conn, owner, journal_id)
        .await?
        .ok_or(CoreError::NotFound("Journal not found".into()))?;

    if journal.mood_tag != journal_entity::MoodTag::Covert {
        return Err(CoreError::Validation("This is not a covert journal.".into()));
    }

    verify_pin(conn, hasher, owner, pin).await?;

    Ok(Journal::from_db_model(Revealed(journal)))
}

/// Create a journal and fold the activity into the owner's streak, both on
/// one transaction. Creating a covert journal requires a PIN to exist
/// beforehand; the content of the echo is redacted like any other read.
pub async fn create<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    owner: Uuid,
    new: NewJournal,
) -> Result<Journal, CoreError> {
    if new.mood_tag == MoodTag::Covert {
        require_existing_pin(conn, owner, "A PIN must be set before creating a covert journal.").await?;
    }

    let today = Utc::now().date_naive();
    let journal = conn
        .transaction::<_, journal_entity::Model, DbErr>(|txn| {
            Box::pin(async move {
                let journal =
                    Mutation::create_journal(txn, owner, new.title, new.content, new.mood_tag.into_db_model()).await?;
                streak::record_activity(txn, owner, today).await?;
                Ok(journal)
            })
        })
        .await
        .flatten_res()?;

    Ok(Journal::from_db_model(journal))
}

/// Apply a partial update. Moving a journal into the covert mood is gated
/// on an existing PIN exactly like creating one.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    owner: Uuid,
    journal_id: Uuid,
    changes: JournalChanges,
) -> Result<Journal, CoreError> {
    let journal = Query::get_user_journal(conn, owner, journal_id)
        .await?
        .ok_or(CoreError::NotFound("Journal not found".into()))?;

    let entering_covert =
        changes.mood_tag == Some(MoodTag::Covert) && journal.mood_tag != journal_entity::MoodTag::Covert;
    if entering_covert {
        require_existing_pin(conn, owner, "A PIN must be set before marking a journal covert.").await?;
    }

    Mutation::update_journal(
        conn,
        owner,
        journal_id,
        changes.title,
        changes.content,
        changes.mood_tag.map(IntoDbModel::into_db_model),
    )
    .await?;

    let journal = Query::get_user_journal(conn, owner, journal_id).await.require()?;
    Ok(Journal::from_db_model(journal))
}

/// Hard delete. Streak counters are never rewound by a deletion.
pub async fn delete<C: ConnectionTrait>(conn: &C, owner: Uuid, journal_id: Uuid) -> Result<(), CoreError> {
    match Mutation::delete_journal(conn, owner, journal_id).await {
        Err(DbErr::RecordNotFound(_)) => Err(CoreError::NotFound("Journal not found".into())),
        res => Ok(res?),
    }
}

/// Case-insensitive substring search over title and content. Covert
/// journals are never part of the result; a blank query matches nothing.
pub async fn search<C: ConnectionTrait>(conn: &C, owner: Uuid, query: &str) -> Result<Vec<Journal>, CoreError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let journals = Query::search_user_journals(conn, owner, query).await?;
    Ok(journals.into_iter().map(Journal::from_db_model).collect())
}

/// Check the supplied PIN against the owner's profile. A missing profile,
/// a profile without a PIN and a wrong PIN all fail identically so the
/// response cannot be used to probe account state.
async fn verify_pin<C: ConnectionTrait>(
    conn: &C,
    hasher: &dyn SecretHasher,
    owner: Uuid,
    pin: &str,
) -> Result<(), CoreError> {
    let profile = user_profile::Query::find_by_user_id(conn, owner).await?;
    let verified = profile
        .as_ref()
        .and_then(|profile| profile.pin_hash.as_deref())
        .is_some_and(|hash| hasher.verify(pin, hash));

    if !verified {
        return Err(CoreError::Forbidden("Incorrect PIN".into()));
    }
    Ok(())
}

async fn require_existing_pin<C: ConnectionTrait>(
    conn: &C,
    owner: Uuid,
    reason: &'static str,
) -> Result<(), CoreError> {
    let profile = user_profile::Query::find_by_user_id(conn, owner).await?;
    let has_pin = profile.is_some_and(|profile| profile.pin_hash.is_some());
    if !has_pin {
        return Err(CoreError::Forbidden(reason.into()));
    }
    Ok(())
}
