//! Create and edit flows shared by every admin entity.
//!
//! Handlers stay thin: they extract the form and request context, call one of
//! these functions, and turn the result into a page or a redirect.

use std::fmt;

use tokio::task::JoinHandle;
use tracing::instrument;

use ansania_core::{ActivityData, ActivitySink, LogOutcome};

use super::ActivityRecorder;
use crate::db::{AdminStore, RepositoryError};
use crate::error::AppError;
use crate::models::AdminEntity;

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// Everything a form page needs to render.
pub struct FormState<E: AdminEntity> {
    pub mode: FormMode<E::Id>,
    pub values: E::Form,
    /// Message shown above the form after a rejected submission.
    pub error: Option<String>,
}

impl<E: AdminEntity> FormState<E> {
    fn invalid(mode: FormMode<E::Id>, values: E::Form, error: impl Into<String>) -> Self {
        Self {
            mode,
            values,
            error: Some(error.into()),
        }
    }

    /// URL the form posts to.
    #[must_use]
    pub fn action(&self) -> String {
        match self.mode {
            FormMode::Create => E::BASE_PATH.to_string(),
            FormMode::Edit(id) => format!("{}/{id}", E::BASE_PATH),
        }
    }

    #[must_use]
    pub fn heading(&self) -> String {
        match self.mode {
            FormMode::Create => format!("New {}", E::LABEL),
            FormMode::Edit(id) => format!("Edit {} #{id}", E::LABEL),
        }
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }
}

impl<E: AdminEntity> Clone for FormState<E> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            values: self.values.clone(),
            error: self.error.clone(),
        }
    }
}

impl<E: AdminEntity> fmt::Debug for FormState<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("entity", &E::ENTITY_TYPE)
            .field("mode", &self.mode)
            .field("values", &self.values)
            .field("error", &self.error)
            .finish()
    }
}

/// Result of a create or update submission.
#[derive(Debug)]
pub enum Submission<E: AdminEntity + fmt::Debug> {
    /// The record was written. `activity` resolves once the audit entry is
    /// recorded or dropped.
    Saved {
        entity: E,
        activity: JoinHandle<LogOutcome>,
    },
    /// The form should be shown again with an error.
    Invalid(FormState<E>),
}

/// An empty create form.
#[must_use]
pub fn new_form<E: AdminEntity>() -> FormState<E> {
    FormState {
        mode: FormMode::Create,
        values: E::Form::default(),
        error: None,
    }
}

/// An edit form pre-populated from the stored record.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no record has this ID, or
/// `AppError::Database` if the lookup fails.
#[instrument(skip(store), fields(entity = E::ENTITY_TYPE, id = %id))]
pub async fn edit_form<E, St>(store: &St, id: E::Id) -> Result<FormState<E>, AppError>
where
    E: AdminEntity,
    St: AdminStore<E>,
{
    let record = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id}", E::LABEL)))?;

    Ok(FormState {
        mode: FormMode::Edit(id),
        values: record.to_form(),
        error: None,
    })
}

/// Validate and insert a new record.
///
/// Validation failures and uniqueness conflicts come back as
/// [`Submission::Invalid`] so the form can be shown again.
///
/// # Errors
///
/// Returns `AppError::Database` for any other repository failure.
#[instrument(skip_all, fields(entity = E::ENTITY_TYPE))]
pub async fn submit_create<E, St, S>(
    store: &St,
    recorder: &ActivityRecorder<S>,
    provenance: ActivityData,
    form: E::Form,
) -> Result<Submission<E>, AppError>
where
    E: AdminEntity + fmt::Debug,
    St: AdminStore<E>,
    S: ActivitySink + 'static,
{
    let input = match E::validate(&form) {
        Ok(input) => input,
        Err(e) => {
            return Ok(Submission::Invalid(FormState::invalid(
                FormMode::Create,
                form,
                e.to_string(),
            )));
        }
    };

    let entity = match store.create(&input).await {
        Ok(entity) => entity,
        Err(RepositoryError::Conflict(message)) => {
            return Ok(Submission::Invalid(FormState::invalid(
                FormMode::Create,
                form,
                message,
            )));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(id = %entity.id(), "{} created", E::LABEL);
    let activity = record_saved(recorder, "created", &entity, provenance);

    Ok(Submission::Saved { entity, activity })
}

/// Validate and overwrite an existing record.
///
/// # Errors
///
/// Returns `AppError::NotFound` when no record has this ID, or
/// `AppError::Database` for other repository failures.
#[instrument(skip(store, recorder, provenance, form), fields(entity = E::ENTITY_TYPE, id = %id))]
pub async fn submit_update<E, St, S>(
    store: &St,
    recorder: &ActivityRecorder<S>,
    provenance: ActivityData,
    id: E::Id,
    form: E::Form,
) -> Result<Submission<E>, AppError>
where
    E: AdminEntity + fmt::Debug,
    St: AdminStore<E>,
    S: ActivitySink + 'static,
{
    let mode = FormMode::Edit(id);

    let input = match E::validate(&form) {
        Ok(input) => input,
        Err(e) => {
            return Ok(Submission::Invalid(FormState::invalid(
                mode,
                form,
                e.to_string(),
            )));
        }
    };

    let entity = match store.update(id, &input).await {
        Ok(Some(entity)) => entity,
        Ok(None) => return Err(AppError::NotFound(format!("{} {id}", E::LABEL))),
        Err(RepositoryError::Conflict(message)) => {
            return Ok(Submission::Invalid(FormState::invalid(mode, form, message)));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("{} updated", E::LABEL);
    let activity = record_saved(recorder, "updated", &entity, provenance);

    Ok(Submission::Saved { entity, activity })
}

/// Queue an `{entity}.{verb}` audit entry for a saved record.
fn record_saved<E, S>(
    recorder: &ActivityRecorder<S>,
    verb: &str,
    entity: &E,
    provenance: ActivityData,
) -> JoinHandle<LogOutcome>
where
    E: AdminEntity,
    S: ActivitySink + 'static,
{
    let id: i32 = entity.id().into();
    recorder.record(
        format!("{}.{verb}", E::ENTITY_TYPE),
        ActivityData {
            entity_type: Some(E::ENTITY_TYPE.to_string()),
            entity_id: Some(i64::from(id)),
            ..provenance
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};

    use ansania_core::{BannerId, UserId};

    use super::*;
    use crate::models::{Banner, BannerForm, BannerInput};
    use crate::services::activity::tests::MemorySink;

    /// Banner store backed by a map, with an optional forced conflict.
    #[derive(Default)]
    struct MemoryBannerStore {
        rows: Mutex<BTreeMap<i32, Banner>>,
        conflict: bool,
    }

    impl MemoryBannerStore {
        fn with_banner(banner: Banner) -> Self {
            let store = Self::default();
            store
                .rows
                .lock()
                .unwrap()
                .insert(banner.id.as_i32(), banner);
            store
        }

        fn build(id: i32, input: &BannerInput) -> Banner {
            let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
            Banner {
                id: BannerId::new(id),
                title: input.title.clone(),
                image_url: input.image_url.clone(),
                link_url: input.link_url.clone(),
                position: input.position,
                is_active: input.is_active,
                starts_at: input.starts_at,
                ends_at: input.ends_at,
                created_at: now,
                updated_at: now,
            }
        }
    }

    impl AdminStore<Banner> for MemoryBannerStore {
        async fn get(&self, id: BannerId) -> Result<Option<Banner>, RepositoryError> {
            Ok(self.rows.lock().unwrap().get(&id.as_i32()).cloned())
        }

        async fn create(&self, input: &BannerInput) -> Result<Banner, RepositoryError> {
            if self.conflict {
                return Err(RepositoryError::Conflict("duplicate banner".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.keys().next_back().map_or(1, |last| last + 1);
            let banner = Self::build(id, input);
            rows.insert(id, banner.clone());
            Ok(banner)
        }

        async fn update(
            &self,
            id: BannerId,
            input: &BannerInput,
        ) -> Result<Option<Banner>, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&id.as_i32()) {
                return Ok(None);
            }
            let banner = Self::build(id.as_i32(), input);
            rows.insert(id.as_i32(), banner.clone());
            Ok(Some(banner))
        }

        async fn list(&self) -> Result<Vec<Banner>, RepositoryError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }
    }

    fn banner_seven() -> Banner {
        MemoryBannerStore::build(
            7,
            &BannerInput {
                title: "Spring Collection".to_string(),
                image_url: "https://cdn.ansania.test/spring.jpg".to_string(),
                link_url: Some("/collections/spring".to_string()),
                position: 1,
                is_active: true,
                starts_at: Some(Utc.with_ymd_and_hms(2026, 3, 20, 9, 0, 0).unwrap()),
                ends_at: None,
            },
        )
    }

    fn valid_form() -> BannerForm {
        BannerForm {
            title: "Launch".to_string(),
            image_url: "https://cdn.ansania.test/launch.jpg".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn actor() -> ActivityData {
        ActivityData {
            user_id: Some(UserId::new(5)),
            ip_address: Some("203.0.113.9".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_form_is_empty_create() {
        let form = new_form::<Banner>();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.values, BannerForm::default());
        assert_eq!(form.action(), "/banners");
        assert_eq!(form.heading(), "New Banner");
        assert!(!form.is_edit());
        assert!(form.error.is_none());
    }

    #[tokio::test]
    async fn test_edit_form_missing_is_not_found() {
        let store = MemoryBannerStore::default();

        let err = edit_form::<Banner, _>(&store, BannerId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_form_prefills_from_record() {
        let banner = banner_seven();
        let store = MemoryBannerStore::with_banner(banner.clone());

        let form = edit_form::<Banner, _>(&store, BannerId::new(7))
            .await
            .unwrap();

        assert_eq!(form.mode, FormMode::Edit(BannerId::new(7)));
        assert_eq!(form.values, banner.to_form());
        assert_eq!(form.values.title, "Spring Collection");
        assert_eq!(form.action(), "/banners/7");
        assert_eq!(form.heading(), "Edit Banner #7");
    }

    #[tokio::test]
    async fn test_create_saves_and_records_activity() {
        let store = MemoryBannerStore::default();
        let recorder = ActivityRecorder::new(MemorySink::default());

        let submission = submit_create::<Banner, _, _>(&store, &recorder, actor(), valid_form())
            .await
            .unwrap();

        let Submission::Saved { entity, activity } = submission else {
            panic!("expected saved submission");
        };
        assert_eq!(entity.title, "Launch");
        assert_eq!(activity.await.unwrap(), LogOutcome::Recorded);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_keeps_values() {
        let store = MemoryBannerStore::default();
        let recorder = ActivityRecorder::new(MemorySink::default());
        let form = BannerForm {
            title: String::new(),
            ..valid_form()
        };

        let submission = submit_create::<Banner, _, _>(&store, &recorder, actor(), form.clone())
            .await
            .unwrap();

        let Submission::Invalid(state) = submission else {
            panic!("expected invalid submission");
        };
        assert_eq!(state.values, form);
        assert_eq!(state.error.as_deref(), Some("title is required"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_conflict_is_shown_on_form() {
        let store = MemoryBannerStore {
            conflict: true,
            ..Default::default()
        };
        let recorder = ActivityRecorder::new(MemorySink::default());

        let submission = submit_create::<Banner, _, _>(&store, &recorder, actor(), valid_form())
            .await
            .unwrap();

        let Submission::Invalid(state) = submission else {
            panic!("expected invalid submission");
        };
        assert_eq!(state.error.as_deref(), Some("duplicate banner"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryBannerStore::default();
        let recorder = ActivityRecorder::new(MemorySink::default());

        let err = submit_update::<Banner, _, _>(
            &store,
            &recorder,
            actor(),
            BannerId::new(42),
            valid_form(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_saves_even_when_logging_fails() {
        let store = MemoryBannerStore::with_banner(banner_seven());
        let recorder = ActivityRecorder::new(MemorySink::failing());

        let submission = submit_update::<Banner, _, _>(
            &store,
            &recorder,
            actor(),
            BannerId::new(7),
            valid_form(),
        )
        .await
        .unwrap();

        let Submission::Saved { entity, activity } = submission else {
            panic!("expected saved submission");
        };
        assert_eq!(entity.id, BannerId::new(7));
        assert_eq!(entity.title, "Launch");
        assert_eq!(activity.await.unwrap(), LogOutcome::Dropped);
    }
}
