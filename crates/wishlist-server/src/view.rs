//! The wishlist screen as a state machine.
//!
//! [`WishlistView`] combines the [`FormController`], the [`WishStore`] and the
//! editing target into the states `{Creating, Editing(id)} x {idle, submitting}`.
//! Surfaces call its intent methods and draw [`WishlistView::render`].
//!
//! The view subscribes to the store once, at construction, and keeps its own
//! copy of the collection current from the store's notifications. Dropping the
//! view drops the subscription.
//!
//! Session state sits behind a `std::sync::Mutex` that is never held across
//! an `.await`, so a submission in flight does not block other intents.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use wishlist_core::{Wish, WishDraft, WishId};
use wishlist_store::{StoreError, Subscription, WishStore};

use crate::form::{FieldName, FormController, FormError};
use crate::schema::view::{ButtonsView, FieldView, ViewModel, WishView};

/// Whether a submit creates a new wish or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Editing(WishId),
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Creating => "creating",
            EditMode::Editing(_) => "editing",
        }
    }

    pub fn target(self) -> Option<WishId> {
        match self {
            EditMode::Creating => None,
            EditMode::Editing(id) => Some(id),
        }
    }
}

/// What a completed submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Wish),
    Updated(Wish),
}

/// Errors from view intents.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The wish is not in the view's list.
    #[error("no wish with id {0}")]
    UnknownWish(WishId),

    /// "Add New" is only enabled while editing.
    #[error("add new is only available while editing a wish")]
    AddNewDisabled,

    /// Submit is disabled on a pristine form.
    #[error("nothing to submit: form is unchanged")]
    SubmitDisabled,

    /// Reset is disabled on a pristine form.
    #[error("nothing to reset: form is unchanged")]
    ResetDisabled,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

struct Session {
    form: FormController,
    mode: EditMode,
    initial_loading: bool,
    error: Option<String>,
}

/// The wishlist screen.
pub struct WishlistView {
    store: WishStore,
    session: Mutex<Session>,
    wishes: Arc<RwLock<Vec<Wish>>>,
    _subscription: Subscription,
}

impl WishlistView {
    pub fn new(store: WishStore) -> Self {
        Self::with_form(store, FormController::new())
    }

    /// Builds the view around a preconfigured form (e.g. with validators).
    pub fn with_form(store: WishStore, mut form: FormController) -> Self {
        form.initialize(WishDraft::default());

        let wishes = Arc::new(RwLock::new(store.snapshot()));
        let subscription = store.subscribe({
            let wishes = Arc::clone(&wishes);
            move |snapshot: &[Wish]| {
                *wishes.write().unwrap_or_else(PoisonError::into_inner) = snapshot.to_vec();
            }
        });

        WishlistView {
            store,
            session: Mutex::new(Session {
                form,
                mode: EditMode::Creating,
                initial_loading: true,
                error: None,
            }),
            wishes,
            _subscription: subscription,
        }
    }

    pub fn store(&self) -> &WishStore {
        &self.store
    }

    pub fn mode(&self) -> EditMode {
        self.session().mode
    }

    pub fn is_loading(&self) -> bool {
        self.session().initial_loading
    }

    /// The view's copy of the collection, as last published by the store.
    pub fn wishes(&self) -> Vec<Wish> {
        self.wishes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------

    /// Runs the store fetch. The loading flag clears whether it succeeds or not.
    pub async fn load(&self) -> Result<usize, ViewError> {
        tracing::debug!("loading wishes");
        let result = self.store.fetch().await;

        let mut session = self.session();
        session.initial_loading = false;
        match result {
            Ok(count) => {
                session.error = None;
                self.drop_stale_target(&mut session);
                Ok(count)
            }
            Err(err) => {
                session.error = Some(format!("failed to load wishes: {err}"));
                Err(err.into())
            }
        }
    }

    /// Starts editing `id`: the form takes that wish's current values.
    pub fn select(&self, id: WishId) -> Result<(), ViewError> {
        let wish = self
            .wishes()
            .into_iter()
            .find(|w| w.id == id)
            .ok_or(ViewError::UnknownWish(id))?;

        let mut session = self.session();
        session.mode = EditMode::Editing(id);
        session.form.initialize(wish.draft());
        session.error = None;
        tracing::debug!(%id, "editing wish");
        Ok(())
    }

    /// Leaves edit mode with an empty form. Refused in create mode.
    pub fn add_new(&self) -> Result<(), ViewError> {
        let mut session = self.session();
        if session.mode == EditMode::Creating {
            return Err(ViewError::AddNewDisabled);
        }
        session.mode = EditMode::Creating;
        session.form.initialize(WishDraft::default());
        session.error = None;
        tracing::debug!("creating new wish");
        Ok(())
    }

    pub fn change_field(&self, field: FieldName, value: impl Into<String>) -> Result<(), ViewError> {
        self.session().form.change(field, value)?;
        Ok(())
    }

    pub fn blur_field(&self, field: FieldName) -> Result<(), ViewError> {
        self.session().form.blur(field)?;
        Ok(())
    }

    /// Reverts the fields to their last-initialized values. Mode is unchanged.
    pub fn reset(&self) -> Result<(), ViewError> {
        let mut session = self.session();
        if session.form.is_submitting() {
            return Err(FormError::Submitting.into());
        }
        if !session.form.reset_enabled() {
            return Err(ViewError::ResetDisabled);
        }
        session.form.reset();
        Ok(())
    }

    /// Submits the form: adds a new wish in create mode, edits the target in
    /// edit mode.
    ///
    /// On success a create clears the form and an edit re-initializes it with
    /// the saved values, unless the form was re-targeted while the mutation
    /// was in flight.
    pub async fn submit(&self) -> Result<SubmitOutcome, ViewError> {
        let (ticket, mode) = {
            let mut session = self.session();
            if session.form.is_submitting() {
                return Err(FormError::Submitting.into());
            }
            if session.form.pristine() {
                return Err(ViewError::SubmitDisabled);
            }
            let ticket = session.form.begin_submit()?;
            session.error = None;
            (ticket, session.mode)
        };

        let result = match mode {
            EditMode::Creating => {
                let wish = Wish::new(WishId::new(), ticket.values.clone());
                tracing::debug!(id = %wish.id, "submitting new wish");
                self.store
                    .add(wish.clone())
                    .await
                    .map(|()| SubmitOutcome::Created(wish))
            }
            EditMode::Editing(id) => {
                tracing::debug!(%id, "submitting edit");
                self.store
                    .edit_by_id(id, ticket.values.clone())
                    .await
                    .map(SubmitOutcome::Updated)
            }
        };

        let mut session = self.session();
        match result {
            Ok(outcome) => {
                session.form.finish_submit(Ok(()));
                if session.form.generation() == ticket.generation {
                    let next = match &outcome {
                        SubmitOutcome::Created(_) => WishDraft::default(),
                        SubmitOutcome::Updated(wish) => wish.draft(),
                    };
                    session.form.initialize(next);
                }
                Ok(outcome)
            }
            Err(err) => {
                let message = err.to_string();
                session.form.finish_submit(Err(message.clone()));
                session.error = Some(message);
                Err(err.into())
            }
        }
    }

    /// Removes `id` from the store. Leaves edit mode if it was the target.
    pub async fn remove(&self, id: WishId) -> Result<Wish, ViewError> {
        tracing::debug!(%id, "removing wish");
        let result = self.store.remove_by_id(id).await;

        let mut session = self.session();
        match result {
            Ok(removed) => {
                self.drop_stale_target(&mut session);
                Ok(removed)
            }
            Err(err) => {
                session.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Returns to create mode when the editing target is no longer listed.
    fn drop_stale_target(&self, session: &mut Session) {
        let EditMode::Editing(id) = session.mode else {
            return;
        };
        let listed = self
            .wishes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|w| w.id == id);
        if !listed {
            tracing::debug!(%id, "editing target is gone, back to create mode");
            session.mode = EditMode::Creating;
            session.form.initialize(WishDraft::default());
        }
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    pub fn render(&self) -> ViewModel {
        let wishes = self.wishes();
        let session = self.session();
        let form = &session.form;
        let target = session.mode.target();

        ViewModel {
            mode: session.mode.as_str(),
            editing: target,
            loading: session.initial_loading,
            submitting: form.is_submitting(),
            submit_succeeded: form.submit_succeeded(),
            error: session.error.clone(),
            fields: FieldName::ALL
                .iter()
                .map(|&name| {
                    let state = form.field(name);
                    FieldView {
                        name,
                        label: name.label(),
                        placeholder: name.placeholder(),
                        value: state.value.clone(),
                        touched: state.touched,
                        error: form.visible_error(name).map(str::to_string),
                        disabled: form.fields_disabled(),
                    }
                })
                .collect(),
            buttons: ButtonsView {
                submit: form.submit_enabled(),
                reset: form.reset_enabled(),
                add_new: target.is_some(),
            },
            wishes: wishes
                .into_iter()
                .map(|w| WishView {
                    selected: Some(w.id) == target,
                    id: w.id,
                    name: w.name,
                    comment: w.comment,
                })
                .collect(),
        }
    }
}

impl std::fmt::Debug for WishlistView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistView")
            .field("store", &self.store)
            .field("mode", &self.mode())
            .finish()
    }
}
