//! Editor state controller.
//!
//! Owns the local mirror of the user's note collection and the draft bound
//! to the editor widget, and drives the draft lifecycle:
//! `Empty` -> `Clean` -> `Dirty` -> `Saving` -> `Clean` (or back to `Dirty`
//! when a save fails; the next edit's debounce is the only retry).
//!
//! There is a single logical mutator. State lives behind an async mutex so
//! the debounce task spawned for autosave can reach it, and a watch counter
//! tells the presentation layer when to re-snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::error::{StoreError, StoreResult};
use crate::models::{Note, NoteId, UserId};
use crate::store::{NewNote, NoteFields, NoteStore};

/// Trailing-debounce window: a save fires after this much input quiescence.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1500);

/// Title given to freshly created notes.
pub const NEW_NOTE_TITLE: &str = "Untitled Note";

/// Lifecycle state of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    /// No note selected
    #[default]
    Empty,
    /// Draft equals the last-synced copy of the selected note
    Clean,
    /// Draft differs from the last-synced copy
    Dirty,
    /// A write carrying the draft is in flight
    Saving,
}

/// The in-memory editable copy of a note's title and content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub note_id: Option<NoteId>,
    pub title: String,
    pub content: String,
}

/// Editable draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
}

/// Immutable view of the controller state for rendering.
#[derive(Debug, Clone, Default)]
pub struct EditorSnapshot {
    pub notes: Vec<Note>,
    pub draft: Draft,
    pub state: DraftState,
    pub pending_delete: Option<NoteId>,
}

impl EditorSnapshot {
    #[must_use]
    pub fn selected(&self) -> Option<NoteId> {
        self.draft.note_id
    }
}

#[derive(Default)]
struct EditorInner {
    owner: Option<UserId>,
    notes: Vec<Note>,
    draft: Draft,
    state: DraftState,
    pending_delete: Option<NoteId>,
    /// Bumped on every edit; lets a debounce fire or a completed save detect
    /// that newer input has superseded it.
    generation: u64,
    debounce: Option<JoinHandle<()>>,
}

impl EditorInner {
    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }

    fn clear_draft(&mut self) {
        self.cancel_debounce();
        self.draft = Draft::default();
        self.state = DraftState::Empty;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Consistency guard: a selected id that vanished from the cache forces
    /// the draft back to `Empty`.
    fn guard_selection(&mut self) {
        if let Some(id) = self.draft.note_id {
            if !self.notes.iter().any(|note| note.id == id) {
                tracing::warn!("Selected note {} vanished from cache, clearing draft", id);
                self.clear_draft();
            }
        }
    }

    fn synced_copy(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }
}

/// Controller over the note cache and the single live draft.
pub struct EditorController<S> {
    store: S,
    inner: Arc<Mutex<EditorInner>>,
    debounce_window: Duration,
    changes: watch::Sender<u64>,
}

impl<S: Clone> Clone for EditorController<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            inner: Arc::clone(&self.inner),
            debounce_window: self.debounce_window,
            changes: self.changes.clone(),
        }
    }
}

impl<S> EditorController<S>
where
    S: NoteStore + Clone + 'static,
{
    #[must_use]
    pub fn new(store: S) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            store,
            inner: Arc::new(Mutex::new(EditorInner::default())),
            debounce_window: DEBOUNCE_WINDOW,
            changes,
        }
    }

    /// Subscribe to change notifications; each state mutation bumps the
    /// counter so views know to re-snapshot.
    #[must_use]
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    #[must_use]
    pub fn change_count(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Fetch the owner's notes into the local cache.
    ///
    /// A surviving selection keeps its draft (dirtiness recomputed against
    /// the fresh copies); a selection missing from the new listing is
    /// cleared by the consistency guard.
    pub async fn load_notes(&self, owner: UserId) -> StoreResult<usize> {
        let notes = self.store.list(&owner).await.map_err(|error| {
            tracing::error!("Failed to list notes for {}: {}", owner, error);
            error
        })?;

        let count = notes.len();
        {
            let mut inner = self.inner.lock().await;
            inner.owner = Some(owner);
            inner.notes = notes;
            inner.guard_selection();
            if let Some(id) = inner.draft.note_id {
                if inner.state != DraftState::Saving {
                    let synced = inner.synced_copy(id).cloned();
                    if let Some(synced) = synced {
                        inner.state = if inner.draft.title == synced.title
                            && inner.draft.content == synced.content
                        {
                            DraftState::Clean
                        } else {
                            DraftState::Dirty
                        };
                    }
                }
            }
        }
        self.notify();
        Ok(count)
    }

    /// Tear down all note and draft state (session ended or view unmounted).
    /// Unsaved edits are dropped by design.
    pub async fn clear(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.cancel_debounce();
            *inner = EditorInner::default();
        }
        self.notify();
    }

    /// Select a note, flushing a dirty draft first so switching notes never
    /// loses edits. The new note's fields only populate the draft after the
    /// flush save has completed.
    pub async fn select(&self, id: NoteId) {
        self.flush_if_dirty().await;

        {
            let mut inner = self.inner.lock().await;
            inner.cancel_debounce();
            inner.generation = inner.generation.wrapping_add(1);
            match inner.synced_copy(id).cloned() {
                Some(note) => {
                    inner.draft = Draft {
                        note_id: Some(id),
                        title: note.title,
                        content: note.content,
                    };
                    inner.state = DraftState::Clean;
                }
                None => {
                    inner.clear_draft();
                }
            }
        }
        self.notify();
    }

    /// Apply an edit to the draft and restart the autosave debounce.
    ///
    /// Dirtiness is recomputed against the last-synced cache copy, so typing
    /// back to the stored value returns the draft to `Clean` and cancels
    /// the pending save. While a save is in flight no new timer is armed;
    /// the completion notices the newer generation and stays `Dirty`.
    pub async fn edit(&self, field: DraftField, value: String) {
        {
            let mut inner = self.inner.lock().await;
            let Some(id) = inner.draft.note_id else {
                return;
            };
            let Some(synced) = inner.synced_copy(id).cloned() else {
                inner.guard_selection();
                drop(inner);
                self.notify();
                return;
            };

            match field {
                DraftField::Title => inner.draft.title = value,
                DraftField::Content => inner.draft.content = value,
            }
            let dirty =
                inner.draft.title != synced.title || inner.draft.content != synced.content;
            inner.generation = inner.generation.wrapping_add(1);

            if inner.state == DraftState::Saving {
                // Keep the in-flight marker; the stale completion will fall
                // back to Dirty via the generation check.
            } else if dirty {
                inner.state = DraftState::Dirty;
                self.arm_debounce(&mut inner);
            } else {
                inner.state = DraftState::Clean;
                inner.cancel_debounce();
            }
        }
        self.notify();
    }

    /// Save a dirty draft immediately (manual save, note switch, new note).
    pub async fn save_now(&self) {
        self.flush_if_dirty().await;
    }

    /// Create a note under the current user, insert it at the front of the
    /// cache (most-recent-first), and select it.
    pub async fn create_note(&self) -> StoreResult<NoteId> {
        self.flush_if_dirty().await;

        let owner = {
            let inner = self.inner.lock().await;
            inner.owner.clone()
        }
        .ok_or_else(|| StoreError::Permission("no user signed in".to_string()))?;

        let note = self
            .store
            .create(NewNote {
                title: NEW_NOTE_TITLE.to_string(),
                content: String::new(),
                owner_id: owner,
            })
            .await
            .map_err(|error| {
                tracing::error!("Failed to create note: {}", error);
                error
            })?;

        let id = note.id;
        {
            let mut inner = self.inner.lock().await;
            inner.cancel_debounce();
            inner.generation = inner.generation.wrapping_add(1);
            inner.draft = Draft {
                note_id: Some(id),
                title: note.title.clone(),
                content: note.content.clone(),
            };
            inner.state = DraftState::Clean;
            inner.notes.insert(0, note);
        }
        self.notify();
        Ok(id)
    }

    /// Arm the delete confirmation for a note. No mutation happens until
    /// `confirm_delete`.
    pub async fn request_delete(&self, id: NoteId) {
        {
            let mut inner = self.inner.lock().await;
            inner.pending_delete = Some(id);
        }
        self.notify();
    }

    /// Disarm the pending delete with no side effect.
    pub async fn cancel_delete(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.pending_delete = None;
        }
        self.notify();
    }

    /// Issue the store delete for the armed id, drop it from the cache, and
    /// empty the draft if it was selected.
    pub async fn confirm_delete(&self) -> StoreResult<()> {
        let Some(id) = ({
            let mut inner = self.inner.lock().await;
            inner.pending_delete.take()
        }) else {
            return Ok(());
        };

        match self.store.delete(&id).await {
            Ok(()) => {
                let mut inner = self.inner.lock().await;
                inner.notes.retain(|note| note.id != id);
                if inner.draft.note_id == Some(id) {
                    inner.clear_draft();
                }
                drop(inner);
                self.notify();
                Ok(())
            }
            Err(error) => {
                tracing::error!("Failed to delete note {}: {}", id, error);
                self.notify();
                Err(error)
            }
        }
    }

    /// Current state for rendering.
    pub async fn snapshot(&self) -> EditorSnapshot {
        let mut inner = self.inner.lock().await;
        inner.guard_selection();
        EditorSnapshot {
            notes: inner.notes.clone(),
            draft: inner.draft.clone(),
            state: inner.state,
            pending_delete: inner.pending_delete,
        }
    }

    /// Replace the pending debounce with a fresh window measured from now.
    fn arm_debounce(&self, inner: &mut EditorInner) {
        inner.cancel_debounce();
        let generation = inner.generation;
        let window = self.debounce_window;
        let controller = self.clone();
        inner.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            controller.autosave(generation).await;
        }));
    }

    /// Fire a save for the draft as of `generation`. A no-op when newer
    /// edits have arrived or the draft is no longer dirty.
    async fn autosave(&self, generation: u64) {
        let (id, fields) = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation || inner.state != DraftState::Dirty {
                return;
            }
            let Some(id) = inner.draft.note_id else {
                return;
            };
            let Some(synced) = inner.synced_copy(id).cloned() else {
                inner.guard_selection();
                drop(inner);
                self.notify();
                return;
            };

            let mut fields = NoteFields::default();
            if inner.draft.title != synced.title {
                fields.title = Some(inner.draft.title.clone());
            }
            if inner.draft.content != synced.content {
                fields.content = Some(inner.draft.content.clone());
            }
            if fields.is_empty() {
                inner.state = DraftState::Clean;
                drop(inner);
                self.notify();
                return;
            }

            inner.state = DraftState::Saving;
            (id, fields)
        };
        self.notify();

        match self.store.update(&id, fields).await {
            Ok(saved) => {
                let mut inner = self.inner.lock().await;
                if let Some(position) = inner.notes.iter().position(|note| note.id == id) {
                    inner.notes[position] = saved;
                }
                if inner.state == DraftState::Saving {
                    inner.state = if inner.generation == generation {
                        DraftState::Clean
                    } else {
                        // The draft moved on while the write was in flight;
                        // the stale values landed but the draft stays dirty.
                        DraftState::Dirty
                    };
                }
                tracing::debug!("Auto-saved note {}", id);
            }
            Err(error) => {
                tracing::error!("Failed to save note {}: {}", id, error);
                let mut inner = self.inner.lock().await;
                if inner.state == DraftState::Saving {
                    inner.state = DraftState::Dirty;
                }
            }
        }
        self.notify();
    }

    /// Synchronous hand-off used by select/create: cancel the pending timer
    /// and await the save so edits are never lost while switching notes.
    async fn flush_if_dirty(&self) {
        let generation = {
            let mut inner = self.inner.lock().await;
            if inner.state != DraftState::Dirty {
                return;
            }
            inner.cancel_debounce();
            inner.generation
        };
        self.autosave(generation).await;
    }

    fn notify(&self) {
        self.changes.send_modify(|count| *count = count.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StoreCall {
        List(UserId),
        Create(String),
        Update(NoteId, NoteFields),
        Delete(NoteId),
    }

    /// In-memory store recording every call, with optional failure and
    /// latency injection for the update path.
    #[derive(Clone, Default)]
    struct MockStore {
        seed: Arc<StdMutex<Vec<Note>>>,
        calls: Arc<StdMutex<Vec<StoreCall>>>,
        fail_updates: Arc<AtomicBool>,
        update_delay: Arc<StdMutex<Option<Duration>>>,
    }

    impl MockStore {
        fn with_notes(notes: Vec<Note>) -> Self {
            let store = Self::default();
            *store.seed.lock().unwrap() = notes;
            store
        }

        fn calls(&self) -> Vec<StoreCall> {
            self.calls.lock().unwrap().clone()
        }

        fn updates(&self) -> Vec<(NoteId, NoteFields)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    StoreCall::Update(id, fields) => Some((id, fields)),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: StoreCall) {
            self.calls.lock().unwrap().push(call);
        }

        fn remove_from_seed(&self, id: NoteId) {
            self.seed.lock().unwrap().retain(|note| note.id != id);
        }
    }

    impl NoteStore for MockStore {
        async fn list(&self, owner: &UserId) -> StoreResult<Vec<Note>> {
            self.record(StoreCall::List(owner.clone()));
            Ok(self.seed.lock().unwrap().clone())
        }

        async fn create(&self, new: NewNote) -> StoreResult<Note> {
            self.record(StoreCall::Create(new.title.clone()));
            let now = Utc::now();
            Ok(Note {
                id: NoteId::new(),
                title: new.title,
                content: new.content,
                created_at: now,
                updated_at: now,
                owner_id: new.owner_id,
            })
        }

        async fn update(&self, id: &NoteId, fields: NoteFields) -> StoreResult<Note> {
            self.record(StoreCall::Update(*id, fields.clone()));
            let delay = *self.update_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(StoreError::Network("connection reset".to_string()));
            }

            let mut seed = self.seed.lock().unwrap();
            let note = seed
                .iter_mut()
                .find(|note| note.id == *id)
                .ok_or_else(|| StoreError::Unknown(format!("note no longer exists: {id}")))?;
            if let Some(title) = fields.title {
                note.title = title;
            }
            if let Some(content) = fields.content {
                note.content = content;
            }
            note.updated_at = Utc::now();
            Ok(note.clone())
        }

        async fn delete(&self, id: &NoteId) -> StoreResult<()> {
            self.record(StoreCall::Delete(*id));
            self.remove_from_seed(*id);
            Ok(())
        }
    }

    fn owner() -> UserId {
        UserId::from("user-1")
    }

    fn note(title: &str, content: &str) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::new(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            owner_id: owner(),
        }
    }

    async fn controller_with(notes: Vec<Note>) -> (EditorController<MockStore>, MockStore) {
        let store = MockStore::with_notes(notes);
        let controller = EditorController::new(store.clone());
        controller.load_notes(owner()).await.unwrap();
        (controller, store)
    }

    async fn quiesce() {
        // Paused-clock sleep comfortably past the debounce window.
        tokio::time::sleep(Duration::from_millis(1600)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn edit_then_quiescence_saves_exactly_once() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;

        controller.select(id).await;
        assert_eq!(controller.snapshot().await.state, DraftState::Clean);

        controller.edit(DraftField::Title, "B".to_string()).await;
        assert_eq!(controller.snapshot().await.state, DraftState::Dirty);

        quiesce().await;

        let updates = store.updates();
        assert_eq!(
            updates,
            vec![(
                id,
                NoteFields {
                    title: Some("B".to_string()),
                    content: None,
                }
            )]
        );
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.state, DraftState::Clean);
        assert_eq!(snapshot.notes[0].title, "B");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_collapses_into_one_save() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        for value in ["B", "Bc", "Bcd"] {
            controller.edit(DraftField::Title, value.to_string()).await;
            tokio::time::sleep(Duration::from_millis(1000)).await;
        }
        quiesce().await;

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.title.as_deref(), Some("Bcd"));
        assert_eq!(controller.snapshot().await.state, DraftState::Clean);
    }

    #[tokio::test(start_paused = true)]
    async fn select_while_dirty_flushes_previous_note_first() {
        let first = note("A", "x");
        let second = note("Second", "y");
        let (first_id, second_id) = (first.id, second.id);
        let (controller, store) = controller_with(vec![first, second]).await;

        controller.select(first_id).await;
        controller.edit(DraftField::Title, "B".to_string()).await;
        controller.select(second_id).await;

        // The flush save landed before the new note's fields became visible.
        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, first_id);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.selected(), Some(second_id));
        assert_eq!(snapshot.draft.title, "Second");
        assert_eq!(snapshot.state, DraftState::Clean);

        // The cancelled debounce never fires a second save.
        quiesce().await;
        assert_eq!(store.updates().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_save_returns_to_dirty_and_retries_on_next_edit() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        store.fail_updates.store(true, Ordering::SeqCst);
        controller.edit(DraftField::Title, "B".to_string()).await;
        quiesce().await;

        assert_eq!(store.updates().len(), 1);
        assert_eq!(controller.snapshot().await.state, DraftState::Dirty);

        // No automatic retry while the user is idle.
        quiesce().await;
        assert_eq!(store.updates().len(), 1);

        // The next edit restarts the debounce and re-attempts the save.
        store.fail_updates.store(false, Ordering::SeqCst);
        controller.edit(DraftField::Title, "B2".to_string()).await;
        quiesce().await;

        let updates = store.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].1.title.as_deref(), Some("B2"));
        assert_eq!(controller.snapshot().await.state, DraftState::Clean);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_delete_of_selected_note_empties_draft() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        controller.request_delete(id).await;
        assert_eq!(controller.snapshot().await.pending_delete, Some(id));

        controller.confirm_delete().await.unwrap();

        let deletes: Vec<_> = store
            .calls()
            .into_iter()
            .filter(|call| matches!(call, StoreCall::Delete(_)))
            .collect();
        assert_eq!(deletes, vec![StoreCall::Delete(id)]);

        let snapshot = controller.snapshot().await;
        assert!(snapshot.notes.is_empty());
        assert_eq!(snapshot.state, DraftState::Empty);
        assert_eq!(snapshot.selected(), None);
        assert_eq!(snapshot.pending_delete, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_delete_has_no_side_effect() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        controller.request_delete(id).await;
        controller.cancel_delete().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.pending_delete, None);
        assert_eq!(snapshot.notes.len(), 1);
        assert_eq!(snapshot.selected(), Some(id));
        assert!(!store
            .calls()
            .iter()
            .any(|call| matches!(call, StoreCall::Delete(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn deleting_an_unselected_note_keeps_the_draft() {
        let first = note("A", "x");
        let second = note("B", "y");
        let (first_id, second_id) = (first.id, second.id);
        let (controller, _store) = controller_with(vec![first, second]).await;
        controller.select(first_id).await;

        controller.request_delete(second_id).await;
        controller.confirm_delete().await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.selected(), Some(first_id));
        assert_eq!(snapshot.state, DraftState::Clean);
        assert_eq!(snapshot.notes.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_clears_everything_even_when_dirty() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;
        controller.edit(DraftField::Title, "B".to_string()).await;

        controller.clear().await;

        let snapshot = controller.snapshot().await;
        assert!(snapshot.notes.is_empty());
        assert_eq!(snapshot.state, DraftState::Empty);
        assert_eq!(snapshot.draft, Draft::default());

        // The unsaved edit is gone: the cancelled debounce never saves.
        quiesce().await;
        assert!(store.updates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn create_note_inserts_at_front_and_selects() {
        let existing = note("A", "x");
        let (controller, store) = controller_with(vec![existing]).await;

        let id = controller.create_note().await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.notes.len(), 2);
        assert_eq!(snapshot.notes[0].id, id);
        assert_eq!(snapshot.notes[0].title, NEW_NOTE_TITLE);
        assert_eq!(snapshot.selected(), Some(id));
        assert_eq!(snapshot.state, DraftState::Clean);
        assert!(store
            .calls()
            .contains(&StoreCall::Create(NEW_NOTE_TITLE.to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn create_note_flushes_a_dirty_draft_first() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;
        controller.edit(DraftField::Content, "edited".to_string()).await;

        controller.create_note().await.unwrap();

        let calls = store.calls();
        let update_index = calls
            .iter()
            .position(|call| matches!(call, StoreCall::Update(..)))
            .expect("flush save issued");
        let create_index = calls
            .iter()
            .position(|call| matches!(call, StoreCall::Create(_)))
            .expect("create issued");
        assert!(update_index < create_index);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_back_to_synced_value_returns_clean() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        controller.edit(DraftField::Title, "B".to_string()).await;
        assert_eq!(controller.snapshot().await.state, DraftState::Dirty);
        controller.edit(DraftField::Title, "A".to_string()).await;
        assert_eq!(controller.snapshot().await.state, DraftState::Clean);

        quiesce().await;
        assert!(store.updates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn edit_without_selection_is_ignored() {
        let (controller, store) = controller_with(vec![note("A", "x")]).await;

        controller.edit(DraftField::Title, "B".to_string()).await;

        assert_eq!(controller.snapshot().await.state, DraftState::Empty);
        quiesce().await;
        assert!(store.updates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_clears_selection_removed_elsewhere() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        // The note disappears remotely (e.g. deleted from another device).
        store.remove_from_seed(id);
        controller.load_notes(owner()).await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.state, DraftState::Empty);
        assert_eq!(snapshot.selected(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_save_completion_leaves_draft_dirty() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        *store.update_delay.lock().unwrap() = Some(Duration::from_millis(1000));
        controller.edit(DraftField::Title, "B".to_string()).await;

        // Past the debounce window: the save is in flight.
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(controller.snapshot().await.state, DraftState::Saving);

        // A newer edit lands while the write is still in flight. No second
        // timer is armed; the in-flight call is not cancelled.
        controller.edit(DraftField::Content, "y".to_string()).await;

        tokio::time::sleep(Duration::from_millis(1000)).await;

        // The stale write landed in the cache, but the draft stays dirty.
        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0].1,
            NoteFields {
                title: Some("B".to_string()),
                content: None,
            }
        );
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.notes[0].title, "B");
        assert_eq!(snapshot.state, DraftState::Dirty);

        // And stays dirty until the next edit; no automatic retry.
        quiesce().await;
        assert_eq!(store.updates().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn update_carries_only_changed_fields() {
        let first = note("A", "x");
        let id = first.id;
        let (controller, store) = controller_with(vec![first]).await;
        controller.select(id).await;

        controller.edit(DraftField::Content, "x2".to_string()).await;
        quiesce().await;

        let updates = store.updates();
        assert_eq!(
            updates,
            vec![(
                id,
                NoteFields {
                    title: None,
                    content: Some("x2".to_string()),
                }
            )]
        );
    }
}
