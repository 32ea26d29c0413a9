// ── Edit session state ──
//
// Which record the UI is editing, whether it is adding a new one, and
// whether a save is in flight. Plain state, no guarded transitions;
// changes are pushed to subscribers through a `watch` channel.

use tokio::sync::watch;

use crate::record::Record;

/// Snapshot of the edit session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditState {
    /// Record currently open in the edit form.
    pub editing: Option<Record>,
    /// Whether the add form is open.
    pub adding: bool,
    /// Whether an upsert is in flight.
    pub saving_item: bool,
}

/// Observable edit session shared between the UI and the store.
pub struct EditSession {
    state: watch::Sender<EditState>,
}

impl EditSession {
    pub fn new() -> Self {
        let (state, _) = watch::channel(EditState::default());
        Self { state }
    }

    /// Current state (cloned snapshot).
    pub fn state(&self) -> EditState {
        self.state.borrow().clone()
    }

    pub fn editing(&self) -> Option<Record> {
        self.state.borrow().editing.clone()
    }

    pub fn is_adding(&self) -> bool {
        self.state.borrow().adding
    }

    pub fn is_saving(&self) -> bool {
        self.state.borrow().saving_item
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<EditState> {
        self.state.subscribe()
    }

    /// Open `record` in the edit form.
    pub fn start_edit(&self, record: Record) {
        self.state.send_modify(|s| {
            s.editing = Some(record);
            s.adding = false;
        });
    }

    /// Open the add form. Any editing target is dropped.
    pub fn start_add(&self) {
        self.state.send_modify(|s| {
            s.editing = None;
            s.adding = true;
        });
    }

    /// Back to the list view.
    pub fn return_to_list(&self) {
        self.state.send_modify(|s| {
            s.editing = None;
            s.adding = false;
        });
    }

    /// Mark a save as in flight until the returned guard is dropped.
    pub(crate) fn begin_save(&self) -> SavingGuard<'_> {
        self.state.send_modify(|s| s.saving_item = true);
        SavingGuard { session: self }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears `saving_item` when dropped, whether the save succeeded, failed,
/// or its future was cancelled.
pub(crate) struct SavingGuard<'a> {
    session: &'a EditSession,
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.session.state.send_modify(|s| s.saving_item = false);
    }
}
