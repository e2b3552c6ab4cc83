use std::sync::Arc;

use crate::api::ConversationActions;
use crate::conversation::{Conversation, ConversationId};

pub const DELETE_PROMPT: &str = "Delete this conversation?";

/// Title edit in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: ConversationId,
    pub title: String,
}

/// Blocking error dialog. Closes only through `dismiss`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorModal {
    message: Option<String>,
}

impl ErrorModal {
    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn open(&mut self, message: String) {
        self.message = Some(message);
    }

    fn dismiss(&mut self) {
        self.message = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Renamed,
    /// Blank title: nothing was sent.
    Skipped,
    Failed,
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    NothingPending,
}

/// Rename and delete flows of the conversation sidebar.
pub struct Sidebar {
    actions: Arc<dyn ConversationActions>,
    editing: Option<EditState>,
    pending_delete: Option<ConversationId>,
    error_modal: ErrorModal,
}

impl Sidebar {
    pub fn new(actions: Arc<dyn ConversationActions>) -> Self {
        Sidebar {
            actions,
            editing: None,
            pending_delete: None,
            error_modal: ErrorModal::default(),
        }
    }

    /// Enter edit mode for a conversation, seeded with its current title.
    /// Replaces any edit already in progress.
    pub fn begin_edit(&mut self, conversation: &Conversation) {
        self.editing = Some(EditState {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
        });
    }

    pub fn update_edit(&mut self, title: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.title = title.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    /// Save the edited title. Edit mode is left whatever the outcome;
    /// a rejected rename opens the error modal with the backend's message.
    pub async fn save_edit(&mut self) -> SaveOutcome {
        let Some(edit) = self.editing.take() else {
            return SaveOutcome::NotEditing;
        };

        let title = edit.title.trim();
        if title.is_empty() {
            log::debug!("Blank title for {}, leaving edit mode", edit.id);
            return SaveOutcome::Skipped;
        }

        match self.actions.rename(&edit.id, title).await {
            Ok(()) => SaveOutcome::Renamed,
            Err(e) => {
                log::warn!("Rename of {} failed: {}", edit.id, e);
                self.error_modal.open(e.user_message());
                SaveOutcome::Failed
            }
        }
    }

    /// Ask for confirmation before deleting. Nothing is sent yet.
    pub fn request_delete(&mut self, id: ConversationId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&ConversationId> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        match self.actions.delete(&id).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                log::warn!("Delete of {} failed: {}", id, e);
                self.error_modal.open(e.user_message());
                DeleteOutcome::Failed
            }
        }
    }

    pub fn error_modal(&self) -> &ErrorModal {
        &self.error_modal
    }

    pub fn dismiss_error(&mut self) {
        self.error_modal.dismiss();
    }
}
