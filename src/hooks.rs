use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::config::AddonConfig;
use crate::models::{FieldNote, Note};
use crate::notion::{NotionPublisher, PublishOutcome};

/// Future returned by a note-added callback
pub type HookFuture = Pin<Box<dyn Future<Output = ()>>>;

type NoteAddedCallback = Box<dyn Fn(FieldNote) -> HookFuture>;

/// Host-side list of note-added callbacks, fired in registration order
#[derive(Default)]
pub struct NoteAddedHooks {
    callbacks: Vec<NoteAddedCallback>,
}

impl NoteAddedHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, callback: F)
    where
        F: Fn(FieldNote) -> HookFuture + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Fire every callback for a newly added note
    pub async fn fire(&self, note: &FieldNote) {
        for callback in &self.callbacks {
            callback(note.clone()).await;
        }
    }
}

/// Routes newly added notes of the configured type to the publisher
pub struct NoteAddedBinding {
    target_note_type: String,
    publisher: NotionPublisher,
}

impl NoteAddedBinding {
    pub fn new(target_note_type: impl Into<String>, publisher: NotionPublisher) -> Self {
        Self {
            target_note_type: target_note_type.into(),
            publisher,
        }
    }

    pub fn from_addon(config: &AddonConfig) -> Self {
        Self::new(
            config.target_note_type.clone(),
            NotionPublisher::from_addon(config),
        )
    }

    /// Whether notes of this type are handled; an unset target matches nothing
    pub fn matches<N: Note + ?Sized>(&self, note: &N) -> bool {
        !self.target_note_type.is_empty() && note.note_type() == self.target_note_type
    }

    /// Note-added callback body. Returns `None` when the note type is ignored.
    pub async fn on_note_added<N: Note + ?Sized>(&self, note: &N) -> Option<PublishOutcome> {
        if !self.matches(note) {
            debug!("Ignoring note of type {:?}", note.note_type());
            return None;
        }
        Some(self.publisher.publish(note).await)
    }

    /// Register this binding into a host dispatch table
    pub fn register(self: Arc<Self>, hooks: &mut NoteAddedHooks) {
        hooks.register(move |note| {
            let binding = Arc::clone(&self);
            Box::pin(async move {
                binding.on_note_added(&note).await;
            })
        });
    }
}
