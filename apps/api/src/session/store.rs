//! In-memory authoring sessions: two optional image handles, a config, and the live
//! preview controller.
//!
//! The store is the single owner of every `ImageHandle` and of each session's
//! `SliderController`. All mutation happens under the write lock, so a session has at
//! most one active gesture.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interaction::geometry::Bounds;
use crate::interaction::gesture::{PointerEvent, SliderController, SliderView};
use crate::interaction::labels::LabelPolicy;
use crate::models::slider::{ImageHandle, ImageSlot, SliderConfig};

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub before: Option<ImageHandle>,
    pub after: Option<ImageHandle>,
    pub config: SliderConfig,
    pub preview: SliderController,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(config: SliderConfig, labels: LabelPolicy) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            before: None,
            after: None,
            preview: SliderController::new(&config, labels),
            config,
            created_at: now,
            updated_at: now,
        }
    }

    fn slot_mut(&mut self, slot: ImageSlot) -> &mut Option<ImageHandle> {
        match slot {
            ImageSlot::Before => &mut self.before,
            ImageSlot::After => &mut self.after,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Both handles, or the first missing slot.
    pub fn export_inputs(&self) -> Result<(&ImageHandle, &ImageHandle), AppError> {
        let before = self
            .before
            .as_ref()
            .ok_or(AppError::MissingImage(ImageSlot::Before))?;
        let after = self
            .after
            .as_ref()
            .ok_or(AppError::MissingImage(ImageSlot::After))?;
        Ok((before, after))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            before: self.before.as_ref().map(ImageSummary::from),
            after: self.after.as_ref().map(ImageSummary::from),
            config: self.config.clone(),
            ready_to_export: self.before.is_some() && self.after.is_some(),
            preview: self.preview.view(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Handle metadata returned to clients; the handle itself is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub media_type: Option<String>,
    pub handle_bytes: usize,
}

impl From<&ImageHandle> for ImageSummary {
    fn from(handle: &ImageHandle) -> Self {
        Self {
            media_type: handle.media_type().map(str::to_string),
            handle_bytes: handle.byte_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub before: Option<ImageSummary>,
    pub after: Option<ImageSummary>,
    pub config: SliderConfig,
    pub ready_to_export: bool,
    pub preview: SliderView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    labels: LabelPolicy,
}

impl SessionStore {
    pub fn new(labels: LabelPolicy) -> Self {
        Self {
            sessions: Arc::default(),
            labels,
        }
    }

    pub async fn create(&self, config: SliderConfig) -> SessionSummary {
        let session = Session::new(config, self.labels);
        let summary = session.summary();
        self.sessions.write().await.insert(session.id, session);
        info!(session_id = %summary.id, "Session created");
        summary
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| not_found(id))?;
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Runs `f` against a session under the read lock.
    pub async fn read<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        f(session)
    }

    async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        Ok(f(session))
    }

    pub async fn summary(&self, id: Uuid) -> Result<SessionSummary, AppError> {
        self.read(id, |s| Ok(s.summary())).await
    }

    /// Upload or re-upload. The preview position is left untouched.
    pub async fn set_image(
        &self,
        id: Uuid,
        slot: ImageSlot,
        handle: ImageHandle,
    ) -> Result<SessionSummary, AppError> {
        self.update(id, |s| {
            *s.slot_mut(slot) = Some(handle);
            debug!(session_id = %id, %slot, "Image set");
            s.summary()
        })
        .await
    }

    pub async fn remove_image(&self, id: Uuid, slot: ImageSlot) -> Result<SessionSummary, AppError> {
        self.update(id, |s| {
            *s.slot_mut(slot) = None;
            debug!(session_id = %id, %slot, "Image removed");
            s.summary()
        })
        .await
    }

    /// Exchanges the before and after handles. Config and position are kept.
    pub async fn swap(&self, id: Uuid) -> Result<SessionSummary, AppError> {
        self.update(id, |s| {
            std::mem::swap(&mut s.before, &mut s.after);
            debug!(session_id = %id, "Images swapped");
            s.summary()
        })
        .await
    }

    /// Replaces the config and re-initializes the preview from it.
    pub async fn set_config(
        &self,
        id: Uuid,
        config: SliderConfig,
    ) -> Result<SessionSummary, AppError> {
        self.update(id, |s| {
            s.preview.reinitialize(&config);
            s.config = config;
            s.summary()
        })
        .await
    }

    pub async fn preview(&self, id: Uuid) -> Result<SliderView, AppError> {
        self.read(id, |s| Ok(s.preview.view())).await
    }

    pub async fn apply_pointer(
        &self,
        id: Uuid,
        event: PointerEvent,
        bounds: &Bounds,
    ) -> Result<SliderView, AppError> {
        self.update(id, |s| {
            s.preview.handle(event, bounds);
            s.preview.view()
        })
        .await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
