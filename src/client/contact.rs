//! Contact details editor
//!
//! Edits apply locally at once; the whole document is saved after the editor
//! has stopped typing for the debounce window.

use super::api::ApiClient;
use super::debounce::Debouncer;
use super::error::ClientError;
use crate::entities::ContactInfo;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

const SAVE_KEY: &str = "contact-info";

#[derive(Debug, Default)]
struct EditorState {
    info: ContactInfo,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactInfoEditor {
    api: ApiClient,
    state: Arc<RwLock<EditorState>>,
    debouncer: Debouncer,
}

impl ContactInfoEditor {
    pub fn new(api: ApiClient, debounce: Duration) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(EditorState::default())),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub async fn load(&self) -> Result<(), ClientError> {
        let result = self.api.contact_info().await;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(info) => {
                state.info = info;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Change a field locally and schedule a save
    pub fn edit(&self, f: impl FnOnce(&mut ContactInfo)) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut state.info);
        }

        let api = self.api.clone();
        let state = self.state.clone();
        self.debouncer.schedule(SAVE_KEY, async move {
            let info = state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .info
                .clone();

            let result = api.put_contact_info(&info).await;
            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            match result {
                Ok(_) => state.error = None,
                Err(e) => {
                    tracing::warn!("saving contact info failed: {}", e);
                    state.error = Some(e.to_string());
                }
            }
        });
    }

    pub fn info(&self) -> ContactInfo {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .info
            .clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .clone()
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.has_pending()
    }
}
