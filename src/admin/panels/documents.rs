use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::admin::collection::CollectionPanel;
use crate::admin::router::{Generation, PanelController, Ticket};
use crate::admin::surface::Surface;
use crate::admin::{AdminError, Notice, Route};
use crate::models::{Document, DocumentForm, Entity};
use crate::store::DocumentStore;
use crate::upload::{PickerConfig, UploadedFile, Uploader};

pub const NO_FILE: &str = "Nenhum arquivo selecionado.";
const UPLOAD_REQUIRED: &str = "Por favor, escolha e envie um arquivo primeiro.";

/// Document list plus the upload step that precedes creation.
pub struct DocumentsPanel {
    view: CollectionPanel<Document>,
    surface: Arc<dyn Surface>,
    uploader: Arc<dyn Uploader>,
    picker: PickerConfig,
    pending: Mutex<Option<UploadedFile>>,
}

impl DocumentsPanel {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        surface: Arc<dyn Surface>,
        generation: Generation,
        uploader: Arc<dyn Uploader>,
        picker: PickerConfig,
    ) -> Self {
        Self {
            view: CollectionPanel::new(store, Arc::clone(&surface), generation),
            surface,
            uploader,
            picker,
            pending: Mutex::new(None),
        }
    }

    pub fn pending_upload(&self) -> Option<UploadedFile> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_pending(&self, file: Option<UploadedFile>) {
        let label = match &file {
            Some(f) => format!("Arquivo selecionado: {}", f.name),
            None => NO_FILE.to_string(),
        };
        self.surface.set_file_info(&label, file.is_some());
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = file;
    }

    /// Open the upload picker; the form stays disabled until it resolves.
    /// A dismissed picker keeps any earlier selection.
    pub async fn choose_file(&self) -> Result<Option<UploadedFile>, AdminError> {
        self.surface.set_form_enabled(Route::Documents, false);
        let picked = self.uploader.open_picker(&self.picker).await;
        self.surface.set_form_enabled(Route::Documents, true);

        match picked {
            Ok(Some(file)) => {
                log::info!("Upload finished: {} ({})", file.name, file.unique_id);
                self.set_pending(Some(file.clone()));
                Ok(Some(file))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                log::error!("{e}");
                self.surface.notify(Notice::error("Falha no envio do arquivo."));
                Err(AdminError::Upload(e))
            }
        }
    }

    /// Save the document record for the pending upload.
    pub async fn create(&self, form: &DocumentForm) -> Result<String, AdminError> {
        let Some(file) = self.pending_upload() else {
            return Err(self.view.reject(vec![UPLOAD_REQUIRED.to_string()]));
        };
        let mut fields = Document::validate(form).map_err(|errors| self.view.reject(errors))?;
        fields.insert("fileURL".into(), Value::from(file.content_url));
        fields.insert("fileName".into(), Value::from(file.name));
        fields.insert("fileUUID".into(), Value::from(file.unique_id));

        let id = self.view.insert(fields).await?;
        self.set_pending(None);
        Ok(id)
    }

    pub async fn update(&self, id: &str, form: &DocumentForm) -> Result<(), AdminError> {
        self.view.update(id, form).await
    }

    /// Removes the record only; the uploaded file stays with the upload service.
    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.view.delete(id).await
    }

    pub async fn list(&self) -> Result<Vec<Document>, AdminError> {
        self.view.list().await
    }
}

#[async_trait]
impl PanelController for DocumentsPanel {
    async fn activate(&self, ticket: Ticket) {
        let _ = self.view.list_for(&ticket).await;
    }

    /// Leaving the panel abandons a half-filled form.
    fn teardown(&self) {
        if self.pending_upload().is_some() {
            self.set_pending(None);
        }
    }
}
