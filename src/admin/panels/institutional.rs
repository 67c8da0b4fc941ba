use std::sync::Arc;

use async_trait::async_trait;

use crate::admin::router::{Generation, PanelController, Ticket};
use crate::admin::surface::{LoadingGuard, Surface};
use crate::admin::{AdminError, Notice, Route};
use crate::models::institutional::{self, InstitutionalContent, InstitutionalForm};
use crate::store::DocumentStore;

/// Edits the mission, vision and board singleton.
pub struct InstitutionalPanel {
    store: Arc<dyn DocumentStore>,
    surface: Arc<dyn Surface>,
    generation: Generation,
}

impl InstitutionalPanel {
    pub fn new(store: Arc<dyn DocumentStore>, surface: Arc<dyn Surface>, generation: Generation) -> Self {
        Self { store, surface, generation }
    }

    async fn load_for(&self, ticket: &Ticket) -> Result<InstitutionalContent, AdminError> {
        match institutional::load(self.store.as_ref()).await {
            Ok(content) => {
                if ticket.is_current() {
                    self.surface.fill_form(
                        Route::Institutional,
                        vec![
                            ("mission", content.mission.clone()),
                            ("vision", content.vision.clone()),
                            ("board_info", content.board_info.clone()),
                        ],
                    );
                }
                Ok(content)
            }
            Err(e) => {
                log::error!("Failed to load institutional content: {e}");
                if ticket.is_current() {
                    self.surface.notify(Notice::error("Erro ao carregar o conteúdo institucional."));
                }
                Err(AdminError::Remote(e))
            }
        }
    }

    pub async fn load(&self) -> Result<InstitutionalContent, AdminError> {
        let ticket = self.generation.current();
        self.load_for(&ticket).await
    }

    /// Merge the form into the stored content and refill the form.
    pub async fn save(&self, form: &InstitutionalForm) -> Result<(), AdminError> {
        let result = {
            let _loading = LoadingGuard::new(self.surface.as_ref());
            institutional::save(self.store.as_ref(), form).await
        };
        match result {
            Ok(()) => {
                self.surface.notify(Notice::success("Conteúdo institucional atualizado com sucesso!"));
                let _ = self.load().await;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save institutional content: {e}");
                self.surface.notify(Notice::error("Ocorreu um erro ao salvar o conteúdo institucional."));
                Err(AdminError::Remote(e))
            }
        }
    }
}

#[async_trait]
impl PanelController for InstitutionalPanel {
    async fn activate(&self, ticket: Ticket) {
        let _ = self.load_for(&ticket).await;
    }
}
