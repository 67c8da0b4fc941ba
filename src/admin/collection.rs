//! Generic list/create/update/delete view over one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::router::{Generation, PanelController, Ticket};
use super::surface::{LoadingGuard, Row, Surface, TableBody};
use super::{AdminError, Notice, Route};
use crate::models::{self, Editable, Entity};
use crate::store::{DocumentStore, Fields};

/// User-facing wording for one collection.
pub struct EntityText {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub confirm_delete: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
    pub load_failed: &'static str,
}

/// An entity that has an admin list view.
pub trait Listed: Entity {
    const ROUTE: Route;
    const COLUMNS: &'static [&'static str];
    const TEXT: EntityText;

    fn row(&self) -> Row;
}

pub struct CollectionPanel<E: Listed> {
    store: Arc<dyn DocumentStore>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Listed> CollectionPanel<E> {
    pub fn new(store: Arc<dyn DocumentStore>, surface: Arc<dyn Surface>, generation: Generation) -> Self {
        Self { store, surface, generation, _entity: PhantomData }
    }

    /// Reload and render the list for the current navigation.
    pub async fn list(&self) -> Result<Vec<E>, AdminError> {
        let ticket = self.generation.current();
        self.list_for(&ticket).await
    }

    pub async fn list_for(&self, ticket: &Ticket) -> Result<Vec<E>, AdminError> {
        if ticket.is_current() {
            self.surface.render_table(E::ROUTE, TableBody::Loading);
        }
        match models::find_all::<E>(self.store.as_ref()).await {
            Ok(items) => {
                if !ticket.is_current() {
                    log::debug!("discarding stale {} list", E::COLLECTION);
                    return Ok(items);
                }
                let body = if items.is_empty() {
                    TableBody::Empty
                } else {
                    TableBody::Rows(items.iter().map(E::row).collect())
                };
                self.surface.render_table(E::ROUTE, body);
                Ok(items)
            }
            Err(e) => {
                log::error!("Failed to list {}: {e}", E::COLLECTION);
                if ticket.is_current() {
                    self.surface.render_table(E::ROUTE, TableBody::Failed(E::TEXT.load_failed.to_string()));
                }
                Err(AdminError::Remote(e))
            }
        }
    }

    pub async fn create(&self, form: &E::Form) -> Result<String, AdminError> {
        let fields = E::validate(form).map_err(|errors| self.reject(errors))?;
        self.insert(fields).await
    }

    /// Persist fields that already passed validation, then reload the list.
    pub(crate) async fn insert(&self, fields: Fields) -> Result<String, AdminError> {
        let result = {
            let _loading = LoadingGuard::new(self.surface.as_ref());
            models::insert::<E>(self.store.as_ref(), fields).await
        };
        match result {
            Ok(id) => {
                self.surface.notify(Notice::success(E::TEXT.created));
                let _ = self.list().await;
                Ok(id)
            }
            Err(e) => {
                log::error!("Failed to create in {}: {e}", E::COLLECTION);
                self.surface.notify(Notice::error(E::TEXT.save_failed));
                Err(AdminError::Remote(e))
            }
        }
    }

    /// Ask for confirmation, then remove the record and reload the list.
    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        if !self.surface.confirm(E::TEXT.confirm_delete) {
            return Err(AdminError::Cancelled);
        }
        let result = {
            let _loading = LoadingGuard::new(self.surface.as_ref());
            self.store.delete(E::COLLECTION, id).await
        };
        match result {
            Ok(()) => {
                log::info!("Deleted {id} from {}", E::COLLECTION);
                self.surface.notify(Notice::success(E::TEXT.deleted));
                let _ = self.list().await;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete {id} from {}: {e}", E::COLLECTION);
                self.surface.notify(Notice::error(E::TEXT.delete_failed));
                Err(AdminError::Remote(e))
            }
        }
    }

    /// Report validation errors without touching the store.
    pub(crate) fn reject(&self, errors: Vec<String>) -> AdminError {
        self.surface.notify(Notice::error(errors.join(" ")));
        AdminError::Validation(errors)
    }
}

impl<E: Listed + Editable> CollectionPanel<E> {
    pub async fn update(&self, id: &str, form: &E::EditForm) -> Result<(), AdminError> {
        let fields = E::validate_edit(form).map_err(|errors| self.reject(errors))?;
        let result = {
            let _loading = LoadingGuard::new(self.surface.as_ref());
            self.store.update(E::COLLECTION, id, fields).await
        };
        match result {
            Ok(()) => {
                self.surface.notify(Notice::success(E::TEXT.updated));
                let _ = self.list().await;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to update {id} in {}: {e}", E::COLLECTION);
                self.surface.notify(Notice::error(E::TEXT.save_failed));
                Err(AdminError::Remote(e))
            }
        }
    }
}

#[async_trait]
impl<E: Listed> PanelController for CollectionPanel<E> {
    async fn activate(&self, ticket: Ticket) {
        let _ = self.list_for(&ticket).await;
    }
}
