//! Fragment-driven panel dispatch.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::surface::Surface;
use super::{Notice, Route};

/// Monotonic navigation counter shared by the router and its panels.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new navigation; every earlier ticket goes stale.
    pub fn advance(&self) -> Ticket {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { id, generation: self.clone() }
    }

    /// Ticket for whatever navigation is current right now.
    pub fn current(&self) -> Ticket {
        Ticket { id: self.0.load(Ordering::SeqCst), generation: self.clone() }
    }
}

/// Proof that a piece of work belongs to a particular navigation.
#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    generation: Generation,
}

impl Ticket {
    /// False once the admin navigated elsewhere; output must then be dropped.
    pub fn is_current(&self) -> bool {
        self.generation.0.load(Ordering::SeqCst) == self.id
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A panel's loader and its cleanup hook.
#[async_trait]
pub trait PanelController: Send + Sync {
    /// Fetch and render the panel's data. Writes must be skipped once
    /// `ticket` is stale.
    async fn activate(&self, ticket: Ticket);

    /// Called when the router leaves this panel.
    fn teardown(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    Unknown(String),
    Unregistered(Route),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Unknown(token) => write!(f, "Unknown route: {token}"),
            RouteError::Unregistered(route) => write!(f, "No panel registered for route: {route}"),
        }
    }
}

/// The loader run started by a navigation.
pub type Activation = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Resolve a location fragment to a route. Empty means the default panel.
pub fn resolve(fragment: &str) -> Result<Route, RouteError> {
    let token = fragment.trim().trim_start_matches('#').trim();
    if token.is_empty() {
        return Ok(Route::DEFAULT);
    }
    token.parse::<Route>().map_err(RouteError::Unknown)
}

pub struct Router {
    panels: HashMap<Route, Arc<dyn PanelController>>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    active: Option<Route>,
}

impl Router {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            panels: HashMap::new(),
            surface,
            generation: Generation::new(),
            active: None,
        }
    }

    /// Handle panels use to obtain tickets after the initial activation.
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    pub fn register(&mut self, route: Route, panel: Arc<dyn PanelController>) {
        self.panels.insert(route, panel);
    }

    pub fn active(&self) -> Option<Route> {
        self.active
    }

    /// Switch the visible panel and return its loader run.
    ///
    /// The visible state changes before this returns; the loader only runs
    /// when the returned future is polled, so a caller can navigate again
    /// before an earlier loader finishes. The earlier loader's output is
    /// then discarded.
    pub fn navigate(&mut self, fragment: &str) -> Result<Activation, RouteError> {
        let resolved = resolve(fragment).and_then(|route| match self.panels.get(&route) {
            Some(panel) => Ok((route, Arc::clone(panel))),
            None => Err(RouteError::Unregistered(route)),
        });
        let (route, panel) = match resolved {
            Ok(found) => found,
            Err(e) => {
                log::warn!("{e}");
                self.surface.notify(Notice::error(format!("Página não encontrada: {}", fragment.trim())));
                return Err(e);
            }
        };

        if let Some(previous) = self.active.and_then(|r| self.panels.get(&r)) {
            previous.teardown();
        }
        let ticket = self.generation.advance();
        self.active = Some(route);

        self.surface.show_panel(route);
        self.surface.highlight_nav(route);
        self.surface.set_title(&route.title());
        log::debug!("navigated to {route} (generation {})", ticket.id());

        Ok(Box::pin(async move { panel.activate(ticket).await }))
    }

    /// Navigate and wait for the loader to finish.
    pub async fn go(&mut self, fragment: &str) -> Result<Route, RouteError> {
        let activation = self.navigate(fragment)?;
        let route = self.active.ok_or_else(|| RouteError::Unknown(fragment.to_string()))?;
        activation.await;
        Ok(route)
    }
}
