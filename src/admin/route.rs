use std::fmt;
use std::str::FromStr;

use crate::models::capitalize;

/// Admin panels addressable from the location fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    Dashboard,
    Documents,
    Projects,
    Donations,
    Institutional,
    Messages,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Documents,
        Route::Projects,
        Route::Donations,
        Route::Institutional,
        Route::Messages,
    ];

    pub const DEFAULT: Route = Route::Dashboard;

    pub fn token(self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Documents => "documentos",
            Route::Projects => "projetos",
            Route::Donations => "doacoes",
            Route::Institutional => "institucional",
            Route::Messages => "mensagens",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Route::Donations => "doações",
            other => other.token(),
        }
    }

    /// Page title shown while the panel is active.
    pub fn title(self) -> String {
        capitalize(self.label())
    }

    /// Id of the panel element.
    pub fn panel_id(self) -> String {
        format!("panel-{}", self.token())
    }

    /// Id of the navigation item highlighted with the panel.
    pub fn nav_id(self) -> String {
        format!("nav-{}", self.token())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|r| r.token() == s)
            .ok_or_else(|| s.to_string())
    }
}
