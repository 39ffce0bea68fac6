//! Route gating
//!
//! One declarative policy table maps every route to the access level it
//! requires; the navigation layer evaluates it once per transition. This
//! replaces the original's per-screen conditional rendering.

use chrono::{DateTime, Utc};
use shared::Role;

use crate::session::SessionStore;

/// Screens reachable from the navigation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Inventario,
    NuevoVino,
    EditarVino,
    Movimientos,
    Historial,
    DetallesHistorial,
    MasVendidos,
    Usuarios,
    NuevoUsuario,
    Configuraciones,
    Login,
    Unauthorized,
}

/// Access level a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    /// Authenticated with the administrator role
    Admin,
}

/// What the navigation layer should do with a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

/// The policy table. User management is admin-only; everything else behind
/// the login wall is open to any authenticated account.
pub fn access_for(route: Route) -> Access {
    match route {
        Route::Login | Route::Unauthorized => Access::Public,
        Route::Usuarios | Route::NuevoUsuario => Access::Admin,
        Route::Home
        | Route::Inventario
        | Route::NuevoVino
        | Route::EditarVino
        | Route::Movimientos
        | Route::Historial
        | Route::DetallesHistorial
        | Route::MasVendidos
        | Route::Configuraciones => Access::Authenticated,
    }
}

/// Evaluate a transition against the current session
pub fn evaluate(route: Route, session: &SessionStore, now: DateTime<Utc>) -> RouteDecision {
    match access_for(route) {
        Access::Public => RouteDecision::Allow,
        Access::Authenticated => {
            if session.is_authenticated(now) {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToLogin
            }
        }
        Access::Admin => {
            if !session.is_authenticated(now) {
                RouteDecision::RedirectToLogin
            } else if session.role_id() == Some(Role::Admin.id()) {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToUnauthorized
            }
        }
    }
}
