//! Pre-navigation authorization check.

use super::{RouteMatch, RouteName};

/// Outcome of consulting the guard for one transition.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GuardOutcome {
    Proceed,
    RedirectToLogin,
    RedirectToLanding,
}

/// Decide whether navigation to the target may proceed.
///
/// Protected routes send anonymous visitors to the login page, and signed-in
/// users asking for the login page are sent to the dashboard instead.
///
pub fn guard(target: &RouteMatch, is_logged_in: bool) -> GuardOutcome {
    if target.requires_auth && !is_logged_in {
        GuardOutcome::RedirectToLogin
    } else if target.name == RouteName::Login && is_logged_in {
        GuardOutcome::RedirectToLanding
    } else {
        GuardOutcome::Proceed
    }
}
