//! The user login event and its listeners
//!
//! Wires an [`Event`] for logins, subscribes the configured listeners and
//! dispatches each configured login through it. Listeners write into a shared
//! [`LoginReport`].

use crate::config::{AppConfig, ListenersConfig};
use crate::report::{ListenerKind, LoginReport};
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;
use typed_event::Event;

/// Returned by a listener that refuses a login
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user '{username}' is banned")]
pub struct LoginRejected {
    pub username: String,
}

/// Signature shared by every login listener: `(username, user_id)`
pub type LoginCallback = dyn Fn(&str, u64) -> Result<(), LoginRejected>;

pub type LoginEvent = Event<LoginCallback>;

type SharedReport = Rc<RefCell<LoginReport>>;

pub fn welcome_user(report: SharedReport) -> Rc<LoginCallback> {
    Rc::new(move |username: &str, user_id: u64| -> Result<(), LoginRejected> {
        report.borrow_mut().record(
            ListenerKind::Welcome,
            username,
            user_id,
            format!("Welcome, {}! Your user ID is {}.", username, user_id),
        );
        Ok(())
    })
}

pub fn audit_login(report: SharedReport) -> Rc<LoginCallback> {
    Rc::new(move |username: &str, user_id: u64| -> Result<(), LoginRejected> {
        report.borrow_mut().record(
            ListenerKind::Audit,
            username,
            user_id,
            format!(
                "[{}] logged in with ID [{}] at {}",
                username,
                user_id,
                Utc::now().to_rfc3339()
            ),
        );
        Ok(())
    })
}

/// Refuses logins from any of the `banned` usernames
pub fn reject_banned(banned: Vec<String>) -> Rc<LoginCallback> {
    Rc::new(move |username: &str, _user_id: u64| {
        if banned.iter().any(|b| b == username) {
            return Err(LoginRejected {
                username: username.to_string(),
            });
        }
        Ok(())
    })
}

/// Subscribe the listeners enabled in `listeners`
///
/// The ban guard goes first so that a rejected login never reaches the other
/// listeners.
pub fn subscribe_listeners(event: &LoginEvent, listeners: &ListenersConfig, report: &SharedReport) {
    if !listeners.reject_banned.is_empty() {
        log::debug!("Subscribing ban guard for {:?}", listeners.reject_banned);
        event.subscribe(reject_banned(listeners.reject_banned.clone()));
    }
    if listeners.welcome {
        log::debug!("Subscribing welcome listener");
        event.subscribe(welcome_user(Rc::clone(report)));
    }
    if listeners.audit {
        log::debug!("Subscribing audit listener");
        event.event_listener(audit_login(Rc::clone(report)));
    }
}

/// Dispatch every configured login and collect the outcome
pub fn run(config: &AppConfig) -> LoginReport {
    let report: SharedReport = Rc::new(RefCell::new(LoginReport::default()));
    let on_user_login = LoginEvent::new();

    subscribe_listeners(&on_user_login, &config.listeners, &report);
    log::info!("Login event has {} listener(s)", on_user_login.len());

    for login in &config.logins {
        log::info!("Dispatching login for user '{}'", login.username);

        match on_user_login.dispatch((login.username.as_str(), login.user_id)) {
            Ok(()) => log::debug!(
                "User '{}' now has {} report entr(ies)",
                login.username,
                report.borrow().entries_for(&login.username).count()
            ),
            Err(rejected) => {
                log::warn!("Login for user '{}' rejected: {}", login.username, rejected);
                report
                    .borrow_mut()
                    .reject(&login.username, login.user_id, rejected.to_string());
            }
        }
    }

    let collected = report.borrow().clone();
    collected
}
