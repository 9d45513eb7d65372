//! Fire-and-forget auth event hooks: registered listeners are told about
//! login successes (with the client address), login failures and logouts.
//! Delivery is best-effort and never affects the request's outcome.

use actix_web::HttpRequest;
use log::{info, warn};

pub trait AuthListener: Send + Sync {
    fn on_login(&self, username: &str, ip: &str);
    fn on_login_failed(&self, username: &str);
    fn on_logout(&self, username: &str);
}

pub struct AuthEvents {
    listeners: Vec<Box<dyn AuthListener>>,
}

impl AuthEvents {
    pub fn register(&mut self, listener: Box<dyn AuthListener>) {
        self.listeners.push(listener);
    }

    pub fn login(&self, username: &str, ip: &str) {
        for listener in &self.listeners {
            listener.on_login(username, ip);
        }
    }

    pub fn login_failed(&self, username: &str) {
        for listener in &self.listeners {
            listener.on_login_failed(username);
        }
    }

    pub fn logout(&self, username: &str) {
        for listener in &self.listeners {
            listener.on_logout(username);
        }
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self {
            listeners: vec![Box::new(LogListener)],
        }
    }
}

pub struct LogListener;

impl AuthListener for LogListener {
    fn on_login(&self, username: &str, ip: &str) {
        info!("User {} logged in. IP: {}", username, ip);
    }

    fn on_login_failed(&self, username: &str) {
        warn!("Unsuccessful login attempt for username: {}", username);
    }

    fn on_logout(&self, username: &str) {
        info!("User {} logged out", username);
    }
}

/// The visitor's address: first entry of `X-Forwarded-For` when present,
/// otherwise the peer address of the connection.
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For").and_then(|v| v.to_str().ok()) {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_owned();
        }
    }
    req.peer_addr().map(|addr| addr.ip().to_string()).unwrap_or_else(|| "unknown".to_owned())
}
