//! systemd-logind brightness backend.
//!
//! Uses zbus's blocking API. The session object path is resolved once, before
//! the ramp starts, and every submission goes through the same session proxy.

use zbus::blocking::Connection;
use zbus::zvariant::OwnedObjectPath;

use super::BrightnessBackend;
use crate::constants::{BACKLIGHT_SUBSYSTEM, SESSION_ID_ENV};
use crate::error::BrightnessError;
use crate::logger::Log;

/// D-Bus proxy trait for the systemd-logind Manager interface.
#[zbus::proxy(
    interface = "org.freedesktop.login1.Manager",
    default_service = "org.freedesktop.login1",
    default_path = "/org/freedesktop/login1"
)]
trait LogindManager {
    /// Object path of the session with the given id.
    fn get_session(&self, session_id: &str) -> zbus::Result<OwnedObjectPath>;

    /// All sessions as `(id, uid, user name, seat id, object path)`.
    fn list_sessions(&self) -> zbus::Result<Vec<(String, u32, String, String, OwnedObjectPath)>>;
}

/// D-Bus proxy trait for a single logind session.
#[zbus::proxy(
    interface = "org.freedesktop.login1.Session",
    default_service = "org.freedesktop.login1"
)]
trait LogindSession {
    fn set_brightness(&self, subsystem: &str, name: &str, brightness: u32) -> zbus::Result<()>;
}

/// One entry of logind's `ListSessions` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub uid: u32,
    pub seat: String,
}

/// Pick the first session of `uid` that is attached to a seat.
pub fn select_user_session(sessions: &[SessionInfo], uid: u32) -> Option<&SessionInfo> {
    sessions.iter().find(|s| s.uid == uid && !s.seat.is_empty())
}

fn discover_session_id(manager: &LogindManagerProxyBlocking<'_>) -> Result<String, BrightnessError> {
    Log::log_debug(&format!(
        "{} not set, iterating over all sessions instead...",
        SESSION_ID_ENV
    ));
    let sessions: Vec<SessionInfo> = manager
        .list_sessions()?
        .into_iter()
        .map(|(id, uid, _user, seat, _path)| SessionInfo { id, uid, seat })
        .collect();

    let uid = nix::unistd::getuid().as_raw();
    select_user_session(&sessions, uid)
        .map(|s| s.id.clone())
        .ok_or_else(|| {
            BrightnessError::Backend(format!("could not find session with seat for user {}", uid))
        })
}

/// Resolve the logind session object path used to authorize brightness changes.
///
/// The session id is taken from `explicit_id`, then `$XDG_SESSION_ID`, and
/// finally discovered through `ListSessions`.
pub fn resolve_session(
    connection: &Connection,
    explicit_id: Option<&str>,
) -> Result<OwnedObjectPath, BrightnessError> {
    let manager = LogindManagerProxyBlocking::new(connection)?;

    let session_id = match explicit_id {
        Some(id) => id.to_string(),
        None => match std::env::var(SESSION_ID_ENV) {
            Ok(id) if !id.is_empty() => id,
            _ => discover_session_id(&manager)?,
        },
    };
    Log::log_debug(&format!("Session ID: {}", session_id));

    let path = manager.get_session(&session_id)?;
    Log::log_debug(&format!("Session object path: {}", path.as_str()));
    Ok(path)
}

/// A [BrightnessBackend] which submits brightness through a logind session.
pub struct LogindBackend {
    session: LogindSessionProxyBlocking<'static>,
}

impl LogindBackend {
    /// Connect to the system bus and resolve the session to act on.
    pub fn connect(explicit_session_id: Option<&str>) -> Result<Self, BrightnessError> {
        let connection = Connection::system().map_err(|e| {
            BrightnessError::Backend(format!("failed to connect to system bus: {}", e))
        })?;
        let path = resolve_session(&connection, explicit_session_id)?;
        Self::for_session(&connection, path)
    }

    /// Build a backend for an already resolved session path.
    pub fn for_session(
        connection: &Connection,
        session_path: OwnedObjectPath,
    ) -> Result<Self, BrightnessError> {
        let session = LogindSessionProxyBlocking::builder(connection)
            .path(session_path.into_inner())?
            .build()?;
        Ok(Self { session })
    }
}

impl BrightnessBackend for LogindBackend {
    fn apply_brightness(&mut self, device: &str, value: u32) -> Result<(), BrightnessError> {
        Ok(self
            .session
            .set_brightness(BACKLIGHT_SUBSYSTEM, device, value)?)
    }

    fn backend_name(&self) -> &'static str {
        "logind"
    }
}
