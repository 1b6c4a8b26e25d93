use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;
use uuid::Uuid;

use super::{CatalogState, CourseStore};
use crate::view::{lock, Debouncer, EditDialog, ListView};

pub const SESSION_COOKIE: &str = "session";
/// Sessions untouched for this long are dropped
pub const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);
pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Everything one browser has open: its list, its pending search input and the edit dialog, if
/// any.
#[derive(Debug)]
pub struct Session {
    pub list: Mutex<ListView>,
    pub search: Debouncer,
    dialog: Mutex<Option<EditDialog>>,
    last_seen: Mutex<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            list: Mutex::default(),
            search: Debouncer::default(),
            dialog: Mutex::default(),
            last_seen: Mutex::new(Instant::now()),
        }
    }
}

impl Session {
    pub fn list(&self) -> MutexGuard<'_, ListView> {
        lock(&self.list)
    }

    pub fn open_dialog(&self, dialog: EditDialog) {
        *lock(&self.dialog) = Some(dialog);
    }

    pub fn take_dialog(&self) -> Option<EditDialog> {
        lock(&self.dialog).take()
    }

    fn touch(&self) {
        *lock(&self.last_seen) = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*lock(&self.last_seen))
    }
}

#[derive(Debug, Default)]
pub struct Sessions {
    sessions: Mutex<HashMap<Uuid, Arc<Session>>>,
}

impl Sessions {
    /// Looks up the session for `id`. Without a cookie, or with one naming a session this server
    /// does not know, a new session under a fresh id is started.
    pub fn resolve(&self, id: Option<Uuid>) -> SessionHandle {
        let mut sessions = lock(&self.sessions);
        let known = id.and_then(|id| sessions.get(&id).map(|session| (id, session.clone())));
        if let Some((id, session)) = known {
            session.touch();
            return SessionHandle {
                id,
                fresh: false,
                session,
            };
        }

        let id = Uuid::new_v4();
        debug!(%id, "starting session");
        let session = Arc::new(Session::default());
        sessions.insert(id, session.clone());
        SessionHandle {
            id,
            fresh: true,
            session,
        }
    }

    /// Drops every session idle for at least `idle`, returning how many went.
    pub fn sweep(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for(now) < idle);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sweeps `sessions` every `period` until the registry is dropped.
pub fn spawn_sweeper(
    sessions: &Arc<Sessions>,
    period: Duration,
    idle: Duration,
) -> JoinHandle<()> {
    let sessions = Arc::downgrade(sessions);
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(sessions) = sessions.upgrade() else {
                break;
            };
            let removed = sessions.sweep(idle);
            if removed > 0 {
                debug!(removed, remaining = sessions.len(), "expired idle sessions");
            }
        }
    })
}

/// The requesting browser's session, taken from the `session` cookie.
#[derive(Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    fresh: bool,
    session: Arc<Session>,
}

impl SessionHandle {
    /// Cookie to send back; empty unless the session was just started.
    pub fn jar(&self) -> CookieJar {
        if !self.fresh {
            return CookieJar::new();
        }
        let cookie = Cookie::build((SESSION_COOKIE, self.id.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .build();
        CookieJar::new().add(cookie)
    }
}

impl std::ops::Deref for SessionHandle {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl<S: CourseStore> FromRequestParts<Arc<CatalogState<S>>> for SessionHandle {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CatalogState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<Uuid>().ok());
        Ok(state.sessions.resolve(id))
    }
}
