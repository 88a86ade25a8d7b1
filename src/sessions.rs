use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;
use uuid::Uuid;

use crate::profile::wizard::Wizard;

/// Wizards untouched for this long are dropped.
pub const WIZARD_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Session {
    wizard: Wizard,
    touched: Instant,
}

/// Per-user questionnaire progress, kept in memory until submitted or idle.
#[derive(Clone)]
pub struct WizardSessions {
    inner: Arc<AsyncMutex<HashMap<Uuid, Session>>>,
    idle_ttl: Duration,
}

impl Default for WizardSessions {
    fn default() -> Self {
        Self::with_idle_ttl(WIZARD_IDLE_TTL)
    }
}

impl WizardSessions {
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Wizard {
        self.inner
            .lock()
            .await
            .get(&user_id)
            .filter(|s| s.touched.elapsed() < self.idle_ttl)
            .map(|s| s.wizard.clone())
            .unwrap_or_default()
    }

    /// Run `f` against the user's wizard and return its result with a snapshot.
    pub async fn update<T>(&self, user_id: Uuid, f: impl FnOnce(&mut Wizard) -> T) -> (T, Wizard) {
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.touched.elapsed() < self.idle_ttl);
        if sessions.len() < before {
            debug!(dropped = before - sessions.len(), "idle wizards dropped");
        }

        let session = sessions.entry(user_id).or_insert_with(|| Session {
            wizard: Wizard::default(),
            touched: Instant::now(),
        });
        session.touched = Instant::now();
        let out = f(&mut session.wizard);
        (out, session.wizard.clone())
    }

    pub async fn reset(&self, user_id: Uuid) {
        self.inner.lock().await.remove(&user_id);
    }
}

/// Which actions are running for which users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SubmitQuestionnaire,
    GeneratePlan,
}

/// At most one request per (user, action) at a time.
#[derive(Clone, Default)]
pub struct InFlight {
    running: Arc<Mutex<HashSet<(Uuid, Action)>>>,
}

impl InFlight {
    fn lock(&self) -> MutexGuard<'_, HashSet<(Uuid, Action)>> {
        self.running.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// `None` while the same action is still running for this user.
    pub fn try_start(&self, user_id: Uuid, action: Action) -> Option<InFlightGuard> {
        if self.lock().insert((user_id, action)) {
            Some(InFlightGuard {
                owner: self.clone(),
                key: (user_id, action),
            })
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn is_running(&self, user_id: Uuid, action: Action) -> bool {
        self.lock().contains(&(user_id, action))
    }
}

/// Releases the action when dropped, whether the request succeeded or not.
pub struct InFlightGuard {
    owner: InFlight,
    key: (Uuid, Action),
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.owner.lock().remove(&self.key);
    }
}
