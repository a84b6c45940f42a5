//! In-memory gate sessions. Nothing here outlives the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chess_puzzler::chess_core::ShakmatyOracle;
use chess_puzzler::{Outcome, Puzzle, PuzzleAttempt};
use chrono::{DateTime, Utc};

use crate::error::AppError;

/// One visitor's pass at the gate.
pub struct GateSession {
    pub puzzle: Puzzle,
    pub attempt: PuzzleAttempt<ShakmatyOracle>,
    pub skipped: bool,
    pub last_seen: DateTime<Utc>,
}

impl GateSession {
    pub fn new(puzzle: Puzzle, attempt: PuzzleAttempt<ShakmatyOracle>) -> Self {
        Self {
            puzzle,
            attempt,
            skipped: false,
            last_seen: Utc::now(),
        }
    }

    /// The portfolio opens once the puzzle is solved or the visitor skipped it.
    pub fn unlocked(&self) -> bool {
        self.skipped || self.attempt.outcome() == Outcome::Solved
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, GateSession>>>,
    counter: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, GateSession>>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Internal("session store lock poisoned".to_string()))
    }

    pub fn insert(&self, session: GateSession) -> Result<String, AppError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let id = format!("{:x}{:04x}", Utc::now().timestamp_micros(), n & 0xffff);
        self.lock()?.insert(id.clone(), session);
        Ok(id)
    }

    /// Run `f` against a session, refreshing its idle timer.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GateSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.last_seen = Utc::now();
        f(session)
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many went.
    pub fn prune(&self, ttl: Duration) -> Result<usize, AppError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::Internal(format!("bad session ttl: {e}")))?;
        let cutoff = Utc::now() - ttl;

        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen >= cutoff);
        Ok(before - sessions.len())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_puzzler::chess_core::Side;

    fn gate_session() -> GateSession {
        let puzzle = Puzzle {
            id: "bk".to_string(),
            starting_position: "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1".to_string(),
            solution: vec!["a1a8".to_string()],
            solver_side: Side::White,
            rating: None,
            themes: vec![],
        };
        let attempt = PuzzleAttempt::new(ShakmatyOracle, &puzzle).unwrap();
        GateSession::new(puzzle, attempt)
    }

    #[test]
    fn test_insert_and_lookup() {
        let store = SessionStore::new();
        let a = store.insert(gate_session()).unwrap();
        let b = store.insert(gate_session()).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().unwrap(), 2);

        let unlocked = store.with_session(&a, |s| Ok(s.unlocked())).unwrap();
        assert!(!unlocked);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new();
        assert!(matches!(
            store.with_session("missing", |_| Ok(())),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_skip_unlocks() {
        let mut session = gate_session();
        assert!(!session.unlocked());
        session.skipped = true;
        assert!(session.unlocked());
    }

    #[test]
    fn test_prune_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.insert(gate_session()).unwrap();
        let fresh = store.insert(gate_session()).unwrap();
        store
            .with_session(&stale, |s| {
                s.last_seen = Utc::now() - chrono::Duration::hours(2);
                Ok(())
            })
            .unwrap();

        assert_eq!(store.prune(Duration::from_secs(3600)).unwrap(), 1);
        assert!(store.with_session(&fresh, |_| Ok(())).is_ok());
        assert!(store.with_session(&stale, |_| Ok(())).is_err());
    }
}
