//! Registry of live triage sessions, keyed by session id.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::TriageError;
use crate::session::TriageSession;

/// Sessions are independent; the registry only hands out shared handles.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<TriageSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Arc<TriageSession>) -> Result<(), TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockPoisoned)?;
        sessions.insert(session.id(), session);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<TriageSession>, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockPoisoned)?;
        sessions
            .get(id)
            .cloned()
            .ok_or(TriageError::SessionNotFound(*id))
    }

    /// Drop a session. Handles already given out stay usable until released.
    pub fn remove(&self, id: &Uuid) -> Result<Arc<TriageSession>, TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockPoisoned)?;
        sessions.remove(id).ok_or(TriageError::SessionNotFound(*id))
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions
            .read()
            .map(|s| s.contains_key(id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Result<Vec<Uuid>, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockPoisoned)?;
        Ok(sessions.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{PatientContext, UrgencyClassifier};
    use crate::config::TriageConfig;

    fn session() -> Arc<TriageSession> {
        let config = TriageConfig::default();
        let classifier = Arc::new(UrgencyClassifier::from_config(&config).unwrap());
        Arc::new(TriageSession::new(&config, classifier, PatientContext::default()))
    }

    #[test]
    fn insert_get_remove() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let s = session();
        let id = s.id();
        registry.insert(s).unwrap();
        assert!(registry.contains(&id));
        assert_eq!(registry.get(&id).unwrap().id(), id);
        assert_eq!(registry.ids().unwrap(), vec![id]);

        registry.remove(&id).unwrap();
        assert!(!registry.contains(&id));
        assert!(matches!(
            registry.get(&id),
            Err(TriageError::SessionNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn removing_unknown_session_fails() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.remove(&Uuid::new_v4()),
            Err(TriageError::SessionNotFound(_))
        ));
    }

    #[test]
    fn sessions_are_distinct() {
        let registry = SessionRegistry::new();
        registry.insert(session()).unwrap();
        registry.insert(session()).unwrap();
        assert_eq!(registry.len(), 2);
    }
}
