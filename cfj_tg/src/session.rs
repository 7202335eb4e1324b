use cfj_types::TradeDraft;
use dashmap::DashMap;

/// Which trade field the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitingCoin,
    AwaitingDirection,
    AwaitingSize,
    AwaitingEntry,
}

/// One in-flight trade-entry flow
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub step: Step,
    pub draft: TradeDraft,
}

impl Session {
    pub fn new() -> Self {
        Self { step: Step::AwaitingCoin, draft: TradeDraft::default() }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-chat session map. A chat has an entry iff a trade-entry flow is in
/// progress; completing or abandoning the flow removes it.
#[derive(Default)]
pub struct SessionStore {
    inner: DashMap<i64, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self { inner: DashMap::new() }
    }

    /// Current step for a chat, if a flow is in progress
    pub fn step(&self, chat: i64) -> Option<Step> {
        self.inner.get(&chat).map(|session| session.step)
    }

    /// Snapshot of a chat's session
    pub fn get(&self, chat: i64) -> Option<Session> {
        self.inner.get(&chat).map(|session| session.clone())
    }

    /// Start a fresh flow, overwriting any prior partial state
    pub fn begin(&self, chat: i64) {
        self.inner.insert(chat, Session::new());
    }

    pub fn put(&self, chat: i64, session: Session) {
        self.inner.insert(chat, session);
    }

    pub fn delete(&self, chat: i64) {
        self.inner.remove(&chat);
    }
}

#[cfg(test)]
mod tests {
    use cfj_types::Coin;

    use super::*;

    #[test]
    fn test_no_session_until_begin() {
        let store = SessionStore::new();

        assert_eq!(store.step(1), None);
        store.begin(1);
        assert_eq!(store.step(1), Some(Step::AwaitingCoin));
        assert_eq!(store.step(2), None);
    }

    #[test]
    fn test_begin_overwrites_partial_state() {
        let store = SessionStore::new();
        store.begin(1);

        let mut session = store.get(1).unwrap();
        session.draft.coin = Some(Coin::Eth);
        session.step = Step::AwaitingDirection;
        store.put(1, session);

        store.begin(1);
        let fresh = store.get(1).unwrap();

        assert_eq!(fresh.step, Step::AwaitingCoin);
        assert_eq!(fresh.draft.coin, None);
    }

    #[test]
    fn test_delete_clears_flow() {
        let store = SessionStore::new();
        store.begin(1);
        store.delete(1);

        assert_eq!(store.step(1), None);
    }
}
