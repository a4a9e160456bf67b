//! In-memory store for memos, users, and sessions.
//!
//! All three collections sit behind one `parking_lot::RwLock`. Mutations take
//! the write lock for their whole critical section; reads take the read lock
//! and hand back owned snapshots so no guard outlives the call. Handlers must
//! never hold a guard across an `.await`, which the snapshot API makes
//! impossible from outside this module.
//!
//! Nothing here is persisted: the store lives exactly as long as the process.

mod policy;

pub use policy::{IdPolicy, IdPolicyError};

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use parking_lot::RwLock;

use memopad_core::{Memo, MemoId, SessionId};

use crate::models::{Session, User};

/// Process-wide application data.
#[derive(Debug, Default)]
pub struct Store {
    policy: IdPolicy,
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    memos: Vec<Memo>,
    users: BTreeMap<String, User>,
    sessions: HashMap<SessionId, Session>,
    /// Memos ever created; only consulted under `IdPolicy::Monotonic`.
    memos_minted: u64,
    /// Sessions ever created; only consulted under `IdPolicy::Monotonic`.
    sessions_minted: u64,
}

impl Store {
    /// Create an empty store using the given id policy.
    #[must_use]
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            inner: RwLock::default(),
        }
    }

    /// The id policy this store was built with.
    #[must_use]
    pub const fn id_policy(&self) -> IdPolicy {
        self.policy
    }

    // =========================================================================
    // Memos
    // =========================================================================

    /// Append a memo and return its id.
    pub fn add_memo(&self, text: impl Into<String>) -> MemoId {
        let mut inner = self.inner.write();
        inner.memos_minted += 1;
        let next = self.policy.next(inner.memos.len(), inner.memos_minted);
        let id = MemoId::new(i64::try_from(next).unwrap_or(i64::MAX));
        inner.memos.push(Memo::new(id, text));
        id
    }

    /// Replace the text of the first memo with `id`.
    ///
    /// Returns `false` and leaves the store untouched when no memo matches.
    pub fn update_memo(&self, id: MemoId, text: impl Into<String>) -> bool {
        let mut inner = self.inner.write();
        match inner.memos.iter_mut().find(|m| m.id == id) {
            Some(memo) => {
                memo.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Remove the first memo with `id`, keeping the order of the rest.
    ///
    /// Returns `false` when no memo matches.
    pub fn delete_memo(&self, id: MemoId) -> bool {
        let mut inner = self.inner.write();
        match inner.memos.iter().position(|m| m.id == id) {
            Some(index) => {
                inner.memos.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of all memos in insertion order.
    #[must_use]
    pub fn memos(&self) -> Vec<Memo> {
        self.inner.read().memos.clone()
    }

    /// First memo with `id`, if any.
    #[must_use]
    pub fn find_memo(&self, id: MemoId) -> Option<Memo> {
        self.inner.read().memos.iter().find(|m| m.id == id).cloned()
    }

    /// Number of memos currently stored.
    #[must_use]
    pub fn memo_count(&self) -> usize {
        self.inner.read().memos.len()
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a user unless the username is taken.
    ///
    /// Returns `false` (and keeps the existing password) on a duplicate.
    pub fn insert_user(&self, username: &str, password: &str) -> bool {
        let mut inner = self.inner.write();
        if inner.users.contains_key(username) {
            return false;
        }
        inner
            .users
            .insert(username.to_owned(), User::new(username, password));
        true
    }

    /// Remove a user. Sessions the user already holds stay valid.
    pub fn delete_user(&self, username: &str) -> bool {
        self.inner.write().users.remove(username).is_some()
    }

    /// Whether `username` exists and its password string-equals `password`.
    #[must_use]
    pub fn password_matches(&self, username: &str, password: &str) -> bool {
        self.inner
            .read()
            .users
            .get(username)
            .is_some_and(|user| user.password_matches(password))
    }

    /// All usernames, sorted.
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        self.inner.read().users.keys().cloned().collect()
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Mint a session for `username`.
    ///
    /// Under `IdPolicy::LiveCount` a minted id that already exists replaces
    /// the old session. That cannot happen today because sessions are never
    /// removed.
    pub fn create_session(&self, username: &str) -> Session {
        let mut inner = self.inner.write();
        inner.sessions_minted += 1;
        let next = self.policy.next(inner.sessions.len(), inner.sessions_minted);

        let session = Session {
            id: SessionId::from_sequence(next),
            username: username.to_owned(),
            created_at: Utc::now(),
        };
        inner.sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a session by token.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<Session> {
        self.inner.read().sessions.get(id).cloned()
    }

    /// Number of sessions ever kept.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.inner.read().sessions.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn ids(store: &Store) -> Vec<i64> {
        store.memos().iter().map(|m| m.id.as_i64()).collect()
    }

    #[test]
    fn test_sequential_adds_have_no_gaps() {
        for policy in [IdPolicy::LiveCount, IdPolicy::Monotonic] {
            let store = Store::new(policy);
            for n in 1..=5 {
                let id = store.add_memo(format!("memo {n}"));
                assert_eq!(id, MemoId::new(n));
            }
            assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_delete_removes_one_and_keeps_order() {
        let store = Store::default();
        for text in ["a", "b", "c", "d"] {
            store.add_memo(text);
        }

        assert!(store.delete_memo(MemoId::new(2)));

        let texts: Vec<String> = store.memos().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["a", "c", "d"]);
        assert_eq!(ids(&store), vec![1, 3, 4]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let store = Store::default();
        store.add_memo("a");

        assert!(!store.delete_memo(MemoId::new(9)));
        assert_eq!(store.memo_count(), 1);
    }

    #[test]
    fn test_update_unknown_id_leaves_memos_unchanged() {
        let store = Store::default();
        store.add_memo("a");
        store.add_memo("b");
        let before = store.memos();

        assert!(!store.update_memo(MemoId::new(3), "zzz"));
        assert_eq!(store.memos(), before);
    }

    #[test]
    fn test_update_replaces_text_in_place() {
        let store = Store::default();
        store.add_memo("a");
        store.add_memo("b");

        assert!(store.update_memo(MemoId::new(2), "bee"));
        assert_eq!(store.find_memo(MemoId::new(2)).unwrap().text, "bee");
        assert_eq!(store.find_memo(MemoId::new(1)).unwrap().text, "a");
    }

    #[test]
    fn test_live_count_reuses_ids_after_delete() {
        let store = Store::new(IdPolicy::LiveCount);
        store.add_memo("a");
        store.add_memo("b");
        store.add_memo("c");
        store.delete_memo(MemoId::new(1));

        // Two memos left, so the next id is 3 again.
        assert_eq!(store.add_memo("d"), MemoId::new(3));
        assert_eq!(ids(&store), vec![2, 3, 3]);

        // Edits and deletes hit the first match only.
        store.update_memo(MemoId::new(3), "first");
        let texts: Vec<String> = store.memos().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["b", "first", "d"]);

        store.delete_memo(MemoId::new(3));
        let texts: Vec<String> = store.memos().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["b", "d"]);
    }

    #[test]
    fn test_monotonic_never_reuses_ids() {
        let store = Store::new(IdPolicy::Monotonic);
        store.add_memo("a");
        store.add_memo("b");
        store.add_memo("c");
        store.delete_memo(MemoId::new(3));

        assert_eq!(store.add_memo("d"), MemoId::new(4));
        assert_eq!(ids(&store), vec![1, 2, 4]);
    }

    #[test]
    fn test_find_memo_missing() {
        let store = Store::default();
        assert!(store.find_memo(MemoId::new(1)).is_none());
    }

    #[test]
    fn test_insert_user_twice_keeps_first() {
        let store = Store::default();
        assert!(store.insert_user("alice", "pw"));
        assert!(!store.insert_user("alice", "other"));

        assert_eq!(store.user_count(), 1);
        assert!(store.password_matches("alice", "pw"));
        assert!(!store.password_matches("alice", "other"));
    }

    #[test]
    fn test_usernames_sorted() {
        let store = Store::default();
        store.insert_user("carol", "x");
        store.insert_user("alice", "x");
        store.insert_user("bob", "x");
        assert_eq!(store.usernames(), vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_delete_user() {
        let store = Store::default();
        store.insert_user("alice", "pw");

        assert!(store.delete_user("alice"));
        assert!(!store.delete_user("alice"));
        assert!(!store.password_matches("alice", "pw"));
    }

    #[test]
    fn test_delete_user_keeps_sessions() {
        let store = Store::default();
        store.insert_user("alice", "pw");
        let session = store.create_session("alice");

        store.delete_user("alice");

        let still_there = store.session(&session.id).unwrap();
        assert_eq!(still_there.username, "alice");
    }

    #[test]
    fn test_session_ids_are_decimal_sequence() {
        let store = Store::default();
        let first = store.create_session("alice");
        let second = store.create_session("bob");

        assert_eq!(first.id.as_str(), "1");
        assert_eq!(second.id.as_str(), "2");
        assert_eq!(store.session(&first.id).unwrap().username, "alice");
        assert_eq!(store.session_count(), 2);
    }

    #[test]
    fn test_unknown_session() {
        let store = Store::default();
        store.create_session("alice");
        assert!(store.session(&SessionId::from_cookie("99")).is_none());
    }

    #[test]
    fn test_concurrent_adds_produce_unique_ids() {
        let store = Arc::new(Store::new(IdPolicy::LiveCount));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        store.add_memo(format!("{t}-{n}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut all = ids(&store);
        all.sort_unstable();
        let expected: Vec<i64> = (1..=400).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_concurrent_logins_produce_distinct_sessions() {
        let store = Arc::new(Store::new(IdPolicy::LiveCount));
        store.insert_user("alice", "pw");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| store.create_session("alice").id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .map(|id| id.as_str().parse().unwrap())
            .collect();
        all.sort_unstable();

        let expected: Vec<u64> = (1..=200).collect();
        assert_eq!(all, expected);
        assert_eq!(store.session_count(), 200);
    }

    #[test]
    fn test_concurrent_registration_of_one_name_inserts_once() {
        let store = Arc::new(Store::default());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert_user("alice", &format!("pw{t}")))
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.usernames(), vec!["alice"]);
    }
}
