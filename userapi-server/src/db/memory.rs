//! In-process user store for router tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::repos::users::{parse_user_id, user_not_found};
use crate::db::{DbError, User, UserStore};
use crate::models::NewUser;

#[derive(Default)]
pub(crate) struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    unreachable: AtomicBool,
    closed: AtomicBool,
}

impl MemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database host went away.
    pub(crate) fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed.into());
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.check()
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find(&self, id: &str) -> Result<User, DbError> {
        self.check()?;
        let key = parse_user_id(id).ok_or_else(|| user_not_found(id))?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == key)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email()) {
            return Err(DbError::UniqueViolation {
                constraint: Some("users_email_key".into()),
                message: "duplicate key value violates unique constraint \"users_email_key\""
                    .into(),
            });
        }

        let id = users.last().map_or(1, |u| u.id + 1);
        let created = User {
            id,
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            department: user.department().map(str::to_owned),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
