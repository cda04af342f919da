use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    db::user_store::UserRepository,
    error::{AppError, Result},
    models::user::User,
};

/// In-process stand-in for the users table, mirroring its constraints.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.rows.lock().unwrap()
    }
}

/// MySQL compares an INT column with a string through its leading numeric prefix.
fn coerce_id(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let len = trimmed
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
        .count();
    trimmed[..len].parse().unwrap_or(0)
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, name: Option<String>) -> Result<i32> {
        let Some(name) = name else {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "Column 'name' cannot be null".into(),
            )));
        };

        let mut rows = self.rows();
        let id = rows.last().map_or(1, |user| user.id + 1);
        rows.push(User {
            id,
            name,
            deleted_at: None,
        });

        Ok(id)
    }

    async fn list_active(&self) -> Result<Vec<User>> {
        Ok(self
            .rows()
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn soft_delete(&self, id: &str) -> Result<u64> {
        let id = coerce_id(id);
        let now = Utc::now().naive_utc();
        let mut affected = 0;
        for user in self.rows().iter_mut().filter(|u| i64::from(u.id) == id) {
            user.deleted_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_deleted(&self) -> Result<Vec<User>> {
        Ok(self
            .rows()
            .iter()
            .filter(|u| u.deleted_at.is_some())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::coerce_id;

    #[test]
    fn coerces_like_mysql() {
        assert_eq!(coerce_id("7"), 7);
        assert_eq!(coerce_id("12abc"), 12);
        assert_eq!(coerce_id("abc"), 0);
        assert_eq!(coerce_id("-3"), -3);
    }
}
