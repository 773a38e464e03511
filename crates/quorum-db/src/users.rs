use crate::Database;
use anyhow::Result;
use quorum_types::{Question, Reply, User};
use rusqlite::{Connection, OptionalExtension, Row};

impl Database {
    // -- Finders --

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Exact match on both name fields. If several users share a name the
    /// first row in store-return order wins; no ordering is imposed.
    pub fn get_user_by_name(&self, fname: &str, lname: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, fname, lname FROM users WHERE fname = ?1 AND lname = ?2")?;
            let row = stmt.query_row((fname, lname), user_from_row).optional()?;
            Ok(row)
        })
    }

    // -- Navigation --

    pub fn authored_questions(&self, user: &User) -> Result<Vec<Question>> {
        self.get_questions_by_author(user.id)
    }

    pub fn authored_replies(&self, user: &User) -> Result<Vec<Reply>> {
        self.get_replies_by_user(user.id)
    }

    pub fn liked_questions(&self, user: &User) -> Result<Vec<Question>> {
        self.liked_questions_for_user(user.id)
    }

    pub fn followed_questions(&self, user: &User) -> Result<Vec<Question>> {
        self.followed_questions_for_user(user.id)
    }
}

pub(crate) fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        fname: row.get(1)?,
        lname: row.get(2)?,
    })
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, fname, lname FROM users WHERE id = ?1")?;
    let row = stmt.query_row([id], user_from_row).optional()?;
    Ok(row)
}
