use crate::Database;
use crate::questions::question_from_row;
use crate::users::user_from_row;
use anyhow::Result;
use quorum_types::{Question, QuestionLike, User};
use rusqlite::{OptionalExtension, Row, params};

impl Database {
    pub fn get_like_by_id(&self, id: i64) -> Result<Option<QuestionLike>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, user_id, question_id FROM question_likes WHERE id = ?1")?;
            let row = stmt.query_row([id], like_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn likers_for_question(&self, question_id: i64) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.fname, u.lname
                 FROM users u
                 JOIN question_likes ql ON u.id = ql.user_id
                 WHERE ql.question_id = ?1",
            )?;
            let rows = stmt
                .query_map([question_id], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn num_likes_for_question(&self, question_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM question_likes WHERE question_id = ?1",
                [question_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    pub fn liked_questions_for_user(&self, user_id: i64) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT q.id, q.title, q.body, q.author_id
                 FROM questions q
                 JOIN question_likes ql ON q.id = ql.question_id
                 WHERE ql.user_id = ?1",
            )?;
            let rows = stmt
                .query_map([user_id], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Top n questions by distinct-liker count, descending. Ties keep
    /// store-return order. One GROUP BY join fetches full question rows
    /// (no per-id follow-up lookups).
    pub fn most_liked_questions(&self, n: u32) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT q.id, q.title, q.body, q.author_id
                 FROM questions q
                 JOIN question_likes ql ON q.id = ql.question_id
                 GROUP BY q.id
                 ORDER BY COUNT(DISTINCT ql.user_id) DESC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![n], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn like_from_row(row: &Row) -> rusqlite::Result<QuestionLike> {
    Ok(QuestionLike {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question_id: row.get(2)?,
    })
}
