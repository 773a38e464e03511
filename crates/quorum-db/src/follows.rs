use crate::Database;
use crate::questions::question_from_row;
use crate::users::user_from_row;
use anyhow::Result;
use quorum_types::{Question, QuestionFollow, User};
use rusqlite::{OptionalExtension, Row, params};

impl Database {
    pub fn get_follow_by_id(&self, id: i64) -> Result<Option<QuestionFollow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, user_id, question_id FROM question_follows WHERE id = ?1")?;
            let row = stmt.query_row([id], follow_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn followers_for_question(&self, question_id: i64) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.fname, u.lname
                 FROM users u
                 JOIN question_follows qf ON u.id = qf.user_id
                 WHERE qf.question_id = ?1",
            )?;
            let rows = stmt
                .query_map([question_id], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn followed_questions_for_user(&self, user_id: i64) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT q.id, q.title, q.body, q.author_id
                 FROM questions q
                 JOIN question_follows qf ON q.id = qf.question_id
                 WHERE qf.user_id = ?1",
            )?;
            let rows = stmt
                .query_map([user_id], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Top n questions by follower count, descending. Ties keep
    /// store-return order.
    pub fn most_followed_questions(&self, n: u32) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT q.id, q.title, q.body, q.author_id
                 FROM questions q
                 JOIN question_follows qf ON q.id = qf.question_id
                 GROUP BY q.id
                 ORDER BY COUNT(*) DESC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![n], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn follow_from_row(row: &Row) -> rusqlite::Result<QuestionFollow> {
    Ok(QuestionFollow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question_id: row.get(2)?,
    })
}
