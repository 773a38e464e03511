use crate::Database;
use anyhow::Result;
use quorum_types::{Question, Reply, User};
use rusqlite::{Connection, OptionalExtension, Row};

impl Database {
    // -- Finders --

    pub fn get_question_by_id(&self, id: i64) -> Result<Option<Question>> {
        self.with_conn(|conn| query_question_by_id(conn, id))
    }

    pub fn get_questions_by_author(&self, author_id: i64) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, body, author_id FROM questions WHERE author_id = ?1",
            )?;
            let rows = stmt
                .query_map([author_id], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Navigation --

    /// None only if the author row is gone (a dangling reference the schema
    /// normally rules out).
    pub fn question_author(&self, question: &Question) -> Result<Option<User>> {
        self.get_user_by_id(question.author_id)
    }

    /// Every reply on the question at any depth, flat. Thread structure is
    /// navigable through each reply's parent/children.
    pub fn question_replies(&self, question: &Question) -> Result<Vec<Reply>> {
        self.get_replies_for_question(question.id)
    }

    pub fn question_likers(&self, question: &Question) -> Result<Vec<User>> {
        self.likers_for_question(question.id)
    }

    pub fn num_likes(&self, question: &Question) -> Result<i64> {
        self.num_likes_for_question(question.id)
    }

    pub fn question_followers(&self, question: &Question) -> Result<Vec<User>> {
        self.followers_for_question(question.id)
    }
}

pub(crate) fn question_from_row(row: &Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        author_id: row.get(3)?,
    })
}

fn query_question_by_id(conn: &Connection, id: i64) -> Result<Option<Question>> {
    let mut stmt =
        conn.prepare("SELECT id, title, body, author_id FROM questions WHERE id = ?1")?;
    let row = stmt.query_row([id], question_from_row).optional()?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use crate::testutil::seeded_db;

    #[test]
    fn test_get_question_by_id() {
        let db = seeded_db();
        let q = db.get_question_by_id(10).unwrap().unwrap();
        assert_eq!(q.id, 10);
        assert_eq!(q.author_id, 1);

        assert!(db.get_question_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_get_questions_by_author() {
        let db = seeded_db();
        let mut ids: Vec<i64> = db
            .get_questions_by_author(1)
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![10, 12]);

        // no rows is an empty vec, not an error or absence
        assert!(db.get_questions_by_author(3).unwrap().is_empty());
    }

    #[test]
    fn test_question_author() {
        let db = seeded_db();
        let q = db.get_question_by_id(11).unwrap().unwrap();
        let author = db.question_author(&q).unwrap().unwrap();
        assert_eq!(author.id, 2);
        assert_eq!(author.fname, "Alan");
    }

    #[test]
    fn test_question_replies_flat() {
        let db = seeded_db();
        let q = db.get_question_by_id(10).unwrap().unwrap();
        let mut ids: Vec<i64> = db.question_replies(&q).unwrap().iter().map(|r| r.id).collect();
        ids.sort();
        // nested replies included, not just top-level ones
        assert_eq!(ids, vec![100, 101, 102, 104]);
    }

    #[test]
    fn test_num_likes_matches_likers() {
        let db = seeded_db();
        let q = db.get_question_by_id(10).unwrap().unwrap();
        let likers = db.question_likers(&q).unwrap();
        assert_eq!(db.num_likes(&q).unwrap(), likers.len() as i64);
        assert_eq!(likers.len(), 3);
    }
}
