use crate::Database;
use anyhow::Result;
use quorum_types::{Question, Reply, User};
use rusqlite::{Connection, OptionalExtension, Row};

impl Database {
    // -- Finders --

    pub fn get_reply_by_id(&self, id: i64) -> Result<Option<Reply>> {
        self.with_conn(|conn| query_reply_by_id(conn, id))
    }

    /// All replies on a question, flat: every depth of nesting is included.
    /// Callers reconstruct the thread from `parent_reply_id`.
    pub fn get_replies_for_question(&self, question_id: i64) -> Result<Vec<Reply>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, question_id, body, parent_reply_id, author_id
                 FROM replies
                 WHERE question_id = ?1",
            )?;
            let rows = stmt
                .query_map([question_id], reply_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_replies_by_user(&self, user_id: i64) -> Result<Vec<Reply>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, question_id, body, parent_reply_id, author_id
                 FROM replies
                 WHERE author_id = ?1",
            )?;
            let rows = stmt
                .query_map([user_id], reply_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Navigation --

    pub fn reply_author(&self, reply: &Reply) -> Result<Option<User>> {
        self.get_user_by_id(reply.author_id)
    }

    pub fn reply_question(&self, reply: &Reply) -> Result<Option<Question>> {
        self.get_question_by_id(reply.question_id)
    }

    /// None for top-level replies.
    pub fn reply_parent(&self, reply: &Reply) -> Result<Option<Reply>> {
        match reply.parent_reply_id {
            Some(parent_id) => self.get_reply_by_id(parent_id),
            None => Ok(None),
        }
    }

    /// Direct children only (one nesting level down), all of them.
    pub fn reply_children(&self, reply: &Reply) -> Result<Vec<Reply>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, question_id, body, parent_reply_id, author_id
                 FROM replies
                 WHERE parent_reply_id = ?1",
            )?;
            let rows = stmt
                .query_map([reply.id], reply_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn reply_from_row(row: &Row) -> rusqlite::Result<Reply> {
    Ok(Reply {
        id: row.get(0)?,
        question_id: row.get(1)?,
        body: row.get(2)?,
        parent_reply_id: row.get(3)?,
        author_id: row.get(4)?,
    })
}

fn query_reply_by_id(conn: &Connection, id: i64) -> Result<Option<Reply>> {
    let mut stmt = conn.prepare(
        "SELECT id, question_id, body, parent_reply_id, author_id FROM replies WHERE id = ?1",
    )?;
    let row = stmt.query_row([id], reply_from_row).optional()?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use crate::testutil::seeded_db;

    #[test]
    fn test_get_reply_by_id() {
        let db = seeded_db();
        let reply = db.get_reply_by_id(101).unwrap().unwrap();
        assert_eq!(reply.id, 101);
        assert_eq!(reply.question_id, 10);
        assert_eq!(reply.parent_reply_id, Some(100));

        assert!(db.get_reply_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_get_replies_by_user() {
        let db = seeded_db();
        let mut ids: Vec<i64> = db
            .get_replies_by_user(3)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![102, 104]);
    }

    #[test]
    fn test_reply_parent_and_children() {
        let db = seeded_db();
        let top = db.get_reply_by_id(100).unwrap().unwrap();
        assert!(db.reply_parent(&top).unwrap().is_none());

        // full child set, not just the first match
        let mut child_ids: Vec<i64> =
            db.reply_children(&top).unwrap().iter().map(|r| r.id).collect();
        child_ids.sort();
        assert_eq!(child_ids, vec![101, 104]);

        // every reply with a parent shows up among that parent's children
        for reply in db.get_replies_for_question(10).unwrap() {
            if let Some(parent) = db.reply_parent(&reply).unwrap() {
                let children = db.reply_children(&parent).unwrap();
                assert!(children.iter().any(|c| c.id == reply.id));
            }
        }
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        let db = seeded_db();
        let leaf = db.get_reply_by_id(102).unwrap().unwrap();
        assert!(db.reply_children(&leaf).unwrap().is_empty());
    }

    #[test]
    fn test_reply_author_and_question() {
        let db = seeded_db();
        let reply = db.get_reply_by_id(103).unwrap().unwrap();
        assert_eq!(db.reply_author(&reply).unwrap().unwrap().id, 1);
        assert_eq!(db.reply_question(&reply).unwrap().unwrap().id, 11);
    }
}
