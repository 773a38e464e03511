use serde::{Deserialize, Serialize};

/// Entity snapshots materialized from store rows by quorum-db.
/// Ids are SQLite-assigned rowids; fields never change after construction.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub fname: String,
    pub lname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

/// A reply belongs to one question and optionally nests under another reply
/// on the same question. `parent_reply_id = None` marks a top-level reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub question_id: i64,
    pub body: String,
    pub parent_reply_id: Option<i64>,
    pub author_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLike {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFollow {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
}
