pub mod models;

pub use models::{Question, QuestionFollow, QuestionLike, Reply, User};
