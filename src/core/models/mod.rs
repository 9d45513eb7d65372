pub mod choice;
pub mod question;
pub mod user;
pub mod vote;

pub use choice::{Choice, ChoiceCount};
pub use question::{Question, QuestionStatus};
pub use user::User;
pub use vote::{Vote, VoteInsert};
