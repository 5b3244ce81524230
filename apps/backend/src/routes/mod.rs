pub mod auth;
pub mod exams;
pub mod leaderboard;
pub mod players;
pub mod pronunciation;
pub mod word_chain;
