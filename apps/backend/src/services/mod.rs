pub mod dictionary;
pub mod game;
pub mod storage;
