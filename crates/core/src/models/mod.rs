pub mod dashboard;
pub mod journal;
pub mod record;
pub mod series;
pub mod settings;
pub mod summary;
pub mod wallet;
pub mod window;
