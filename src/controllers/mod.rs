pub mod audio;
pub mod health;
pub mod page;
pub mod translate;
