pub mod extraction;
pub mod pipeline;
pub mod speech;
pub mod translation;
