pub mod alerts;
pub mod classify;
pub mod common;
pub mod explain;
pub mod export;
pub mod rankings;
pub mod rules;
pub mod summary;
