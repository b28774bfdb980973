//! Domain model module declarations.

pub mod checkin;
pub mod event;
pub mod outbox;
pub mod task;
