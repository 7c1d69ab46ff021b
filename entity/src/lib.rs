pub mod activities;
pub mod participants;
