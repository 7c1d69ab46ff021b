pub mod activity_handler;
