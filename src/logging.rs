mod user_log_context;

pub use self::user_log_context::UserLogContext;
