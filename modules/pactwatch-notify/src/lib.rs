pub mod backend;
pub mod email;
pub mod noop;
pub mod router;
pub mod telegram;

pub use backend::NotifyBackend;
pub use email::EmailChannel;
pub use noop::NoopBackend;
pub use router::NotifyRouter;
pub use telegram::TelegramChannel;
