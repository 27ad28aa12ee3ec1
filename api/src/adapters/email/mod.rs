//! Mail gateway adapter

pub mod http_mailer;

pub use http_mailer::HttpMailer;
