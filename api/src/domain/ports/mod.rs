pub mod github;
pub mod mailer;
pub mod repositories;

pub use github::{GitHubClient, GitHubUser, OrgInvitation};
pub use mailer::{Mailer, OutgoingMail};
pub use repositories::{MemberRepository, ResultStore};
