pub mod onboarding_service;
pub mod provisioner;
pub mod standings_service;

pub use onboarding_service::{InviteStatus, OnboardingService};
pub use provisioner::Provisioner;
pub use standings_service::StandingsService;
