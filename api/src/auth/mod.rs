pub mod results_secret;

pub use results_secret::{hash_secret, results_auth_middleware};
