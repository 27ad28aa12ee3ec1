pub mod match_result;
pub mod member;

pub use match_result::{MatchOutcome, ResultBatch};
pub use member::{Member, NewMember};
