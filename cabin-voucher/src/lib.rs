pub mod engine;
pub mod issuance;

pub use engine::{AssignError, AssignmentEngine, SeatAssignment};
pub use issuance::{IssueError, VoucherService};
