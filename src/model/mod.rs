pub mod ballot;
pub mod election;
pub mod session;
pub mod tally;
