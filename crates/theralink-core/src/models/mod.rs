pub mod check_in;
pub mod overview;
pub mod patient;
pub mod risk;
pub mod summary;
pub mod token_count;
