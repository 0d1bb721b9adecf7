pub mod check_ins;
pub mod health;
pub mod pages;
pub mod patients;
pub mod questionnaire;
pub mod summaries;
