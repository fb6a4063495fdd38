pub mod assessment;
pub mod dosha;
pub mod patient;
pub mod psychometric;
pub mod question;
pub mod recommendation;
pub mod user;
