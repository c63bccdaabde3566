pub mod company;
pub mod obligation;
