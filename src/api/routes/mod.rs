pub mod health;
pub mod history;
pub mod scan;
pub mod tools;
