mod expense;
mod money;
mod user;

pub use expense::*;
pub use money::*;
pub use user::*;
