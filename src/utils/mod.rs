mod jwt;
pub mod response;
mod validator;

pub use jwt::*;
pub use response::*;
pub use validator::*;
