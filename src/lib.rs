pub mod error;
pub mod logging;
pub mod schema;
pub mod types;
pub mod validator;
