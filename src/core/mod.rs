//! 核心层：错误处理、响应、中间件

pub mod error;
pub mod middleware;
pub mod response;

pub use error::AppError;
pub use response::Ack;
