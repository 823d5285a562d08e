pub mod http;

pub use http::{ReqwestClient, ReqwestResponse};
