pub mod errors;
pub mod file;
pub mod json;
pub mod text;

pub use errors::{error_to_response, ResultResp};

pub use file::file_response;
pub use json::json_response;
pub use text::text_response;
