//! HTTP protocol helper module
//!
//! Response builders and MIME detection shared by all handlers.

pub mod mime;
pub mod response;

pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_json_response, build_redirect_response, build_text_response,
};
