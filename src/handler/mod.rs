// Handler module entry
// Request dispatch and static asset serving

pub mod router;
pub mod static_files;

pub use router::handle_request;
