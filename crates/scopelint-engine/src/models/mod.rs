pub mod block;
pub mod comments;
pub mod document;

pub use block::{Alert, ScopedBlock};
pub use comments::CommentState;
pub use document::Document;
