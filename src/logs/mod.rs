// ABOUTME: Log demultiplexing, time-window filtering, and retrieval.
// ABOUTME: Decodes runtime log frames into ordered LogEntry batches.

mod entry;
pub mod fallback;
mod filter;
mod frame;
mod service;

pub use entry::{LogEntry, LogStream};
pub use filter::LogWindow;
pub use frame::{FrameError, HEADER_LEN, decode, decode_line, encode_frame};
pub use service::LogRetrieval;
