pub mod config;
pub mod error;
pub mod session;

pub use config::{AnalyzerConfig, FilterConfig, LexiconMode, SegmentFilter};
pub use error::{Result, SentimentError, SpeechCaptureError};
pub use session::{Session, SessionHandle, SessionId, SessionRegistry};
