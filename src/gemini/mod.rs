//! Client for the external multimodal model.

pub mod client;
pub mod error;
pub mod schema;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::{AnalysisClient, AnalysisParams};
pub use error::AnalysisError;
pub use transport::{GeminiTransport, ModelTransport};
pub use types::{GenerateContentRequest, GenerateContentResponse};
