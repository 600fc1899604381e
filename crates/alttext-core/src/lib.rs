//! alttext-core - generate image alt text with a hosted vision model.
//!
//! Each image is encoded as a data URL, sent to an Azure OpenAI chat
//! completions deployment with a fixed alt-text prompt, and returned with its
//! token usage and an estimated cost.
//!
//! ```text
//! Paths/Bytes → Load → Base64 data URL → Chat completion → InferenceResult → ResultSet → JSON
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use alttext_core::{AltTextGenerator, Config, DescribeOptions, ImageSource};
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let generator = AltTextGenerator::new(&config)?;
//!
//!     let sources = vec![ImageSource::from_path("./cat.jpg")];
//!     let options = DescribeOptions::new().with_project_id("spring-catalog");
//!     let results = generator.describe_batch(&sources, &options).await?;
//!     println!("{}", serde_json::to_string_pretty(&results)?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod pricing;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{AltTextError, BatchError, ConfigError, PipelineError, PipelineResult, Result};
pub use generator::{AltTextGenerator, DescribeOptions};
pub use llm::{VisionProvider, VisionProviderFactory};
pub use output::{OutputWriter, DEFAULT_OUTPUT_FILE};
pub use pipeline::FileDiscovery;
pub use pricing::Pricing;
pub use types::{ImageSource, InferenceResult, ResultSet, TokenUsage};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
