pub mod config;
pub mod fetcher;
pub mod formatter;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod translator;
pub mod types;

pub use config::{Config, OutputMode, Provider};
pub use fetcher::Fetcher;
pub use pipeline::Pipeline;
pub use translator::{NoopTranslator, Translator};
pub use types::*;
