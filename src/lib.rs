pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{generate_keywords, sort_records, ArticleGenerationUseCase, CancelFlag};
pub use domain::error::{AppError, Result};
pub use domain::keyword_store::KeywordStore;
pub use infrastructure::content_producer::{ContentProducer, TemplateContentProducer};

/// Install the default log subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
