pub mod use_cases;

pub use use_cases::article_generation::{
    ArticleGenerationUseCase, CancelFlag, StableTitleSelector, TitleSelector,
};
pub use use_cases::keyword_generation::generate_keywords;
pub use use_cases::table_sort::{sort_records, SortSpec, Sortable};
