pub mod article_generation;
pub mod keyword_generation;
pub mod table_sort;
