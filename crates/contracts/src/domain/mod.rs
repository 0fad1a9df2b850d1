pub mod a001_article;
