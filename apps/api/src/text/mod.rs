pub mod tokenizer;
pub mod vectorizer;

pub use tokenizer::{tokenize, StopWords, DEFAULT_STOPWORDS};
pub use vectorizer::{Document, IdfScheme, TermWeightMap, TextVectorizer, Vectorized};
