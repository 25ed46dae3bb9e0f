mod token_stream;

pub use token_stream::{Checkpoint, TokenStream};
