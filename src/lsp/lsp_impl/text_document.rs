//! Text document related LSP methods.

mod definition;
