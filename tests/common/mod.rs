#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from cartoonify for tests
pub use cartoonify::{
    Cartoon, CartoonParams, Cartoonifier, Error, PreviewScale, SaveResolution, Stage,
};
