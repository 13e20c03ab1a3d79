//! Turn photos into cartoons with a fixed sequence of classical filters:
//! grayscale, median blur, adaptive threshold, bilateral filter and masking.
//!
//! ```no_run
//! use cartoonify::{CartoonParams, Cartoonifier, SaveResolution, save_cartoon};
//!
//! # fn main() -> cartoonify::Result<()> {
//! let cartoonifier = Cartoonifier::new("photo.jpg", CartoonParams::default())?;
//! let cartoon = cartoonifier.run()?;
//! let saved = save_cartoon(&cartoon, cartoonifier.path(), SaveResolution::Preview)?;
//! println!("saved {}", saved.display());
//! # Ok(())
//! # }
//! ```

pub mod cartoon;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod save;

pub use cartoon::{Cartoonifier, build_cartoon_pipeline, load_image};
pub use error::{Error, Result};
pub use models::{Cartoon, CartoonParams, PreviewScale, SaveResolution, Stage};
pub use pipeline::{Pipeline, PipelineContext, PipelineData, PipelineRun, PipelineStep};
pub use save::{cartoonified_path, save_cartoon, save_image};

#[cfg(feature = "gui")]
pub mod gui;
