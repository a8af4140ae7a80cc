//! Movie Ledger Common Library
//!
//! Web(WASM)アプリと共有されるドメイン型・下書き状態・送信ワークフロー

pub mod types;
pub mod draft;
pub mod error;
pub mod store;
pub mod workflow;

pub use types::{Attachment, Movie, MovieFields, DEFAULT_IMAGE_URL};
pub use draft::MovieDraft;
pub use error::{Error, Result};
pub use store::MovieStore;
pub use workflow::{load_submitted, SubmissionWorkflow};
