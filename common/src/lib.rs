//! Derma AI Common Library
//!
//! Web(WASM)フロントエンドと共有される型・パーサー・セッション状態機械

pub mod types;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod session;

pub use types::{Prediction, RemedyRequest, RemedyResponse, RequestStatus, SelectedImage};
pub use error::{Error, Result};
pub use parser::{
    extract_remedy_text, parse_error_body, parse_prediction_response, parse_remedies,
};
pub use prompts::build_remedy_prompt;
pub use session::PredictionSession;
