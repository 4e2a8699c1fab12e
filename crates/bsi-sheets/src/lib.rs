pub mod client;
pub mod drive;
pub mod error;
pub mod images;
pub mod normalize;
pub mod parse;
mod retry;
pub mod types;

pub use client::SheetsClient;
pub use drive::extract_drive_file_id;
pub use error::SheetsError;
pub use images::{
    cancel_pair, CancelSignal, CancelTrigger, ImageOutcome, ImagePool, ImageRequest, ImageResolver,
    ImageSource, ImageStatus,
};
pub use normalize::{normalize_product, normalize_products};
pub use types::{ImagePayload, RawProduct};
