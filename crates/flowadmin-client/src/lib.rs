pub mod client;
pub mod error;
pub mod media;
pub mod products;
pub mod reviews;
pub mod types;

pub use client::AdminClient;
pub use error::ClientError;
pub use media::ProgressFn;
pub use types::UploadResult;
