pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod media;
pub mod products;
pub mod reviews;
pub mod session;

pub use app_config::{AppConfig, Endpoints, Environment};
pub use catalog::{Catalog, CatalogStats};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, SessionError, ValidationError};
pub use form::{slugify, PackSizeRow, ProductForm, ProductPayload};
pub use media::{plan_upload, reorder_keys, UploadFile, UploadPlan};
pub use products::{lowest_price, Media, MediaType, PackSize, Product, Review, FLAVOURS};
pub use reviews::{star_string, ReviewDraft, ReviewPayload, StarRating};
pub use session::{AdminProfile, Role, Session, SessionStore};
