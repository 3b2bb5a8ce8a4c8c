//! Services Module
//!
//! - [`ImageStore`] - 上传图片的验证、存储和 URL 生成

pub mod image_store;

pub use image_store::{ImageStore, UploadedFile};
