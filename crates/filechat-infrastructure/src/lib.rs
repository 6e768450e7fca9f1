pub mod extract;
pub mod loader;
pub mod paths;
pub mod secret_service;

pub use crate::extract::TextExtractor;
pub use crate::loader::{load_uploaded_file, load_uploaded_files};
pub use crate::paths::FilechatPaths;
pub use crate::secret_service::SecretServiceImpl;
