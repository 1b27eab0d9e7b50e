// Service exports
pub mod appwrite;
pub mod repository;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use repository::{AttributeRepository, InMemoryStore, ProductRepository, ProductTypeRepository, RepositoryError};
