pub mod traits;
pub mod remote;
pub mod factory;
pub mod anilist;
pub mod error;

pub use traits::{MediaSource, SharedSource};
pub use remote::{RemoteEntry, RemoteListGroup, RemoteMedia, RemoteTitle};
pub use factory::{SourceFactory, SourceFactoryRegistry};
pub use error::SourceError;
pub use anilist::AniListClient;
