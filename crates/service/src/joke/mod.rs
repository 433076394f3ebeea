pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Joke, JokeDraft, JokeInput};
pub use repository::JokeRepository;
pub use service::JokeService;
