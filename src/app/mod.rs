// Application layer - Use case interactors

pub mod container;
pub mod dispatch_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use dispatch_interactor::DispatchInteractor;
