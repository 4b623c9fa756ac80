// Application layer - Use case interactors

pub mod container;
pub mod convert_interactor;
pub mod highlight_interactor;
pub mod inspect_interactor;
pub mod transcript_loader;

// Re-export interactors
pub use convert_interactor::ConvertInteractor;
pub use highlight_interactor::HighlightInteractor;
pub use inspect_interactor::InspectInteractor;
pub use transcript_loader::{TranscriptLoader, TranscriptSource};
