mod category;
mod color;
mod ids;
mod load;
mod sound;
mod source;

pub use category::{Category, UNCATEGORIZED_NAME};
pub use color::ColorTag;
pub use ids::{CategoryId, SoundId};
pub use load::{LoadOutcome, LoadPhase, LoadState, PlayerHandle};
pub use sound::Sound;
pub use source::{Locator, Provenance, UploadedFile};
