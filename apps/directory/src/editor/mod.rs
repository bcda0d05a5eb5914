pub mod attachment;
pub mod form;
pub mod trigger;
pub mod workflow;

pub use form::ProfileForm;
pub use workflow::{EditorMode, EmailPolicy, ParseSource, ProfileEditor};
