pub mod card;
pub mod filter;
pub mod view;

pub use card::ProfileCard;
pub use view::{Clipboard, ClipboardError, DirectoryView, FilterInput, Listing, ShareOutcome};
