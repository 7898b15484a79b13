//! ens-search-core: suggestion pipeline, name checks, and search history
//! for an ENS name search box.

pub mod address;
pub mod debounce;
pub mod dropdown;
mod error;
pub mod history;
pub mod i18n;
mod item;
pub mod session;
pub mod validate;

pub use address::{is_address, to_checksum_address};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use dropdown::{is_box_valid, DropdownBuilder, INVALID_NAME_TEXT, MAX_DROPDOWN_ITEMS};
pub use error::{Error, Result};
#[cfg(feature = "file-store")]
pub use history::{FileHistory, HISTORY_FILE_NAME};
pub use history::{HistoryStore, MemHistory};
pub use i18n::{Catalog, Translator};
pub use item::{HistoryItem, NameType, SearchItem};
pub use session::{open_item, Navigation, SearchSession};
pub use validate::{EnsNameValidator, NameValidator, Validation};
