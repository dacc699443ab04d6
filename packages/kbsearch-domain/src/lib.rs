pub mod answer;
pub mod display_name;
pub mod kb;
pub mod projection;

mod error;

pub use answer::{DeserializedAnswer, SelectedSearchResult};
pub use error::{Error, Result};
pub use kb::{ColumnInfo, KbField, KbInfo, RankerType};
