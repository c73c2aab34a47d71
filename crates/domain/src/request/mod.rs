//! Request types: the editable draft and the resolved descriptor.

mod descriptor;
mod draft;
mod entry;
mod method;

pub use descriptor::{FieldMap, RequestDescriptor, SavedRequest};
pub use draft::RequestDraft;
pub use entry::{EntryId, EntryList, KeyValueEntry};
pub use method::HttpMethod;
