pub mod attachment;
pub mod category;
pub mod lead;
pub mod property;

pub use attachment::{Attachment, DocumentSelection};
pub use category::LoanCategory;
pub use lead::{LeadDraft, SubmissionMeta};
pub use property::{Property, PropertyField};
