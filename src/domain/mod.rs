pub mod sale_record;
pub mod subject;
pub mod underwriting;

pub use sale_record::{RawRow, SaleRecord};
pub use subject::SubjectProperty;
pub use underwriting::{UnderwritingRequest, UnderwritingResult};
