/// Quota record entity module
pub mod quota_record;
/// Submission entity module
pub mod submission;

pub use quota_record::Entity as QuotaRecord;
pub use submission::Entity as Submission;
