//! Data models for Clubhouse

pub mod activity;
pub mod branch;
pub mod equipment;
pub mod payment;
pub mod student;
pub mod training;
pub mod user;

// Re-export commonly used types
pub use activity::{ActivityLog, NewActivity};
pub use branch::SportBranch;
pub use equipment::{EquipmentAssignment, EquipmentType, EquipmentTypeWithStock};
pub use payment::{BillingPeriod, Payment};
pub use student::Student;
pub use training::{AttendanceRecord, Training};
pub use user::{AuthenticatedProfile, UserProfile};
