pub mod attendance_event;
pub mod class;
pub mod class_enrollment;
pub mod class_schedule;
pub mod device;
pub mod report;
pub mod session_log;
pub mod student;
pub mod user;

pub use attendance_event::Entity as AttendanceEvent;
pub use class::Entity as Class;
pub use class_enrollment::Entity as ClassEnrollment;
pub use class_schedule::Entity as ClassSchedule;
pub use device::Entity as Device;
pub use report::Entity as Report;
pub use session_log::Entity as SessionLog;
pub use student::Entity as Student;
pub use user::Entity as User;
