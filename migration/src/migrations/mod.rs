pub mod m202601050001_create_users;
pub mod m202601050002_create_classes;
pub mod m202601050003_create_students;
pub mod m202601050004_create_attendance_events;
pub mod m202601050005_create_session_logs;
pub mod m202601050006_create_reports;
pub mod m202601050007_create_devices;
