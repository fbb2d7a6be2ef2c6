mod attendance_test;
mod auth_test;
mod classes_test;
mod devices_test;
mod enrollment_test;
mod health_test;
mod logs_test;
mod me_test;
mod reports_test;
mod students_test;
