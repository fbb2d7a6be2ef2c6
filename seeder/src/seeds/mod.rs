pub mod attendance;
pub mod class;
pub mod device;
pub mod enrollment;
pub mod student;
pub mod user;

/// Accounts every seeded user can log in with.
pub const PASSWORD: &str = "password123";

pub const INSTRUCTORS: u32 = 3;
pub const STUDENT_ACCOUNTS: u32 = 20;
