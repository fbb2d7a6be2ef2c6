use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    attendance::AttendanceSeeder, class::ClassSeeder, device::DeviceSeeder,
    enrollment::EnrollmentSeeder, student::StudentSeeder, user::UserSeeder,
};
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(ClassSeeder), "Class"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
        (Box::new(AttendanceSeeder), "Attendance"),
        (Box::new(DeviceSeeder), "Device"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
