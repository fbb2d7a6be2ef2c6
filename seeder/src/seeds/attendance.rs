use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::AppResult;
use db::models::{
    attendance_event::{AttendanceStatus, Method, Model as EventModel, RecordInput},
    class_enrollment,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{DatabaseConnection, EntityTrait};

pub struct AttendanceSeeder;

/// Days of history to generate, counting back from yesterday.
const DAYS: i64 = 10;

#[async_trait::async_trait]
impl Seeder for AttendanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let enrollments = class_enrollment::Entity::find().all(db).await?;

        for back in 1..=DAYS {
            let recorded_at = Utc::now() - Duration::days(back);
            for enrollment in &enrollments {
                let status = match rng.gen_range(0..10) {
                    0 => AttendanceStatus::Absent,
                    1 | 2 => AttendanceStatus::Late,
                    _ => AttendanceStatus::Present,
                };
                let method = if rng.gen_bool(0.7) { Method::Scan } else { Method::Manual };
                EventModel::record(
                    db,
                    RecordInput {
                        recorded_at,
                        ..RecordInput::now(
                            enrollment.class_id,
                            enrollment.student_id,
                            status,
                            method,
                        )
                    },
                )
                .await?;
            }
        }
        Ok(())
    }
}
