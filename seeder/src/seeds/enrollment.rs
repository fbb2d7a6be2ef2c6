use crate::seed::Seeder;
use db::AppResult;
use db::models::{class, class_enrollment, student};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{DatabaseConnection, EntityTrait};

pub struct EnrollmentSeeder;

#[async_trait::async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let classes = class::Entity::find().all(db).await?;
        let students = student::Entity::find().all(db).await?;

        for class in &classes {
            for student in &students {
                if rng.gen_bool(0.6) {
                    class_enrollment::Model::enroll(db, class.id, &student.student_number, None)
                        .await?;
                }
            }
        }
        Ok(())
    }
}
