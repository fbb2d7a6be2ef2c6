use super::{INSTRUCTORS, PASSWORD, STUDENT_ACCOUNTS};
use crate::seed::Seeder;
use db::AppResult;
use db::models::user::{Model, Role};
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        Model::create(db, "ADM-0001", "Administrator", "admin@school.test", PASSWORD, Role::Admin)
            .await?;

        for i in 1..=INSTRUCTORS {
            let username = format!("INS-{i:04}");
            let name: String = Name().fake();
            let email = format!("instructor{i}@school.test");
            Model::create(db, &username, &name, &email, PASSWORD, Role::Instructor).await?;
        }

        for i in 1..=STUDENT_ACCOUNTS {
            let username = format!("2024-{i:05}");
            let name: String = Name().fake();
            let email = format!("student{i}@school.test");
            Model::create(db, &username, &name, &email, PASSWORD, Role::Student).await?;
        }
        Ok(())
    }
}
