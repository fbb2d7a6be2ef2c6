use crate::seed::Seeder;
use db::AppResult;
use db::models::{
    student::Model as StudentModel,
    user::{self, Role},
};
use fake::{Fake, faker::name::en::Name};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct StudentSeeder;

#[async_trait::async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        // Student accounts get a record with the same number, which links them.
        let accounts = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .all(db)
            .await?;
        for account in &accounts {
            StudentModel::create(db, &account.username, &account.display_name).await?;
        }

        // A few records without a login account.
        for i in 1..=5 {
            let name: String = Name().fake();
            StudentModel::create(db, &format!("2023-{i:05}"), &name).await?;
        }
        Ok(())
    }
}
