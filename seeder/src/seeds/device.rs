use crate::seed::Seeder;
use db::AppResult;
use db::models::{
    device::{LocationFix, Model as DeviceModel},
    user::{self, Role},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct DeviceSeeder;

#[async_trait::async_trait]
impl Seeder for DeviceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        let instructors = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Instructor))
            .all(db)
            .await?;

        for (i, instructor) in instructors.iter().enumerate() {
            let device = DeviceModel::register(
                db,
                instructor.id,
                &format!("seed-phone-{}", instructor.username.to_lowercase()),
                Some("Phone".into()),
                Some("android".into()),
            )
            .await?;

            let offset = i as f64 * 0.001;
            DeviceModel::record_fix(
                db,
                device.id,
                LocationFix {
                    latitude: 14.6537 + offset,
                    longitude: 121.0687 - offset,
                    accuracy_m: Some(8.0),
                    fix_at: None,
                },
            )
            .await?;
        }
        Ok(())
    }
}
