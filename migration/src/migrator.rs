use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601050001_create_users::Migration),
            Box::new(migrations::m202601050002_create_classes::Migration),
            Box::new(migrations::m202601050003_create_students::Migration),
            Box::new(migrations::m202601050004_create_attendance_events::Migration),
            Box::new(migrations::m202601050005_create_session_logs::Migration),
            Box::new(migrations::m202601050006_create_reports::Migration),
            Box::new(migrations::m202601050007_create_devices::Migration),
        ]
    }
}
