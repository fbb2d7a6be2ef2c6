use crate::seed::Seeder;
use db::AppResult;
use db::models::{
    class::{Model as ClassModel, NewClass},
    class_schedule::{Meridiem, SlotInput},
    user::{self, Role},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct ClassSeeder;

const SUBJECTS: [(&str, &str); 6] = [
    ("MATH101", "College Algebra"),
    ("PHYS110", "General Physics"),
    ("CHEM120", "Chemistry I"),
    ("ENGL101", "Academic Writing"),
    ("HIST105", "World History"),
    ("CS101", "Intro to Programming"),
];

fn slot(days: &[&str], start: &str, end: &str, meridiem: Meridiem) -> SlotInput {
    SlotInput {
        days: days.iter().map(|d| d.to_string()).collect(),
        start_time: start.into(),
        end_time: end.into(),
        meridiem,
    }
}

#[async_trait::async_trait]
impl Seeder for ClassSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> AppResult<()> {
        let instructors = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Instructor))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await?;
        if instructors.is_empty() {
            return Ok(());
        }

        for (i, (code, name)) in SUBJECTS.iter().enumerate() {
            let instructor = &instructors[i % instructors.len()];
            let schedules = if i % 2 == 0 {
                vec![slot(&["Mon", "Wed", "Fri"], "08:00", "09:00", Meridiem::AM)]
            } else {
                vec![slot(&["Tue", "Thu"], "01:00", "02:30", Meridiem::PM)]
            };
            ClassModel::create(
                db,
                NewClass {
                    name: (*name).into(),
                    subject_code: (*code).into(),
                    room: format!("Room {}", 100 + i),
                    section: "A".into(),
                    instructor_id: instructor.id,
                    schedules,
                },
            )
            .await?;
        }
        Ok(())
    }
}
