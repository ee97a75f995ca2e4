use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::UserGoalDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::user_goals;
use crate::schema::user_goals::dsl::*;
use crate::utils::format_timestamp;
use networth_core::errors::Result;
use networth_core::goals::{GoalRepositoryTrait, UserGoal};

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, owner: &str) -> Result<Option<UserGoal>> {
        let mut conn = get_connection(&self.pool)?;
        user_goals
            .filter(owner_id.eq(owner))
            .select(UserGoalDB::as_select())
            .first::<UserGoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(UserGoal::try_from)
            .transpose()
    }

    async fn upsert_goal(&self, owner: &str, goal: UserGoal) -> Result<UserGoal> {
        let row = UserGoalDB::from_domain(owner, &goal, format_timestamp(Utc::now()));
        self.writer
            .exec(move |conn| {
                diesel::replace_into(user_goals::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(goal)
            })
            .await
    }

    async fn delete_goal(&self, owner: &str) -> Result<usize> {
        let owner = owner.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(user_goals.filter(owner_id.eq(owner)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
