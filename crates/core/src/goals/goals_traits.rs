use crate::errors::Result;
use crate::goals::goals_model::UserGoal;
use async_trait::async_trait;

/// Trait for goal repository operations. There is at most one goal per owner.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, owner_id: &str) -> Result<Option<UserGoal>>;
    async fn upsert_goal(&self, owner_id: &str, goal: UserGoal) -> Result<UserGoal>;
    async fn delete_goal(&self, owner_id: &str) -> Result<usize>;
}
