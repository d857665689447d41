use tracing::debug;

use super::ProblemFactChange;
use crate::error::Result;
use crate::models::User;
use crate::solver::score_director::ScoreDirector;

/// Adds a user problem fact so tasks can be assigned to it. Adding a user
/// that's already present is a no-op.
#[derive(Debug, Clone)]
pub struct AddUserProblemFactChange {
    user: User,
}

impl AddUserProblemFactChange {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

impl ProblemFactChange for AddUserProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        let user_id = self.user.id;
        if director.look_up_user(user_id).is_some() {
            debug!(user_id, "User is already in the working solution");
            return Ok(());
        }

        director.before_problem_fact_added(user_id);
        director.working_solution_mut().add_user(self.user.clone());
        director.after_problem_fact_added(user_id);

        debug!(user_id, entity_id = %self.user.entity_id, "User added to the working solution");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "add_user"
    }
}
