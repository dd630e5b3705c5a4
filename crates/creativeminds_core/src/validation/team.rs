use crate::model::employee::Team;
use crate::validation::{repeated_employee_errors, ValidationError};

/// Team rules: each member is listed once.
pub fn validate_team(team: &Team) -> Vec<ValidationError> {
    repeated_employee_errors(&format!("team `{}`", team.name), &team.member_ids)
}

#[cfg(test)]
mod tests {
    use super::validate_team;
    use crate::model::employee::Team;
    use crate::validation::ValidationError;
    use uuid::Uuid;

    #[test]
    fn repeated_member_is_reported_once() {
        let member = Uuid::new_v4();
        let mut team = Team::new("Motion");
        team.member_ids = vec![member, Uuid::new_v4(), member, member];

        assert_eq!(
            validate_team(&team),
            vec![ValidationError::RepeatedEmployee {
                owner: "team `Motion`".to_string(),
                employee_id: member,
            }]
        );
    }
}
