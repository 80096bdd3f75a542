use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Admin,
    #[default]
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "admin",
            TeamRole::Member => "member",
        }
    }
}

impl FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(TeamRole::Admin),
            "member" => Ok(TeamRole::Member),
            other => Err(format!("Unknown team role: {}", other)),
        }
    }
}

/// Team as seen by one of its members
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Role of the requesting user in this team
    pub role: TeamRole,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct AddTeamMemberRequest {
    pub user_id: i64,
    pub role: Option<TeamRole>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}
