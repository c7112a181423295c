use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use matchday_server_app::domain::{
    CommunityId, UserId,
    actor::{Actor, ActorRole},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

const ADMIN_ROLE: &str = "ADMIN";
const COMMUNITY_MANAGER_PREFIX: &str = "COMMUNITY_MANAGER:";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub roles: Vec<String>,
}

pub struct JwtKeys {
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

fn parse_role(role: &str) -> Option<ActorRole> {
    if role == ADMIN_ROLE {
        return Some(ActorRole::Admin);
    }
    let community = role.strip_prefix(COMMUNITY_MANAGER_PREFIX)?;
    Uuid::parse_str(community)
        .ok()
        .map(|id| ActorRole::CommunityManager(CommunityId(id)))
}

impl TryFrom<Claims> for Actor {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;
        let mut actor = Actor::new(UserId(user_id));
        for role in &claims.roles {
            match parse_role(role) {
                Some(role) => actor = actor.with_role(role),
                None => log::debug!("Ignoring unknown role {:?} for {}", role, claims.sub),
            }
        }
        Ok(actor)
    }
}

/// The caller, resolved from a bearer token.
pub struct Auth(pub Actor);

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthorized("Missing bearer token".to_string()))?;
        let token_data = decode::<Claims>(
            bearer.token(),
            &state.keys.decoding,
            &Validation::default(),
        )
        .map_err(|e| {
            log::debug!("Rejected token: {}", e);
            ApiError::Unauthorized("Invalid token".to_string())
        })?;

        Ok(Auth(Actor::try_from(token_data.claims)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, roles: &[&str]) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: usize::MAX,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_roles_become_actor_roles() {
        let user = Uuid::new_v4();
        let community = Uuid::new_v4();
        let manager = format!("COMMUNITY_MANAGER:{}", community);
        let actor =
            Actor::try_from(claims(&user.to_string(), &["ADMIN", &manager, "PLAYER"])).unwrap();

        assert_eq!(actor.user_id, UserId(user));
        assert_eq!(
            actor.roles,
            vec![
                ActorRole::Admin,
                ActorRole::CommunityManager(CommunityId(community))
            ]
        );
    }

    #[test]
    fn test_bad_manager_role_is_ignored() {
        let actor = Actor::try_from(claims(
            &Uuid::new_v4().to_string(),
            &["COMMUNITY_MANAGER:not-a-uuid"],
        ))
        .unwrap();
        assert!(actor.roles.is_empty());
    }

    #[test]
    fn test_subject_must_be_uuid() {
        assert!(matches!(
            Actor::try_from(claims("alice", &[])),
            Err(ApiError::Unauthorized(..))
        ));
    }
}
