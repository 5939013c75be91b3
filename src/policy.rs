//! Access policy: a static table mapping every supported (collection,
//! action) pair to the access level it requires. Handlers resolve their pair
//! exactly once per request, before any query runs. Pairs absent from the
//! table are operations the API does not offer and are denied outright.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Airports,
    Routes,
    AirplaneTypes,
    Airplanes,
    Crews,
    Flights,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    UploadImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated user. Authentication itself is proven by the
    /// `AuthUser` extractor; anonymous requests never reach the policy.
    Authenticated,
    /// Staff users only.
    AdminOnly,
}

pub const POLICY: &[(Resource, Action, Access)] = &[
    (Resource::Airports, Action::List, Access::Authenticated),
    (Resource::Airports, Action::Create, Access::AdminOnly),
    (Resource::Routes, Action::List, Access::Authenticated),
    (Resource::Routes, Action::Create, Access::AdminOnly),
    (Resource::AirplaneTypes, Action::List, Access::Authenticated),
    (Resource::AirplaneTypes, Action::Create, Access::AdminOnly),
    (Resource::Airplanes, Action::List, Access::Authenticated),
    (Resource::Airplanes, Action::Create, Access::AdminOnly),
    (Resource::Airplanes, Action::Update, Access::AdminOnly),
    (Resource::Airplanes, Action::UploadImage, Access::AdminOnly),
    // Crew rosters are back-office data: reads are restricted too.
    (Resource::Crews, Action::List, Access::AdminOnly),
    (Resource::Crews, Action::Create, Access::AdminOnly),
    (Resource::Flights, Action::List, Access::Authenticated),
    (Resource::Flights, Action::Retrieve, Access::Authenticated),
    (Resource::Flights, Action::Create, Access::AdminOnly),
    // Orders are owner-scoped in the queries themselves; the policy only
    // requires a principal to scope to.
    (Resource::Orders, Action::List, Access::Authenticated),
    (Resource::Orders, Action::Create, Access::Authenticated),
];

pub fn required_access(resource: Resource, action: Action) -> Option<Access> {
    POLICY
        .iter()
        .find(|(res, act, _)| *res == resource && *act == action)
        .map(|(_, _, access)| *access)
}

pub fn authorize(resource: Resource, action: Action, user: &AuthUser) -> Result<(), AppError> {
    match required_access(resource, action) {
        Some(Access::Authenticated) => Ok(()),
        Some(Access::AdminOnly) if user.is_staff => Ok(()),
        Some(Access::AdminOnly) => Err(AppError::Forbidden),
        None => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn member() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            is_staff: false,
        }
    }

    fn admin() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            is_staff: true,
        }
    }

    #[test]
    fn reads_are_open_to_authenticated_users() {
        let user = member();
        for resource in [
            Resource::Airports,
            Resource::Routes,
            Resource::AirplaneTypes,
            Resource::Airplanes,
            Resource::Flights,
            Resource::Orders,
        ] {
            assert!(authorize(resource, Action::List, &user).is_ok());
        }
        assert!(authorize(Resource::Flights, Action::Retrieve, &user).is_ok());
    }

    #[test]
    fn writes_require_staff() {
        let user = member();
        for resource in [
            Resource::Airports,
            Resource::Routes,
            Resource::AirplaneTypes,
            Resource::Airplanes,
            Resource::Crews,
            Resource::Flights,
        ] {
            assert!(matches!(
                authorize(resource, Action::Create, &user),
                Err(AppError::Forbidden)
            ));
        }
        let admin = admin();
        assert!(authorize(Resource::Flights, Action::Create, &admin).is_ok());
    }

    #[test]
    fn crew_reads_are_staff_only() {
        assert!(matches!(
            authorize(Resource::Crews, Action::List, &member()),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(Resource::Crews, Action::List, &admin()).is_ok());
    }

    #[test]
    fn order_creation_is_open_to_any_authenticated_user() {
        assert!(authorize(Resource::Orders, Action::Create, &member()).is_ok());
    }

    #[test]
    fn image_upload_is_staff_only() {
        assert!(matches!(
            authorize(Resource::Airplanes, Action::UploadImage, &member()),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(Resource::Airplanes, Action::UploadImage, &admin()).is_ok());
    }

    #[test]
    fn unregistered_operations_are_denied_even_for_staff() {
        // Flights deliberately expose no update; nothing else does either.
        assert!(matches!(
            authorize(Resource::Flights, Action::Update, &admin()),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            authorize(Resource::Orders, Action::Retrieve, &admin()),
            Err(AppError::Forbidden)
        ));
    }
}
