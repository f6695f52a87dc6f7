//! Scope guard: requires a principal, optionally with the admin role.

use crate::helpers::JsonResponse;
use crate::models::Principal;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Authenticated,
    Admin,
}

#[derive(Clone, Copy)]
pub struct Guard {
    requirement: Requirement,
}

impl Guard {
    pub fn authenticated() -> Self {
        Self {
            requirement: Requirement::Authenticated,
        }
    }

    pub fn admin() -> Self {
        Self {
            requirement: Requirement::Admin,
        }
    }
}

fn check(requirement: Requirement, principal: Option<&Principal>) -> Result<(), Error> {
    match (requirement, principal) {
        (_, None) => Err(JsonResponse::<()>::build().unauthorized("Authentication required")),
        (Requirement::Admin, Some(principal)) if !principal.role.is_admin() => {
            tracing::warn!(subject = %principal.subject, "admin scope denied");
            Err(JsonResponse::<()>::build().forbidden("Admin role required"))
        }
        _ => Ok(()),
    }
}

impl<S, B> Transform<S, ServiceRequest> for Guard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = GuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GuardMiddleware {
            service: Rc::new(service),
            requirement: self.requirement,
        }))
    }
}

pub struct GuardMiddleware<S> {
    service: Rc<S>,
    requirement: Requirement,
}

impl<S, B> Service<ServiceRequest> for GuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = req.extensions().get::<Arc<Principal>>().cloned();
        if let Err(err) = check(self.requirement, principal.as_deref()) {
            return ready(Err(err)).boxed_local();
        }

        let service = self.service.clone();
        async move { service.call(req).await }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use actix_web::http::StatusCode;

    fn principal(role: UserRole) -> Principal {
        Principal {
            subject: "1".to_string(),
            email: "someone@springfield.gov".to_string(),
            role,
            organization_id: Some(1),
        }
    }

    fn status(result: Result<(), Error>) -> Option<StatusCode> {
        result.err().map(|err| err.as_response_error().status_code())
    }

    #[test]
    fn anonymous_is_unauthorized() {
        assert_eq!(
            status(check(Requirement::Authenticated, None)),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            status(check(Requirement::Admin, None)),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn admin_scope_needs_admin_role() {
        assert_eq!(
            status(check(Requirement::Admin, Some(&principal(UserRole::Manager)))),
            Some(StatusCode::FORBIDDEN)
        );
        assert!(check(Requirement::Admin, Some(&principal(UserRole::Admin))).is_ok());
        assert!(check(Requirement::Authenticated, Some(&principal(UserRole::Viewer))).is_ok());
    }
}
