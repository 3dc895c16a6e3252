use std::future::Future;

use super::{arguments::Arguments, response::GateResponse};

/// Decides whether the current user may perform an ability.
///
/// Implementations return `Err` for denied checks and `Ok` with the allowing [`GateResponse`] otherwise.
pub trait Gate {
    type User;

    type Error;

    fn authorize(
        &self,
        ability: &str,
        arguments: &Arguments,
    ) -> impl Future<Output = Result<GateResponse, Self::Error>> + Send;

    /// A gate that checks abilities for `user` instead of the current user.
    fn for_user(&self, user: Self::User) -> Self
    where
        Self: Sized;
}

/// Adapters available on every [`Gate`].
pub trait GateExt: Gate + Sized {
    /// Converts the errors of this gate with `map`, e.g. into the error type of the application.
    fn map_err<F, E>(self, map: F) -> MapGateError<Self, F>
    where
        F: Fn(Self::Error) -> E,
    {
        MapGateError { gate: self, map }
    }
}

impl<G> GateExt for G where G: Gate {}

/// A [`Gate`] whose errors pass through a conversion. See [`GateExt::map_err`].
#[derive(Debug, Clone)]
pub struct MapGateError<G, F> {
    gate: G,
    map: F,
}

impl<G, F, E> Gate for MapGateError<G, F>
where
    G: Gate + Sync,
    F: Fn(G::Error) -> E + Clone + Sync,
{
    type User = G::User;

    type Error = E;

    fn authorize(
        &self,
        ability: &str,
        arguments: &Arguments,
    ) -> impl Future<Output = Result<GateResponse, Self::Error>> + Send {
        let check = self.gate.authorize(ability, arguments);

        async move { check.await.map_err(&self.map) }
    }

    /// The mapping is kept for the new user's gate.
    fn for_user(&self, user: Self::User) -> Self {
        Self {
            gate: self.gate.for_user(user),
            map: self.map.clone(),
        }
    }
}
