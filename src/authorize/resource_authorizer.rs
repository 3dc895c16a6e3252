use std::{borrow::Cow, ops::Deref, sync::Arc};

use crate::{
    ability::{parse_ability_and_arguments, resource_ability_map, AbilityMap, AbilityOrSubject},
    caller::Caller,
    gate::{Arguments, Gate, GateResponse},
    middleware::{MiddlewareRegistrar, ResourceBindingBuilder},
    resource::ResourceType,
};

use super::config::AuthorizerConfig;

#[derive(Debug)]
pub struct ResourceAuthorizerInner<G> {
    gate: G,
    config: AuthorizerConfig,
    ability_map: AbilityMap,
}

impl<G> ResourceAuthorizerInner<G> {
    pub fn new(gate: G, config: AuthorizerConfig) -> Self {
        let ability_map = config.ability_map();

        Self {
            gate,
            config,
            ability_map,
        }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// The map abilities are guessed from.
    pub fn ability_map(&self) -> &AbilityMap {
        &self.ability_map
    }
}

/// Forwards authorization checks to a [`Gate`] and registers resource authorization middleware.
#[derive(Debug)]
pub struct ResourceAuthorizer<G> {
    inner: Arc<ResourceAuthorizerInner<G>>,
}

impl<G> ResourceAuthorizer<G> {
    pub fn new(gate: G) -> Self {
        Self::with_config(gate, AuthorizerConfig::default())
    }

    pub fn with_config(gate: G, config: AuthorizerConfig) -> Self {
        Self {
            inner: Arc::new(ResourceAuthorizerInner::new(gate, config)),
        }
    }

    pub fn parse_ability_and_arguments(
        &self,
        caller: &Caller,
        ability: impl Into<AbilityOrSubject>,
        arguments: impl Into<Arguments>,
    ) -> (Cow<'static, str>, Arguments) {
        let ability = ability.into();
        let ability_map = self.guessing_map(&ability);

        parse_ability_and_arguments(ability, arguments.into(), caller, &ability_map)
    }

    /// The configured abilities if any, else the subject type's extended abilities.
    ///
    /// Agrees with the map [`Self::resource`] builds bindings from.
    fn guessing_map(&self, ability: &AbilityOrSubject) -> Cow<'_, AbilityMap> {
        match ability {
            AbilityOrSubject::Subject(subject) if self.config.abilities.is_empty() => {
                let extended = subject.resource_type().extended_abilities();

                if extended.is_empty() {
                    Cow::Borrowed(&self.ability_map)
                } else {
                    Cow::Owned(resource_ability_map(extended, self.config.strategy))
                }
            }
            _ => Cow::Borrowed(&self.ability_map),
        }
    }

    /// A binding builder for `resource_type` carrying the configured overrides.
    pub fn resource(&self, resource_type: impl Into<ResourceType>) -> ResourceBindingBuilder {
        ResourceBindingBuilder::new(resource_type)
            .with_abilities(self.config.abilities.clone())
            .with_methods_without_models(self.config.methods_without_models.clone())
            .with_strategy(self.config.strategy)
    }

    /// Registers the `can` middleware of every action method described by `builder`.
    pub fn authorize_resource<R>(&self, registrar: &mut R, builder: &ResourceBindingBuilder)
    where
        R: MiddlewareRegistrar + ?Sized,
    {
        builder.register(registrar)
    }
}

impl<G> ResourceAuthorizer<G>
where
    G: Gate,
{
    /// Authorizes an ability for the current user.
    ///
    /// Passing a subject instead of an ability name guesses the ability from `caller`.
    /// Errors of the gate are returned as they are.
    #[tracing::instrument(skip_all, fields(caller = %caller))]
    pub async fn authorize(
        &self,
        caller: &Caller,
        ability: impl Into<AbilityOrSubject>,
        arguments: impl Into<Arguments>,
    ) -> Result<GateResponse, G::Error> {
        let (ability, arguments) = self.parse_ability_and_arguments(caller, ability, arguments);

        tracing::debug!(%ability, "Authorizing");

        self.gate.authorize(&ability, &arguments).await
    }

    /// Authorizes an ability for `user`.
    #[tracing::instrument(skip_all, fields(caller = %caller))]
    pub async fn authorize_for_user(
        &self,
        caller: &Caller,
        user: G::User,
        ability: impl Into<AbilityOrSubject>,
        arguments: impl Into<Arguments>,
    ) -> Result<GateResponse, G::Error> {
        let (ability, arguments) = self.parse_ability_and_arguments(caller, ability, arguments);

        tracing::debug!(%ability, "Authorizing for user");

        let gate = self.gate.for_user(user);

        gate.authorize(&ability, &arguments).await
    }
}

impl<G> Clone for ResourceAuthorizer<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<G> Deref for ResourceAuthorizer<G> {
    type Target = ResourceAuthorizerInner<G>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{Arc, Mutex},
    };

    use http::StatusCode;

    use crate::{
        ability::{OverrideStrategy, ResourceMethods},
        error::AuthorizationError,
        gate::{GateExt, Subject},
        middleware::MiddlewareRegistry,
        test::init_tracing,
    };

    use super::*;

    type Check = (Option<String>, String, Arguments);

    #[derive(Debug, Clone, Default)]
    struct RecordingGate {
        user: Option<String>,
        denied: HashSet<&'static str>,
        checks: Arc<Mutex<Vec<Check>>>,
    }

    impl RecordingGate {
        fn denying(abilities: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                denied: abilities.into_iter().collect(),
                ..Self::default()
            }
        }

        fn checks(&self) -> Vec<Check> {
            self.checks.lock().expect("checks lock poisoned").clone()
        }
    }

    impl Gate for RecordingGate {
        type User = String;

        type Error = AuthorizationError;

        async fn authorize(
            &self,
            ability: &str,
            arguments: &Arguments,
        ) -> Result<GateResponse, Self::Error> {
            self.checks.lock().expect("checks lock poisoned").push((
                self.user.clone(),
                ability.to_owned(),
                arguments.clone(),
            ));

            if self.denied.contains(ability) {
                return GateResponse::deny_with_status(StatusCode::NOT_FOUND)
                    .with_message(format!("Cannot {ability}"))
                    .authorize();
            }

            Ok(GateResponse::allow())
        }

        fn for_user(&self, user: Self::User) -> Self {
            Self {
                user: Some(user),
                ..self.clone()
            }
        }
    }

    fn post() -> Subject {
        Subject::model("app::models::Post", "7")
    }

    #[tokio::test]
    async fn explicit_ability_is_forwarded_with_its_arguments() {
        init_tracing();

        let gate = RecordingGate::default();
        let authorizer = ResourceAuthorizer::new(gate.clone());

        let response = authorizer
            .authorize(&Caller::new("show"), "publish", post())
            .await
            .expect("allowed");

        assert!(response.allowed());
        assert_eq!(
            gate.checks(),
            vec![(None, "publish".to_owned(), Arguments::from(post()))]
        );
    }

    #[tokio::test]
    async fn subject_guesses_the_ability_from_the_caller() {
        init_tracing();

        let gate = RecordingGate::default();
        let authorizer = ResourceAuthorizer::new(gate.clone());

        authorizer
            .authorize(&Caller::new("edit"), post(), ())
            .await
            .expect("allowed");

        authorizer
            .authorize(&Caller::new("archive"), post(), ())
            .await
            .expect("allowed");

        let abilities: Vec<String> = gate.checks().into_iter().map(|check| check.1).collect();

        assert_eq!(abilities, ["update", "archive"]);
    }

    #[tokio::test]
    async fn configured_abilities_drive_the_guess() {
        init_tracing();

        let gate = RecordingGate::default();
        let config = AuthorizerConfig {
            abilities: AbilityMap::new().with("archive", "remove"),
            ..AuthorizerConfig::default()
        };
        let authorizer = ResourceAuthorizer::with_config(gate.clone(), config);

        authorizer
            .authorize(&Caller::new("archive"), post(), ())
            .await
            .expect("allowed");

        authorizer
            .authorize(&Caller::new("edit"), post(), ())
            .await
            .expect("allowed");

        let abilities: Vec<String> = gate.checks().into_iter().map(|check| check.1).collect();

        assert_eq!(abilities, ["remove", "edit"]);
    }

    #[tokio::test]
    async fn gate_denial_propagates_unchanged() {
        init_tracing();

        let authorizer = ResourceAuthorizer::new(RecordingGate::denying(["delete"]));

        let err = authorizer
            .authorize(&Caller::new("destroy"), post(), ())
            .await
            .expect_err("denied");

        assert_eq!(
            err,
            AuthorizationError::new("Cannot delete").with_status(StatusCode::NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn authorize_for_user_checks_with_the_given_user() {
        init_tracing();

        let gate = RecordingGate::default();
        let authorizer = ResourceAuthorizer::new(gate.clone());

        authorizer
            .authorize_for_user(&Caller::new("update"), "jad".to_owned(), post(), ())
            .await
            .expect("allowed");

        assert_eq!(
            gate.checks(),
            vec![(
                Some("jad".to_owned()),
                "update".to_owned(),
                Arguments::from(post())
            )]
        );
    }

    #[tokio::test]
    async fn mapped_gate_errors_reach_the_caller() {
        init_tracing();

        let gate = RecordingGate::denying(["view"]).map_err(|err: AuthorizationError| err.status());
        let authorizer = ResourceAuthorizer::new(gate);

        let err = authorizer
            .authorize_for_user(&Caller::new("show"), "jad".to_owned(), post(), ())
            .await
            .expect_err("denied");

        assert_eq!(err, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn subject_extensions_drive_the_guess_without_configured_abilities() {
        init_tracing();

        let invoice = ResourceType::new("billing::Invoice")
            .with_extended_abilities(AbilityMap::new().with("archive", "remove"));

        let gate = RecordingGate::default();
        let authorizer = ResourceAuthorizer::new(gate.clone());

        authorizer
            .authorize(&Caller::new("archive"), Subject::model(invoice.clone(), "1"), ())
            .await
            .expect("allowed");

        authorizer
            .authorize(&Caller::new("edit"), post(), ())
            .await
            .expect("allowed");

        let abilities: Vec<String> = gate.checks().into_iter().map(|check| check.1).collect();

        assert_eq!(abilities, ["remove", "update"]);

        let mut registry = MiddlewareRegistry::new();

        authorizer.authorize_resource(&mut registry, &authorizer.resource(invoice));

        assert_eq!(
            registry.middleware_for("archive").collect::<Vec<_>>(),
            ["can:remove,invoice"]
        );
    }

    #[tokio::test]
    async fn configured_abilities_win_over_subject_extensions() {
        init_tracing();

        let invoice = ResourceType::new("billing::Invoice")
            .with_extended_abilities(AbilityMap::new().with("archive", "remove"));

        let gate = RecordingGate::default();
        let config = AuthorizerConfig {
            abilities: AbilityMap::new().with("archive", "delete"),
            ..AuthorizerConfig::default()
        };
        let authorizer = ResourceAuthorizer::with_config(gate.clone(), config);

        authorizer
            .authorize(&Caller::new("archive"), Subject::model(invoice, "1"), ())
            .await
            .expect("allowed");

        assert_eq!(gate.checks()[0].1, "delete");
    }

    #[test]
    fn resource_builder_carries_the_configuration() {
        let config = AuthorizerConfig {
            abilities: AbilityMap::new().with("archive", "delete"),
            methods_without_models: ResourceMethods::from_iter(["search"]),
            strategy: OverrideStrategy::Merge,
        };
        let authorizer = ResourceAuthorizer::with_config(RecordingGate::default(), config);

        let mut registry = MiddlewareRegistry::new();

        authorizer.authorize_resource(&mut registry, &authorizer.resource("Post"));

        let registered: Vec<&str> = registry
            .registered()
            .iter()
            .map(|registered| registered.middleware.as_str())
            .collect();

        assert_eq!(
            registered,
            [
                "can:view,post",
                "can:create,Post",
                "can:update,post",
                "can:delete,post"
            ]
        );
        assert_eq!(
            registry.middleware_for("archive").collect::<Vec<_>>(),
            ["can:delete,post"]
        );
    }
}
