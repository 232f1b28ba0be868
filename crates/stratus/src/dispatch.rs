//! Dispatch: provider name + profile + region + verb → result
//!
//! Stateless. Every call connects a fresh provider, runs at most one verb on
//! it and hands the result back.

use crate::registry::{Registry, default_registry};
use std::fmt;
use stratus_cloud::{CloudError, ConnectOptions, Provider, Result, Target, Template};

pub const DEFAULT_PROVIDER: &str = "gcp";

/// One verb with its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Describe(Template),
    Plan(Template),
    Apply(Template),
    Destroy(Target),
}

impl Verb {
    pub fn name(&self) -> &'static str {
        match self {
            Verb::Describe(_) => "describe",
            Verb::Plan(_) => "plan",
            Verb::Apply(_) => "apply",
            Verb::Destroy(_) => "destroy",
        }
    }
}

/// The seven arguments of a cloud call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub provider: String,
    pub profile: String,
    pub region: String,
    pub describe: Option<Template>,
    pub plan: Option<Template>,
    pub apply: Option<Template>,
    pub destroy: Option<Target>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER)
    }
}

impl Request {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            profile: String::new(),
            region: String::new(),
            describe: None,
            plan: None,
            apply: None,
            destroy: None,
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn describe(mut self, template: Template) -> Self {
        self.describe = Some(template);
        self
    }

    pub fn plan(mut self, template: Template) -> Self {
        self.plan = Some(template);
        self
    }

    pub fn apply(mut self, template: Template) -> Self {
        self.apply = Some(template);
        self
    }

    pub fn destroy(mut self, target: impl Into<Target>) -> Self {
        self.destroy = Some(target.into());
        self
    }

    /// The verb to run. With several populated, the first of
    /// describe > plan > apply > destroy is chosen and the rest are dropped.
    pub fn verb(&self) -> Option<Verb> {
        let verbs: Vec<Verb> = [
            self.describe.clone().map(Verb::Describe),
            self.plan.clone().map(Verb::Plan),
            self.apply.clone().map(Verb::Apply),
            self.destroy.clone().map(Verb::Destroy),
        ]
        .into_iter()
        .flatten()
        .collect();

        if verbs.len() > 1 {
            let names: Vec<_> = verbs.iter().map(Verb::name).collect();
            tracing::warn!(
                "Several verbs given ({}); running {} only",
                names.join(", "),
                names[0]
            );
        }
        verbs.into_iter().next()
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions::new(self.profile.as_str(), self.region.as_str())
    }
}

/// What a cloud call produced
pub enum Outcome {
    /// No verb was given: the connected provider itself
    Connected(Box<dyn Provider>),
    Resource(Template),
}

impl Outcome {
    /// Render as a template. A connected provider becomes its cloud summary.
    pub fn into_template(self) -> Template {
        match self {
            Outcome::Connected(provider) => Template::Cloud(provider.summary()),
            Outcome::Resource(template) => template,
        }
    }

    pub fn provider(&self) -> Option<&dyn Provider> {
        match self {
            Outcome::Connected(provider) => Some(provider.as_ref()),
            Outcome::Resource(_) => None,
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Connected(provider) => f
                .debug_tuple("Connected")
                .field(&provider.summary())
                .finish(),
            Outcome::Resource(template) => f.debug_tuple("Resource").field(template).finish(),
        }
    }
}

/// Connect to `request.provider` and run the requested verb on it
pub async fn dispatch(registry: &Registry, request: Request) -> Result<Outcome> {
    let connector = registry
        .get(&request.provider)
        .ok_or_else(|| CloudError::UnrecognizedProvider(request.provider.clone()))?;

    let provider = connector
        .connect(&request.connect_options())
        .await
        .map_err(|e| CloudError::connection(&request.provider, e))?;

    let Some(verb) = request.verb() else {
        return Ok(Outcome::Connected(provider));
    };

    tracing::debug!("Running {} on {}", verb.name(), provider.name());
    let template = match &verb {
        Verb::Describe(template) => provider.describe(template).await?,
        Verb::Plan(template) => provider.plan(template).await?,
        Verb::Apply(template) => provider.apply(template).await?,
        Verb::Destroy(target) => provider.destroy(target).await?,
    };
    Ok(Outcome::Resource(template))
}

/// The seven-argument entry point, against the built-in providers
pub async fn cloud(
    provider: &str,
    profile: &str,
    region: &str,
    describe: Option<Template>,
    plan: Option<Template>,
    apply: Option<Template>,
    destroy: Option<Target>,
) -> Result<Outcome> {
    let request = Request {
        provider: provider.to_string(),
        profile: profile.to_string(),
        region: region.to_string(),
        describe,
        plan,
        apply,
        destroy,
    };
    dispatch(&default_registry(), request).await
}
