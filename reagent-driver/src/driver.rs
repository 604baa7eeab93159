//! The Reason-Act-Observe loop: the crate's central algorithm, grounded on
//! `neuron-op-react`'s operator loop but running against the object-safe
//! [`Backend`]/[`ToolDispatcher`]/[`ResponseCache`] capabilities instead of
//! `neuron-turn`'s `Provider`.

use std::sync::Arc;
use std::time::Instant;

use reagent_context::{estimate_tokens, ContextCompressor};
use reagent_prompt::render;
use reagent_types::{
    Message, ModelProfile, OutcomeVariant, ParseOutcome, PromptTemplate, SessionState,
    TerminationReason, ToolCatalogue,
};
use tracing::{info, instrument, warn};

use crate::capability::{Backend, ResponseCache, ToolDispatcher};
use crate::config::{derive_max_iterations, DriverConfig};
use crate::error::DriverError;
use crate::hash::cache_key;
use crate::outcome::{DriverOutcome, FinishReason};
use crate::retry::{earliest, generate_with_retry};

/// Drives one reason-act-observe session to completion.
///
/// Holds its capabilities behind `Arc<dyn ...>` so a caller can share one
/// backend or dispatcher across concurrent sessions; a `Driver` itself
/// carries no session state — [`Driver::run`] builds and owns its
/// [`SessionState`] for the duration of a single call.
pub struct Driver {
    backend: Arc<dyn Backend>,
    dispatcher: Arc<dyn ToolDispatcher>,
    cache: Option<Arc<dyn ResponseCache>>,
    config: DriverConfig,
}

impl Driver {
    /// Build a driver from its required capabilities, with no cache and
    /// [`DriverConfig::default`] bounds.
    pub fn new(backend: Arc<dyn Backend>, dispatcher: Arc<dyn ToolDispatcher>) -> Self {
        Self {
            backend,
            dispatcher,
            cache: None,
            config: DriverConfig::default(),
        }
    }

    /// Attach a response cache.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Override the default [`DriverConfig`].
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one session to completion: generate, parse, act, observe,
    /// repeat until a final answer, the iteration limit, context
    /// exhaustion, or `deadline` ends it.
    ///
    /// Only cancellation and a non-retryable (or retry-exhausted) backend
    /// error surface as [`DriverError`] — everything else (tool failures,
    /// unparseable turns, hitting the iteration limit) is absorbed into the
    /// loop and reflected in the returned [`DriverOutcome`].
    #[instrument(skip(self, profile, tools, template, seed_messages), fields(model = %profile.model_id))]
    pub async fn run(
        &self,
        profile: ModelProfile,
        tools: ToolCatalogue,
        template: PromptTemplate,
        seed_messages: Vec<Message>,
        deadline: Instant,
    ) -> Result<DriverOutcome, DriverError> {
        let max_iterations = self
            .config
            .max_iterations
            .unwrap_or_else(|| derive_max_iterations(&profile, tools.len()));
        let mut session = SessionState::new(profile.clone(), tools.clone(), max_iterations);
        for message in &seed_messages {
            session.push_message(message.clone(), estimate_tokens(&message.content));
        }

        let key = cache_key(session.messages(), session.tools());
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&key).await {
                info!("response cache hit, skipping generation entirely");
                return Ok(DriverOutcome {
                    outcome: cached,
                    iteration: 0,
                    finish_reason: FinishReason::Stop,
                });
            }
        }

        let rendered = render(&profile, &template, &tools, session.messages());
        let mut prompt_text = rendered.text;
        let stop_sequences = rendered.stop_sequences;
        let compressor = ContextCompressor::new();
        let mut last_outcome: Option<ParseOutcome> = None;

        loop {
            if Instant::now() >= deadline {
                return Err(DriverError::Cancelled);
            }

            if estimate_tokens(&prompt_text) > profile.prompt_budget() {
                prompt_text = compressor.compress(&prompt_text, "");
                if estimate_tokens(&prompt_text) > profile.prompt_budget() {
                    session.terminate(TerminationReason::ContextExhausted);
                    let outcome = last_outcome.unwrap_or_else(|| {
                        ParseOutcome::new(OutcomeVariant::Fallback { text: String::new() }, 0.0, "")
                    });
                    return Ok(DriverOutcome {
                        outcome,
                        iteration: session.iteration(),
                        finish_reason: FinishReason::ContextExhausted,
                    });
                }
            }

            let response = generate_with_retry(
                self.backend.as_ref(),
                &prompt_text,
                &stop_sequences,
                profile.temperature,
                self.config.max_tokens,
                deadline,
            )
            .await?;

            let parsed = reagent_parser::parse(&response.text, &profile, self.config.strict_mode);
            session.push_message(Message::assistant(response.text.clone()), estimate_tokens(&response.text));

            match &parsed.variant {
                OutcomeVariant::FinalAnswer { .. } => {
                    // Count the final-answer turn itself, so `iteration` reflects
                    // total model turns rather than completed act-observe cycles.
                    session.advance_iteration();
                    session.terminate(TerminationReason::FinalAnswer);
                    if let Some(cache) = &self.cache {
                        cache.put(&key, parsed.clone()).await;
                    }
                    return Ok(DriverOutcome {
                        outcome: parsed,
                        iteration: session.iteration(),
                        finish_reason: FinishReason::Stop,
                    });
                }
                OutcomeVariant::ToolCall { action, action_input, .. } => {
                    let tool_deadline = earliest(Instant::now() + self.config.per_tool_timeout, deadline);
                    let observation_text = match self.dispatcher.dispatch(action, action_input, tool_deadline).await {
                        Ok(result) => result,
                        Err(message) => {
                            warn!(tool = %action, error = %message, "tool dispatch failed, folding into observation");
                            format!("Tool error: {message}")
                        }
                    };
                    session.push_message(Message::observation(observation_text.clone()), estimate_tokens(&observation_text));
                    prompt_text = format!(
                        "{prompt_text}\n{} {}\n{}",
                        template.prefixes.observation, observation_text, template.prefixes.thought
                    );
                }
                OutcomeVariant::Fallback { .. } => {
                    prompt_text = format!(
                        "{prompt_text}\nYour last response did not match the expected format. Respond using {} / {} / {} or {}.\n{}",
                        template.prefixes.thought,
                        template.prefixes.action,
                        template.prefixes.action_input,
                        template.prefixes.final_answer,
                        template.prefixes.thought
                    );
                }
            }

            last_outcome = Some(parsed);
            session.advance_iteration();

            if session.is_terminated() {
                return Ok(DriverOutcome {
                    outcome: last_outcome.expect("set above before advancing"),
                    iteration: session.iteration(),
                    finish_reason: FinishReason::Length,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reagent_prompt::select_template;
    use reagent_types::{ActionInput, ToolSpec, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct ScriptedBackend {
        turns: Vec<&'static str>,
        next: AtomicUsize,
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        async fn generate(
            &self,
            _prompt: &str,
            _stop: &[String],
            _temperature: f64,
            _max_tokens: u32,
            _deadline: Instant,
        ) -> Result<crate::capability::GenerateResponse, String> {
            let idx = self.next.fetch_add(1, Ordering::SeqCst);
            Ok(crate::capability::GenerateResponse::text(self.turns[idx]))
        }
    }

    struct WeatherDispatcher;

    #[async_trait]
    impl ToolDispatcher for WeatherDispatcher {
        async fn dispatch(&self, name: &str, _args: &ActionInput, _deadline: Instant) -> Result<String, String> {
            assert_eq!(name, "get_weather");
            Ok("20C".to_string())
        }
    }

    fn weather_tools() -> ToolCatalogue {
        ToolCatalogue::new(vec![ToolSpec::new(
            "get_weather",
            "Look up current weather for a location.",
            serde_json::json!({"type": "object"}),
        )])
        .unwrap()
    }

    #[tokio::test]
    async fn tool_call_then_final_answer_completes_in_two_turns() {
        let backend = Arc::new(ScriptedBackend {
            turns: vec![
                "Thought: need weather\nAction: get_weather\nAction Input: {\"location\": \"Paris\"}",
                "Final Answer: It is 20C in Paris.",
            ],
            next: AtomicUsize::new(0),
        });
        let dispatcher = Arc::new(WeatherDispatcher);
        let driver = Driver::new(backend, dispatcher);

        let profile = ModelProfile::new("default-model");
        let template = select_template(profile.variant_tag);
        let tools = weather_tools();
        let seed = vec![Message::user("What's the weather in Paris?")];
        let deadline = Instant::now() + Duration::from_secs(5);

        let result = driver.run(profile, tools, template, seed, deadline).await.unwrap();

        assert_eq!(result.finish_reason, FinishReason::Stop);
        assert_eq!(result.iteration, 2);
        match result.outcome.variant {
            OutcomeVariant::FinalAnswer { text } => assert!(text.contains("20C")),
            other => panic!("expected FinalAnswer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_error_is_folded_into_an_observation_not_a_fatal_error() {
        struct FailingDispatcher;
        #[async_trait]
        impl ToolDispatcher for FailingDispatcher {
            async fn dispatch(&self, _name: &str, _args: &ActionInput, _deadline: Instant) -> Result<String, String> {
                Err("connection refused".to_string())
            }
        }

        let backend = Arc::new(ScriptedBackend {
            turns: vec![
                "Thought: need weather\nAction: get_weather\nAction Input: {\"location\": \"Paris\"}",
                "Final Answer: I could not retrieve the weather.",
            ],
            next: AtomicUsize::new(0),
        });
        let driver = Driver::new(backend, Arc::new(FailingDispatcher));

        let profile = ModelProfile::new("default-model");
        let template = select_template(profile.variant_tag);
        let deadline = Instant::now() + Duration::from_secs(5);

        let result = driver
            .run(profile, weather_tools(), template, vec![Message::user("weather?")], deadline)
            .await
            .unwrap();

        assert_eq!(result.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn iteration_limit_is_a_partial_success_not_an_error() {
        struct NeverFinal;
        #[async_trait]
        impl Backend for NeverFinal {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<crate::capability::GenerateResponse, String> {
                Ok(crate::capability::GenerateResponse::text(
                    "Thought: need weather\nAction: get_weather\nAction Input: {\"location\": \"Paris\"}",
                ))
            }
        }

        let driver = Driver::new(Arc::new(NeverFinal), Arc::new(WeatherDispatcher))
            .with_config(DriverConfig {
                max_iterations: Some(2),
                ..DriverConfig::default()
            });

        let profile = ModelProfile::new("default-model");
        let template = select_template(profile.variant_tag);
        let deadline = Instant::now() + Duration::from_secs(5);

        let result = driver
            .run(profile, weather_tools(), template, vec![Message::user("weather?")], deadline)
            .await
            .unwrap();

        assert_eq!(result.finish_reason, FinishReason::Length);
        assert_eq!(result.iteration, 2);
    }

    #[tokio::test]
    async fn default_config_derives_iteration_limit_from_profile_and_catalogue() {
        struct NeverFinal;
        #[async_trait]
        impl Backend for NeverFinal {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<crate::capability::GenerateResponse, String> {
                Ok(crate::capability::GenerateResponse::text(
                    "Thought: need weather\nAction: get_weather\nAction Input: {\"location\": \"Paris\"}",
                ))
            }
        }

        let driver = Driver::new(Arc::new(NeverFinal), Arc::new(WeatherDispatcher));
        let profile = ModelProfile::new("gemma-2-9b");
        let template = select_template(profile.variant_tag);
        let deadline = Instant::now() + Duration::from_secs(5);

        let result = driver
            .run(profile, weather_tools(), template, vec![Message::user("weather?")], deadline)
            .await
            .unwrap();

        // `gemma` base is 4 turns, and a single-tool catalogue earns no bonus.
        assert_eq!(result.finish_reason, FinishReason::Length);
        assert_eq!(result.iteration, 4);
    }

    #[tokio::test]
    async fn cache_hit_skips_generation_entirely() {
        struct PanicsIfCalled;
        #[async_trait]
        impl Backend for PanicsIfCalled {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<crate::capability::GenerateResponse, String> {
                panic!("backend should not be called on a cache hit");
            }
        }

        let profile = ModelProfile::new("default-model");
        let tools = weather_tools();
        let seed = vec![Message::user("weather?")];

        let mut session = SessionState::new(profile.clone(), tools.clone(), 10);
        for message in &seed {
            session.push_message(message.clone(), estimate_tokens(&message.content));
        }
        let key = cache_key(session.messages(), session.tools());

        let cache = Arc::new(crate::cache::BoundedCache::new(4, Duration::from_secs(60)));
        cache
            .put(
                &key,
                ParseOutcome::new(OutcomeVariant::FinalAnswer { text: "cached answer".to_string() }, 0.95, "raw"),
            )
            .await;

        let driver = Driver::new(Arc::new(PanicsIfCalled), Arc::new(WeatherDispatcher)).with_cache(cache);
        let template = select_template(profile.variant_tag);
        let deadline = Instant::now() + Duration::from_secs(5);

        let result = driver.run(profile, tools, template, seed, deadline).await.unwrap();
        assert_eq!(result.iteration, 0);
        match result.outcome.variant {
            OutcomeVariant::FinalAnswer { text } => assert_eq!(text, "cached answer"),
            other => panic!("expected FinalAnswer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_deadline_surfaces_as_driver_error() {
        struct NeverFinal;
        #[async_trait]
        impl Backend for NeverFinal {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<crate::capability::GenerateResponse, String> {
                Ok(crate::capability::GenerateResponse::text("Final Answer: too slow"))
            }
        }

        let driver = Driver::new(Arc::new(NeverFinal), Arc::new(WeatherDispatcher));
        let profile = ModelProfile::new("default-model");
        let template = select_template(profile.variant_tag);
        let deadline = Instant::now() - Duration::from_secs(1);

        let err = driver
            .run(profile, weather_tools(), template, vec![Message::user("weather?")], deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Cancelled));
    }
}
