//! Scoring Engine - Encoder → Model → Normalizer → Classifier
//!
//! Hai thao tác duy nhất cho tầng HTTP bên ngoài: `score` và `train`.
//! `ScoringEngine` có thể được sở hữu trực tiếp; các hàm tự do ở cuối file
//! dùng engine mặc định của process.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::constants::{APP_VERSION, TRAIN_SUCCESS_MESSAGE};
use crate::error::{Result, ScoringError};
use crate::logic::config::ModelConfig;
use crate::logic::features::{Clock, Event, FeatureEncoder, TrainingMatrix};
use crate::logic::model::{normalize, IsolationForest, ModelInfo, ModelState};
use crate::logic::threat::{classify, ScoreResult, TrainSummary};

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug)]
pub struct ScoringEngine {
    encoder: FeatureEncoder,
    config: ModelConfig,
    state: ModelState,
}

impl ScoringEngine {
    /// Engine on the system clock, serving the bootstrap model
    pub fn new(config: ModelConfig) -> Result<Self> {
        Self::with_encoder(config, FeatureEncoder::default())
    }

    /// Engine whose timestamp fallback reads `clock`
    pub fn with_clock(config: ModelConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::with_encoder(config, FeatureEncoder::new(clock))
    }

    fn with_encoder(config: ModelConfig, encoder: FeatureEncoder) -> Result<Self> {
        let state = ModelState::bootstrap(&config)?;
        Ok(Self { encoder, config, state })
    }

    /// Score one event against the active model
    pub fn score(&self, event: &Event) -> Result<ScoreResult> {
        let vector = self.encoder.encode(event);
        let model = self.state.current();

        let raw_score = model.forest.score_samples(&vector)?;
        let anomaly_score = normalize(raw_score).map_err(|e| {
            log::error!(
                "Model {} produced {} for {}",
                model.info.model_id,
                raw_score,
                vector.to_log_entry()
            );
            e
        })?;

        let (severity, explanation) = classify(anomaly_score, event, vector.hour());

        log::debug!(
            "Scored {} from {}: raw {:.4}, anomaly {:.3}, {}",
            event.event_type,
            event.ip,
            raw_score,
            anomaly_score,
            severity
        );

        Ok(ScoreResult {
            anomaly_score,
            severity,
            explanation,
        })
    }

    /// Continuity score of an event before normalization
    pub fn raw_score(&self, event: &Event) -> Result<f64> {
        let vector = self.encoder.encode(event);
        self.state.current().forest.score_samples(&vector)
    }

    /// Refit on `events` and swap the new model in
    ///
    /// An empty batch is rejected and the active model keeps serving.
    pub fn train(&self, events: &[Event]) -> Result<TrainSummary> {
        if events.is_empty() {
            log::warn!("Train rejected: empty batch");
            return Err(ScoringError::EmptyTrainingSet);
        }

        let vectors = self.encoder.encode_all(events);
        let matrix = TrainingMatrix::from_vectors(&vectors)?;
        let forest = IsolationForest::fit(&matrix, &self.config)?;
        let info = self.state.replace(forest, matrix.n_rows());

        log::info!("Model {} trained on {} events", info.model_id, info.samples);

        Ok(TrainSummary {
            message: TRAIN_SUCCESS_MESSAGE.to_string(),
            samples: events.len(),
        })
    }

    pub fn model_info(&self) -> ModelInfo {
        self.state.info()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

// ============================================================================
// PROCESS-WIDE ENGINE
// ============================================================================

static DEFAULT_ENGINE: Lazy<ScoringEngine> = Lazy::new(|| {
    let config = ModelConfig::from_env();
    match ScoringEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::warn!("Model config from environment rejected ({}), using defaults", e);
            // Defaults always pass validate(), covered by the config tests
            debug_assert!(ModelConfig::default().validate().is_ok());
            ScoringEngine::new(ModelConfig::default()).expect("default model config is valid")
        }
    }
});

/// Build the default engine eagerly (otherwise done on first use)
pub fn init() {
    log::info!("Starting audit anomaly core v{}...", APP_VERSION);
    Lazy::force(&DEFAULT_ENGINE);
}

/// Score one event with the process-wide engine
pub fn score(event: &Event) -> Result<ScoreResult> {
    DEFAULT_ENGINE.score(event)
}

/// Retrain the process-wide engine
pub fn train(events: &[Event]) -> Result<TrainSummary> {
    DEFAULT_ENGINE.train(events)
}

pub fn model_info() -> ModelInfo {
    DEFAULT_ENGINE.model_info()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FixedClock;
    use crate::logic::threat::Severity;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn engine() -> ScoringEngine {
        init_logger();
        ScoringEngine::with_clock(ModelConfig::default(), Arc::new(FixedClock::new(12))).unwrap()
    }

    fn login() -> Event {
        Event::new("login", "u1", "10.0.0.1", "X").with_timestamp("2024-01-15T03:00:00Z")
    }

    #[test]
    fn test_bootstrap_model_flags_hashed_event() {
        let result = engine().score(&login()).unwrap();

        assert!((0.0..=1.0).contains(&result.anomaly_score));
        assert_ne!(result.severity, Severity::Low);
    }

    #[test]
    fn test_empty_train_keeps_model() {
        let engine = engine();
        let before = engine.model_info();
        let score_before = engine.raw_score(&login()).unwrap();

        let err = engine.train(&[]).unwrap_err();
        assert_eq!(err, ScoringError::EmptyTrainingSet);
        assert!(err.is_client_error());

        assert_eq!(engine.model_info(), before);
        assert_eq!(engine.raw_score(&login()).unwrap(), score_before);
    }

    #[test]
    fn test_train_replaces_model() {
        let engine = engine();
        let before = engine.model_info();

        let events: Vec<Event> = (0..50).map(|_| login()).collect();
        let summary = engine.train(&events).unwrap();

        assert_eq!(summary.message, "Model trained successfully");
        assert_eq!(summary.samples, 50);

        let after = engine.model_info();
        assert!(after.is_trained);
        assert_eq!(after.samples, 50);
        assert_ne!(after.model_id, before.model_id);
    }

    #[test]
    fn test_training_pulls_repeated_event_toward_normal() {
        let engine = engine();
        let before = engine.raw_score(&login()).unwrap();

        // Mostly the same login, plus a spread of unrelated traffic
        let mut events: Vec<Event> = (0..80).map(|_| login()).collect();
        for i in 0..20 {
            events.push(
                Event::new(format!("event_{}", i), "u9", format!("172.16.0.{}", i), "Y")
                    .with_timestamp(format!("2024-01-15T{:02}:30:00Z", i)),
            );
        }
        engine.train(&events).unwrap();

        let familiar = engine.raw_score(&login()).unwrap();
        let stranger = engine
            .raw_score(&Event::new("export", "u9", "203.0.113.7", "Z").with_timestamp("2024-01-15T23:00:00Z"))
            .unwrap();

        assert!(familiar > before, "familiar {} <= bootstrap {}", familiar, before);
        assert!(familiar > stranger, "familiar {} <= stranger {}", familiar, stranger);
        assert_eq!(engine.score(&login()).unwrap().severity, Severity::Low);
    }

    #[test]
    fn test_missing_timestamp_uses_injected_clock() {
        let engine = engine();
        let event = Event::new("login", "u1", "10.0.0.1", "X").with_timestamp("not-a-date");

        let result = engine.score(&event).unwrap();
        if result.severity == Severity::Critical {
            assert!(result.explanation.contains("at 12:00"));
        }

        let pinned = Event::new("login", "u1", "10.0.0.1", "X").with_timestamp("2024-06-01T12:59:00Z");
        assert_eq!(engine.raw_score(&event).unwrap(), engine.raw_score(&pinned).unwrap());
    }

    #[test]
    fn test_reduced_precision_timestamp_keeps_its_hour() {
        let engine = engine();
        let full = Event::new("login", "u1", "10.0.0.1", "X").with_timestamp("2024-01-15T03:00:00Z");

        for ts in ["2024-01-15T03", "2024-01-15T03Z", "20240115T030000Z", "2024-01-15T03:00:00+05:30:15"] {
            let event = Event::new("login", "u1", "10.0.0.1", "X").with_timestamp(ts);
            assert_eq!(engine.raw_score(&event).unwrap(), engine.raw_score(&full).unwrap(), "{}", ts);
        }
        assert_eq!(engine.model_info().layout, crate::logic::features::LayoutInfo::current());
    }

    #[test]
    fn test_concurrent_scores_during_train() {
        let engine = Arc::new(engine());
        let events: Vec<Event> = (0..30).map(|_| login()).collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let result = engine.score(&login()).unwrap();
                        assert!((0.0..=1.0).contains(&result.anomaly_score));
                    }
                })
            })
            .collect();

        for _ in 0..3 {
            engine.train(&events).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert!(engine.model_info().is_trained);
    }

    #[test]
    fn test_default_engine_functions() {
        init_logger();
        init();
        let result = score(&login()).unwrap();
        assert!((0.0..=1.0).contains(&result.anomaly_score));
        assert!(train(&[]).is_err());
        assert_eq!(model_info().n_trees, DEFAULT_ENGINE.config().n_trees);
    }
}
