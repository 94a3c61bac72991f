//! Dispute service.
//!
//! The disputes, reputations and settlements live in a single actor task
//! that owns them outright. [`DisputeService`] is a cheap, cloneable handle
//! that sends commands over a channel; the actor applies them one at a time
//! in arrival order and writes the affected collection back to storage
//! before replying. No two mutations ever interleave, so concurrent callers
//! cannot lose each other's updates.
//!
//! Analysis latency is spent outside the actor. `trigger_ai_analysis` marks
//! the dispute `ai_analyzing` (persisted at once so observers see it), runs
//! the [`AnalysisEngine`] on a spawned task, then sends the result back as a
//! second command. The spawned task finishes even if the caller goes away.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use bandhan_common::config::DisputeConfig;
use bandhan_common::{AppError, AppResult, Config, DisputeIdFormat, IdGenerator, get_metrics};
use bandhan_db::Repositories;
use bandhan_db::entities::{
    AiDisputeAnalysis, Dispute, DisputePriority, DisputeResolution, DisputeStatus, Evidence,
    EvidenceMetadata, EvidenceType, Party, ResolutionType, ResolvedBy, UserReputation,
};
use chrono::Utc;
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use super::analysis::{AnalysisEngine, RuleBasedAnalyzer};
use super::reputation::{self, ReputationUpdate};
use super::settlement::{self, RecordSettlementInput};
use super::stats::DisputeStats;
use super::workflow::{self, AnalysisGate};

/// Input for opening a dispute.
#[derive(Debug, Clone)]
pub struct CreateDisputeInput {
    pub order_id: String,
    pub raised_by: Party,
    pub reason: String,
    pub priority: DisputePriority,
}

/// Input for attaching evidence to a dispute.
#[derive(Debug, Clone)]
pub struct AddEvidenceInput {
    pub submitted_by: Party,
    pub evidence_type: EvidenceType,
    pub file_url: Option<String>,
    pub description: String,
    pub metadata: Option<EvidenceMetadata>,
}

/// Input for a manual resolution.
#[derive(Debug, Clone)]
pub struct ResolveDisputeInput {
    pub resolution_type: ResolutionType,
    pub resolution_details: String,
    /// Defaults to a moderator.
    pub resolved_by: ResolvedBy,
}

impl ResolveDisputeInput {
    /// A resolution made by a moderator.
    #[must_use]
    pub fn new(resolution_type: ResolutionType, resolution_details: impl Into<String>) -> Self {
        Self {
            resolution_type,
            resolution_details: resolution_details.into(),
            resolved_by: ResolvedBy::default(),
        }
    }

    /// Attribute the resolution to someone other than a moderator.
    #[must_use]
    pub fn resolved_by(mut self, resolved_by: ResolvedBy) -> Self {
        self.resolved_by = resolved_by;
        self
    }
}

type Reply<T> = oneshot::Sender<AppResult<T>>;
type ReadFn = Box<dyn FnOnce(&StoreState) + Send>;

/// Result of asking the actor to start an analysis.
enum BeginOutcome {
    Unknown,
    Skipped(Dispute),
    Started(Dispute),
}

enum Command {
    Create {
        input: CreateDisputeInput,
        reply: Reply<Dispute>,
    },
    AddEvidence {
        dispute_id: String,
        input: AddEvidenceInput,
        reply: Reply<Option<Dispute>>,
    },
    BeginAnalysis {
        dispute_id: String,
        reply: Reply<BeginOutcome>,
    },
    CompleteAnalysis {
        dispute_id: String,
        analysis: AiDisputeAnalysis,
        reply: Reply<Option<Dispute>>,
    },
    FailAnalysis {
        dispute_id: String,
        reply: Reply<Option<Dispute>>,
    },
    Resolve {
        dispute_id: String,
        input: ResolveDisputeInput,
        reply: Reply<Option<Dispute>>,
    },
    UpdateReputation {
        update: ReputationUpdate,
        reply: Reply<UserReputation>,
    },
    RecordSettlement {
        input: RecordSettlementInput,
        reply: Reply<DisputeResolution>,
    },
    Read(ReadFn),
}

/// Collections owned by the actor.
#[derive(Debug, Default)]
struct StoreState {
    disputes: Vec<Dispute>,
    reputations: Vec<UserReputation>,
    resolutions: Vec<DisputeResolution>,
    /// Last issued dispute sequence number.
    sequence: u64,
}

impl StoreState {
    fn find(&self, key: &str) -> Option<&Dispute> {
        self.disputes.iter().find(|d| d.matches(key))
    }
}

/// Pick the sequence to continue from after a restart.
///
/// Takes the highest of the stored counter, the largest sequence embedded in
/// a stored dispute ID, and the number of stored disputes.
fn restore_sequence(stored: Option<u64>, disputes: &[Dispute]) -> u64 {
    let from_ids = disputes
        .iter()
        .filter_map(|d| DisputeIdFormat::parse_sequence(&d.dispute_id))
        .max()
        .unwrap_or(0);
    stored
        .unwrap_or(0)
        .max(from_ids)
        .max(disputes.len() as u64)
}

/// Hand disputes left `ai_analyzing` by a previous process to human review.
///
/// No analysis survives a restart, so these would otherwise never leave
/// `ai_analyzing`. Returns how many were moved.
fn recover_interrupted(disputes: &mut [Dispute]) -> usize {
    let now = Utc::now();
    let mut recovered = 0;
    for dispute in disputes
        .iter_mut()
        .filter(|d| d.status == DisputeStatus::AiAnalyzing)
    {
        workflow::fail_analysis(dispute, now);
        warn!(
            dispute_id = %dispute.dispute_id,
            "Analysis interrupted by restart, handing dispute to human review"
        );
        recovered += 1;
    }
    recovered
}

struct StoreActor {
    state: StoreState,
    repos: Repositories,
    id_gen: IdGenerator,
    id_format: DisputeIdFormat,
    auto_resolve_threshold: f64,
}

impl StoreActor {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        debug!("Dispute store stopped");
    }

    async fn handle(&mut self, command: Command) {
        // A dropped receiver means the caller stopped waiting; the
        // mutation has still been applied.
        match command {
            Command::Create { input, reply } => {
                let _ = reply.send(self.create(input).await);
            }
            Command::AddEvidence {
                dispute_id,
                input,
                reply,
            } => {
                let _ = reply.send(self.add_evidence(&dispute_id, input).await);
            }
            Command::BeginAnalysis { dispute_id, reply } => {
                let _ = reply.send(self.begin_analysis(&dispute_id).await);
            }
            Command::CompleteAnalysis {
                dispute_id,
                analysis,
                reply,
            } => {
                let _ = reply.send(self.complete_analysis(&dispute_id, analysis).await);
            }
            Command::FailAnalysis { dispute_id, reply } => {
                let _ = reply.send(self.fail_analysis(&dispute_id).await);
            }
            Command::Resolve {
                dispute_id,
                input,
                reply,
            } => {
                let _ = reply.send(self.resolve(&dispute_id, input).await);
            }
            Command::UpdateReputation { update, reply } => {
                let _ = reply.send(self.update_reputation(update).await);
            }
            Command::RecordSettlement { input, reply } => {
                let _ = reply.send(self.record_settlement(input).await);
            }
            Command::Read(read) => read(&self.state),
        }
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Dispute> {
        self.state.disputes.iter_mut().find(|d| d.matches(key))
    }

    async fn persist_disputes(&self) -> AppResult<()> {
        self.repos
            .disputes
            .save(&self.state.disputes)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to persist disputes"))
    }

    async fn create(&mut self, input: CreateDisputeInput) -> AppResult<Dispute> {
        let now = Utc::now();
        self.state.sequence += 1;

        let dispute = Dispute {
            id: self.id_gen.generate(),
            dispute_id: self.id_format.format(self.state.sequence, now),
            order_id: input.order_id,
            raised_by: input.raised_by,
            reason: input.reason,
            status: DisputeStatus::Open,
            priority: input.priority,
            evidence: Vec::new(),
            ai_analysis: None,
            resolution_type: None,
            resolution_details: None,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.state.disputes.push(dispute.clone());

        get_metrics().disputes_created.fetch_add(1, Ordering::Relaxed);
        info!(
            dispute_id = %dispute.dispute_id,
            order_id = %dispute.order_id,
            raised_by = %dispute.raised_by,
            "Dispute opened"
        );

        self.persist_disputes().await?;
        self.repos.disputes.save_sequence(self.state.sequence).await?;
        Ok(dispute)
    }

    async fn add_evidence(
        &mut self,
        key: &str,
        input: AddEvidenceInput,
    ) -> AppResult<Option<Dispute>> {
        let now = Utc::now();
        let evidence_id = self.id_gen.generate();
        let Some(dispute) = self.find_mut(key) else {
            debug!(dispute_id = %key, "Ignoring evidence for unknown dispute");
            return Ok(None);
        };

        let evidence = Evidence {
            id: evidence_id,
            dispute_id: dispute.id.clone(),
            submitted_by: input.submitted_by,
            evidence_type: input.evidence_type,
            file_url: input.file_url,
            description: input.description,
            metadata: input.metadata,
            created_at: now,
        };
        workflow::add_evidence(dispute, evidence, now);
        let updated = dispute.clone();

        get_metrics().evidence_added.fetch_add(1, Ordering::Relaxed);
        debug!(
            dispute_id = %updated.dispute_id,
            evidence_count = updated.evidence.len(),
            "Evidence added"
        );

        self.persist_disputes().await?;
        Ok(Some(updated))
    }

    async fn begin_analysis(&mut self, key: &str) -> AppResult<BeginOutcome> {
        let now = Utc::now();
        let Some(dispute) = self.find_mut(key) else {
            debug!(dispute_id = %key, "Ignoring analysis for unknown dispute");
            return Ok(BeginOutcome::Unknown);
        };

        let gate = workflow::analysis_gate(dispute);
        if gate != AnalysisGate::Ready {
            info!(dispute_id = %dispute.dispute_id, gate = ?gate, "Analysis not started");
            return Ok(BeginOutcome::Skipped(dispute.clone()));
        }

        workflow::begin_analysis(dispute, now);
        let started = dispute.clone();
        info!(dispute_id = %started.dispute_id, "Analysis started");

        self.persist_disputes().await?;
        Ok(BeginOutcome::Started(started))
    }

    async fn complete_analysis(
        &mut self,
        key: &str,
        analysis: AiDisputeAnalysis,
    ) -> AppResult<Option<Dispute>> {
        let now = Utc::now();
        let threshold = self.auto_resolve_threshold;
        let processing_time = Duration::from_millis(analysis.processing_time_ms);
        let recommendation = analysis.ai_recommendation;
        let confidence = analysis.confidence_score;

        let Some(dispute) = self.find_mut(key) else {
            warn!(dispute_id = %key, "Analysis finished for a dispute that no longer exists");
            return Ok(None);
        };

        let auto_resolved = workflow::complete_analysis(dispute, analysis, threshold, now);
        let updated = dispute.clone();

        get_metrics().record_analysis(processing_time, auto_resolved);
        info!(
            dispute_id = %updated.dispute_id,
            recommendation = ?recommendation,
            confidence,
            status = ?updated.status,
            "Analysis recorded"
        );

        self.persist_disputes().await?;
        Ok(Some(updated))
    }

    async fn fail_analysis(&mut self, key: &str) -> AppResult<Option<Dispute>> {
        let now = Utc::now();
        let Some(dispute) = self.find_mut(key) else {
            return Ok(None);
        };

        workflow::fail_analysis(dispute, now);
        let updated = dispute.clone();
        self.persist_disputes().await?;
        Ok(Some(updated))
    }

    async fn resolve(
        &mut self,
        key: &str,
        input: ResolveDisputeInput,
    ) -> AppResult<Option<Dispute>> {
        let now = Utc::now();
        let Some(dispute) = self.find_mut(key) else {
            debug!(dispute_id = %key, "Ignoring resolution for unknown dispute");
            return Ok(None);
        };

        let previous = dispute.status;
        workflow::resolve(
            dispute,
            input.resolution_type,
            input.resolution_details,
            input.resolved_by,
            now,
        );
        let updated = dispute.clone();

        get_metrics().manual_resolutions.fetch_add(1, Ordering::Relaxed);
        info!(
            dispute_id = %updated.dispute_id,
            previous_status = ?previous,
            resolution = ?input.resolution_type,
            resolved_by = ?input.resolved_by,
            "Dispute resolved"
        );

        self.persist_disputes().await?;
        Ok(Some(updated))
    }

    async fn update_reputation(&mut self, update: ReputationUpdate) -> AppResult<UserReputation> {
        let now = Utc::now();
        let position = self
            .state
            .reputations
            .iter()
            .position(|r| r.user_id == update.user_id);
        let existing = position.map(|i| self.state.reputations[i].clone());

        let updated = reputation::apply_update(existing, update, &self.id_gen, now);
        match position {
            Some(i) => self.state.reputations[i] = updated.clone(),
            None => self.state.reputations.push(updated.clone()),
        }

        get_metrics().reputation_updates.fetch_add(1, Ordering::Relaxed);
        info!(
            user_id = %updated.user_id,
            score = updated.reputation_score,
            account_status = ?updated.account_status,
            "Reputation updated"
        );

        self.repos
            .reputations
            .save(&self.state.reputations)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to persist reputations"))?;
        Ok(updated)
    }

    async fn record_settlement(
        &mut self,
        input: RecordSettlementInput,
    ) -> AppResult<DisputeResolution> {
        let dispute = self
            .state
            .find(&input.dispute_id)
            .ok_or_else(|| AppError::DisputeNotFound(input.dispute_id.clone()))?;

        let record = settlement::build_settlement(dispute, input, &self.id_gen, Utc::now())?;
        self.state.resolutions.push(record.clone());

        info!(
            dispute_id = %record.dispute_id,
            settlement = ?record.resolution_type,
            total = record.total_amount(),
            "Settlement recorded"
        );

        self.repos
            .resolutions
            .save(&self.state.resolutions)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to persist settlements"))?;
        Ok(record)
    }
}

/// Handle to the dispute store.
#[derive(Clone)]
pub struct DisputeService {
    commands: mpsc::Sender<Command>,
    analyzer: Arc<dyn AnalysisEngine>,
}

impl DisputeService {
    /// Hydrate the store from `repos` and start its actor task.
    ///
    /// Must be called inside a Tokio runtime. The actor stops once every
    /// handle has been dropped.
    pub async fn start(
        repos: Repositories,
        analyzer: Arc<dyn AnalysisEngine>,
        config: &DisputeConfig,
    ) -> Self {
        let mut snapshot = repos.hydrate().await;
        let sequence = restore_sequence(snapshot.sequence, &snapshot.disputes);
        debug!(sequence, "Restored dispute sequence");

        if recover_interrupted(&mut snapshot.disputes) > 0 {
            let _ = repos
                .disputes
                .save(&snapshot.disputes)
                .await
                .inspect_err(|e| error!(error = %e, "Failed to persist recovered disputes"));
        }

        let actor = StoreActor {
            state: StoreState {
                disputes: snapshot.disputes,
                reputations: snapshot.reputations,
                resolutions: snapshot.resolutions,
                sequence,
            },
            repos,
            id_gen: IdGenerator::new(),
            id_format: DisputeIdFormat::new(&config.region),
            auto_resolve_threshold: config.auto_resolve_threshold,
        };

        let (commands, receiver) = mpsc::channel(config.command_buffer.max(1));
        tokio::spawn(actor.run(receiver));

        Self { commands, analyzer }
    }

    /// Open the configured storage and start a store with the rule-based analyzer.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let store = bandhan_common::storage::open(&config.storage).await?;
        let repos = Repositories::new(store, &config.storage.key_prefix);
        let analyzer = Arc::new(RuleBasedAnalyzer::new(config.analysis.clone()));
        Ok(Self::start(repos, analyzer, &config.disputes).await)
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> AppResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| AppError::StoreUnavailable("dispute store has stopped".to_string()))?;
        response.await.map_err(|_| {
            AppError::StoreUnavailable("dispute store dropped the request".to_string())
        })?
    }

    async fn read<T>(&self, read: impl FnOnce(&StoreState) -> T + Send + 'static) -> AppResult<T>
    where
        T: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let command = Command::Read(Box::new(move |state| {
            let _ = reply.send(read(state));
        }));
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::StoreUnavailable("dispute store has stopped".to_string()))?;
        response.await.map_err(|_| {
            AppError::StoreUnavailable("dispute store dropped the request".to_string())
        })
    }

    // ========== Mutations ==========

    /// Open a new dispute with status `open` and a fresh human-readable ID.
    pub async fn create_dispute(&self, input: CreateDisputeInput) -> AppResult<Dispute> {
        self.request(|reply| Command::Create { input, reply }).await
    }

    /// Append evidence to a dispute.
    ///
    /// Returns `None`, without error, when no dispute matches `dispute_id`.
    pub async fn add_evidence(
        &self,
        dispute_id: &str,
        input: AddEvidenceInput,
    ) -> AppResult<Option<Dispute>> {
        let dispute_id = dispute_id.to_string();
        self.request(|reply| Command::AddEvidence {
            dispute_id,
            input,
            reply,
        })
        .await
    }

    /// Run analysis on a dispute and route it by the result.
    ///
    /// Returns the dispute as it stands afterwards, or `None` when no dispute
    /// matches. Disputes that already carry an analysis, are being analyzed,
    /// or are resolved/escalated/closed come back unchanged.
    pub async fn trigger_ai_analysis(&self, dispute_id: &str) -> AppResult<Option<Dispute>> {
        let key = dispute_id.to_string();
        let dispute = match self
            .request(|reply| Command::BeginAnalysis {
                dispute_id: key,
                reply,
            })
            .await?
        {
            BeginOutcome::Unknown => return Ok(None),
            BeginOutcome::Skipped(dispute) => return Ok(Some(dispute)),
            BeginOutcome::Started(dispute) => dispute,
        };

        let service = self.clone();
        tokio::spawn(async move { service.run_analysis(dispute).await })
            .await
            .map_err(|e| AppError::Internal(format!("Analysis task failed: {e}")))?
    }

    async fn run_analysis(&self, dispute: Dispute) -> AppResult<Option<Dispute>> {
        let outcome = AssertUnwindSafe(self.analyzer.analyze(&dispute))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(AppError::Analysis("analysis engine panicked".to_string())));

        let dispute_id = dispute.id;
        match outcome {
            Ok(analysis) => {
                self.request(|reply| Command::CompleteAnalysis {
                    dispute_id,
                    analysis,
                    reply,
                })
                .await
            }
            Err(e) => {
                get_metrics().record_analysis_failure();
                warn!(
                    dispute_id = %dispute.dispute_id,
                    error = %e,
                    "Analysis failed, handing dispute to human review"
                );
                self.request(|reply| Command::FailAnalysis { dispute_id, reply })
                    .await
            }
        }
    }

    /// Resolve a dispute manually, from any status.
    ///
    /// Returns `None`, without error, when no dispute matches `dispute_id`.
    pub async fn resolve_dispute(
        &self,
        dispute_id: &str,
        input: ResolveDisputeInput,
    ) -> AppResult<Option<Dispute>> {
        let dispute_id = dispute_id.to_string();
        self.request(|reply| Command::Resolve {
            dispute_id,
            input,
            reply,
        })
        .await
    }

    /// Apply a reputation change, creating the user's record on first use.
    pub async fn update_user_reputation(&self, update: ReputationUpdate) -> AppResult<UserReputation> {
        self.request(|reply| Command::UpdateReputation { update, reply })
            .await
    }

    /// Record the financial settlement of a dispute.
    pub async fn record_settlement(
        &self,
        input: RecordSettlementInput,
    ) -> AppResult<DisputeResolution> {
        self.request(|reply| Command::RecordSettlement { input, reply })
            .await
    }

    // ========== Queries ==========

    /// Get a dispute by opaque or human-readable ID.
    pub async fn get_dispute(&self, dispute_id: &str) -> AppResult<Option<Dispute>> {
        let key = dispute_id.to_string();
        self.read(move |state| state.find(&key).cloned()).await
    }

    /// Every dispute, in creation order.
    pub async fn all_disputes(&self) -> AppResult<Vec<Dispute>> {
        self.read(|state| state.disputes.clone()).await
    }

    /// Disputes raised against `order_id`, in creation order.
    pub async fn get_disputes_by_order(&self, order_id: &str) -> AppResult<Vec<Dispute>> {
        let order_id = order_id.to_string();
        self.read(move |state| {
            state
                .disputes
                .iter()
                .filter(|d| d.order_id == order_id)
                .cloned()
                .collect()
        })
        .await
    }

    /// Disputes currently in `status`, in creation order.
    pub async fn get_disputes_by_status(&self, status: DisputeStatus) -> AppResult<Vec<Dispute>> {
        self.read(move |state| {
            state
                .disputes
                .iter()
                .filter(|d| d.status == status)
                .cloned()
                .collect()
        })
        .await
    }

    /// Reputation record for `user_id`, if the user has one.
    pub async fn get_user_reputation(&self, user_id: &str) -> AppResult<Option<UserReputation>> {
        let user_id = user_id.to_string();
        self.read(move |state| {
            state
                .reputations
                .iter()
                .find(|r| r.user_id == user_id)
                .cloned()
        })
        .await
    }

    /// Settlements recorded for a dispute, oldest first.
    pub async fn get_resolutions_by_dispute(
        &self,
        dispute_id: &str,
    ) -> AppResult<Vec<DisputeResolution>> {
        let key = dispute_id.to_string();
        self.read(move |state| {
            let Some(dispute) = state.find(&key) else {
                return Vec::new();
            };
            state
                .resolutions
                .iter()
                .filter(|r| r.dispute_id == dispute.id)
                .cloned()
                .collect()
        })
        .await
    }

    /// Counts by status and the automatic resolution rate.
    pub async fn dispute_stats(&self) -> AppResult<DisputeStats> {
        self.read(|state| DisputeStats::from_disputes(&state.disputes))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bandhan_common::MemoryStore;
    use bandhan_common::config::AnalysisConfig;

    fn dispute_with_id(dispute_id: &str) -> Dispute {
        let now = Utc::now();
        Dispute {
            id: IdGenerator::new().generate(),
            dispute_id: dispute_id.to_string(),
            order_id: "ORD-1".to_string(),
            raised_by: Party::Buyer,
            reason: String::new(),
            status: DisputeStatus::Open,
            priority: DisputePriority::Medium,
            evidence: Vec::new(),
            ai_analysis: None,
            resolution_type: None,
            resolution_details: None,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_restore_sequence_prefers_highest() {
        let disputes = vec![
            dispute_with_id("BND-DISP-MH-2026-001"),
            dispute_with_id("BND-DISP-MH-2026-009"),
        ];
        assert_eq!(restore_sequence(None, &disputes), 9);
        assert_eq!(restore_sequence(Some(12), &disputes), 12);
        assert_eq!(restore_sequence(None, &[]), 0);
    }

    #[test]
    fn test_recover_interrupted_moves_to_review() {
        let mut analyzing = dispute_with_id("BND-DISP-MH-2026-001");
        analyzing.status = DisputeStatus::AiAnalyzing;
        let mut disputes = vec![analyzing, dispute_with_id("BND-DISP-MH-2026-002")];

        assert_eq!(recover_interrupted(&mut disputes), 1);
        assert_eq!(disputes[0].status, DisputeStatus::UnderReview);
        assert!(disputes[0].ai_analysis.is_none());
        assert_eq!(disputes[1].status, DisputeStatus::Open);
        assert_eq!(recover_interrupted(&mut disputes), 0);
    }

    #[test]
    fn test_resolve_input_defaults_to_moderator() {
        let input = ResolveDisputeInput::new(ResolutionType::Release, "Delivery confirmed");
        assert_eq!(input.resolved_by, ResolvedBy::Moderator);
        assert_eq!(input.resolution_details, "Delivery confirmed");

        let input = input.resolved_by(ResolvedBy::Admin);
        assert_eq!(input.resolved_by, ResolvedBy::Admin);
    }

    #[test]
    fn test_restore_sequence_falls_back_to_count() {
        let disputes = vec![dispute_with_id("legacy-a"), dispute_with_id("legacy-b")];
        assert_eq!(restore_sequence(None, &disputes), 2);
    }

    #[tokio::test]
    async fn test_service_stops_when_actor_gone() {
        let (commands, receiver) = mpsc::channel(1);
        drop(receiver);
        let service = DisputeService {
            commands,
            analyzer: Arc::new(RuleBasedAnalyzer::new(AnalysisConfig::instant())),
        };

        let err = service.dispute_stats().await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_create_uses_configured_region() {
        let repos = Repositories::new(Arc::new(MemoryStore::new()), "");
        let config = DisputeConfig {
            region: "ka".to_string(),
            ..DisputeConfig::default()
        };
        let service = DisputeService::start(
            repos,
            Arc::new(RuleBasedAnalyzer::new(AnalysisConfig::instant())),
            &config,
        )
        .await;

        let dispute = service
            .create_dispute(CreateDisputeInput {
                order_id: "ORD-5".to_string(),
                raised_by: Party::Seller,
                reason: "Payment withheld".to_string(),
                priority: DisputePriority::Low,
            })
            .await
            .unwrap();

        assert!(dispute.dispute_id.starts_with("BND-DISP-KA-"));
        assert!(dispute.dispute_id.ends_with("-001"));
    }
}
