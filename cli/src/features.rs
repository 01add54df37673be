//! Feature commands: build the request, call the model, show the answer

use crate::input;
use anyhow::{Context, Result, anyhow, bail};
use leap_application::{
    CommunityService, GenerateError, GenerateUseCase, NoProgress, ProgressNotifier,
};
use leap_domain::feature::compliance::ComplianceRequest;
use leap_domain::feature::examiner::EvaluationRequest;
use leap_domain::feature::fundraising::FundraisingRequest;
use leap_domain::feature::growth::GrowthRequest;
use leap_domain::feature::learning::LearningPathRequest;
use leap_domain::feature::mirror::{FounderCheckin, ReflectionRequest};
use leap_domain::feature::news::NewsRequest;
use leap_domain::feature::pitch::PitchRequest;
use leap_domain::feature::project::ProjectIdea;
use leap_domain::feature::reels::ReelsRequest;
use leap_domain::feature::solver::ProblemRequest;
use leap_domain::{FeatureRequest, StructuredResult, User};
use leap_infrastructure::{FileConfig, GeminiGateway, JsonFileSnapshotRepository, JsonlGenerationLogger};
use leap_presentation::cli::commands::{
    ComplianceArgs, ExamineArgs, FundraiseArgs, MirrorArgs, ProfileArgs, ReelsArgs,
};
use leap_presentation::{
    Command, ConsoleFormatter, ConsoleRender, OutputConfig, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;

type Community = CommunityService<JsonFileSnapshotRepository>;

/// Everything a feature command needs
pub struct FeatureRunner {
    use_case: GenerateUseCase<GeminiGateway>,
    output: OutputConfig,
    config: FileConfig,
}

impl FeatureRunner {
    pub fn new(config: FileConfig, output: OutputConfig) -> Result<Self> {
        let gateway = GeminiGateway::from_config(&config.model).map_err(|e| {
            anyhow!("{e}. Export your Gemini key or set [model].api_key in leap.toml")
        })?;

        let mut use_case = GenerateUseCase::new(Arc::new(gateway))
            .with_config(config.extraction.to_generation_config());

        if let Some(path) = &config.logging.generation_log
            && let Some(logger) = JsonlGenerationLogger::open(path)
        {
            info!("Recording generations to {}", logger.path().display());
            use_case = use_case.with_logger(Arc::new(logger));
        }

        Ok(Self {
            use_case,
            output,
            config,
        })
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if !self.output.show_progress {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    fn community(&self) -> Result<Community> {
        let path = self.config.store.resolve_path();
        CommunityService::open(Arc::new(JsonFileSnapshotRepository::new(path)))
            .context("Could not open the community store")
    }

    /// Run one request and print the outcome.
    async fn run<R>(&self, request: &R) -> Result<StructuredResult<R::Payload>, GenerateError>
    where
        R: FeatureRequest,
        R::Payload: ConsoleRender,
    {
        let progress = self.progress();
        let result = self
            .use_case
            .execute_with_progress(request, progress.as_ref())
            .await?;
        println!("{}", ConsoleFormatter::format_result(&result, self.output.format));
        Ok(result)
    }

    pub async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Plan { idea } => {
                self.run(&ProjectIdea::new(idea)).await?;
            }
            Command::Pitch(args) => {
                let user = self.profile_owner(&args)?;
                let startup = user.startup.clone().ok_or_else(|| no_startup(&user))?;
                self.run(&PitchRequest::new(startup)).await?;
            }
            Command::Learn { idea, domain } => {
                self.run(&LearningPathRequest::new(idea, domain)).await?;
            }
            Command::Reels(args) => self.reels(args).await?,
            Command::Compliance(args) => self.compliance(args).await?,
            Command::News { headline, url } => {
                self.run(&NewsRequest::new(headline, url)).await?;
            }
            Command::Growth(args) => {
                let user = self.profile_owner(&args)?;
                let startup = user.startup.clone().ok_or_else(|| no_startup(&user))?;
                let request = GrowthRequest::from_profile(startup).map_err(|e| {
                    anyhow!("{e}. Add metrics with `leap community update --startup-name ... --total-users ...`")
                })?;
                self.run(&request).await?;
            }
            Command::Examine(args) => self.examine(args).await?,
            Command::Mirror(args) => self.mirror(args).await?,
            Command::Fundraise(args) => self.fundraise(args).await?,
            Command::Solve { problem, no_save } => self.solve(problem, no_save).await?,
            other => bail!("not a feature command: {other:?}"),
        }
        Ok(())
    }

    /// `--user` if given, else the signed-in member
    fn profile_owner(&self, args: &ProfileArgs) -> Result<User> {
        let community = self.community()?;
        let user = match &args.user {
            Some(username) => community
                .user_by_username(username)
                .ok_or_else(|| anyhow!("No member with username '{username}'"))?,
            None => community
                .current_user()
                .ok_or_else(|| anyhow!("Sign in with `leap community login <username>` or pass --user"))?,
        };
        Ok(user.clone())
    }

    async fn reels(&self, args: ReelsArgs) -> Result<()> {
        let request = ReelsRequest {
            startup_name: args.name,
            domain: args.domain,
            stage: args.stage,
            platforms: args.platforms.iter().map(|p| input::platform_name(p)).collect(),
            language: args.language,
        };
        self.run(&request).await?;
        Ok(())
    }

    async fn compliance(&self, args: ComplianceArgs) -> Result<()> {
        let request = ComplianceRequest {
            startup_name: args.name,
            num_founders: args.founders,
            business_type: args.business_type,
            target_customers: args.customers,
            registration_type: args.registration,
        };
        self.run(&request).await?;
        Ok(())
    }

    async fn examine(&self, args: ExamineArgs) -> Result<()> {
        let text = input::read_text(Some(&args.transcript))?;
        let mut request = EvaluationRequest::new(input::parse_transcript(&text));
        for path in &args.snapshots {
            request = request.with_snapshot(input::load_snapshot(path)?);
        }
        self.run(&request).await?;
        Ok(())
    }

    async fn mirror(&self, args: MirrorArgs) -> Result<()> {
        let mut community = self.community()?;
        let user = community
            .current_user()
            .cloned()
            .ok_or_else(|| anyhow!("Sign in with `leap community login <username>` first"))?;
        let startup = user.startup.clone().ok_or_else(|| no_startup(&user))?;

        let checkin = FounderCheckin {
            went_wrong: args.went_wrong,
            biggest_blocker: args.blocker,
            system_to_fix: args.system,
        };
        let result = self.run(&ReflectionRequest::new(checkin.clone(), startup)).await?;

        if let StructuredResult::Success(reflection) = result
            && !args.no_save
        {
            community.record_founder_log(checkin, reflection)?;
            community.close()?;
            eprintln!("Saved to your founder log.");
        }
        Ok(())
    }

    async fn fundraise(&self, args: FundraiseArgs) -> Result<()> {
        let request = FundraisingRequest {
            pitch_deck_outline: args.deck,
            stage: args.stage,
            sector: args.sector,
            mrr_arr: args.mrr_arr,
            dau_mau: args.dau_mau,
            cac: args.cac,
            ltv: args.ltv,
            retention: args.retention,
            growth_mom: args.growth_mom,
            traction_summary: args.traction,
        };
        self.run(&request).await?;
        Ok(())
    }

    async fn solve(&self, problem: String, no_save: bool) -> Result<()> {
        let mut community = self.community()?;
        let user = community
            .current_user()
            .cloned()
            .ok_or_else(|| anyhow!("Sign in with `leap community login <username>` first"))?;

        let result = self.run(&ProblemRequest::new(problem.clone(), user)).await?;

        if let StructuredResult::Success(solution) = result
            && !no_save
        {
            community.record_problem_session(&problem, solution)?;
            community.close()?;
            eprintln!("Saved to your problem-solver history.");
        }
        Ok(())
    }
}

fn no_startup(user: &User) -> anyhow::Error {
    anyhow!(
        "@{} has no startup profile. Add one with `leap community update --startup-name ...`",
        user.username
    )
}
