//! `leap extract`: run the extractor over saved model text

use anyhow::{Context, Result};
use leap_domain::feature::compliance::CompliancePack;
use leap_domain::feature::examiner::Evaluation;
use leap_domain::feature::fundraising::FundraisingPlan;
use leap_domain::feature::growth::GrowthDashboard;
use leap_domain::feature::learning::LearningPath;
use leap_domain::feature::mirror::FounderReflection;
use leap_domain::feature::news::NewsExplanation;
use leap_domain::feature::pitch::PitchPackage;
use leap_domain::feature::project::ProjectPlan;
use leap_domain::feature::reels::ReelsContent;
use leap_domain::feature::solver::ProblemSolverResponse;
use leap_domain::response::extract_json_as;
use leap_domain::response::structured::StructuredPayload;
use leap_domain::{ExtractOptions, FeatureKind, parse_structured};
use leap_presentation::cli::commands::ExtractArgs;
use leap_presentation::{ConsoleFormatter, ConsoleRender, OutputConfig};
use serde::Serialize;
use serde_json::Value;

pub fn run(args: &ExtractArgs, bracket_scan: bool, output: &OutputConfig) -> Result<()> {
    let text = crate::input::read_text(args.file.as_deref())?;
    let options = if args.strict || !bracket_scan {
        ExtractOptions::strict()
    } else {
        ExtractOptions::greedy()
    };

    let Some(feature) = &args.feature else {
        let value: Value = extract_json_as(&text, &options)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    };

    let kind: FeatureKind = feature.parse()?;
    let rendered = match kind {
        FeatureKind::ProjectPlan => classify::<ProjectPlan>(&text, &options, output),
        FeatureKind::Pitch => classify::<PitchPackage>(&text, &options, output),
        FeatureKind::LearningPath => classify::<LearningPath>(&text, &options, output),
        FeatureKind::Reels => classify::<ReelsContent>(&text, &options, output),
        FeatureKind::Compliance => classify::<CompliancePack>(&text, &options, output),
        FeatureKind::NewsExplainer => classify::<NewsExplanation>(&text, &options, output),
        FeatureKind::GrowthDashboard => classify::<GrowthDashboard>(&text, &options, output),
        FeatureKind::Examiner => classify::<Evaluation>(&text, &options, output),
        FeatureKind::StartupMirror => classify::<FounderReflection>(&text, &options, output),
        FeatureKind::Fundraising => classify::<FundraisingPlan>(&text, &options, output),
        FeatureKind::ProblemSolver => classify::<ProblemSolverResponse>(&text, &options, output),
    }?;
    println!("{rendered}");
    Ok(())
}

fn classify<T>(text: &str, options: &ExtractOptions, output: &OutputConfig) -> Result<String>
where
    T: StructuredPayload + ConsoleRender + Serialize,
{
    let result = parse_structured::<T>(text, options)
        .with_context(|| format!("Could not read the text as {}", T::NAME))?;
    Ok(ConsoleFormatter::format_result(&result, output.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_domain::{OutputFormat, ResponseError};

    fn json_output() -> OutputConfig {
        OutputConfig::from_file(Some(OutputFormat::Json), false, false)
    }

    #[test]
    fn test_classify_keeps_typed_error() {
        let err = classify::<NewsExplanation>("no json here", &ExtractOptions::greedy(), &json_output())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResponseError>(),
            Some(ResponseError::Format(_))
        ));
        assert!(format!("{err:#}").contains("Please try again."));
    }

    #[test]
    fn test_classify_renders_success_as_json() {
        let text = "```json\n{\"whatHappened\": \"A fund closed.\"}\n```";
        let rendered =
            classify::<NewsExplanation>(text, &ExtractOptions::greedy(), &json_output()).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["kind"], "success");
        assert_eq!(value["payload"]["whatHappened"], "A fund closed.");
    }
}
