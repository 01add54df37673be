//! Console rendering for each feature payload

use crate::output::console::ConsoleFormatter as F;
use crate::output::formatter::ConsoleRender;
use colored::Colorize;
use leap_domain::feature::compliance::{CompliancePack, DocumentTemplate};
use leap_domain::feature::examiner::Evaluation;
use leap_domain::feature::fundraising::FundraisingPlan;
use leap_domain::feature::growth::{GrowthDashboard, GrowthPlay, GrowthProjection};
use leap_domain::feature::learning::LearningPath;
use leap_domain::feature::mirror::FounderReflection;
use leap_domain::feature::news::NewsExplanation;
use leap_domain::feature::pitch::{PitchDeckSlide, PitchPackage};
use leap_domain::feature::project::ProjectPlan;
use leap_domain::feature::reels::ReelsContent;
use leap_domain::feature::solver::{DecisionNode, ProblemSolverResponse};
use std::collections::HashSet;

fn slides(deck: &[PitchDeckSlide]) -> String {
    deck.iter()
        .enumerate()
        .map(|(i, slide)| {
            format!(
                "{}\n{}",
                format!("{}. {}", i + 1, slide.title).yellow().bold(),
                F::bullets(&slide.content)
            )
        })
        .collect()
}

fn document(doc: &DocumentTemplate) -> String {
    let mut out = F::section_header(&doc.title);
    out.push_str(&format!("{}\n\n", doc.description.dimmed()));
    out.push_str(&F::indent(&doc.template, "  "));
    out.push('\n');
    let placeholders = doc.placeholders();
    if !placeholders.is_empty() {
        out.push_str(&F::field("Fill in", &placeholders.join(", ")));
    }
    out
}

fn projection(projection: &Option<GrowthProjection>) -> String {
    match projection {
        Some(p) => format!("    {} {} ({})\n", "Projection:".dimmed(), p.metric, p.change),
        None => String::new(),
    }
}

fn plays(plays: &[GrowthPlay]) -> String {
    plays
        .iter()
        .map(|play| {
            format!(
                "{} [{}]\n    {}\n    {}\n{}",
                play.title.yellow().bold(),
                play.play_type,
                play.description,
                play.implementation_idea.dimmed(),
                projection(&play.projection)
            )
        })
        .collect()
}

impl ConsoleRender for ProjectPlan {
    fn title(&self) -> String {
        "Project Blueprint".to_string()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&F::field("Blueprint", &self.student_blueprint.title));
        out.push_str(&F::field("Tagline", &self.student_blueprint.tagline));

        out.push_str(&F::section_header("Problem Understanding"));
        out.push_str(&format!("{}\n", self.problem_understanding.rephrased));
        out.push_str(&F::field("Target audience", &self.problem_understanding.target_audience));

        out.push_str(&F::section_header("Suggested MVP"));
        out.push_str(&format!("{}\n", self.suggested_mvp.description));
        out.push_str(&F::bullets(&self.suggested_mvp.features));
        if !self.mvp_flowchart.trim().is_empty() {
            out.push_str(&format!("\n{}\n", F::indent(&self.mvp_flowchart, "  ").dimmed()));
        }

        out.push_str(&F::section_header("Tech Stack"));
        out.push_str(&format!("{}\n", self.tech_stack.description));
        for rec in &self.tech_stack.recommendations {
            out.push_str(&format!("  * {} {}: {}\n", rec.name.bold(), rec.tool, rec.reason));
        }

        out.push_str(&F::section_header(&format!(
            "Starter Code: {} ({})",
            self.code_snippet.title, self.code_snippet.language
        )));
        out.push_str(&F::indent(&self.code_snippet.code, "  "));
        out.push('\n');

        out.push_str(&F::section_header("AI Integration"));
        out.push_str(&format!("{}\n", self.model_integration.suggestion));
        out.push_str(&F::field("Endpoint", &self.model_integration.api_endpoint));

        if !self.learning_resources.is_empty() {
            out.push_str(&F::section_header("Learning Resources"));
            for resource in &self.learning_resources {
                out.push_str(&format!("  * {} {}\n", resource.title, resource.url.dimmed()));
            }
        }

        if !self.collaborator_matches.is_empty() {
            out.push_str(&F::section_header("Collaborator Matches"));
            for person in &self.collaborator_matches {
                out.push_str(&format!(
                    "{} ({}, LEAP score {:.0}) [{}]\n    {}\n    {} {}\n",
                    person.name.yellow().bold(),
                    person.location,
                    person.leap_score,
                    person.match_type,
                    person.match_reason,
                    "Icebreaker:".dimmed(),
                    person.icebreaker
                ));
            }
        }
        out
    }
}

impl ConsoleRender for PitchPackage {
    fn title(&self) -> String {
        "Pitch Package".to_string()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&F::field("One-liner", &self.one_liner));

        out.push_str(&F::section_header("Pitch Deck"));
        out.push_str(&slides(&self.pitch_deck));

        out.push_str(&F::section_header("Elevator Pitch"));
        out.push_str(&format!("{}\n", self.elevator_pitch));

        if !self.name_suggestions.is_empty() {
            out.push_str(&F::section_header("Name Ideas"));
            for idea in &self.name_suggestions {
                out.push_str(&format!(
                    "  * {}: {} {}\n",
                    idea.name.bold(),
                    idea.rationale,
                    idea.domains.join(", ").dimmed()
                ));
            }
        }

        out.push_str(&F::section_header("Video Script"));
        out.push_str(&format!("{}\n", self.video_script));

        out.push_str(&F::section_header("LinkedIn Post"));
        out.push_str(&format!("{}\n", self.linkedin_post));
        out
    }
}

impl ConsoleRender for LearningPath {
    fn title(&self) -> String {
        format!("Learning Path ({} tasks)", self.task_count())
    }

    fn render(&self) -> String {
        let mut out = F::section_header("Roadmap");
        for week in &self.roadmap {
            out.push_str(&format!(
                "{}\n{}",
                format!("Week {}: {}", week.week, week.title).yellow().bold(),
                F::bullets(&week.tasks)
            ));
        }

        if !self.youtube_playlist.is_empty() {
            out.push_str(&F::section_header("Videos"));
            for video in &self.youtube_playlist {
                out.push_str(&format!(
                    "  * {} {}\n    {}\n",
                    video.title,
                    video.url.dimmed(),
                    video.description
                ));
            }
        }

        if !self.tech_stack_crash_course.is_empty() {
            out.push_str(&F::section_header("Crash Courses"));
            for course in &self.tech_stack_crash_course {
                out.push_str(&format!(
                    "  * {}: {} {}\n",
                    course.tool.bold(),
                    course.reason,
                    course.url.dimmed()
                ));
            }
        }

        if !self.case_studies.is_empty() {
            out.push_str(&F::section_header("Case Studies"));
            for study in &self.case_studies {
                out.push_str(&format!("{}\n{}\n", study.startup_name.yellow().bold(), study.summary));
                out.push_str(&F::bullets(&study.key_takeaways));
            }
        }
        out
    }
}

impl ConsoleRender for ReelsContent {
    fn title(&self) -> String {
        "Content Ideas".to_string()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for idea in self.ideas() {
            out.push_str(&F::section_header(&format!("{}: {}", idea.platform, idea.idea.title)));
            out.push_str(&F::field("Hook", &idea.idea.hook));
            out.push_str(&F::field("Purpose", &idea.idea.purpose));
            out.push_str(&F::field("Caption", &idea.script.short_caption));
            out.push_str(&format!("{}\n", idea.script.long_description));
            if !idea.script.hashtags.is_empty() {
                out.push_str(&format!("{}\n", idea.script.hashtags.join(" ").blue()));
            }
            out.push_str(&F::field("Audio", &idea.audio.recommendation));
            out.push_str(&format!("{}\n", "Storyboard:".bold()));
            out.push_str(&F::numbered(&idea.storyboard.scenes));
            out.push_str(&F::field("Moodboard", &idea.storyboard.moodboard));
            out.push_str(&F::field("Transitions", &idea.storyboard.transitions));
            out.push_str(&F::field("Call to action", &idea.cta.suggestion));
        }
        out
    }
}

impl ConsoleRender for CompliancePack {
    fn title(&self) -> String {
        "Compliance Pack".to_string()
    }

    fn render(&self) -> String {
        let guide = &self.registration_guide;
        let mut out = F::section_header(&guide.title);
        out.push_str(&format!("{}\n", guide.summary));
        for step in &guide.steps {
            out.push_str(&format!(
                "  {}. {}\n     {}\n",
                step.step,
                step.title.bold(),
                step.description
            ));
            if !step.link.is_empty() {
                out.push_str(&format!("     {}\n", step.link.dimmed()));
            }
            if !step.notes.is_empty() {
                out.push_str(&format!("     {}\n", step.notes.italic()));
            }
        }
        out.push_str(&F::field("Estimated time", &guide.estimated_time));
        out.push_str(&F::field("Estimated cost", &guide.estimated_cost));

        out.push_str(&document(&self.cofounder_agreement));
        out.push_str(&document(&self.nda));

        out.push_str(&F::section_header(&self.tax_checklist.title));
        for item in &self.tax_checklist.items {
            out.push_str(&format!("  [ ] {}: {} {}\n", item.title.bold(), item.details, item.link.dimmed()));
        }

        let deck = &self.pitch_safe_deck;
        out.push_str(&F::section_header(&deck.title));
        out.push_str(&F::field("Footer", &deck.footer_text));
        out.push_str(&F::field("Disclaimer", &deck.disclaimer_text));
        out.push_str(&F::bullets(&deck.sharing_tips));
        out
    }
}

impl ConsoleRender for NewsExplanation {
    fn title(&self) -> String {
        "News Explained".to_string()
    }

    fn render(&self) -> String {
        let mut out = F::section_header("What Happened");
        out.push_str(&format!("{}\n", self.what_happened));
        out.push_str(&F::section_header("Why It Matters"));
        out.push_str(&format!("{}\n", self.why_it_matters));
        out.push_str(&F::section_header("What You Can Learn"));
        out.push_str(&F::bullets(&self.what_you_can_learn));
        out
    }
}

impl ConsoleRender for GrowthDashboard {
    fn title(&self) -> String {
        "Growth Dashboard".to_string()
    }

    fn render(&self) -> String {
        let mut out = String::new();

        if !self.alerts.is_empty() {
            out.push_str(&F::section_header("Alerts"));
            for alert in &self.alerts {
                let badge = match alert.severity.to_ascii_lowercase().as_str() {
                    "high" => alert.severity.red().bold(),
                    "medium" => alert.severity.yellow().bold(),
                    _ => alert.severity.normal(),
                };
                out.push_str(&format!(
                    "  [{}] {} ({})\n      {}\n      {}\n",
                    badge, alert.title, alert.metric, alert.observation, alert.suggestion
                ));
            }
        }

        out.push_str(&F::section_header("Funnel"));
        out.push_str(&F::field("Weakest stage", &self.funnel_analysis.weakest_stage));
        out.push_str(&format!("{}\n", self.funnel_analysis.suggestion));

        out.push_str(&F::section_header("Growth Experiments"));
        for exp in &self.growth_experiments {
            out.push_str(&format!("{}\n", exp.title.yellow().bold()));
            out.push_str(&F::field("  Hypothesis", &exp.hypothesis));
            out.push_str(&F::field("  Expected impact", &exp.expected_impact));
            out.push_str(&F::numbered(&exp.execution_steps));
            if !exp.tools_needed.is_empty() {
                out.push_str(&F::field("  Tools", &exp.tools_needed.join(", ")));
            }
            out.push_str(&projection(&exp.projection));
        }

        out.push_str(&F::section_header("Retention Levers"));
        out.push_str(&plays(&self.retention_levers));

        let referral = &self.referral_strategy;
        out.push_str(&F::section_header("Referral Strategy"));
        out.push_str(&F::field("Model", &referral.recommended_model));
        out.push_str(&format!("{}\n", referral.rationale));
        out.push_str(&F::numbered(&referral.campaign_flow));
        out.push_str(&format!(
            "  \"{}\" {} [{}]\n",
            referral.referral_copy.headline.bold(),
            referral.referral_copy.body,
            referral.referral_copy.cta
        ));

        out.push_str(&F::section_header("Monetization Playbooks"));
        out.push_str(&plays(&self.monetization_playbooks));

        if !self.ab_tests.is_empty() {
            out.push_str(&F::section_header("A/B Tests"));
            for test in &self.ab_tests {
                out.push_str(&format!(
                    "{} ({})\n    {}\n    A: {}\n    B: {}\n",
                    test.title.yellow().bold(),
                    test.location,
                    test.hypothesis,
                    test.variant_a.description,
                    test.variant_b.description
                ));
            }
        }

        let team = &self.team_ops;
        if !team.templates.is_empty() || !team.brainstorm_prompts.is_empty() {
            out.push_str(&F::section_header("Team Ops"));
            for template in &team.templates {
                out.push_str(&format!("  * {}: {}\n", template.title.bold(), template.description));
            }
            for booster in &team.collaboration_boosters {
                out.push_str(&format!("  * {} [{}]: {}\n", booster.title.bold(), booster.booster_type, booster.description));
            }
            for prompt in &team.brainstorm_prompts {
                out.push_str(&format!("  ? {} ({}): {}\n", prompt.title.bold(), prompt.audience, prompt.prompt));
            }
        }
        out
    }
}

impl ConsoleRender for Evaluation {
    fn title(&self) -> String {
        format!("Evaluation: {:.0}/100", self.overall_score)
    }

    fn render(&self) -> String {
        let mut out = F::section_header("Strengths");
        out.push_str(&F::bullets(&self.strengths));

        out.push_str(&F::section_header("Areas for Improvement"));
        for area in &self.areas_for_improvement {
            out.push_str(&format!("  * {}: {}\n", area.area.bold(), area.suggestion));
        }

        if !self.suggested_resources.is_empty() {
            out.push_str(&F::section_header("Resources"));
            for resource in &self.suggested_resources {
                out.push_str(&format!(
                    "  * {} {}\n    {}\n",
                    resource.title,
                    resource.url.dimmed(),
                    resource.description
                ));
            }
        }
        out
    }
}

impl ConsoleRender for FounderReflection {
    fn title(&self) -> String {
        "Startup Mirror".to_string()
    }

    fn render(&self) -> String {
        let score = self.burnout_score();
        let gauge = format!("{}/100", score);
        let gauge = match score {
            0..=39 => gauge.green(),
            40..=69 => gauge.yellow(),
            _ => gauge.red(),
        };

        let mut out = format!("{} {}\n", "Burnout score:".bold(), gauge.bold());
        out.push_str(&format!("{}\n", self.analysis.burnout_analysis));

        out.push_str(&F::section_header("Mindfulness"));
        for exercise in &self.analysis.mindfulness_exercises {
            out.push_str(&format!(
                "  * {} [{}]: {}\n",
                exercise.title.bold(),
                exercise.exercise_type,
                exercise.description
            ));
        }

        if !self.analysis.delegation_templates.is_empty() {
            out.push_str(&F::section_header("Delegation Templates"));
            for template in &self.analysis.delegation_templates {
                out.push_str(&format!("{}\n{}\n", template.title.yellow().bold(), F::indent(&template.content, "  ")));
            }
        }

        let lesson = &self.lesson;
        out.push_str(&F::section_header(&format!("Lesson: {}", lesson.title)));
        out.push_str(&F::field("From", &lesson.source));
        out.push_str(&F::bullets(&lesson.takeaways));
        out.push_str(&F::field("Try this", &lesson.actionable_suggestion));
        out
    }
}

impl ConsoleRender for FundraisingPlan {
    fn title(&self) -> String {
        format!("Fundraising Co-pilot: readiness {:.0}/100", self.readiness.score)
    }

    fn render(&self) -> String {
        let mut out = format!("{}\n", self.readiness.guidance);

        out.push_str(&F::section_header("Deck Diagnostics"));
        for diag in &self.deck_diagnostics {
            out.push_str(&format!("  {:>3.0}  {}: {}\n", diag.score, diag.slide.bold(), diag.feedback));
        }

        out.push_str(&F::section_header("Enhanced Deck"));
        out.push_str(&slides(&self.enhanced_deck));

        out.push_str(&F::section_header("Investor Personas"));
        for persona in &self.investor_personas {
            out.push_str(&format!(
                "  * {}: {} {}\n",
                persona.persona_type.bold(),
                persona.description,
                persona.examples.join(", ").dimmed()
            ));
        }

        for template in &self.outreach_templates {
            out.push_str(&F::section_header(&format!("Outreach: {}", template.template_type)));
            out.push_str(&F::field("Subject", &template.subject));
            out.push_str(&format!("{}\n", F::indent(&template.body, "  ")));
        }

        out.push_str(&F::section_header("Funding Sources"));
        for source in &self.funding_sources {
            out.push_str(&format!(
                "  * {}: {} {}\n",
                source.name.bold(),
                source.description,
                source.examples.join(", ").dimmed()
            ));
        }

        let funnel = &self.fundraising_funnel;
        out.push_str(&F::section_header("Funnel"));
        out.push_str(&format!(
            "  outreach {} > intro {} > call {} > term sheet {} ({:.1}% conversion)\n",
            funnel.outreach,
            funnel.intro,
            funnel.call,
            funnel.term_sheet,
            funnel.conversion_rate() * 100.0
        ));
        out
    }
}

/// Depth-first walk from `node`; a node already printed is referenced by id only.
fn decision_walk<'a>(
    tree: &'a ProblemSolverResponse,
    node: &'a DecisionNode,
    depth: usize,
    seen: &mut HashSet<&'a str>,
    out: &mut String,
) {
    let pad = "    ".repeat(depth);
    out.push_str(&format!("{pad}  {}\n", node.question.bold()));
    seen.insert(node.id.as_str());

    for option in &node.options {
        match (&option.next_node_id, &option.answer) {
            (Some(next), _) => match tree.node(next) {
                Some(child) if !seen.contains(child.id.as_str()) => {
                    out.push_str(&format!("{pad}    - {}\n", option.text));
                    decision_walk(tree, child, depth + 1, seen, out);
                }
                _ => out.push_str(&format!("{pad}    - {} {}\n", option.text, format!("-> {next}").dimmed())),
            },
            (None, Some(answer)) => {
                out.push_str(&format!("{pad}    - {}: {}\n", option.text, answer.green()))
            }
            (None, None) => out.push_str(&format!("{pad}    - {}\n", option.text)),
        }
    }
}

fn decision_tree(tree: &ProblemSolverResponse) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    if let Some(root) = tree.root_node() {
        decision_walk(tree, root, 0, &mut seen, &mut out);
    }

    let dangling = tree.dangling_links();
    if !dangling.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            format!("Missing steps: {}", dangling.join(", ")).yellow()
        ));
    }
    out
}

impl ConsoleRender for ProblemSolverResponse {
    fn title(&self) -> String {
        "Problem Solver".to_string()
    }

    fn render(&self) -> String {
        let mut out = F::section_header("Root Cause");
        out.push_str(&format!("{}\n", self.root_cause.diagnosis));
        out.push_str(&F::field("Based on", &self.root_cause.based_on));

        let plan = &self.strategic_breakdown;
        out.push_str(&F::section_header("Plan"));
        for (label, items) in [
            ("This week", &plan.this_week),
            ("This month", &plan.this_month),
            ("In 90 days", &plan.in_90_days),
        ] {
            out.push_str(&format!("{}\n{}", label.yellow().bold(), F::bullets(items)));
        }

        if !self.decision_tree.is_empty() {
            out.push_str(&F::section_header("Decision Tree"));
            out.push_str(&decision_tree(self));
        }

        if !self.benchmarks.is_empty() {
            out.push_str(&F::section_header("Benchmarks"));
            for b in &self.benchmarks {
                out.push_str(&format!("  * {}: {} {}\n", b.metric.bold(), b.value, b.source.dimmed()));
            }
        }

        if !self.case_studies.is_empty() {
            out.push_str(&F::section_header("Case Studies"));
            for study in &self.case_studies {
                out.push_str(&format!(
                    "  * {} ({}): {} {}\n",
                    study.title.bold(),
                    study.source,
                    study.takeaway,
                    study.url.dimmed()
                ));
            }
        }
        out
    }
}
