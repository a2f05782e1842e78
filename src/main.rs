//! Terminal front-end for the survey wizard.
//!
//! Stands in for the web UI: renders one screen at a time over
//! stdout, reads answers from stdin, and drives the wizard core
//! (navigation, auto-advance, finalize, CSV export).

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use satm_survey::catalog::{LIKERT_SCALE, QuestionKind};
use satm_survey::config::SurveyConfig;
use satm_survey::export::{self, ExportOptions};
use satm_survey::store::Answer;
use satm_survey::submit::SubmissionDispatcher;
use satm_survey::wizard::{AdvancePolicy, NavEffect, WizardController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SurveyConfig::from_env()?;

    eprintln!("SATM Survey v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Sink: {}", config.form_endpoint);
    eprintln!("   Exports: {}", config.export_dir.display());
    eprintln!("   Commands: [b]ack, [q]uit\n");

    run_wizard(config).await
}

async fn run_wizard(config: SurveyConfig) -> anyhow::Result<()> {
    let mut wizard = WizardController::new();
    let dispatcher = SubmissionDispatcher::for_endpoint(&config.form_endpoint, config.pacing);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&wizard);
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            render(&wizard);
            continue;
        }

        match input {
            "q" => break,
            "b" => {
                apply(wizard.retreat());
                render(&wizard);
            }
            _ => {
                if handle_input(&mut wizard, &dispatcher, &config, &mut lines, input).await? {
                    break;
                }
                render(&wizard);
            }
        }
    }

    Ok(())
}

/// Handle one non-command input line. Returns true when the session
/// is over and the program should exit.
async fn handle_input(
    wizard: &mut WizardController,
    dispatcher: &SubmissionDispatcher,
    config: &SurveyConfig,
    lines: &mut Lines<BufReader<Stdin>>,
    input: &str,
) -> anyhow::Result<bool> {
    let question = wizard.current_question().clone();
    match question.kind {
        QuestionKind::Welcome => {
            if input.eq_ignore_ascii_case("y") {
                wizard.set_consent(true);
                apply(wizard.advance());
            } else {
                println!("Consent is required to begin. Type 'y' to consent, 'q' to quit.");
            }
        }
        QuestionKind::Choice => {
            if let Some(option) = pick_option(&question.options, input) {
                record(wizard, Answer::single(option)).await;
            } else if question.allow_other && input != "n" {
                record(wizard, Answer::single(input)).await;
            } else if input == "n" && wizard.can_continue() {
                apply(wizard.advance());
            } else {
                println!("Pick an option number{}.", other_hint(question.allow_other));
            }
        }
        QuestionKind::Likert => {
            if LIKERT_SCALE.contains(&input) {
                record(wizard, Answer::single(input)).await;
            } else {
                println!("Rate 1 (Strongly Disagree) to 5 (Strongly Agree).");
            }
        }
        QuestionKind::Multi => {
            if input == "n" {
                apply(wizard.advance());
            } else if let Some(option) = pick_option(&question.options, input) {
                wizard.toggle_current_multi(&option);
            } else {
                wizard.toggle_current_multi(input);
            }
        }
        QuestionKind::Text => {
            wizard.record_answer(Answer::single(input));
            if wizard.can_continue() {
                apply(wizard.advance());
            }
        }
        QuestionKind::Submit => match input {
            "s" => {
                println!("Linking to the research sink...");
                if dispatcher.finalize(wizard.store()).await.is_ok() {
                    return run_success_screen(wizard, dispatcher, config, lines).await;
                }
                println!("A submission is already in progress.");
            }
            "d" => export_csv(wizard, config),
            _ => println!("[s]ubmit, [d]ownload CSV backup, [b]ack to review."),
        },
    }
    Ok(false)
}

/// Success screen loop: export, restart, or quit. Returns true to
/// exit the program.
async fn run_success_screen(
    wizard: &mut WizardController,
    dispatcher: &SubmissionDispatcher,
    config: &SurveyConfig,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<bool> {
    clear_screen();
    println!("=== Sync Complete ===\n");
    println!("Thank you. Your contribution has been registered.");
    println!("Manual verification: {}\n", config.fallback_form_url);
    println!("[d]ownload CSV backup, [r]estart, [q]uit");

    loop {
        let Some(line) = lines.next_line().await? else {
            return Ok(true);
        };
        match line.trim() {
            "d" => export_csv(wizard, config),
            "r" => {
                restart_session(wizard, dispatcher).await;
                return Ok(false);
            }
            "q" | "" => return Ok(true),
            _ => println!("[d]ownload CSV backup, [r]estart, [q]uit"),
        }
    }
}

/// Start a fresh session: discard the responses and rearm the
/// dispatcher so the next finalize walks the state machine from idle
/// again.
async fn restart_session(wizard: &mut WizardController, dispatcher: &SubmissionDispatcher) {
    wizard.reset();
    dispatcher.reset().await;
}

/// Record an answer and honor the auto-advance policy.
async fn record(wizard: &mut WizardController, answer: Answer) {
    match wizard.record_answer(answer) {
        AdvancePolicy::Auto(delay) => {
            tokio::time::sleep(delay).await;
            apply(wizard.advance());
        }
        AdvancePolicy::Manual => {}
    }
}

fn export_csv(wizard: &WizardController, config: &SurveyConfig) {
    match export::write_export(
        wizard.store(),
        wizard.catalog(),
        ExportOptions::default(),
        &config.export_dir,
    ) {
        Ok(path) => println!("Saved {}", path.display()),
        Err(e) => println!("Export failed: {e}"),
    }
}

/// Map a typed option number to its label.
fn pick_option(options: &[String], input: &str) -> Option<String> {
    let n: usize = input.parse().ok()?;
    (1..=options.len()).contains(&n).then(|| options[n - 1].clone())
}

fn other_hint(allow_other: bool) -> &'static str {
    if allow_other { ", or type your own answer" } else { "" }
}

fn apply(effect: NavEffect) {
    if effect == NavEffect::ScrollToTop {
        clear_screen();
    }
}

fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

fn render(wizard: &WizardController) {
    let question = wizard.current_question();
    let progress = (wizard.progress_fraction() * 100.0).round();
    println!("--- {progress}% ---");

    match question.kind {
        QuestionKind::Welcome => {
            println!("{}", question.title);
            if let Some(subtitle) = &question.subtitle {
                println!("{subtitle}");
            }
            println!("\nType 'y' to consent to participate in this academic study.");
        }
        QuestionKind::Choice | QuestionKind::Multi => {
            println!("{}", question.title);
            for (i, option) in question.options.iter().enumerate() {
                let marker = if selected(wizard, option) { "x" } else { " " };
                println!("  [{marker}] {}. {option}", i + 1);
            }
            if question.kind == QuestionKind::Multi {
                println!("Toggle by number (or type your own), then 'n' to continue.");
            } else if question.allow_other {
                println!("Pick a number or type your own answer, then 'n' to continue.");
            }
        }
        QuestionKind::Likert => {
            println!("{}", question.title);
            if let Some(subtitle) = &question.subtitle {
                println!("{subtitle}");
            }
        }
        QuestionKind::Text => {
            println!("{}", question.title);
            println!("Type your response and press Enter.");
        }
        QuestionKind::Submit => {
            println!("{}", question.title);
            println!(
                "{} of 45 questions answered.",
                wizard.store().answered().min(45)
            );
            println!("[s]ubmit, [d]ownload CSV backup, [b]ack to review.");
        }
    }
    print!("> ");
    use std::io::Write as _;
    let _ = std::io::stdout().flush();
}

/// Whether an option is currently selected on the rendered screen.
fn selected(wizard: &WizardController, option: &str) -> bool {
    match wizard.store().answer(wizard.current_question().entry_index) {
        Some(Answer::Single(s)) => s == option,
        Some(Answer::Multi(items)) => items.iter().any(|i| i == option),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use satm_survey::channels::DeliveryChannel;
    use satm_survey::error::DeliveryError;
    use satm_survey::submit::{SubmissionPacing, SubmissionState};

    use super::*;

    /// Stub channel counting deliveries; no network traffic.
    struct CountingChannel {
        deliveries: AtomicUsize,
    }

    #[async_trait]
    impl DeliveryChannel for CountingChannel {
        fn name(&self) -> &str {
            "counting"
        }

        async fn deliver(&self, _fields: &[(String, String)]) -> Result<(), DeliveryError> {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_restart_rearms_dispatcher_for_a_second_submission() {
        let channel = Arc::new(CountingChannel {
            deliveries: AtomicUsize::new(0),
        });
        let dispatcher = SubmissionDispatcher::new(
            vec![Arc::clone(&channel) as Arc<dyn DeliveryChannel>],
            SubmissionPacing {
                linking_delay: Duration::from_millis(5),
                settle_delay: Duration::from_millis(5),
            },
        );

        let mut wizard = WizardController::new();
        wizard.set_consent(true);
        wizard.advance();
        wizard.record_answer(Answer::single("21-23"));

        dispatcher.finalize(wizard.store()).await.unwrap();
        assert_eq!(dispatcher.state().await, SubmissionState::Complete);

        restart_session(&mut wizard, &dispatcher).await;
        assert_eq!(dispatcher.state().await, SubmissionState::Idle);
        assert_eq!(wizard.cursor(), 0);
        assert!(wizard.store().answer(1).is_none());

        // The second session's finalize walks the state machine again
        // and refires the channels instead of silently reporting
        // success from a stuck Complete state.
        dispatcher.finalize(wizard.store()).await.unwrap();
        assert_eq!(dispatcher.state().await, SubmissionState::Complete);
        assert_eq!(channel.deliveries.load(Ordering::SeqCst), 2);
    }
}
