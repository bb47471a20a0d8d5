// tests/unit_dispatcher_tests.rs

mod common;

use std::io;

use common::{
    FakeExtractor, FakeOutcome, RecordingStore, ScriptedConsole, sample_canonical,
    sqlite_with_canonical,
};
use i18n_catalog::dispatcher::{Choice, CommandDispatcher, Flow, MenuAction, SessionError};
use i18n_catalog::infra::extractor::ExtractError;
use i18n_catalog::initializer::LanguageInitializer;
use i18n_catalog::models::CatalogName;

const HELP: &str = "usage: i18n-catalog [COMMAND]";

/// Runs the standard dispatcher over a scripted session.
fn run_session<S>(
    inputs: &[&str],
    extractor: &mut FakeExtractor,
    initializer: &mut LanguageInitializer<S>,
) -> (ScriptedConsole, Result<(), SessionError>)
where
    S: i18n_catalog::infra::store::MessageStore,
{
    let mut console = ScriptedConsole::new(inputs);
    let result = {
        let mut dispatcher =
            CommandDispatcher::standard(extractor, initializer, None, HELP.to_string());
        dispatcher.run(&mut console)
    };
    (console, result)
}

#[test]
fn test_choice_parsing() {
    assert_eq!(Choice::parse("e"), Choice::Action(MenuAction::Extract));
    assert_eq!(Choice::parse("I"), Choice::Action(MenuAction::Initialize));
    assert_eq!(Choice::parse("  h \n"), Choice::Action(MenuAction::Help));
    assert_eq!(Choice::parse("q"), Choice::Action(MenuAction::Quit));
    assert_eq!(Choice::parse("x"), Choice::Unexpected("x".to_string()));
    assert_eq!(Choice::parse(""), Choice::Unexpected(String::new()));
    assert_eq!(Choice::parse("quit"), Choice::Unexpected("quit".to_string()));
}

#[test]
fn test_menu_lists_every_action() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (console, result) = run_session(&["q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    let out = console.out_text();
    assert!(out.contains("I18n Command"));
    assert!(out.contains("[E]xtract translation messages from sources"));
    assert!(out.contains("[I]nitialize a language"));
    assert!(out.contains("[H]elp"));
    assert!(out.contains("[Q]uit"));
}

#[test]
fn test_invalid_choice_then_help_then_quit() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer =
        LanguageInitializer::new(RecordingStore::with_canonical(&sample_canonical()));

    let (console, result) = run_session(&["x", "h", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert!(console.err_text().contains("You have made an invalid selection"));
    assert!(console.out_text().contains(HELP));
    assert_eq!(console.remaining_inputs(), 0);
    // The menu is shown once per iteration
    assert_eq!(
        console.out.iter().filter(|l| *l == "I18n Command").count(),
        3
    );
    assert_eq!(extractor.calls, 0);
    assert!(!initializer.store().touched());
}

#[test]
fn test_choices_are_case_insensitive() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (console, result) = run_session(&[" E ", "H", " Q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert_eq!(extractor.calls, 1);
    assert!(console.out_text().contains(HELP));
    assert!(console.err.is_empty());
}

#[test]
fn test_initialize_reports_created_count() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(sqlite_with_canonical(&sample_canonical()));

    let (console, result) = run_session(&["i", "en", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert!(console.out_text().contains("Created 4 messages for \"en\""));
    assert!(
        console
            .prompts
            .iter()
            .any(|p| p.contains("Please specify language code"))
    );
    assert_eq!(
        initializer
            .store()
            .count_locale(&CatalogName::default(), "en")
            .unwrap(),
        4
    );
}

#[test]
fn test_invalid_language_keeps_session_running() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer =
        LanguageInitializer::new(RecordingStore::with_canonical(&sample_canonical()));

    let (console, result) =
        run_session(&["i", "x", "i", "en", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert!(console.err_text().contains("Invalid language code"));
    assert!(console.out_text().contains("Created 4 messages for \"en\""));
    assert_eq!(initializer.store().begins, 1);
}

#[test]
fn test_persistence_failure_keeps_session_running() {
    let mut store = RecordingStore::with_canonical(&sample_canonical());
    store.fail_on_insert = Some(1);
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(store);

    let (console, result) = run_session(&["i", "en", "h", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert!(console.err_text().contains("Unable to create messages for \"en\""));
    assert!(console.out_text().contains(HELP));
    assert_eq!(initializer.store().rollbacks, 1);
    assert!(initializer.store().locale_rows("en").is_empty());
}

#[test]
fn test_extractor_failure_aborts_session() {
    let mut extractor = FakeExtractor::new(FakeOutcome::FailWith(3));
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (console, result) = run_session(&["e", "q"], &mut extractor, &mut initializer);

    match result {
        Err(SessionError::Fatal(ExtractError::Failed { code, .. })) => assert_eq!(code, Some(3)),
        other => panic!("expected fatal extractor failure, got {other:?}"),
    }
    // The loop never returned to the menu
    assert_eq!(console.remaining_inputs(), 1);
    assert_eq!(extractor.calls, 1);
}

#[test]
fn test_unconfigured_extractor_is_not_fatal() {
    let mut extractor = FakeExtractor::new(FakeOutcome::NotConfigured);
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (_console, result) = run_session(&["e", "e", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert_eq!(extractor.calls, 2);
}

#[test]
fn test_extractor_output_is_relayed() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (console, result) = run_session(&["e", "q"], &mut extractor, &mut initializer);

    assert!(result.is_ok());
    assert!(console.out_text().contains("fake extraction done"));
}

#[test]
fn test_closed_input_is_console_error() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer = LanguageInitializer::new(RecordingStore::default());

    let (_console, result) = run_session(&["h"], &mut extractor, &mut initializer);

    match result {
        Err(SessionError::Console(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("expected console error, got {other:?}"),
    }
}

#[test]
fn test_closed_input_during_language_prompt() {
    let mut extractor = FakeExtractor::new(FakeOutcome::Completed);
    let mut initializer =
        LanguageInitializer::new(RecordingStore::with_canonical(&sample_canonical()));

    let (_console, result) = run_session(&["i"], &mut extractor, &mut initializer);

    assert!(matches!(result, Err(SessionError::Console(_))));
    assert!(!initializer.store().touched());
}

#[test]
fn test_unregistered_action_is_invalid_choice() {
    let mut helped = 0;
    let mut console = ScriptedConsole::new(&["e", "h", "q"]);

    let result = {
        let mut dispatcher = CommandDispatcher::new()
            .on(MenuAction::Help, |_| {
                helped += 1;
                Ok(Flow::Continue)
            })
            .on(MenuAction::Quit, |_| Ok(Flow::Stop));
        dispatcher.run(&mut console)
    };

    assert!(result.is_ok());
    assert_eq!(helped, 1);
    assert_eq!(console.err.len(), 1);
    assert!(console.err_text().contains("entering E, I, H, or Q"));
}

#[test]
fn test_handler_can_stop_session() {
    let mut console = ScriptedConsole::new(&["h", "q"]);

    let result = CommandDispatcher::new()
        .on(MenuAction::Help, |_| Ok(Flow::Stop))
        .run(&mut console);

    assert!(result.is_ok());
    assert_eq!(console.remaining_inputs(), 1);
}
