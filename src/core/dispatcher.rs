//! # Command Dispatcher Module / 命令分发模块
//!
//! The operator-facing control loop. Each iteration prints the menu, reads a
//! single-letter choice and routes it through an explicit table of handlers.
//! Only a fatal sub-operation failure (or losing the operator's input) ends
//! the session abnormally; validation and persistence problems are reported
//! and the loop continues.
//!
//! 面向操作员的控制循环。每次迭代打印菜单，读取单个字母的选择，
//! 并通过显式的处理器表进行路由。只有致命的子操作失败（或失去操作员输入）
//! 才会异常结束会话；验证和持久化问题会被报告，循环继续。

use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::debug;

use crate::core::initializer::LanguageInitializer;
use crate::infra::console::Console;
use crate::infra::extractor::{ExtractError, Extractor};
use crate::infra::store::MessageStore;
use crate::infra::t;
use crate::reporting::{print_menu, report_init_result};

/// The fixed set of menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenuAction {
    Extract,
    Initialize,
    Help,
    Quit,
}

impl MenuAction {
    /// Menu order.
    pub const ALL: [MenuAction; 4] = [Self::Extract, Self::Initialize, Self::Help, Self::Quit];

    /// The letter the operator types for this action.
    pub fn key(self) -> &'static str {
        match self {
            Self::Extract => "E",
            Self::Initialize => "I",
            Self::Help => "H",
            Self::Quit => "Q",
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Extract => t!("menu_extract"),
            Self::Initialize => t!("menu_initialize"),
            Self::Help => t!("menu_help"),
            Self::Quit => t!("menu_quit"),
        }
        .to_string()
    }
}

/// A parsed operator answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Action(MenuAction),
    /// Anything outside the menu, kept verbatim for diagnostics.
    Unexpected(String),
}

impl Choice {
    /// Parses a menu answer case-insensitively, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim();
        MenuAction::ALL
            .into_iter()
            .find(|action| action.key().eq_ignore_ascii_case(normalized))
            .map(Self::Action)
            .unwrap_or_else(|| Self::Unexpected(input.to_string()))
    }
}

/// What the loop does after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Reasons a session ends abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A sub-operation signalled an unrecoverable failure.
    #[error(transparent)]
    Fatal(#[from] ExtractError),
    /// Operator input could not be read (closed stdin, terminal error).
    #[error("cannot read operator input: {0}")]
    Console(#[from] io::Error),
}

/// A menu action handler.
pub type Handler<'a> = Box<dyn FnMut(&mut dyn Console) -> Result<Flow, SessionError> + 'a>;

/// Routes operator choices to handlers until Quit or a fatal failure.
#[derive(Default)]
pub struct CommandDispatcher<'a> {
    handlers: BTreeMap<MenuAction, Handler<'a>>,
}

impl<'a> CommandDispatcher<'a> {
    /// An empty dispatcher. Actions without a handler are treated as unexpected input.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) the handler for `action`.
    pub fn on<F>(mut self, action: MenuAction, handler: F) -> Self
    where
        F: FnMut(&mut dyn Console) -> Result<Flow, SessionError> + 'a,
    {
        self.handlers.insert(action, Box::new(handler));
        self
    }

    /// Wires the four standard actions:
    ///
    /// - `E` runs `extractor`; its failure aborts the session
    /// - `I` prompts for a language and runs `initializer` against `catalog`
    /// - `H` prints `help_text`
    /// - `Q` stops the loop
    pub fn standard<S>(
        extractor: &'a mut dyn Extractor,
        initializer: &'a mut LanguageInitializer<S>,
        catalog: Option<String>,
        help_text: String,
    ) -> Self
    where
        S: MessageStore + 'a,
    {
        Self::new()
            .on(MenuAction::Extract, move |console| {
                extractor.extract(console)?;
                Ok(Flow::Continue)
            })
            .on(MenuAction::Initialize, move |console| {
                let language = console.ask(&t!("init_language_prompt"))?;
                let result = initializer.initialize(&language, catalog.as_deref());
                report_init_result(console, &language, &result);
                Ok(Flow::Continue)
            })
            .on(MenuAction::Help, move |console| {
                console.out(&help_text);
                Ok(Flow::Continue)
            })
            .on(MenuAction::Quit, |_| Ok(Flow::Stop))
    }

    /// Runs the session loop.
    ///
    /// Returns `Ok(())` when the operator quits.
    ///
    /// # Errors / 错误
    /// [`SessionError::Fatal`] when a sub-operation fails fatally, and
    /// [`SessionError::Console`] when operator input is lost. The loop does
    /// not return to the menu in either case.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<(), SessionError> {
        let keys: Vec<&str> = MenuAction::ALL.iter().map(|a| a.key()).collect();

        loop {
            print_menu(console);
            let input = console.ask_choice(&t!("menu_prompt"), &keys)?;

            let flow = match Choice::parse(&input) {
                Choice::Action(action) => match self.handlers.get_mut(&action) {
                    Some(handler) => handler(console)?,
                    None => {
                        debug!("No handler registered for {action:?}");
                        console.err(&t!("menu_invalid_choice"));
                        Flow::Continue
                    }
                },
                Choice::Unexpected(raw) => {
                    debug!("Unexpected menu input: {raw:?}");
                    console.err(&t!("menu_invalid_choice"));
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                return Ok(());
            }
            console.hr();
        }
    }
}
