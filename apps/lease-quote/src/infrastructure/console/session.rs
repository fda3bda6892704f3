//! Console session: one calculator page, driven line by line.

use rust_decimal::Decimal;

use super::command::{Command, EDITOR_HELP, HELP};
use crate::application::dto::{QuoteView, RateTableView, percent_label};
use crate::application::ports::SettingsStore;
use crate::application::services::{CalculatorService, SaveOutcome};
use crate::domain::quoting::{Quote, QuoteError};
use crate::domain::rate_table::SettingsDraft;
use crate::domain::shared::{DomainError, Period, Ratio};
use crate::error::ErrorCode;

/// Output of one handled line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print.
    pub lines: Vec<String>,
    /// The session is over.
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Interactive calculator session over a settings store.
pub struct ConsoleSession<S>
where
    S: SettingsStore,
{
    service: CalculatorService<S>,
    draft: Option<SettingsDraft>,
}

impl<S> ConsoleSession<S>
where
    S: SettingsStore,
{
    /// Start a session.
    pub const fn new(service: CalculatorService<S>) -> Self {
        Self {
            service,
            draft: None,
        }
    }

    /// The underlying calculator.
    pub const fn service(&self) -> &CalculatorService<S> {
        &self.service
    }

    /// Returns true while the settings editor is open.
    pub const fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Handle one input line.
    pub fn handle(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::default();
        }

        if self.draft.is_none() && self.service.is_admin_trigger(line) {
            tracing::info!("Settings editor opened");
            let draft = self.service.settings_draft();
            let reply = Reply::lines(draft_lines(&draft));
            self.draft = Some(draft);
            return reply;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return Reply::line(e.to_string()),
        };

        if command.is_editor_command() {
            return match self.draft.take() {
                Some(draft) => self.edit(draft, command),
                None => Reply::line("the settings editor is not open"),
            };
        }

        match command {
            Command::Help => {
                let mut lines: Vec<String> = HELP.iter().map(ToString::to_string).collect();
                if self.draft.is_some() {
                    lines.extend(EDITOR_HELP.iter().map(ToString::to_string));
                }
                Reply::lines(lines)
            }
            Command::Quit => Reply {
                lines: Vec::new(),
                quit: true,
            },
            Command::Ratios => self.ratios(),
            Command::Periods(percent) => self.periods(percent),
            Command::Quote {
                price,
                ratio_percent,
                period,
            } => self.quote(&price, ratio_percent, period),
            Command::Rates => {
                Reply::lines(RateTableView::from(self.service.configuration()).lines())
            }
            _ => Reply::default(),
        }
    }

    fn ratios(&self) -> Reply {
        let options = self.service.ratio_options();
        let lines = options
            .choices
            .iter()
            .map(|ratio| {
                let marker = if options.selected == Some(*ratio) { "*" } else { " " };
                format!("{marker} {ratio}")
            })
            .collect();
        Reply::lines(lines)
    }

    fn periods(&self, percent: Option<u32>) -> Reply {
        let ratio = match percent.map(Ratio::from_percent).transpose() {
            Ok(ratio) => ratio,
            Err(e) => return Reply::line(e.to_string()),
        };
        let options = self.service.period_options(ratio);
        if options.choices.is_empty() {
            return Reply::line("no periods offered");
        }
        let lines = options
            .choices
            .iter()
            .map(|period| {
                let marker = if options.selected == Some(*period) { "*" } else { " " };
                format!("{marker} {period}")
            })
            .collect();
        Reply::lines(lines)
    }

    fn quote(&self, price: &str, ratio_percent: u32, period: u32) -> Reply {
        match self.calculate(price, ratio_percent, period) {
            Ok(quote) => Reply::lines(QuoteView::from(&quote).lines()),
            Err(e) => {
                let code = ErrorCode::from(&e);
                match &e {
                    QuoteError::Validation { .. } => {
                        Reply::lines(vec![code.user_message().to_string(), e.to_string()])
                    }
                    QuoteError::Computation { .. } => Reply::line(code.user_message()),
                }
            }
        }
    }

    fn calculate(&self, price: &str, ratio_percent: u32, period: u32) -> Result<Quote, QuoteError> {
        let ratio = Ratio::from_percent(ratio_percent)?;
        let period = Period::new(period)?;
        self.service.on_calculate(price, ratio, period)
    }

    fn edit(&mut self, mut draft: SettingsDraft, command: Command) -> Reply {
        let result: Result<(), DomainError> = match command {
            Command::AddRatio => {
                draft.add_ratio();
                Ok(())
            }
            Command::AddPeriod => {
                draft.add_period();
                Ok(())
            }
            Command::SetRatio { index, percent } => {
                position(index, "ratio").and_then(|i| draft.set_ratio(i, percent))
            }
            Command::SetPeriod {
                index,
                installments,
            } => position(index, "period").and_then(|i| draft.set_period(i, installments)),
            Command::RemoveRatio(index) => position(index, "ratio")
                .and_then(|i| draft.remove_ratio(i))
                .map(|_| ()),
            Command::RemovePeriod(index) => position(index, "period")
                .and_then(|i| draft.remove_period(i))
                .map(|_| ()),
            Command::SetRate {
                period,
                ratio_percent,
                percent,
            } => set_rate(&mut draft, period, ratio_percent, percent),
            Command::Save => return self.save(draft),
            Command::Cancel => return Reply::line("settings discarded"),
            _ => Ok(()),
        };

        let reply = match result {
            Ok(()) => Reply::lines(draft_lines(&draft)),
            Err(e) => Reply::line(e.to_string()),
        };
        self.draft = Some(draft);
        reply
    }

    fn save(&mut self, draft: SettingsDraft) -> Reply {
        match self.service.save_draft(draft.clone()) {
            Ok(SaveOutcome::Persisted) => Reply::line("settings saved"),
            Ok(SaveOutcome::Failed { .. }) => Reply::lines(vec![
                "settings applied".to_string(),
                ErrorCode::Persistence.user_message().to_string(),
            ]),
            Err(e) => {
                self.draft = Some(draft);
                Reply::line(e.to_string())
            }
        }
    }
}

/// Entry numbers on the console start at 1.
fn position(number: usize, field: &str) -> Result<usize, DomainError> {
    number
        .checked_sub(1)
        .ok_or_else(|| DomainError::invalid(field, "no entry 0, entries are numbered from 1"))
}

fn set_rate(
    draft: &mut SettingsDraft,
    period: u32,
    ratio_percent: u32,
    percent: Decimal,
) -> Result<(), DomainError> {
    let period = Period::new(period)?;
    let ratio = Ratio::from_percent(ratio_percent)?;
    draft.set_rate(period, ratio, percent)
}

fn draft_lines(draft: &SettingsDraft) -> Vec<String> {
    let ratios = draft
        .ratio_percents()
        .iter()
        .enumerate()
        .map(|(i, percent)| format!("{}:{percent}%", i + 1))
        .collect::<Vec<_>>()
        .join("  ");
    let periods = draft
        .periods()
        .iter()
        .enumerate()
        .map(|(i, period)| format!("{}:{period}", i + 1))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![format!("ratios   {ratios}"), format!("periods  {periods}")];
    lines.extend(draft.cells().iter().map(|cell| {
        format!(
            "  {:>3} x {:<5} {}",
            cell.period,
            cell.ratio,
            percent_label(cell.percent)
        )
    }));
    lines
}
