//! Console commands.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List commands.
    Help,
    /// Leave the program.
    Quit,
    /// List down payment options.
    Ratios,
    /// List periods offered for a down payment percentage, or with none selected.
    Periods(Option<u32>),
    /// Quote a price.
    Quote {
        /// Price text exactly as typed.
        price: String,
        /// Down payment in whole percent.
        ratio_percent: u32,
        /// Lease period.
        period: u32,
    },
    /// Show the rate table.
    Rates,
    /// Show the settings draft.
    Show,
    /// Append a ratio entry.
    AddRatio,
    /// Append a period entry.
    AddPeriod,
    /// Overwrite a ratio entry (1-based).
    SetRatio {
        /// Entry position.
        index: usize,
        /// New percentage.
        percent: u32,
    },
    /// Overwrite a period entry (1-based).
    SetPeriod {
        /// Entry position.
        index: usize,
        /// New installment count.
        installments: u32,
    },
    /// Remove a ratio entry (1-based).
    RemoveRatio(usize),
    /// Remove a period entry (1-based).
    RemovePeriod(usize),
    /// Edit a rate cell.
    SetRate {
        /// Row period.
        period: u32,
        /// Column ratio in whole percent.
        ratio_percent: u32,
        /// Rate percentage.
        percent: Decimal,
    },
    /// Apply and persist the draft.
    Save,
    /// Discard the draft.
    Cancel,
}

/// Console parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unrecognized command word.
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Argument is not a number.
    #[error("'{value}' is not a valid {what}")]
    Number {
        /// What the argument should be.
        what: &'static str,
        /// Argument as typed.
        value: String,
    },
}

/// Command summary shown by `help`.
pub const HELP: &[&str] = &[
    "quote <price> <ratio%> <period>   quote a lease plan",
    "ratios                            list down payment options",
    "periods [ratio%]                  list periods offered for a down payment",
    "rates                             show the rate table",
    "quit                              exit",
];

/// Command summary shown inside the settings editor.
pub const EDITOR_HELP: &[&str] = &[
    "show                              show the draft",
    "add-ratio | add-period            append an entry",
    "set-ratio <n> <percent>           change ratio entry n",
    "set-period <n> <installments>     change period entry n",
    "remove-ratio <n> | remove-period <n>",
    "rate <period> <ratio%> <percent>  change a rate cell",
    "save | cancel                     apply or discard the draft",
];

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            ("ratios", []) => Self::Ratios,
            ("rates", []) => Self::Rates,
            ("periods", []) => Self::Periods(None),
            ("periods", [ratio]) => Self::Periods(Some(percent_arg(ratio)?)),
            ("periods", _) => return Err(CommandError::Usage("periods [ratio%]")),
            ("quote", [price, ratio, period]) => Self::Quote {
                price: (*price).to_string(),
                ratio_percent: percent_arg(ratio)?,
                period: number(period, "period")?,
            },
            ("quote", _) => return Err(CommandError::Usage("quote <price> <ratio%> <period>")),
            ("show", []) => Self::Show,
            ("add-ratio", []) => Self::AddRatio,
            ("add-period", []) => Self::AddPeriod,
            ("set-ratio", [index, percent]) => Self::SetRatio {
                index: number(index, "entry number")?,
                percent: percent_arg(percent)?,
            },
            ("set-ratio", _) => return Err(CommandError::Usage("set-ratio <n> <percent>")),
            ("set-period", [index, installments]) => Self::SetPeriod {
                index: number(index, "entry number")?,
                installments: number(installments, "period")?,
            },
            ("set-period", _) => return Err(CommandError::Usage("set-period <n> <installments>")),
            ("remove-ratio", [index]) => Self::RemoveRatio(number(index, "entry number")?),
            ("remove-ratio", _) => return Err(CommandError::Usage("remove-ratio <n>")),
            ("remove-period", [index]) => Self::RemovePeriod(number(index, "entry number")?),
            ("remove-period", _) => return Err(CommandError::Usage("remove-period <n>")),
            ("rate", [period, ratio, percent]) => Self::SetRate {
                period: number(period, "period")?,
                ratio_percent: percent_arg(ratio)?,
                percent: number(percent.trim_end_matches('%'), "rate")?,
            },
            ("rate", _) => return Err(CommandError::Usage("rate <period> <ratio%> <percent>")),
            ("save", []) => Self::Save,
            ("cancel", []) => Self::Cancel,
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

impl Command {
    /// Returns true if the command only makes sense inside the settings editor.
    #[must_use]
    pub const fn is_editor_command(&self) -> bool {
        matches!(
            self,
            Self::Show
                | Self::AddRatio
                | Self::AddPeriod
                | Self::SetRatio { .. }
                | Self::SetPeriod { .. }
                | Self::RemoveRatio(_)
                | Self::RemovePeriod(_)
                | Self::SetRate { .. }
                | Self::Save
                | Self::Cancel
        )
    }
}

fn percent_arg(text: &str) -> Result<u32, CommandError> {
    number(text.trim_end_matches('%'), "percentage")
}

fn number<T: FromStr>(text: &str, what: &'static str) -> Result<T, CommandError> {
    text.parse().map_err(|_| CommandError::Number {
        what,
        value: text.to_string(),
    })
}
