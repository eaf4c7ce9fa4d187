// Line commands understood by the terminal front-end
use crate::filters::{parse_country, parse_year, FilterError, HolidayType, Month};
use crate::search_view::Action;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),

    #[error("Invalid argument for `{command}`: {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Apply(Vec<Action>),
    Options,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  country <CODE>|clear     pick a country (required)
  year <YYYY>|clear        pick a year (required)
  month <1-12>|clear       restrict to one month
  type <TYPE>|clear        national, local, religious or observance
  search [text]            set the search text and run the search
  go                       run the search
  next | prev | page <n>   move between result pages
  show <n>                 open the n-th holiday on this page
  close                    close the holiday details
  options                  list the available choices
  help                     show this text
  quit                     exit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let actions = match name.to_lowercase().as_str() {
        "country" => match optional(arg, "country")? {
            Some(code) => vec![Action::SetCountry(Some(parse_country(code)?))],
            None => vec![Action::SetCountry(None)],
        },
        "year" => match optional(arg, "year")? {
            Some(year) => vec![Action::SetYear(Some(parse_year(year)?))],
            None => vec![Action::SetYear(None)],
        },
        "month" => {
            let month = optional(arg, "month")?
                .map(str::parse::<Month>)
                .transpose()?;
            vec![Action::SetMonth(month)]
        }
        "type" => {
            let holiday_type = optional(arg, "type")?
                .map(str::parse::<HolidayType>)
                .transpose()?;
            vec![Action::SetHolidayType(holiday_type)]
        }
        "search" => vec![
            Action::SetSearchText(arg.to_string()),
            Action::SubmitSearchText,
        ],
        "go" => vec![Action::Search],
        "next" => vec![Action::NextPage],
        "prev" | "previous" => vec![Action::PreviousPage],
        "page" => vec![Action::GoToPage(number(arg, "page")?)],
        "show" => {
            let position = number(arg, "show")?;
            if position == 0 {
                return Err(CommandError::InvalidArgument {
                    command: "show",
                    value: arg.to_string(),
                });
            }
            vec![Action::SelectHoliday(position - 1)]
        }
        "close" => vec![Action::DismissHoliday],
        "options" => return Ok(Command::Options),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Command::Apply(actions))
}

// `clear` resets an optional value, anything else is the new value
fn optional<'a>(arg: &'a str, command: &'static str) -> Result<Option<&'a str>, CommandError> {
    match arg {
        "" => Err(CommandError::MissingArgument(command)),
        "clear" | "none" => Ok(None),
        value => Ok(Some(value)),
    }
}

fn number(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    arg.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: arg.to_string(),
    })
}
