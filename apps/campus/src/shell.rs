//! Line-oriented interactive session: one command per line, the current view
//! is re-rendered after every state change.

use std::io::{BufRead, Write};

use anyhow::Result;
use events_core::{share::share_link, Command, Effect};
use shared::{
    domain::{EventId, ProfileFields, View},
    error::CoreError,
};
use storage::KeyValueStore;

use crate::{
    app::{notifications, App},
    render::render,
    share_targets,
};

pub const HELP: &str = "\
Views:     events | my | calendar | profile | show <id>
Events:    register <id> | unregister <id> | company <id> | share <id>
Filters:   filters | close | time <today|week|month|upcoming> | category <name>
           location <name> | clear
Calendar:  day <n>
Profile:   set <username|about|course|specialty|hobbies> <value>
           interest add <text> | interest rm <text>
Other:     help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    About,
    Course,
    Specialty,
    Hobbies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Core(Command),
    SetProfileField(ProfileField, String),
    Share(EventId),
    Help,
    Quit,
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ShellAction, CoreError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match verb {
        "" => ShellAction::Nothing,
        "help" | "?" => ShellAction::Help,
        "quit" | "exit" => ShellAction::Quit,
        "events" => navigate(View::Events, None),
        "my" | "my-events" => navigate(View::MyEvents, None),
        "calendar" => navigate(View::Calendar, None),
        "profile" => navigate(View::Profile, None),
        "show" => navigate(View::EventDetails, Some(event_id(rest)?)),
        "register" => ShellAction::Core(Command::Register {
            event_id: event_id(rest)?,
        }),
        "unregister" => ShellAction::Core(Command::Unregister {
            event_id: event_id(rest)?,
        }),
        "company" | "find-company" => ShellAction::Core(Command::FindCompany {
            event_id: event_id(rest)?,
        }),
        "share" => ShellAction::Share(event_id(rest)?),
        "filters" => ShellAction::Core(Command::OpenFilterModal),
        "close" => ShellAction::Core(Command::CloseFilterModal),
        "time" => ShellAction::Core(Command::ToggleTimeFilter(rest.parse()?)),
        "category" => ShellAction::Core(Command::ToggleCategoryFilter(rest.parse()?)),
        "location" => ShellAction::Core(Command::ToggleLocationFilter(rest.parse()?)),
        "clear" => ShellAction::Core(Command::ClearFilters),
        "day" => {
            let day = rest
                .parse()
                .map_err(|_| CoreError::validation(format!("not a day of the month: {rest}")))?;
            ShellAction::Core(Command::SelectDate { day })
        }
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ShellAction::SetProfileField(profile_field(field)?, value.trim().to_string())
        }
        "interest" => {
            let (op, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let interest = text.trim().to_string();
            match op {
                "add" => ShellAction::Core(Command::AddInterest {
                    interest,
                    pending: None,
                }),
                "rm" | "remove" => ShellAction::Core(Command::RemoveInterest {
                    interest,
                    pending: None,
                }),
                other => {
                    return Err(CoreError::validation(format!(
                        "unknown interest operation: {other}"
                    )))
                }
            }
        }
        other => return Err(CoreError::validation(format!("unknown command: {other}"))),
    };
    Ok(action)
}

fn navigate(view: View, event_id: Option<EventId>) -> ShellAction {
    ShellAction::Core(Command::Navigate { view, event_id })
}

fn event_id(raw: &str) -> Result<EventId, CoreError> {
    if raw.is_empty() {
        return Err(CoreError::validation("an event id is required"));
    }
    Ok(EventId::new(raw))
}

fn profile_field(raw: &str) -> Result<ProfileField, CoreError> {
    match raw {
        "username" | "name" => Ok(ProfileField::Username),
        "about" => Ok(ProfileField::About),
        "course" => Ok(ProfileField::Course),
        "specialty" => Ok(ProfileField::Specialty),
        "hobbies" => Ok(ProfileField::Hobbies),
        other => Err(CoreError::validation(format!("unknown profile field: {other}"))),
    }
}

/// Profile form values with one field replaced.
pub fn edited_fields(current: ProfileFields, field: ProfileField, value: String) -> ProfileFields {
    let mut fields = current;
    match field {
        ProfileField::Username => fields.username = value,
        ProfileField::About => fields.about = value,
        ProfileField::Course => fields.course = value,
        ProfileField::Specialty => fields.specialty = value,
        ProfileField::Hobbies => fields.hobbies = value,
    }
    fields
}

pub async fn run<S, R, W>(app: &mut App<S>, input: R, mut output: W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", render(app.controller(), app.share_base()))?;
    writeln!(output, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let action = match parse_line(&line) {
            Ok(action) => action,
            Err(error) => {
                writeln!(output, "{}", error.message)?;
                continue;
            }
        };

        let command = match action {
            ShellAction::Nothing => continue,
            ShellAction::Quit => break,
            ShellAction::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            ShellAction::Share(id) => {
                match app.controller().state().find_event(&id) {
                    Some(event) => share_targets::share(&share_link(event, app.share_base())),
                    None => writeln!(output, "No event with id {id}")?,
                }
                continue;
            }
            ShellAction::SetProfileField(field, value) => {
                let current = ProfileFields::from(&app.controller().state().profile);
                Command::SaveProfile(edited_fields(current, field, value))
            }
            ShellAction::Core(command) => command,
        };

        match app.apply(command).await {
            Ok(effects) => {
                for message in notifications(&effects) {
                    writeln!(output, "{message}")?;
                }
                if effects.contains(&Effect::Render) {
                    writeln!(output, "{}", render(app.controller(), app.share_base()))?;
                }
            }
            Err(error) => match error.downcast_ref::<CoreError>() {
                Some(rejected) => writeln!(output, "{}", rejected.message)?,
                None => return Err(error),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
