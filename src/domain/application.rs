// Domain application module
// The seam the HTTP adapter dispatches into, plus the reference brochure application

use std::collections::HashMap;

use super::command::{Command, CommandProvider, CommandType};
use super::values::{Basics, Section};
use super::UserInterface;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("command {0:?} is not supported")]
    UnsupportedCommand(CommandType),

    #[error("{0}")]
    Processing(String),
}

/// Single entry point of a brochure application
///
/// The interface for the current request is passed in with the command, so one
/// application instance can serve concurrent requests without shared mutable state.
pub trait DomainApplication: Send + Sync {
    /// Resolve the command from `provider` and write exactly one outcome into `ui`.
    ///
    /// Returning `Err` means nothing was written; the caller renders the failure.
    fn process_command(
        &self,
        provider: CommandProvider<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<(), DomainError>;
}

pub type CommandHandler =
    fn(&BrochureApplication, &Command, &mut dyn UserInterface) -> Result<(), DomainError>;

/// Brochure application backed by values fetched once at startup
pub struct BrochureApplication {
    basics: Basics,
    cover_section: Option<Section>,
    command_map: HashMap<CommandType, CommandHandler>,
}

impl BrochureApplication {
    /// Without a cover section the cover command shows the basics only
    pub fn new(basics: Basics, cover_section: Option<Section>) -> Self {
        let mut command_map: HashMap<CommandType, CommandHandler> = HashMap::new();
        command_map.insert(CommandType::ShowCover, show_cover);
        command_map.insert(CommandType::ShowBasics, show_basics);
        command_map.insert(CommandType::Unknown, show_unknown_command);

        Self {
            basics,
            cover_section,
            command_map,
        }
    }

    /// Replace the handler table, e.g. to narrow the supported commands
    #[must_use]
    pub fn with_command_map(mut self, command_map: HashMap<CommandType, CommandHandler>) -> Self {
        self.command_map = command_map;
        self
    }

    pub const fn basics(&self) -> &Basics {
        &self.basics
    }

    pub const fn cover_section(&self) -> Option<&Section> {
        self.cover_section.as_ref()
    }
}

impl DomainApplication for BrochureApplication {
    fn process_command(
        &self,
        provider: CommandProvider<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<(), DomainError> {
        let command = provider();

        let outcome = match self.command_map.get(&command.command_type) {
            Some(handler) => handler(self, &command, ui),
            None => Err(DomainError::UnsupportedCommand(command.command_type)),
        };

        // Basics are always known here, so the failure page can still carry them
        if let Err(error) = outcome {
            tracing::warn!(command = ?command.command_type, error = %error, "command failed");
            ui.show_unexpected_exception(&error, Some(&self.basics));
        }

        Ok(())
    }
}

fn show_cover(
    app: &BrochureApplication,
    _command: &Command,
    ui: &mut dyn UserInterface,
) -> Result<(), DomainError> {
    match &app.cover_section {
        Some(cover_section) => ui.show_cover(cover_section, &app.basics),
        None => ui.show_basics(&app.basics),
    }
    Ok(())
}

fn show_basics(
    app: &BrochureApplication,
    _command: &Command,
    ui: &mut dyn UserInterface,
) -> Result<(), DomainError> {
    ui.show_basics(&app.basics);
    Ok(())
}

fn show_unknown_command(
    app: &BrochureApplication,
    _command: &Command,
    ui: &mut dyn UserInterface,
) -> Result<(), DomainError> {
    ui.show_unknown_command(&app.basics);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommandParameters, ContactMethod, ContactMethodType, Enterprise};
    use std::error::Error;

    #[derive(Default)]
    struct RecordingInterface {
        calls: Vec<String>,
    }

    impl UserInterface for RecordingInterface {
        fn show_cover(&mut self, cover_section: &Section, basics: &Basics) {
            self.calls
                .push(format!("cover:{}:{}", cover_section.title, basics.enterprise.name));
        }

        fn show_basics(&mut self, basics: &Basics) {
            self.calls.push(format!("basics:{}", basics.enterprise.name));
        }

        fn show_unknown_command(&mut self, basics: &Basics) {
            self.calls.push(format!("unknown:{}", basics.enterprise.name));
        }

        fn show_unexpected_exception(
            &mut self,
            error: &(dyn Error + 'static),
            basics: Option<&Basics>,
        ) {
            self.calls
                .push(format!("exception:{error}:{}", basics.is_some()));
        }
    }

    fn application() -> BrochureApplication {
        BrochureApplication::new(
            Basics {
                enterprise: Enterprise {
                    name: "Example Enterprise".to_string(),
                },
                contact_method: Some(ContactMethod {
                    contact_method_type: ContactMethodType::Email,
                    value: "ejemplo@example.com".to_string(),
                }),
            },
            Some(Section {
                title: "Cover Section".to_string(),
                body: "Body text".to_string(),
            }),
        )
    }

    fn run(app: &BrochureApplication, command_type: CommandType) -> Vec<String> {
        let mut ui = RecordingInterface::default();
        let provider: CommandProvider<'_> =
            Box::new(move || Command::new(command_type, CommandParameters::new()));
        app.process_command(provider, &mut ui).unwrap();
        ui.calls
    }

    #[test]
    fn test_show_cover_writes_section_and_basics() {
        assert_eq!(
            run(&application(), CommandType::ShowCover),
            vec!["cover:Cover Section:Example Enterprise"]
        );
    }

    #[test]
    fn test_show_cover_without_section_shows_basics() {
        let app = BrochureApplication::new(application().basics().clone(), None);
        assert_eq!(
            run(&app, CommandType::ShowCover),
            vec!["basics:Example Enterprise"]
        );
    }

    #[test]
    fn test_show_basics() {
        assert_eq!(
            run(&application(), CommandType::ShowBasics),
            vec!["basics:Example Enterprise"]
        );
    }

    #[test]
    fn test_unknown_command_shows_not_found() {
        assert_eq!(
            run(&application(), CommandType::Unknown),
            vec!["unknown:Example Enterprise"]
        );
    }

    #[test]
    fn test_missing_handler_becomes_exception_with_basics() {
        let app = application().with_command_map(HashMap::new());
        assert_eq!(
            run(&app, CommandType::ShowCover),
            vec!["exception:command ShowCover is not supported:true"]
        );
    }

    #[test]
    fn test_failing_handler_becomes_exception() {
        fn failing(
            _app: &BrochureApplication,
            _command: &Command,
            _ui: &mut dyn UserInterface,
        ) -> Result<(), DomainError> {
            Err(DomainError::Processing("cover unavailable".to_string()))
        }

        let mut map: HashMap<CommandType, CommandHandler> = HashMap::new();
        map.insert(CommandType::ShowCover, failing);
        let app = application().with_command_map(map);

        assert_eq!(
            run(&app, CommandType::ShowCover),
            vec!["exception:cover unavailable:true"]
        );
    }

    #[test]
    fn test_provider_is_invoked_exactly_once() {
        let app = application();
        let mut ui = RecordingInterface::default();
        let calls = std::cell::Cell::new(0);
        let provider: CommandProvider<'_> = Box::new(|| {
            calls.set(calls.get() + 1);
            Command::unknown()
        });
        app.process_command(provider, &mut ui).unwrap();
        assert_eq!(calls.get(), 1);
    }
}
